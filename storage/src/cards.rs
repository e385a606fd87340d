// storage/src/cards.rs

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sled::Db;
use uuid::Uuid;

use models::card::Card;
use models::errors::ClinicResult;

use crate::tree::DocTree;

#[async_trait]
pub trait CardStore: Send + Sync + 'static {
    async fn add_card(&self, card: &Card) -> ClinicResult<()>;
    async fn get_card(&self, id: &Uuid) -> ClinicResult<Option<Card>>;
    async fn list_cards(&self) -> ClinicResult<Vec<Card>>;
    /// Cards issued inside `[start, end]`, for the revenue reports.
    async fn list_in_window(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> ClinicResult<Vec<Card>>;
}

/// Sled-backed implementation of the `CardStore` trait.
pub struct SledCardStore {
    tree: DocTree<Card>,
}

impl SledCardStore {
    /// Opens the "cards" tree on the given database.
    pub fn new(db: &Db) -> ClinicResult<Self> {
        Ok(Self {
            tree: DocTree::open(db, "cards")?,
        })
    }
}

#[async_trait]
impl CardStore for SledCardStore {
    async fn add_card(&self, card: &Card) -> ClinicResult<()> {
        self.tree.put(&card.id, card)
    }

    async fn get_card(&self, id: &Uuid) -> ClinicResult<Option<Card>> {
        self.tree.get(id)
    }

    async fn list_cards(&self) -> ClinicResult<Vec<Card>> {
        self.tree.all()
    }

    async fn list_in_window(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> ClinicResult<Vec<Card>> {
        self.tree
            .filter(|card| card.created_at >= start && card.created_at <= end)
    }
}

#[cfg(test)]
mod tests {
    use super::{CardStore, SledCardStore};
    use chrono::{Duration, Utc};
    use models::card::{Card, NewCard};
    use models::refs::{PatientRef, UserRef};
    use uuid::Uuid;

    fn card() -> Card {
        Card::from_new(
            NewCard::default(),
            PatientRef {
                id: Uuid::new_v4(),
                username: "Abebe".to_string(),
                card_no: "C-1".to_string(),
            },
            UserRef {
                id: Uuid::new_v4(),
                username: "frontdesk".to_string(),
            },
        )
    }

    #[tokio::test]
    async fn window_excludes_cards_outside_range() {
        let db = sled::Config::new().temporary(true).open().unwrap();
        let store = SledCardStore::new(&db).unwrap();

        let card = card();
        store.add_card(&card).await.unwrap();

        let now = Utc::now();
        let hit = store
            .list_in_window(now - Duration::hours(1), now)
            .await
            .unwrap();
        assert_eq!(hit.len(), 1);

        let miss = store
            .list_in_window(now - Duration::days(2), now - Duration::days(1))
            .await
            .unwrap();
        assert!(miss.is_empty());
    }
}
