// storage/src/history.rs
// Append-only payment snapshots. Reports sum over these rows.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sled::Db;

use models::errors::ClinicResult;
use models::history::History;

use crate::tree::DocTree;

#[async_trait]
pub trait HistoryStore: Send + Sync + 'static {
    async fn add_history(&self, history: &History) -> ClinicResult<()>;
    async fn list_history(&self) -> ClinicResult<Vec<History>>;
    /// Rows recorded inside `[start, end]`.
    async fn list_in_window(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> ClinicResult<Vec<History>>;
    /// Rows whose invoice was created by the given username.
    async fn list_for_username(&self, username: &str) -> ClinicResult<Vec<History>>;
}

/// Sled-backed implementation of the `HistoryStore` trait.
pub struct SledHistoryStore {
    tree: DocTree<History>,
}

impl SledHistoryStore {
    /// Opens the "history" tree on the given database.
    pub fn new(db: &Db) -> ClinicResult<Self> {
        Ok(Self {
            tree: DocTree::open(db, "history")?,
        })
    }
}

#[async_trait]
impl HistoryStore for SledHistoryStore {
    async fn add_history(&self, history: &History) -> ClinicResult<()> {
        self.tree.put(&history.id, history)
    }

    async fn list_history(&self) -> ClinicResult<Vec<History>> {
        self.tree.all()
    }

    async fn list_in_window(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> ClinicResult<Vec<History>> {
        self.tree
            .filter(|row| row.created_at >= start && row.created_at <= end)
    }

    async fn list_for_username(&self, username: &str) -> ClinicResult<Vec<History>> {
        self.tree
            .filter(|row| row.invoice.created.username == username)
    }
}

#[cfg(test)]
mod tests {
    use super::{HistoryStore, SledHistoryStore};
    use chrono::{Duration, Utc};
    use models::history::{History, HistoryInvoice};
    use models::refs::{PatientRef, UserRef};
    use uuid::Uuid;

    fn row(username: &str, amount: f64) -> History {
        History {
            id: Uuid::new_v4(),
            invoice: HistoryInvoice {
                id: Uuid::new_v4(),
                amount,
                created: UserRef {
                    id: Uuid::new_v4(),
                    username: username.to_string(),
                },
                customer: PatientRef {
                    id: Uuid::new_v4(),
                    username: "Abebe".to_string(),
                    card_no: "C-1".to_string(),
                },
            },
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn should_filter_rows_by_creating_username() {
        let db = sled::Config::new().temporary(true).open().unwrap();
        let store = SledHistoryStore::new(&db).unwrap();

        store.add_history(&row("drwho", 100.0)).await.unwrap();
        store.add_history(&row("drwho", 250.0)).await.unwrap();
        store.add_history(&row("drstrange", 75.0)).await.unwrap();

        let rows = store.list_for_username("drwho").await.unwrap();
        assert_eq!(rows.len(), 2);
        let total: f64 = rows.iter().map(|r| r.invoice.amount).sum();
        assert_eq!(total, 350.0);
    }

    #[tokio::test]
    async fn window_bounds_are_inclusive() {
        let db = sled::Config::new().temporary(true).open().unwrap();
        let store = SledHistoryStore::new(&db).unwrap();

        let row = row("drwho", 100.0);
        store.add_history(&row).await.unwrap();

        let exact = store
            .list_in_window(row.created_at, row.created_at)
            .await
            .unwrap();
        assert_eq!(exact.len(), 1);

        let before = store
            .list_in_window(
                row.created_at - Duration::days(2),
                row.created_at - Duration::days(1),
            )
            .await
            .unwrap();
        assert!(before.is_empty());
    }
}
