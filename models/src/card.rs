// models/src/card.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::refs::{PatientRef, UserRef};

pub const DEFAULT_CARD_PRICE: f64 = 200.0;

/// Issue payload; the price falls back to the flat default.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NewCard {
    pub card_price: Option<f64>,
}

/// A flat-fee registration card issued to a patient.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Card {
    pub id: Uuid,
    pub patient: PatientRef,
    pub card_price: f64,
    pub created_by: UserRef,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Card {
    pub fn from_new(new_card: NewCard, patient: PatientRef, created_by: UserRef) -> Self {
        let now = Utc::now();
        Card {
            id: Uuid::new_v4(),
            patient,
            card_price: new_card.card_price.unwrap_or(DEFAULT_CARD_PRICE),
            created_by,
            created_at: now,
            updated_at: now,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Card, NewCard, DEFAULT_CARD_PRICE};
    use crate::refs::{PatientRef, UserRef};
    use uuid::Uuid;

    fn issue(new_card: NewCard) -> Card {
        let patient = PatientRef {
            id: Uuid::new_v4(),
            username: "Abebe".to_string(),
            card_no: "C-1001".to_string(),
        };
        let desk = UserRef {
            id: Uuid::new_v4(),
            username: "frontdesk".to_string(),
        };
        Card::from_new(new_card, patient, desk)
    }

    #[test]
    fn should_fall_back_to_default_price() {
        assert_eq!(issue(NewCard::default()).card_price, DEFAULT_CARD_PRICE);
    }

    #[test]
    fn should_keep_explicit_price() {
        let card = issue(NewCard {
            card_price: Some(350.0),
        });
        assert_eq!(card.card_price, 350.0);
    }
}
