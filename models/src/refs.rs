// models/src/refs.rs
// Denormalised stamps embedded in documents in place of joins.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The creating or assigned staff member, as stamped into a document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserRef {
    pub id: Uuid,
    pub username: String,
}

/// The patient a billing document belongs to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatientRef {
    pub id: Uuid,
    pub username: String,
    pub card_no: String,
}
