// models/src/order.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::refs::UserRef;

/// Order lifecycle. Completed and Cancelled are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderStatus {
    Active,
    Completed,
    Cancelled,
}

impl Default for OrderStatus {
    fn default() -> Self {
        OrderStatus::Active
    }
}

/// Creation payload: which patient goes to which doctor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewOrder {
    pub patient_id: Uuid,
    pub doctor_id: Uuid,
    #[serde(default)]
    pub status: Option<OrderStatus>,
}

/// A reception-created assignment of a patient to a doctor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: Uuid,
    pub patient_id: Uuid,
    pub assigned_doctor: UserRef,
    pub status: OrderStatus,
    pub created_by: UserRef,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Order {
    pub fn new(
        patient_id: Uuid,
        assigned_doctor: UserRef,
        status: Option<OrderStatus>,
        created_by: UserRef,
    ) -> Self {
        let now = Utc::now();
        Order {
            id: Uuid::new_v4(),
            patient_id,
            assigned_doctor,
            status: status.unwrap_or_default(),
            created_by,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn is_active(&self) -> bool {
        self.status == OrderStatus::Active
    }

    pub fn set_status(&mut self, status: OrderStatus) {
        self.status = status;
        self.updated_at = Utc::now();
    }
}

/// Status patch for an existing order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderUpdate {
    pub status: OrderStatus,
}
