// models/src/healthinfo.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::refs::UserRef;

/// Intake health summary. Any staff role may record one.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NewHealthInfo {
    pub blood_group: Option<String>,
    pub weight: Option<String>,
    pub height: Option<String>,
    pub allergies: Option<String>,
    pub habits: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthInfo {
    pub id: Uuid,
    pub patient_id: Uuid,
    pub blood_group: Option<String>,
    pub weight: Option<String>,
    pub height: Option<String>,
    pub allergies: Option<String>,
    pub habits: Option<String>,
    pub created_by: UserRef,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl HealthInfo {
    pub fn from_new(patient_id: Uuid, content: NewHealthInfo, created_by: UserRef) -> Self {
        let now = Utc::now();
        HealthInfo {
            id: Uuid::new_v4(),
            patient_id,
            blood_group: content.blood_group,
            weight: content.weight,
            height: content.height,
            allergies: content.allergies,
            habits: content.habits,
            created_by,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn apply_update(&mut self, update: HealthInfoUpdate) {
        if let Some(blood_group) = update.blood_group {
            self.blood_group = Some(blood_group);
        }
        if let Some(weight) = update.weight {
            self.weight = Some(weight);
        }
        if let Some(height) = update.height {
            self.height = Some(height);
        }
        if let Some(allergies) = update.allergies {
            self.allergies = Some(allergies);
        }
        if let Some(habits) = update.habits {
            self.habits = Some(habits);
        }
        self.updated_at = Utc::now();
    }
}

/// Partial update; absent fields stay untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HealthInfoUpdate {
    pub blood_group: Option<String>,
    pub weight: Option<String>,
    pub height: Option<String>,
    pub allergies: Option<String>,
    pub habits: Option<String>,
}
