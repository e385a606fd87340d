// models/src/image.rs
// Metadata only; the bytes live on disk under the configured upload
// directory, keyed by `file_name`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::refs::UserRef;

/// Captured from the multipart upload before the record is built.
#[derive(Debug, Clone, PartialEq)]
pub struct NewImageRecord {
    pub file_name: String,
    pub original_name: String,
    pub content_type: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageRecord {
    pub id: Uuid,
    pub patient_id: Uuid,
    pub file_name: String,
    pub original_name: String,
    pub content_type: String,
    pub description: Option<String>,
    pub created_by: UserRef,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ImageRecord {
    pub fn from_new(patient_id: Uuid, upload: NewImageRecord, created_by: UserRef) -> Self {
        let now = Utc::now();
        ImageRecord {
            id: Uuid::new_v4(),
            patient_id,
            file_name: upload.file_name,
            original_name: upload.original_name,
            content_type: upload.content_type,
            description: upload.description,
            created_by,
            created_at: now,
            updated_at: now,
        }
    }
}
