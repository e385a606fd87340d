// rest_api/src/handlers/mod.rs

pub mod appointments;
pub mod auth;
pub mod billing;
pub mod images;
pub mod medical;
pub mod orders;
pub mod patients;
pub mod reports;
pub mod service;
pub mod users;

use uuid::Uuid;

use models::errors::ValidationError;
use models::patient::Patient;
use storage::patients::PatientStore;

use crate::error::ApiError;
use crate::state::AppState;

/// Rejects blank required fields before anything touches storage.
pub(crate) fn require_filled(value: &str, field: &'static str) -> Result<(), ApiError> {
    if value.trim().is_empty() {
        return Err(ApiError::BadRequest(
            ValidationError::MissingField(field).to_string(),
        ));
    }
    Ok(())
}

/// Resolves the patient a nested route hangs off, or 404.
pub(crate) async fn fetch_patient(state: &AppState, id: &Uuid) -> Result<Patient, ApiError> {
    state
        .db
        .patients
        .get_patient(id)
        .await?
        .ok_or_else(|| ApiError::NotFound("patient".to_string()))
}
