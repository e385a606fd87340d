// rest_api/src/handlers/patients.rs
// Registration and lookups. Uniqueness of card_no, email and phone_number
// is enforced by the store before anything is persisted.

use std::collections::BTreeMap;

use axum::extract::{Path, Query, State};
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};
use uuid::Uuid;

use models::patient::{NewPatient, Patient, PatientUpdate};
use models::role::Role;
use storage::patients::PatientStore;

use crate::error::ApiError;
use crate::extract::{ApiJson, AuthUser};
use crate::handlers::require_filled;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct FindParams {
    pub first_name: Option<String>,
    pub card_no: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub first_name: Option<String>,
    pub phone_number: Option<String>,
}

// Handler for POST /api/patients
pub async fn create_patient(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiJson(payload): ApiJson<NewPatient>,
) -> Result<Json<Patient>, ApiError> {
    auth.require(Role::Reception)?;
    require_filled(&payload.card_no, "card_no")?;
    require_filled(&payload.first_name, "first_name")?;
    require_filled(&payload.email, "email")?;
    require_filled(&payload.phone_number, "phone_number")?;

    let patient = Patient::from_new_patient(payload, auth.stamp());
    state.db.patients.add_patient(&patient).await?;
    Ok(Json(patient))
}

// Handler for GET /api/patients
pub async fn list_patients(
    State(state): State<AppState>,
    _auth: AuthUser,
) -> Result<Json<Vec<Patient>>, ApiError> {
    Ok(Json(state.db.patients.list_patients().await?))
}

// Handler for GET /api/patients/{id}
pub async fn get_patient(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Patient>, ApiError> {
    let patient = state
        .db
        .patients
        .get_patient(&id)
        .await?
        .ok_or_else(|| ApiError::NotFound("patient".to_string()))?;
    Ok(Json(patient))
}

// Handler for PATCH /api/patients/{id}
pub async fn update_patient(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    ApiJson(update): ApiJson<PatientUpdate>,
) -> Result<Json<Patient>, ApiError> {
    auth.require(Role::Reception)?;
    let mut patient = state
        .db
        .patients
        .get_patient(&id)
        .await?
        .ok_or_else(|| ApiError::NotFound("patient".to_string()))?;
    patient.apply_update(update);
    state.db.patients.update_patient(&patient).await?;
    Ok(Json(patient))
}

// Handler for DELETE /api/patients/{id}
pub async fn delete_patient(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, ApiError> {
    auth.require(Role::Admin)?;
    if !state.db.patients.delete_patient(&id).await? {
        return Err(ApiError::NotFound("patient".to_string()));
    }
    // Child documents stay behind; there is no cascade.
    Ok(Json(json!({
        "status": "success",
        "message": "patient deleted",
    })))
}

// Handler for GET /api/patients/find
pub async fn find_patient(
    State(state): State<AppState>,
    _auth: AuthUser,
    Query(params): Query<FindParams>,
) -> Result<Json<Patient>, ApiError> {
    let found = if let Some(first_name) = params.first_name.as_deref() {
        state.db.patients.find_by_first_name(first_name).await?
    } else if let Some(card_no) = params.card_no.as_deref() {
        state.db.patients.find_by_card_no(card_no).await?
    } else {
        return Err(ApiError::BadRequest(
            "first_name or card_no query parameter is required".to_string(),
        ));
    };

    found
        .map(Json)
        .ok_or_else(|| ApiError::NotFound("patient".to_string()))
}

// Handler for GET /api/patients/search
pub async fn search_patients(
    State(state): State<AppState>,
    _auth: AuthUser,
    Query(params): Query<SearchParams>,
) -> Result<Json<Vec<Patient>>, ApiError> {
    if params.first_name.is_none() && params.phone_number.is_none() {
        return Err(ApiError::BadRequest(
            "first_name or phone_number query parameter is required".to_string(),
        ));
    }

    let matches = state
        .db
        .patients
        .search(params.first_name.as_deref(), params.phone_number.as_deref())
        .await?;
    if matches.is_empty() {
        return Err(ApiError::NotFound("matching patient".to_string()));
    }
    Ok(Json(matches))
}

// Handler for GET /api/patients/count
pub async fn count_patients(
    State(state): State<AppState>,
    _auth: AuthUser,
) -> Result<Json<Value>, ApiError> {
    let total = state.db.patients.count_patients().await?;
    Ok(Json(json!({ "total": total })))
}

// Handler for GET /api/patients/registrations/monthly
pub async fn registrations_by_month(
    State(state): State<AppState>,
    _auth: AuthUser,
) -> Result<Json<BTreeMap<String, u64>>, ApiError> {
    Ok(Json(state.db.patients.registrations_by_month().await?))
}
