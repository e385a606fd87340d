// rest_api/src/handlers/medical.rs
// Per-patient medical records. Findings and treatments are written by
// doctors; the intake health summary is open to any staff role. Edits
// replace the form content wholesale, keeping identity and provenance.

use axum::extract::{Path, State};
use axum::Json;
use serde_json::{json, Value};
use uuid::Uuid;

use models::finding::{MedicalFinding, NewMedicalFinding};
use models::healthinfo::{HealthInfo, HealthInfoUpdate, NewHealthInfo};
use models::patient::PatientLink;
use models::role::Role;
use models::treatment::{MedicalTreatment, NewMedicalTreatment};
use storage::findings::FindingStore;
use storage::healthinfo::HealthInfoStore;
use storage::patients::PatientStore;
use storage::treatments::TreatmentStore;

use crate::error::ApiError;
use crate::extract::{ApiJson, AuthUser};
use crate::handlers::fetch_patient;
use crate::state::AppState;

// Handler for POST /api/patients/{id}/findings
pub async fn create_finding(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(patient_id): Path<Uuid>,
    ApiJson(content): ApiJson<NewMedicalFinding>,
) -> Result<Json<MedicalFinding>, ApiError> {
    auth.require(Role::Doctor)?;
    let patient = fetch_patient(&state, &patient_id).await?;

    let finding = MedicalFinding::from_new(patient.id, content, auth.stamp());
    state.db.findings.add_finding(&finding).await?;
    state
        .db
        .patients
        .append_link(&patient.id, PatientLink::Finding, finding.id)
        .await?;
    Ok(Json(finding))
}

// Handler for GET /api/patients/{id}/findings
pub async fn list_findings(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(patient_id): Path<Uuid>,
) -> Result<Json<Vec<MedicalFinding>>, ApiError> {
    fetch_patient(&state, &patient_id).await?;
    Ok(Json(state.db.findings.list_for_patient(&patient_id).await?))
}

// Handler for GET /api/findings/{id}
pub async fn get_finding(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<MedicalFinding>, ApiError> {
    let finding = state
        .db
        .findings
        .get_finding(&id)
        .await?
        .ok_or_else(|| ApiError::NotFound("finding".to_string()))?;
    Ok(Json(finding))
}

// Handler for PATCH /api/findings/{id}
pub async fn update_finding(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    ApiJson(content): ApiJson<NewMedicalFinding>,
) -> Result<Json<MedicalFinding>, ApiError> {
    auth.require(Role::Doctor)?;
    let mut finding = state
        .db
        .findings
        .get_finding(&id)
        .await?
        .ok_or_else(|| ApiError::NotFound("finding".to_string()))?;
    finding.overwrite(content);
    state.db.findings.update_finding(&finding).await?;
    Ok(Json(finding))
}

// Handler for DELETE /api/findings/{id}
pub async fn delete_finding(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, ApiError> {
    auth.require(Role::Doctor)?;
    if !state.db.findings.delete_finding(&id).await? {
        return Err(ApiError::NotFound("finding".to_string()));
    }
    Ok(Json(json!({
        "status": "success",
        "message": "finding deleted",
    })))
}

// Handler for POST /api/patients/{id}/treatments
pub async fn create_treatment(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(patient_id): Path<Uuid>,
    ApiJson(content): ApiJson<NewMedicalTreatment>,
) -> Result<Json<MedicalTreatment>, ApiError> {
    auth.require(Role::Doctor)?;
    let patient = fetch_patient(&state, &patient_id).await?;

    let treatment = MedicalTreatment::from_new(patient.id, content, auth.stamp());
    state.db.treatments.add_treatment(&treatment).await?;
    state
        .db
        .patients
        .append_link(&patient.id, PatientLink::Treatment, treatment.id)
        .await?;
    Ok(Json(treatment))
}

// Handler for GET /api/patients/{id}/treatments
pub async fn list_treatments(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(patient_id): Path<Uuid>,
) -> Result<Json<Vec<MedicalTreatment>>, ApiError> {
    fetch_patient(&state, &patient_id).await?;
    Ok(Json(
        state.db.treatments.list_for_patient(&patient_id).await?,
    ))
}

// Handler for GET /api/treatments/{id}
pub async fn get_treatment(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<MedicalTreatment>, ApiError> {
    let treatment = state
        .db
        .treatments
        .get_treatment(&id)
        .await?
        .ok_or_else(|| ApiError::NotFound("treatment".to_string()))?;
    Ok(Json(treatment))
}

// Handler for PATCH /api/treatments/{id}
pub async fn update_treatment(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    ApiJson(content): ApiJson<NewMedicalTreatment>,
) -> Result<Json<MedicalTreatment>, ApiError> {
    auth.require(Role::Doctor)?;
    let mut treatment = state
        .db
        .treatments
        .get_treatment(&id)
        .await?
        .ok_or_else(|| ApiError::NotFound("treatment".to_string()))?;
    treatment.overwrite(content);
    state.db.treatments.update_treatment(&treatment).await?;
    Ok(Json(treatment))
}

// Handler for DELETE /api/treatments/{id}
pub async fn delete_treatment(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, ApiError> {
    auth.require(Role::Doctor)?;
    if !state.db.treatments.delete_treatment(&id).await? {
        return Err(ApiError::NotFound("treatment".to_string()));
    }
    Ok(Json(json!({
        "status": "success",
        "message": "treatment deleted",
    })))
}

// Handler for POST /api/patients/{id}/healthinfo
pub async fn create_health_info(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(patient_id): Path<Uuid>,
    ApiJson(content): ApiJson<NewHealthInfo>,
) -> Result<Json<HealthInfo>, ApiError> {
    let patient = fetch_patient(&state, &patient_id).await?;

    let info = HealthInfo::from_new(patient.id, content, auth.stamp());
    state.db.health_infos.add_health_info(&info).await?;
    state
        .db
        .patients
        .append_link(&patient.id, PatientLink::HealthInfo, info.id)
        .await?;
    Ok(Json(info))
}

// Handler for GET /api/patients/{id}/healthinfo
pub async fn list_health_info(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(patient_id): Path<Uuid>,
) -> Result<Json<Vec<HealthInfo>>, ApiError> {
    fetch_patient(&state, &patient_id).await?;
    Ok(Json(
        state.db.health_infos.list_for_patient(&patient_id).await?,
    ))
}

// Handler for GET /api/healthinfo/{id}
pub async fn get_health_info(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<HealthInfo>, ApiError> {
    let info = state
        .db
        .health_infos
        .get_health_info(&id)
        .await?
        .ok_or_else(|| ApiError::NotFound("health info".to_string()))?;
    Ok(Json(info))
}

// Handler for PATCH /api/healthinfo/{id}
pub async fn update_health_info(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<Uuid>,
    ApiJson(update): ApiJson<HealthInfoUpdate>,
) -> Result<Json<HealthInfo>, ApiError> {
    let mut info = state
        .db
        .health_infos
        .get_health_info(&id)
        .await?
        .ok_or_else(|| ApiError::NotFound("health info".to_string()))?;
    info.apply_update(update);
    state.db.health_infos.update_health_info(&info).await?;
    Ok(Json(info))
}

// Handler for DELETE /api/healthinfo/{id}
pub async fn delete_health_info(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, ApiError> {
    if !state.db.health_infos.delete_health_info(&id).await? {
        return Err(ApiError::NotFound("health info".to_string()));
    }
    Ok(Json(json!({
        "status": "success",
        "message": "health info deleted",
    })))
}
