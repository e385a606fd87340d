// rest_api/src/handlers/appointments.rs

use axum::extract::{Path, State};
use axum::Json;
use chrono::{Duration, NaiveTime, Utc};
use serde_json::{json, Value};
use uuid::Uuid;

use models::appointment::{Appointment, AppointmentUpdate, NewAppointment};
use models::patient::PatientLink;
use models::role::Role;
use storage::appointments::AppointmentStore;
use storage::patients::PatientStore;
use storage::users::UserStore;

use crate::error::ApiError;
use crate::extract::{ApiJson, AuthUser};
use crate::handlers::fetch_patient;
use crate::state::AppState;

// Handler for POST /api/patients/{id}/appointments
pub async fn create_appointment(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(patient_id): Path<Uuid>,
    ApiJson(payload): ApiJson<NewAppointment>,
) -> Result<Json<Appointment>, ApiError> {
    let patient = fetch_patient(&state, &patient_id).await?;
    let doctor = state
        .db
        .users
        .get_user(&payload.doctor_id)
        .await?
        .filter(|user| user.role == Role::Doctor)
        .ok_or_else(|| ApiError::NotFound("doctor".to_string()))?;

    let appointment = Appointment::new(
        patient.to_ref(),
        doctor.to_ref(),
        payload.appointment_date,
        payload.status,
        auth.stamp(),
    );
    state.db.appointments.add_appointment(&appointment).await?;
    state
        .db
        .patients
        .append_link(&patient.id, PatientLink::Appointment, appointment.id)
        .await?;
    Ok(Json(appointment))
}

// Handler for GET /api/patients/{id}/appointments
pub async fn list_appointments(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(patient_id): Path<Uuid>,
) -> Result<Json<Vec<Appointment>>, ApiError> {
    fetch_patient(&state, &patient_id).await?;
    Ok(Json(
        state.db.appointments.list_for_patient(&patient_id).await?,
    ))
}

// Handler for GET /api/appointments/today
pub async fn today(
    State(state): State<AppState>,
    _auth: AuthUser,
) -> Result<Json<Vec<Appointment>>, ApiError> {
    let start = Utc::now().date_naive().and_time(NaiveTime::MIN).and_utc();
    let end = start + Duration::days(1) - Duration::milliseconds(1);
    Ok(Json(state.db.appointments.list_in_window(start, end).await?))
}

// Handler for GET /api/appointments/{id}
pub async fn get_appointment(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Appointment>, ApiError> {
    let appointment = state
        .db
        .appointments
        .get_appointment(&id)
        .await?
        .ok_or_else(|| ApiError::NotFound("appointment".to_string()))?;
    Ok(Json(appointment))
}

// Handler for PATCH /api/appointments/{id}
pub async fn update_appointment(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<Uuid>,
    ApiJson(update): ApiJson<AppointmentUpdate>,
) -> Result<Json<Appointment>, ApiError> {
    let mut appointment = state
        .db
        .appointments
        .get_appointment(&id)
        .await?
        .ok_or_else(|| ApiError::NotFound("appointment".to_string()))?;
    appointment.apply_update(update);
    state.db.appointments.update_appointment(&appointment).await?;
    Ok(Json(appointment))
}

// Handler for DELETE /api/appointments/{id}
pub async fn delete_appointment(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, ApiError> {
    if !state.db.appointments.delete_appointment(&id).await? {
        return Err(ApiError::NotFound("appointment".to_string()));
    }
    Ok(Json(json!({
        "status": "success",
        "message": "appointment deleted",
    })))
}
