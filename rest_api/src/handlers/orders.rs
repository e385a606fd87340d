// rest_api/src/handlers/orders.rs
// Reception assigns a registered patient to a doctor; the doctor works
// the resulting queue until the order leaves Active.

use std::collections::HashMap;

use axum::extract::{Path, State};
use axum::Json;
use serde::Serialize;
use uuid::Uuid;

use models::order::{NewOrder, Order, OrderUpdate};
use models::patient::{Patient, PatientLink};
use models::role::Role;
use storage::orders::OrderStore;
use storage::patients::PatientStore;
use storage::users::UserStore;

use crate::error::ApiError;
use crate::extract::{ApiJson, AuthUser};
use crate::state::AppState;

/// One row of the reception dashboard: a patient and their open orders.
#[derive(Debug, Serialize)]
pub struct ActiveOrderSummary {
    pub patient_id: Uuid,
    pub first_name: String,
    pub card_no: String,
    pub order_ids: Vec<Uuid>,
}

// Handler for POST /api/orders
pub async fn create_order(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiJson(payload): ApiJson<NewOrder>,
) -> Result<Json<Order>, ApiError> {
    auth.require(Role::Reception)?;
    let patient = state
        .db
        .patients
        .get_patient(&payload.patient_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("patient".to_string()))?;
    // A user id that does not belong to a doctor is no doctor at all.
    let doctor = state
        .db
        .users
        .get_user(&payload.doctor_id)
        .await?
        .filter(|user| user.role == Role::Doctor)
        .ok_or_else(|| ApiError::NotFound("doctor".to_string()))?;

    let order = Order::new(patient.id, doctor.to_ref(), payload.status, auth.stamp());
    state.db.orders.add_order(&order).await?;
    state
        .db
        .patients
        .append_link(&patient.id, PatientLink::Order, order.id)
        .await?;
    Ok(Json(order))
}

// Handler for GET /api/orders/active
pub async fn active_orders(
    State(state): State<AppState>,
    _auth: AuthUser,
) -> Result<Json<Vec<ActiveOrderSummary>>, ApiError> {
    let orders = state.db.orders.list_active().await?;

    let mut summaries: Vec<ActiveOrderSummary> = Vec::new();
    let mut slots: HashMap<Uuid, usize> = HashMap::new();
    for order in orders {
        if let Some(&slot) = slots.get(&order.patient_id) {
            summaries[slot].order_ids.push(order.id);
            continue;
        }
        // Orders are not retracted when their patient is deleted.
        let Some(patient) = state.db.patients.get_patient(&order.patient_id).await? else {
            continue;
        };
        slots.insert(order.patient_id, summaries.len());
        summaries.push(ActiveOrderSummary {
            patient_id: patient.id,
            first_name: patient.first_name,
            card_no: patient.card_no,
            order_ids: vec![order.id],
        });
    }
    Ok(Json(summaries))
}

// Handler for GET /api/orders/queue
pub async fn doctor_queue(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<Vec<Patient>>, ApiError> {
    auth.require(Role::Doctor)?;
    let orders = state.db.orders.list_active_for_doctor(&auth.0.sub).await?;

    let mut patients: Vec<Patient> = Vec::new();
    for order in &orders {
        if patients.iter().any(|patient| patient.id == order.patient_id) {
            continue;
        }
        if let Some(patient) = state.db.patients.get_patient(&order.patient_id).await? {
            patients.push(patient);
        }
    }
    if patients.is_empty() {
        return Err(ApiError::NotFound("queued patient".to_string()));
    }
    Ok(Json(patients))
}

// Handler for GET /api/orders/{id}
pub async fn get_order(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Order>, ApiError> {
    let order = state
        .db
        .orders
        .get_order(&id)
        .await?
        .ok_or_else(|| ApiError::NotFound("order".to_string()))?;
    Ok(Json(order))
}

// Handler for PATCH /api/orders/{id}
pub async fn update_order(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<Uuid>,
    ApiJson(update): ApiJson<OrderUpdate>,
) -> Result<Json<Order>, ApiError> {
    let mut order = state
        .db
        .orders
        .get_order(&id)
        .await?
        .ok_or_else(|| ApiError::NotFound("order".to_string()))?;
    order.set_status(update.status);
    state.db.orders.update_order(&order).await?;
    Ok(Json(order))
}
