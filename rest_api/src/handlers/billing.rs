// rest_api/src/handlers/billing.rs
// Invoices are issued by the treating doctor; the payment sitting in
// `current_payment` is confirmed at the reception desk. Confirmation
// folds the amount into the totals exactly once and writes the History
// snapshot the reports sum over.

use axum::extract::{Path, State};
use axum::Json;
use uuid::Uuid;

use models::card::{Card, NewCard};
use models::history::History;
use models::invoice::{Invoice, NewInvoice};
use models::patient::PatientLink;
use models::role::Role;
use storage::cards::CardStore;
use storage::history::HistoryStore;
use storage::invoices::InvoiceStore;
use storage::patients::PatientStore;

use crate::error::ApiError;
use crate::extract::{ApiJson, AuthUser};
use crate::handlers::fetch_patient;
use crate::state::AppState;

// Handler for POST /api/patients/{id}/invoices
pub async fn create_invoice(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(patient_id): Path<Uuid>,
    ApiJson(payload): ApiJson<NewInvoice>,
) -> Result<Json<Invoice>, ApiError> {
    auth.require(Role::Doctor)?;
    if payload.items.is_empty() {
        return Err(ApiError::BadRequest(
            "an invoice needs at least one item".to_string(),
        ));
    }
    let patient = fetch_patient(&state, &patient_id).await?;

    let invoice = Invoice::from_new(payload, patient.to_ref(), auth.stamp());
    state.db.invoices.add_invoice(&invoice).await?;
    state
        .db
        .patients
        .append_link(&patient.id, PatientLink::Invoice, invoice.id)
        .await?;
    Ok(Json(invoice))
}

// Handler for GET /api/invoices/unconfirmed
pub async fn unconfirmed_invoices(
    State(state): State<AppState>,
    _auth: AuthUser,
) -> Result<Json<Vec<Invoice>>, ApiError> {
    Ok(Json(state.db.invoices.list_unconfirmed().await?))
}

// Handler for GET /api/invoices/{id}
pub async fn get_invoice(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Invoice>, ApiError> {
    let invoice = state
        .db
        .invoices
        .get_invoice(&id)
        .await?
        .ok_or_else(|| ApiError::NotFound("invoice".to_string()))?;
    Ok(Json(invoice))
}

// Handler for PATCH /api/invoices/{id}/confirm
pub async fn confirm_payment(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Invoice>, ApiError> {
    auth.require(Role::Reception)?;
    let mut invoice = state
        .db
        .invoices
        .get_invoice(&id)
        .await?
        .ok_or_else(|| ApiError::NotFound("invoice".to_string()))?;

    // A repeat confirmation changes nothing and writes no second row.
    if invoice.confirm_payment() {
        state.db.invoices.update_invoice(&invoice).await?;
        state
            .db
            .history
            .add_history(&History::from_confirmed(&invoice))
            .await?;
    }
    Ok(Json(invoice))
}

// Handler for POST /api/patients/{id}/cards
pub async fn issue_card(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(patient_id): Path<Uuid>,
    ApiJson(payload): ApiJson<NewCard>,
) -> Result<Json<Card>, ApiError> {
    let patient = fetch_patient(&state, &patient_id).await?;

    let card = Card::from_new(payload, patient.to_ref(), auth.stamp());
    state.db.cards.add_card(&card).await?;
    state
        .db
        .patients
        .append_link(&patient.id, PatientLink::Card, card.id)
        .await?;
    Ok(Json(card))
}

// Handler for GET /api/cards
pub async fn list_cards(
    State(state): State<AppState>,
    _auth: AuthUser,
) -> Result<Json<Vec<Card>>, ApiError> {
    Ok(Json(state.db.cards.list_cards().await?))
}
