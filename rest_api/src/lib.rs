// rest_api/src/lib.rs
// Route table and server loop. Handlers live in `handlers/`, grouped the
// way the screens group them: registration, orders, medical records,
// billing, reports.

pub mod error;
pub mod extract;
pub mod handlers;
pub mod state;

pub use crate::error::ApiError;
pub use crate::extract::{ApiJson, AuthUser};
pub use crate::state::AppState;

use std::net::SocketAddr;

use anyhow::{Context, Error as AnyhowError};
use axum::http::Method;
use axum::routing::{get, patch, post};
use axum::Router;
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tower_http::cors::{Any, CorsLayer};
use tracing::info;

use crate::handlers::{
    appointments, auth, billing, images, medical, orders, patients, reports, service, users,
};

/// Assembles the full route table over the shared state.
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::PATCH, Method::DELETE])
        .allow_origin(Any);

    Router::new()
        .route("/api/health", get(service::health_check))
        .route("/api/version", get(service::version))
        .route("/api/auth/login", post(auth::login))
        .route("/api/users", post(users::create_user).get(users::list_users))
        .route("/api/users/counts", get(users::user_counts))
        .route("/api/users/doctors", get(users::list_doctors))
        .route(
            "/api/users/:id",
            get(users::get_user)
                .patch(users::update_user)
                .delete(users::delete_user),
        )
        .route(
            "/api/patients",
            post(patients::create_patient).get(patients::list_patients),
        )
        .route("/api/patients/find", get(patients::find_patient))
        .route("/api/patients/search", get(patients::search_patients))
        .route("/api/patients/count", get(patients::count_patients))
        .route(
            "/api/patients/registrations/monthly",
            get(patients::registrations_by_month),
        )
        .route(
            "/api/patients/:id",
            get(patients::get_patient)
                .patch(patients::update_patient)
                .delete(patients::delete_patient),
        )
        .route("/api/orders", post(orders::create_order))
        .route("/api/orders/active", get(orders::active_orders))
        .route("/api/orders/queue", get(orders::doctor_queue))
        .route(
            "/api/orders/:id",
            get(orders::get_order).patch(orders::update_order),
        )
        .route(
            "/api/patients/:id/findings",
            post(medical::create_finding).get(medical::list_findings),
        )
        .route(
            "/api/findings/:id",
            get(medical::get_finding)
                .patch(medical::update_finding)
                .delete(medical::delete_finding),
        )
        .route(
            "/api/patients/:id/treatments",
            post(medical::create_treatment).get(medical::list_treatments),
        )
        .route(
            "/api/treatments/:id",
            get(medical::get_treatment)
                .patch(medical::update_treatment)
                .delete(medical::delete_treatment),
        )
        .route(
            "/api/patients/:id/healthinfo",
            post(medical::create_health_info).get(medical::list_health_info),
        )
        .route(
            "/api/healthinfo/:id",
            get(medical::get_health_info)
                .patch(medical::update_health_info)
                .delete(medical::delete_health_info),
        )
        .route(
            "/api/patients/:id/appointments",
            post(appointments::create_appointment).get(appointments::list_appointments),
        )
        .route("/api/appointments/today", get(appointments::today))
        .route(
            "/api/appointments/:id",
            get(appointments::get_appointment)
                .patch(appointments::update_appointment)
                .delete(appointments::delete_appointment),
        )
        .route(
            "/api/patients/:id/images",
            post(images::upload_image).get(images::list_images),
        )
        .route(
            "/api/images/:id",
            get(images::get_image).delete(images::delete_image),
        )
        .route("/api/patients/:id/invoices", post(billing::create_invoice))
        .route(
            "/api/invoices/unconfirmed",
            get(billing::unconfirmed_invoices),
        )
        .route("/api/invoices/:id", get(billing::get_invoice))
        .route("/api/invoices/:id/confirm", patch(billing::confirm_payment))
        .route("/api/patients/:id/cards", post(billing::issue_card))
        .route("/api/cards", get(billing::list_cards))
        .route("/api/reports/invoices", post(reports::invoice_report))
        .route("/api/reports/totals", get(reports::report_totals))
        .route("/api/reports/monthly", get(reports::monthly_report))
        .with_state(state)
        .layer(cors)
}

// Main function to start the REST API server
pub async fn start_server(
    port: u16,
    state: AppState,
    shutdown_rx: oneshot::Receiver<()>,
) -> Result<(), AnyhowError> {
    let app = build_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = TcpListener::bind(&addr)
        .await
        .context(format!("Failed to bind to address: {}", addr))?;
    info!(%addr, "REST API server listening");

    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(async {
            let _ = shutdown_rx.await;
            info!("received shutdown signal");
        })
        .await
        .context("REST API server failed to start or run")?;

    info!("REST API server stopped");
    Ok(())
}
