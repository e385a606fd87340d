// rest_api/src/handlers/auth.rs

use axum::extract::State;
use axum::Json;
use serde_json::{json, Value};

use models::user::Login;
use security::login_user;

use crate::error::ApiError;
use crate::extract::ApiJson;
use crate::state::AppState;

// Handler for POST /api/auth/login
pub async fn login(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<Login>,
) -> Result<Json<Value>, ApiError> {
    let (token, user) = login_user(payload, &state.db.users, &state.jwt).await?;
    Ok(Json(json!({
        "token": token,
        "user": user,
    })))
}
