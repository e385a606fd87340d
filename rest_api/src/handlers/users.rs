// rest_api/src/handlers/users.rs
// Account administration. Mutations are admin-gated; the lookups feeding
// forms and dashboards are open to any authenticated role.

use axum::extract::{Path, State};
use axum::Json;
use serde_json::{json, Value};
use uuid::Uuid;

use models::refs::UserRef;
use models::role::Role;
use models::user::{NewUser, PublicUser, User, UserUpdate};
use storage::users::UserStore;

use crate::error::ApiError;
use crate::extract::{ApiJson, AuthUser};
use crate::handlers::require_filled;
use crate::state::AppState;

// Handler for POST /api/users
pub async fn create_user(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiJson(payload): ApiJson<NewUser>,
) -> Result<Json<PublicUser>, ApiError> {
    auth.require(Role::Admin)?;
    require_filled(&payload.username, "username")?;
    require_filled(&payload.password, "password")?;
    require_filled(&payload.phone, "phone")?;

    let user = User::from_new_user(payload)
        .map_err(|e| ApiError::Internal(format!("password hashing failed: {}", e)))?;
    state.db.users.add_user(&user).await?;
    Ok(Json(user.to_public()))
}

// Handler for GET /api/users
pub async fn list_users(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<Vec<PublicUser>>, ApiError> {
    auth.require(Role::Admin)?;
    let users = state.db.users.list_users().await?;
    Ok(Json(users.iter().map(User::to_public).collect()))
}

// Handler for GET /api/users/{id}
pub async fn get_user(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<PublicUser>, ApiError> {
    let user = state
        .db
        .users
        .get_user(&id)
        .await?
        .ok_or_else(|| ApiError::NotFound("user".to_string()))?;
    Ok(Json(user.to_public()))
}

// Handler for PATCH /api/users/{id}
pub async fn update_user(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    ApiJson(update): ApiJson<UserUpdate>,
) -> Result<Json<PublicUser>, ApiError> {
    auth.require(Role::Admin)?;
    let mut user = state
        .db
        .users
        .get_user(&id)
        .await?
        .ok_or_else(|| ApiError::NotFound("user".to_string()))?;
    user.apply_update(update)
        .map_err(|e| ApiError::Internal(format!("password hashing failed: {}", e)))?;
    state.db.users.update_user(&user).await?;
    Ok(Json(user.to_public()))
}

// Handler for DELETE /api/users/{id}
pub async fn delete_user(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, ApiError> {
    auth.require(Role::Admin)?;
    if !state.db.users.delete_user(&id).await? {
        return Err(ApiError::NotFound("user".to_string()));
    }
    Ok(Json(json!({
        "status": "success",
        "message": "user deleted",
    })))
}

// Handler for GET /api/users/counts
pub async fn user_counts(
    State(state): State<AppState>,
    _auth: AuthUser,
) -> Result<Json<Vec<Value>>, ApiError> {
    let counts = state.db.users.count_by_role().await?;
    let rows = counts
        .into_iter()
        .map(|(role, count)| json!({ "role": role, "count": count }))
        .collect();
    Ok(Json(rows))
}

// Handler for GET /api/users/doctors
pub async fn list_doctors(
    State(state): State<AppState>,
    _auth: AuthUser,
) -> Result<Json<Vec<UserRef>>, ApiError> {
    let doctors = state.db.users.list_doctors().await?;
    Ok(Json(doctors.iter().map(User::to_ref).collect()))
}
