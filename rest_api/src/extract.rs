// rest_api/src/extract.rs

use axum::async_trait;
use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, FromRequestParts, Request};
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use axum::Json;
use serde::de::DeserializeOwned;

use models::refs::UserRef;
use models::role::Role;
use security::{verify_token, Claims};

use crate::error::ApiError;
use crate::state::AppState;

/// The authenticated caller, decoded from the Bearer token.
#[derive(Debug, Clone)]
pub struct AuthUser(pub Claims);

impl AuthUser {
    /// Returns 403 unless the caller's role permits the required one.
    /// Admin passes every guard.
    pub fn require(&self, required: Role) -> Result<(), ApiError> {
        if self.0.role.permits(required) {
            Ok(())
        } else {
            Err(ApiError::Forbidden(format!(
                "{} role required",
                required.as_str()
            )))
        }
    }

    /// The stamp written into documents created by this session.
    pub fn stamp(&self) -> UserRef {
        self.0.to_user_ref()
    }
}

#[async_trait]
impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| ApiError::Unauthorized("missing authorization header".to_string()))?;

        let token = header
            .strip_prefix("Bearer ")
            .ok_or_else(|| ApiError::Unauthorized("expected a bearer token".to_string()))?;

        let claims = verify_token(token, &state.jwt)
            .map_err(|_| ApiError::Unauthorized("missing or invalid token".to_string()))?;
        Ok(AuthUser(claims))
    }
}

/// `Json` that reports malformed bodies with the error envelope instead
/// of Axum's plain-text rejection.
pub struct ApiJson<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for ApiJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(ApiJson(value)),
            Err(rejection) => Err(ApiError::BadRequest(body_message(rejection))),
        }
    }
}

fn body_message(rejection: JsonRejection) -> String {
    format!("invalid request body: {}", rejection.body_text())
}
