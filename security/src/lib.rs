// security/src/lib.rs

use std::time::{SystemTime, UNIX_EPOCH};

use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;
use uuid::Uuid;

use models::refs::UserRef;
use models::role::Role;
use models::user::{Login, NewUser, PublicUser, User};
use storage::users::UserStore;

/// Tokens expire 24 hours after issue.
const TOKEN_TTL_SECS: u64 = 60 * 60 * 24;

/// Claims carried in the session JWT.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: the user's id.
    pub sub: Uuid,
    pub username: String,
    pub role: Role,
    pub iat: u64,
    pub exp: u64,
}

impl Claims {
    /// The stamp written into documents created by this session.
    pub fn to_user_ref(&self) -> UserRef {
        UserRef {
            id: self.sub,
            username: self.username.clone(),
        }
    }
}

/// Custom authentication errors.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("username or phone already exists")]
    UserExists,
    #[error("invalid phone or password")]
    InvalidCredentials,
    #[error("missing or invalid token")]
    InvalidToken,
    #[error("JWT error: {0}")]
    Jwt(String),
    #[error("internal server error: {0}")]
    Internal(String),
}

/// HS256 signing material, built once from the configured secret.
#[derive(Clone)]
pub struct JwtKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

impl JwtKeys {
    pub fn new(secret: &str) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
        }
    }
}

fn unix_now() -> Result<u64, AuthError> {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .map_err(|e| AuthError::Jwt(format!("system time error: {}", e)))
}

/// Generates a session token for the given user.
pub fn issue_token(user: &User, keys: &JwtKeys) -> Result<String, AuthError> {
    let now = unix_now()?;
    let claims = Claims {
        sub: user.id,
        username: user.username.clone(),
        role: user.role,
        iat: now,
        exp: now + TOKEN_TTL_SECS,
    };
    encode(&Header::default(), &claims, &keys.encoding)
        .map_err(|e| AuthError::Jwt(format!("failed to encode JWT: {}", e)))
}

/// Decodes and validates a session token.
pub fn verify_token(token: &str, keys: &JwtKeys) -> Result<Claims, AuthError> {
    decode::<Claims>(token, &keys.decoding, &Validation::default())
        .map(|data| data.claims)
        .map_err(|e| {
            warn!(error = %e, "token rejected");
            AuthError::InvalidToken
        })
}

/// Registers a new staff account. The store enforces username and phone
/// uniqueness; a clash surfaces as `UserExists`.
pub async fn register_user(
    registration: NewUser,
    store: &impl UserStore,
) -> Result<User, AuthError> {
    let user = User::from_new_user(registration)
        .map_err(|e| AuthError::Internal(format!("failed to hash password: {}", e)))?;

    store.add_user(&user).await.map_err(|e| match e {
        models::errors::ClinicError::AlreadyExists(_) => AuthError::UserExists,
        other => AuthError::Internal(format!("failed to create user: {}", other)),
    })?;
    Ok(user)
}

/// Logs a user in by phone and password. Returns the session token and a
/// public projection of the account.
pub async fn login_user(
    login: Login,
    store: &impl UserStore,
    keys: &JwtKeys,
) -> Result<(String, PublicUser), AuthError> {
    let user = store
        .authenticate(&login)
        .await
        .map_err(|e| match e {
            models::errors::ClinicError::Auth(_) => AuthError::InvalidCredentials,
            other => AuthError::Internal(format!("storage error during login: {}", other)),
        })?
        .ok_or(AuthError::InvalidCredentials)?;

    let token = issue_token(&user, keys)?;
    Ok((token, user.to_public()))
}
