// models/src/user.rs
// Password handling is bcrypt; the plaintext never reaches storage.

use bcrypt::{hash, verify, BcryptError, DEFAULT_COST};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::refs::UserRef;
use crate::role::Role;

/// Registration payload. Temporarily holds the plaintext password for hashing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewUser {
    pub username: String,
    pub password: String,
    pub role: Role,
    pub phone: String,
}

/// A staff account as stored. Contains the password hash, not the plaintext.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub password_hash: String,
    pub role: Role,
    pub phone: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub last_login: Option<DateTime<Utc>>,
}

impl User {
    /// Hashes a plaintext password.
    pub fn hash_password(password: &str) -> Result<String, BcryptError> {
        hash(password, DEFAULT_COST)
    }

    /// Verifies a plaintext password against a stored hash.
    pub fn verify_password(password: &str, hash: &str) -> Result<bool, BcryptError> {
        verify(password, hash)
    }

    /// Creates a stored `User` from a registration payload, hashing the password.
    pub fn from_new_user(new_user: NewUser) -> Result<Self, BcryptError> {
        let now = Utc::now();
        let password_hash = Self::hash_password(&new_user.password)?;

        Ok(User {
            id: Uuid::new_v4(),
            username: new_user.username,
            password_hash,
            role: new_user.role,
            phone: new_user.phone,
            created_at: now,
            updated_at: now,
            last_login: None,
        })
    }

    /// Applies a partial update, re-hashing the password when one is supplied.
    pub fn apply_update(&mut self, update: UserUpdate) -> Result<(), BcryptError> {
        if let Some(username) = update.username {
            self.username = username;
        }
        if let Some(phone) = update.phone {
            self.phone = phone;
        }
        if let Some(role) = update.role {
            self.role = role;
        }
        if let Some(password) = update.password {
            self.password_hash = Self::hash_password(&password)?;
        }
        self.updated_at = Utc::now();
        Ok(())
    }

    /// Projection safe to return from the API. The hash never leaves storage.
    pub fn to_public(&self) -> PublicUser {
        PublicUser {
            id: self.id,
            username: self.username.clone(),
            role: self.role,
            phone: self.phone.clone(),
            created_at: self.created_at,
            last_login: self.last_login,
        }
    }

    pub fn to_ref(&self) -> UserRef {
        UserRef {
            id: self.id,
            username: self.username.clone(),
        }
    }
}

/// Login payload. The phone number is the login key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Login {
    pub phone: String,
    pub password: String,
}

/// Partial account update. Absent fields stay untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserUpdate {
    pub username: Option<String>,
    pub phone: Option<String>,
    pub role: Option<Role>,
    pub password: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PublicUser {
    pub id: Uuid,
    pub username: String,
    pub role: Role,
    pub phone: String,
    pub created_at: DateTime<Utc>,
    pub last_login: Option<DateTime<Utc>>,
}
