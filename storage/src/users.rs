// storage/src/users.rs

use async_trait::async_trait;
use sled::Db;
use uuid::Uuid;

use models::errors::{ClinicError, ClinicResult};
use models::role::Role;
use models::user::{Login, User};

use crate::tree::DocTree;

#[async_trait]
pub trait UserStore: Send + Sync + 'static {
    /// Adds a new user. Fails when the username or phone is already taken.
    async fn add_user(&self, user: &User) -> ClinicResult<()>;
    /// Overwrites an existing user, re-checking uniqueness against others.
    async fn update_user(&self, user: &User) -> ClinicResult<()>;
    /// Deletes a user by id. Returns whether it existed.
    async fn delete_user(&self, id: &Uuid) -> ClinicResult<bool>;
    /// Retrieves a user by their unique id.
    async fn get_user(&self, id: &Uuid) -> ClinicResult<Option<User>>;
    /// Retrieves a user by their phone number, the login key.
    async fn get_user_by_phone(&self, phone: &str) -> ClinicResult<Option<User>>;
    async fn get_user_by_username(&self, username: &str) -> ClinicResult<Option<User>>;
    async fn list_users(&self) -> ClinicResult<Vec<User>>;
    /// Users holding the doctor role, for order and appointment forms.
    async fn list_doctors(&self) -> ClinicResult<Vec<User>>;
    /// Account counts per role; every role is present in the result.
    async fn count_by_role(&self) -> ClinicResult<Vec<(Role, u64)>>;
    /// Authenticates by phone and password. An unknown phone yields `None`;
    /// a wrong password is an authentication error.
    async fn authenticate(&self, login: &Login) -> ClinicResult<Option<User>>;
}

/// Sled-backed implementation of the `UserStore` trait.
pub struct SledUserStore {
    tree: DocTree<User>,
}

impl SledUserStore {
    /// Opens the "users" tree on the given database.
    pub fn new(db: &Db) -> ClinicResult<Self> {
        Ok(Self {
            tree: DocTree::open(db, "users")?,
        })
    }

    fn check_unique(&self, user: &User) -> ClinicResult<()> {
        let clash = self.tree.find(|existing| {
            existing.id != user.id
                && (existing.username == user.username || existing.phone == user.phone)
        })?;
        match clash {
            Some(existing) if existing.username == user.username => Err(
                ClinicError::AlreadyExists(format!("user with username '{}'", user.username)),
            ),
            Some(_) => Err(ClinicError::AlreadyExists(format!(
                "user with phone '{}'",
                user.phone
            ))),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl UserStore for SledUserStore {
    async fn add_user(&self, user: &User) -> ClinicResult<()> {
        self.check_unique(user)?;
        self.tree.put(&user.id, user)
    }

    async fn update_user(&self, user: &User) -> ClinicResult<()> {
        self.check_unique(user)?;
        self.tree.put(&user.id, user)
    }

    async fn delete_user(&self, id: &Uuid) -> ClinicResult<bool> {
        self.tree.remove(id)
    }

    async fn get_user(&self, id: &Uuid) -> ClinicResult<Option<User>> {
        self.tree.get(id)
    }

    async fn get_user_by_phone(&self, phone: &str) -> ClinicResult<Option<User>> {
        self.tree.find(|user| user.phone == phone)
    }

    async fn get_user_by_username(&self, username: &str) -> ClinicResult<Option<User>> {
        self.tree.find(|user| user.username == username)
    }

    async fn list_users(&self) -> ClinicResult<Vec<User>> {
        self.tree.all()
    }

    async fn list_doctors(&self) -> ClinicResult<Vec<User>> {
        self.tree.filter(|user| user.role == Role::Doctor)
    }

    async fn count_by_role(&self) -> ClinicResult<Vec<(Role, u64)>> {
        let mut counts = [(Role::Admin, 0u64), (Role::Doctor, 0), (Role::Reception, 0)];
        for user in self.tree.all()? {
            for slot in counts.iter_mut() {
                if slot.0 == user.role {
                    slot.1 += 1;
                }
            }
        }
        Ok(counts.to_vec())
    }

    async fn authenticate(&self, login: &Login) -> ClinicResult<Option<User>> {
        if let Some(user) = self.get_user_by_phone(&login.phone).await? {
            match User::verify_password(&login.password, &user.password_hash) {
                Ok(true) => Ok(Some(user)),
                Ok(false) => Err(ClinicError::Auth("incorrect password".to_string())),
                Err(e) => Err(ClinicError::Auth(format!(
                    "password verification failed: {}",
                    e
                ))),
            }
        } else {
            Ok(None)
        }
    }
}
