//! Identity store: registered users, login, and the bootstrap seed

use crate::error::IdentityError;
use dtk_domain::{Office, User};
use parking_lot::RwLock;

/// Name of the seeded administrator account.
pub const SEED_ADMIN_NAME: &str = "Admin";
/// Credential of the seeded administrator account.
pub const SEED_ADMIN_CREDENTIAL: &str = "admin";

/// Holds registered users and resolves credentials to user records.
///
/// Users are never deleted and never mutated after registration.
#[derive(Debug, Default)]
pub struct IdentityStore {
    users: RwLock<Vec<User>>,
}

impl IdentityStore {
    /// Create an empty identity store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an identity store from previously persisted users.
    #[must_use]
    pub fn from_users(users: Vec<User>) -> Self {
        Self {
            users: RwLock::new(users),
        }
    }

    /// Whether no users are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.users.read().is_empty()
    }

    /// Clone of the registered user list.
    #[must_use]
    pub fn snapshot(&self) -> Vec<User> {
        self.users.read().clone()
    }

    /// Resolve a name/credential pair to a user.
    ///
    /// Plaintext equality on both fields. Credential hashing is out of
    /// scope for this single-office deployment.
    pub fn login(&self, name: &str, credential: &str) -> Result<User, IdentityError> {
        self.users
            .read()
            .iter()
            .find(|u| u.name == name && u.credential == credential)
            .cloned()
            .ok_or(IdentityError::InvalidCredentials)
    }

    /// Register a new user.
    ///
    /// Rejects empty names and case-insensitive name collisions.
    pub fn register(
        &self,
        name: &str,
        office: Office,
        credential: &str,
    ) -> Result<User, IdentityError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(IdentityError::ValidationFailed("name is required".to_string()));
        }

        let mut users = self.users.write();
        if users.iter().any(|u| u.name.eq_ignore_ascii_case(name)) {
            return Err(IdentityError::DuplicateIdentity(name.to_string()));
        }

        let user = User::new(name, office, credential);
        tracing::info!(user = %user.id, name, office = %office, "registered user");
        users.push(user.clone());
        Ok(user)
    }

    /// Seed the well-known Admin account when the store is empty.
    ///
    /// Returns the seeded user, or `None` when users already exist.
    pub fn seed_if_empty(&self) -> Option<User> {
        let mut users = self.users.write();
        if !users.is_empty() {
            return None;
        }
        let admin = User::new(SEED_ADMIN_NAME, Office::Admin, SEED_ADMIN_CREDENTIAL);
        tracing::info!(user = %admin.id, "seeded initial admin user");
        users.push(admin.clone());
        Some(admin)
    }
}
