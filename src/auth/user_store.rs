//! User Storage
//! Mission: Own the in-memory user collection and its identifier allocator
//!
//! Passwords are stored and compared in plaintext. This is a deliberate
//! insecure default, not an oversight.

use crate::auth::models::{User, UserPatch, UserRole};
use parking_lot::RwLock;
use tracing::{debug, info, warn};

/// Failures reported by the user store and credential verifier
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    MissingFields,
    InvalidRole,
    EmailExists,
    EmailTaken,
    NotFound(u64),
    InvalidCredentials,
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreError::MissingFields => write!(f, "All fields are required"),
            StoreError::InvalidRole => write!(f, "Role must be 'admin' or 'user'"),
            StoreError::EmailExists => write!(f, "User with this email already exists"),
            StoreError::EmailTaken => write!(f, "Email already taken by another user"),
            StoreError::NotFound(_) => write!(f, "User not found"),
            StoreError::InvalidCredentials => write!(f, "Invalid email or password"),
        }
    }
}

impl std::error::Error for StoreError {}

struct Inner {
    users: Vec<User>,
    next_id: u64,
}

impl Inner {
    /// Uniqueness check and append; callers hold the write lock
    fn insert(
        &mut self,
        name: &str,
        email: &str,
        password: &str,
        role: UserRole,
    ) -> Result<User, StoreError> {
        if self.users.iter().any(|u| u.email == email) {
            return Err(StoreError::EmailExists);
        }

        let user = User {
            id: self.next_id,
            name: name.to_string(),
            email: email.to_string(),
            password: password.to_string(),
            role,
        };
        self.next_id += 1;
        self.users.push(user.clone());

        Ok(user)
    }
}

/// Field checks shared by registration, admin creation and bootstrap
fn validate_new(
    name: &str,
    email: &str,
    password: &str,
    role: &str,
) -> Result<UserRole, StoreError> {
    if name.is_empty() || email.is_empty() || password.is_empty() || role.is_empty() {
        return Err(StoreError::MissingFields);
    }
    UserRole::parse(role).ok_or(StoreError::InvalidRole)
}

/// In-memory user storage
///
/// Every public operation holds the lock for its whole check-then-mutate
/// sequence, so uniqueness checks cannot interleave with another writer.
pub struct UserStore {
    inner: RwLock<Inner>,
}

impl Default for UserStore {
    fn default() -> Self {
        Self::new()
    }
}

impl UserStore {
    /// Create an empty store; the first allocated id is 1
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(Inner {
                users: Vec::new(),
                next_id: 1,
            }),
        }
    }

    /// Seed an admin account for initial setup, unless an admin already exists
    pub fn bootstrap_admin(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<Option<User>, StoreError> {
        let role = validate_new(name, email, password, UserRole::Admin.as_str())?;

        let mut inner = self.inner.write();

        if inner.users.iter().any(|u| u.role == UserRole::Admin) {
            debug!("Admin account already present, skipping bootstrap");
            return Ok(None);
        }

        let admin = inner.insert(name, email, password, role)?;

        info!("🔐 Bootstrap admin user created ({})", admin.email);
        warn!("⚠️  Passwords are stored in plaintext. Do not reuse real credentials.");

        Ok(Some(admin))
    }

    /// All users in insertion order
    pub fn list(&self) -> Vec<User> {
        self.inner.read().users.clone()
    }

    pub fn len(&self) -> usize {
        self.inner.read().users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.read().users.is_empty()
    }

    /// Get user by id
    pub fn get_by_id(&self, id: u64) -> Result<User, StoreError> {
        self.inner
            .read()
            .users
            .iter()
            .find(|u| u.id == id)
            .cloned()
            .ok_or(StoreError::NotFound(id))
    }

    /// Create a new user
    pub fn create(
        &self,
        name: &str,
        email: &str,
        password: &str,
        role: &str,
    ) -> Result<User, StoreError> {
        let role = validate_new(name, email, password, role)?;

        let user = self.inner.write().insert(name, email, password, role)?;

        info!("✅ Created user {}: {} ({})", user.id, user.email, user.role);

        Ok(user)
    }

    /// Apply the non-empty fields of `patch` to user `id`
    ///
    /// All checks run before the first field is written, so a rejected
    /// patch leaves the record untouched.
    pub fn update(&self, id: u64, patch: &UserPatch) -> Result<User, StoreError> {
        let mut inner = self.inner.write();

        let index = inner
            .users
            .iter()
            .position(|u| u.id == id)
            .ok_or(StoreError::NotFound(id))?;

        let role = if patch.role.is_empty() {
            None
        } else {
            Some(UserRole::parse(&patch.role).ok_or(StoreError::InvalidRole)?)
        };

        if !patch.email.is_empty()
            && inner
                .users
                .iter()
                .enumerate()
                .any(|(i, u)| i != index && u.email == patch.email)
        {
            return Err(StoreError::EmailTaken);
        }

        let user = &mut inner.users[index];
        if !patch.name.is_empty() {
            user.name = patch.name.clone();
        }
        if !patch.email.is_empty() {
            user.email = patch.email.clone();
        }
        if !patch.password.is_empty() {
            user.password = patch.password.clone();
        }
        if let Some(role) = role {
            user.role = role;
        }

        debug!("Updated user {}", id);

        Ok(user.clone())
    }

    /// Delete a user by id; the allocator is never rewound
    pub fn delete(&self, id: u64) -> Result<User, StoreError> {
        let mut inner = self.inner.write();

        let index = inner
            .users
            .iter()
            .position(|u| u.id == id)
            .ok_or(StoreError::NotFound(id))?;
        let removed = inner.users.remove(index);

        info!("🗑️  Deleted user {}: {}", removed.id, removed.email);

        Ok(removed)
    }

    /// Verify email and password, returning the first exact match
    pub fn verify_credentials(&self, email: &str, password: &str) -> Result<User, StoreError> {
        self.inner
            .read()
            .users
            .iter()
            .find(|u| u.email == email && u.password == password)
            .cloned()
            .ok_or(StoreError::InvalidCredentials)
    }
}
