use std::fmt;

use chrono::DateTime;
use chrono::Utc;
use uuid::Uuid;

use super::errors::UsernameError;

/// Credential principal.
///
/// `password_hash` is always a digest produced by
/// [`PasswordHasher`](crate::password::PasswordHasher), never plaintext.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: UserId,
    pub username: Username,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Build a freshly registered user with a newly generated identifier.
    pub fn new(username: Username, password_hash: String) -> Self {
        Self {
            id: UserId::new(),
            username,
            password_hash,
            created_at: Utc::now(),
        }
    }
}

/// User unique identifier type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UserId(pub Uuid);

impl UserId {
    /// Generate a new random user ID.
    ///
    /// # Returns
    /// UserId with random UUID v4
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for UserId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Username value type
///
/// Any non-empty string; comparison is exact and case-sensitive.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Username(String);

impl Username {
    /// Create a new username.
    ///
    /// # Errors
    /// * `Empty` - Username is the empty string
    pub fn new(username: impl Into<String>) -> Result<Self, UsernameError> {
        let username = username.into();
        if username.is_empty() {
            return Err(UsernameError::Empty);
        }
        Ok(Self(username))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}
