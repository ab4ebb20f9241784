//! Credential issuance and validation
//!
//! Provides the authentication core embedded by the account service:
//! - Password hashing (Argon2id)
//! - Credential store port with an in-memory implementation
//! - Signed, time-bounded access tokens (HS256 JWT)
//! - The auth gate composing register, login and authenticate
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! let is_valid = hasher.verify("my_password", &hash).unwrap();
//! assert!(is_valid);
//! ```
//!
//! ## Complete Authentication Flow
//! ```
//! use std::sync::Arc;
//!
//! use auth::{AuthError, AuthGate, InMemoryCredentialStore, TokenSettings};
//!
//! # tokio_test_runtime(async {
//! let store = Arc::new(InMemoryCredentialStore::new());
//! let gate = AuthGate::new(store, b"secret_key_at_least_32_bytes_long!", TokenSettings::default());
//!
//! let alice = gate.register("alice", "secret123").await.unwrap();
//! let token = gate.login("alice", "secret123").await.unwrap();
//!
//! let user = gate.authenticate(token.as_str()).await.unwrap();
//! assert_eq!(user.id, alice.id);
//!
//! assert_eq!(gate.authenticate("forged").await, Err(AuthError::Unauthorized));
//! # });
//! # fn tokio_test_runtime<F: std::future::Future>(f: F) -> F::Output {
//! #     tokio::runtime::Runtime::new().unwrap().block_on(f)
//! # }
//! ```

pub mod gate;
pub mod jwt;
pub mod password;
pub mod store;
pub mod user;

// Re-export commonly used items
pub use gate::AuthError;
pub use gate::AuthGate;
pub use jwt::AccessToken;
pub use jwt::JwtError;
pub use jwt::TokenClaims;
pub use jwt::TokenIssuer;
pub use jwt::TokenRejection;
pub use jwt::TokenSettings;
pub use jwt::TokenValidator;
pub use jwt::ValidationError;
pub use password::PasswordError;
pub use password::PasswordHasher;
pub use store::CredentialStore;
pub use store::InMemoryCredentialStore;
pub use store::StoreError;
pub use user::User;
pub use user::UserId;
pub use user::Username;
