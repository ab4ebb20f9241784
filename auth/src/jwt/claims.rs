use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use crate::user::Username;

/// Access token claims.
///
/// Parsing is strict: `sub`, `iat` and `exp` are all required and any other
/// field makes the token malformed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TokenClaims {
    /// Subject (username)
    pub sub: String,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

impl TokenClaims {
    /// Create claims for `subject` issued at `now`, expiring after `ttl`.
    ///
    /// Timestamps are whole Unix seconds: the sub-second part of `now` is
    /// dropped, so a token may expire up to one second before `now + ttl`.
    pub fn new(subject: &Username, now: DateTime<Utc>, ttl: Duration) -> Self {
        let issued_at = now.timestamp();
        Self {
            sub: subject.as_str().to_string(),
            iat: issued_at,
            exp: issued_at + ttl.num_seconds(),
        }
    }

    /// Check if token is expired at `current_timestamp`, tolerating
    /// `leeway_seconds` of clock skew.
    ///
    /// A token is usable strictly before `exp`.
    pub fn is_expired(&self, current_timestamp: i64, leeway_seconds: i64) -> bool {
        current_timestamp >= self.exp.saturating_add(leeway_seconds)
    }

    /// Expiration as a UTC datetime.
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.exp, 0)
    }
}
