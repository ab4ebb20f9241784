use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use jsonwebtoken::encode;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;

use super::claims::TokenClaims;
use super::errors::JwtError;
use super::SIGNING_ALGORITHM;
use crate::user::Username;

/// Signed bearer token handed back at login.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessToken {
    value: String,
    expires_at: DateTime<Utc>,
}

impl AccessToken {
    /// Opaque, URL-safe token string.
    pub fn as_str(&self) -> &str {
        &self.value
    }

    /// Expiry as embedded in the token, truncated to whole seconds.
    pub fn expires_at(&self) -> DateTime<Utc> {
        self.expires_at
    }

    pub fn into_string(self) -> String {
        self.value
    }
}

/// Mints signed access tokens.
///
/// Tokens are always signed with HS256 under the server secret; the header
/// algorithm is never taken from the caller.
pub struct TokenIssuer {
    encoding_key: EncodingKey,
}

impl TokenIssuer {
    /// Create an issuer for the given server secret.
    ///
    /// The secret should be at least 256 bits (32 bytes) for HS256.
    pub fn new(secret: &[u8]) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
        }
    }

    /// Issue a token for `subject` valid from `now` for `ttl`.
    ///
    /// # Errors
    /// * `InvalidTtl` - `ttl` is zero or negative
    /// * `EncodingFailed` - Token encoding failed
    pub fn issue(
        &self,
        subject: &Username,
        now: DateTime<Utc>,
        ttl: Duration,
    ) -> Result<AccessToken, JwtError> {
        if ttl <= Duration::zero() {
            return Err(JwtError::InvalidTtl);
        }

        let claims = TokenClaims::new(subject, now, ttl);
        let expires_at = claims.expires_at().ok_or(JwtError::InvalidTtl)?;

        let value = encode(&Header::new(SIGNING_ALGORITHM), &claims, &self.encoding_key)
            .map_err(|e| JwtError::EncodingFailed(e.to_string()))?;

        Ok(AccessToken { value, expires_at })
    }
}
