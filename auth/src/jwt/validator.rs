use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use jsonwebtoken::decode;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::Validation;

use super::claims::TokenClaims;
use super::errors::TokenRejection;
use super::errors::ValidationError;
use super::SIGNING_ALGORITHM;
use crate::store::CredentialStore;
use crate::user::User;
use crate::user::Username;

/// Verifies presented access tokens.
///
/// Checks run in a fixed order and stop at the first failure: structure,
/// signature, expiry, then (in [`validate`](Self::validate)) the subject.
pub struct TokenValidator {
    decoding_key: DecodingKey,
    validation: Validation,
    leeway_seconds: i64,
}

impl TokenValidator {
    /// Create a validator for the given server secret.
    ///
    /// `leeway` is the clock skew tolerated past a token's `exp`.
    pub fn new(secret: &[u8], leeway: Duration) -> Self {
        let mut validation = Validation::new(SIGNING_ALGORITHM);
        // Expiry is checked against the caller-supplied clock below.
        validation.validate_exp = false;
        validation.validate_nbf = false;
        validation.validate_aud = false;
        validation.leeway = 0;
        validation.set_required_spec_claims(&["sub", "iat", "exp"]);

        Self {
            decoding_key: DecodingKey::from_secret(secret),
            validation,
            leeway_seconds: leeway.num_seconds().max(0),
        }
    }

    /// Verify structure, signature and expiry of `token` at `now`.
    ///
    /// # Errors
    /// * `MalformedToken` - Not three base64url segments, header unreadable,
    ///   or claims missing/unknown
    /// * `InvalidSignature` - Algorithm other than HS256, or signature does not
    ///   match the server secret
    /// * `Expired` - `now` is at or past `exp` plus leeway
    pub fn verify(&self, token: &str, now: DateTime<Utc>) -> Result<TokenClaims, TokenRejection> {
        let algorithm = header_algorithm(token)?;
        if algorithm != "HS256" {
            return Err(TokenRejection::InvalidSignature);
        }

        let claims = decode::<TokenClaims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::InvalidSignature
                | ErrorKind::InvalidAlgorithm
                | ErrorKind::InvalidAlgorithmName
                | ErrorKind::MissingAlgorithm => TokenRejection::InvalidSignature,
                _ => TokenRejection::MalformedToken,
            })?;

        if claims.is_expired(now.timestamp(), self.leeway_seconds) {
            return Err(TokenRejection::Expired);
        }

        Ok(claims)
    }

    /// Fully validate `token` at `now` and resolve its subject in `store`.
    ///
    /// Returns the live user record, never the raw claims.
    ///
    /// # Errors
    /// * `Rejected` - Any [`verify`](Self::verify) rejection, or
    ///   `UnknownSubject` when the subject no longer exists
    /// * `Store` - Subject lookup failed
    pub async fn validate<S>(
        &self,
        token: &str,
        now: DateTime<Utc>,
        store: &S,
    ) -> Result<User, ValidationError>
    where
        S: CredentialStore + ?Sized,
    {
        let claims = self.verify(token, now)?;

        let username =
            Username::new(claims.sub).map_err(|_| TokenRejection::UnknownSubject)?;

        store
            .find_by_username(&username)
            .await?
            .ok_or(ValidationError::Rejected(TokenRejection::UnknownSubject))
    }
}

/// Read the `alg` of a structurally sound token.
fn header_algorithm(token: &str) -> Result<String, TokenRejection> {
    let mut segments = token.split('.');
    let (Some(header), Some(claims), Some(_signature), None) = (
        segments.next(),
        segments.next(),
        segments.next(),
        segments.next(),
    ) else {
        return Err(TokenRejection::MalformedToken);
    };

    let header = URL_SAFE_NO_PAD
        .decode(header)
        .map_err(|_| TokenRejection::MalformedToken)?;
    URL_SAFE_NO_PAD
        .decode(claims)
        .map_err(|_| TokenRejection::MalformedToken)?;

    let header: serde_json::Value =
        serde_json::from_slice(&header).map_err(|_| TokenRejection::MalformedToken)?;

    header
        .get("alg")
        .and_then(serde_json::Value::as_str)
        .map(str::to_owned)
        .ok_or(TokenRejection::MalformedToken)
}
