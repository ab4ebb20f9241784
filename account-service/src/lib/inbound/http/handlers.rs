use std::fmt;

use auth::AuthError;
use auth::User;
use axum::http::header;
use axum::http::HeaderValue;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

pub mod account;
pub mod login;
pub mod register;

#[derive(Debug, Clone)]
pub struct ApiSuccess<T: Serialize + PartialEq>(StatusCode, Json<ApiResponseBody<T>>);

impl<T> PartialEq for ApiSuccess<T>
where
    T: Serialize + PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0 && self.1 .0 == other.1 .0
    }
}

impl<T: Serialize + PartialEq> ApiSuccess<T> {
    pub fn new(status: StatusCode, data: T) -> Self {
        ApiSuccess(status, Json(ApiResponseBody::new(status, data)))
    }
}

impl<T: Serialize + PartialEq> IntoResponse for ApiSuccess<T> {
    fn into_response(self) -> Response {
        (self.0, self.1).into_response()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    InternalServerError(String),
    UnprocessableEntity(String),
    NotFound(String),
    Conflict(String),
    Unauthorized(String),
}

impl ApiError {
    /// The single rejection returned for any bearer token problem.
    pub fn invalid_token() -> Self {
        ApiError::Unauthorized("Invalid authentication credentials".to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::InternalServerError(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
            ApiError::UnprocessableEntity(msg) => (StatusCode::UNPROCESSABLE_ENTITY, msg),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, msg),
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg),
        };

        let mut response =
            (status, Json(ApiResponseBody::new_error(status, message))).into_response();

        if status == StatusCode::UNAUTHORIZED {
            response
                .headers_mut()
                .insert(header::WWW_AUTHENTICATE, HeaderValue::from_static("Bearer"));
        }

        response
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::InvalidCredentials => ApiError::Unauthorized(err.to_string()),
            AuthError::Unauthorized => ApiError::invalid_token(),
            AuthError::UsernameTaken(_) => ApiError::Conflict(err.to_string()),
            AuthError::InvalidUsername(_) | AuthError::Password(auth::PasswordError::Empty) => {
                ApiError::UnprocessableEntity(err.to_string())
            }
            AuthError::Password(_)
            | AuthError::Jwt(_)
            | AuthError::Store(_)
            | AuthError::Internal(_) => {
                tracing::error!(error = %err, "Request failed");
                ApiError::InternalServerError("Internal server error".to_string())
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiResponseBody<T: Serialize + PartialEq> {
    status_code: u16,
    data: T,
}

impl<T: Serialize + PartialEq> ApiResponseBody<T> {
    pub fn new(status_code: StatusCode, data: T) -> Self {
        Self {
            status_code: status_code.as_u16(),
            data,
        }
    }
}

impl ApiResponseBody<ApiErrorData> {
    pub fn new_error(status_code: StatusCode, message: String) -> Self {
        Self {
            status_code: status_code.as_u16(),
            data: ApiErrorData { message },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiErrorData {
    pub message: String,
}

/// Username/password pair accepted by register and login.
#[derive(Clone, Deserialize)]
pub struct CredentialsRequest {
    pub username: String,
    pub password: String,
}

impl fmt::Debug for CredentialsRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CredentialsRequest")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Public view of a user; never includes the password hash.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserData {
    pub id: String,
    pub username: String,
    pub created_at: DateTime<Utc>,
}

impl From<&User> for UserData {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.to_string(),
            username: user.username.as_str().to_string(),
            created_at: user.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use auth::PasswordError;
    use auth::StoreError;

    use super::*;

    #[test]
    fn test_login_failures_share_one_response() {
        assert_eq!(
            ApiError::from(AuthError::InvalidCredentials),
            ApiError::Unauthorized("Invalid credentials".to_string())
        );
    }

    #[test]
    fn test_infrastructure_errors_are_not_leaked() {
        let err = ApiError::from(AuthError::Store(StoreError::Unavailable(
            "password authentication failed for user postgres".to_string(),
        )));
        assert_eq!(
            err,
            ApiError::InternalServerError("Internal server error".to_string())
        );
    }

    #[test]
    fn test_validation_errors_are_unprocessable() {
        assert!(matches!(
            ApiError::from(AuthError::Password(PasswordError::Empty)),
            ApiError::UnprocessableEntity(_)
        ));
    }

    #[test]
    fn test_unauthorized_carries_bearer_challenge() {
        let response = ApiError::invalid_token().into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            response.headers().get(header::WWW_AUTHENTICATE),
            Some(&HeaderValue::from_static("Bearer"))
        );
    }

    #[test]
    fn test_credentials_debug_redacts_password() {
        let request = CredentialsRequest {
            username: "alice".to_string(),
            password: "secret123".to_string(),
        };
        let debug = format!("{:?}", request);
        assert!(debug.contains("alice"));
        assert!(!debug.contains("secret123"));
    }
}
