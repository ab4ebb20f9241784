use auth::CredentialStore;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Form;
use chrono::DateTime;
use chrono::Utc;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use super::CredentialsRequest;
use crate::inbound::http::router::AppState;

/// Password grant in the OAuth2 form shape (`application/x-www-form-urlencoded`).
pub async fn login<S: CredentialStore>(
    State(state): State<AppState<S>>,
    Form(body): Form<CredentialsRequest>,
) -> Result<ApiSuccess<LoginResponseData>, ApiError> {
    let token = state
        .gate
        .login(&body.username, &body.password)
        .await
        .map_err(ApiError::from)?;

    Ok(ApiSuccess::new(
        StatusCode::OK,
        LoginResponseData {
            expires_at: token.expires_at(),
            access_token: token.into_string(),
            token_type: "bearer".to_string(),
        },
    ))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoginResponseData {
    pub access_token: String,
    pub token_type: String,
    pub expires_at: DateTime<Utc>,
}
