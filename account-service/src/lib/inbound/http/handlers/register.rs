use auth::CredentialStore;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;

use super::ApiError;
use super::ApiSuccess;
use super::CredentialsRequest;
use super::UserData;
use crate::inbound::http::router::AppState;

pub async fn register<S: CredentialStore>(
    State(state): State<AppState<S>>,
    Json(body): Json<CredentialsRequest>,
) -> Result<ApiSuccess<UserData>, ApiError> {
    state
        .gate
        .register(&body.username, &body.password)
        .await
        .map_err(ApiError::from)
        .map(|ref user| ApiSuccess::new(StatusCode::CREATED, user.into()))
}
