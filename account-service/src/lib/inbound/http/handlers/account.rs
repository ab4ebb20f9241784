use auth::CredentialStore;
use auth::StoreError;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;

use super::ApiError;
use super::ApiSuccess;
use super::UserData;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;

pub async fn get_current_user(
    Extension(AuthenticatedUser(user)): Extension<AuthenticatedUser>,
) -> ApiSuccess<UserData> {
    ApiSuccess::new(StatusCode::OK, (&user).into())
}

pub async fn delete_current_user<S: CredentialStore>(
    State(state): State<AppState<S>>,
    Extension(AuthenticatedUser(user)): Extension<AuthenticatedUser>,
) -> Result<StatusCode, ApiError> {
    state
        .gate
        .store()
        .delete(&user.id)
        .await
        .map_err(|e| match e {
            StoreError::NotFound(_) => ApiError::NotFound("User not found".to_string()),
            other => ApiError::from(auth::AuthError::from(other)),
        })?;

    tracing::info!(user_id = %user.id, username = %user.username, "Account deleted");
    Ok(StatusCode::NO_CONTENT)
}
