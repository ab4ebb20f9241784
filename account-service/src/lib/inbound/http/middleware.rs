use auth::CredentialStore;
use auth::User;
use axum::extract::Request;
use axum::extract::State;
use axum::http;
use axum::middleware::Next;
use axum::response::Response;

use super::handlers::ApiError;
use crate::inbound::http::router::AppState;

/// Extension type carrying the user resolved from the bearer token
#[derive(Debug, Clone)]
pub struct AuthenticatedUser(pub User);

/// Middleware that validates the bearer token and adds the user to request extensions
///
/// Every rejected token, whatever the cause, produces the same 401 response.
pub async fn authenticate<S: CredentialStore>(
    State(state): State<AppState<S>>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = extract_bearer_token(&req)
        .map(str::to_owned)
        .ok_or_else(|| {
            tracing::debug!("Missing or malformed Authorization header");
            ApiError::invalid_token()
        })?;

    let user = state
        .gate
        .authenticate(&token)
        .await
        .map_err(ApiError::from)?;

    req.extensions_mut().insert(AuthenticatedUser(user));

    Ok(next.run(req).await)
}

fn extract_bearer_token(req: &Request) -> Option<&str> {
    req.headers()
        .get(http::header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
}
