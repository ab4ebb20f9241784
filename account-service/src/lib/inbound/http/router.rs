use std::sync::Arc;
use std::time::Duration;

use auth::AuthGate;
use auth::CredentialStore;
use axum::body::Body;
use axum::http::Request;
use axum::http::Response;
use axum::middleware;
use axum::routing::get;
use axum::routing::post;
use axum::Router;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::handlers::account::delete_current_user;
use super::handlers::account::get_current_user;
use super::handlers::login::login;
use super::handlers::register::register;
use super::middleware::authenticate as auth_middleware;

pub struct AppState<S: CredentialStore> {
    pub gate: Arc<AuthGate<S>>,
}

impl<S: CredentialStore> Clone for AppState<S> {
    fn clone(&self) -> Self {
        Self {
            gate: Arc::clone(&self.gate),
        }
    }
}

pub fn create_router<S: CredentialStore>(gate: Arc<AuthGate<S>>) -> Router {
    let state = AppState { gate };

    let public_routes = Router::new()
        .route("/api/users/register", post(register::<S>))
        .route("/api/users/login", post(login::<S>));

    let protected_routes = Router::new()
        .route(
            "/api/users/me",
            get(get_current_user).delete(delete_current_user::<S>),
        )
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware::<S>,
        ));

    // Headers are not recorded; they carry bearer tokens.
    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<Body>| {
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
                version = ?request.version(),
            )
        })
        .on_request(|request: &Request<Body>, _span: &Span| {
            tracing::info!(
                method = %request.method(),
                uri = %request.uri(),
                "Request started"
            );
        })
        .on_response(
            |response: &Response<Body>, latency: Duration, _span: &Span| {
                tracing::info!(
                    status = response.status().as_u16(),
                    latency_ms = latency.as_millis(),
                    "Request completed"
                );
            },
        );

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(
            ServiceBuilder::new()
                .layer(trace_layer)
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}
