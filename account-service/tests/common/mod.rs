use std::sync::Arc;

use account_service::inbound::http::router::create_router;
use auth::AuthGate;
use auth::InMemoryCredentialStore;
use auth::TokenSettings;
use serde_json::json;

pub const TEST_SECRET: &[u8] = b"test-secret-key-for-jwt-signing-at-least-32-bytes";

/// Test application that spawns a real server backed by an in-memory store
pub struct TestApp {
    pub address: String,
    pub gate: Arc<AuthGate<InMemoryCredentialStore>>,
    pub api_client: reqwest::Client,
}

impl TestApp {
    /// Spawn the application with default token settings
    pub async fn spawn() -> Self {
        Self::spawn_with(TokenSettings::default()).await
    }

    /// Spawn the application in a background task with the given token settings
    pub async fn spawn_with(settings: TokenSettings) -> Self {
        // Use random port (0 = OS assigns)
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        let store = Arc::new(InMemoryCredentialStore::new());
        let gate = Arc::new(AuthGate::new(store, TEST_SECRET, settings));

        let router = create_router(Arc::clone(&gate));

        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server error");
        });

        Self {
            address,
            gate,
            api_client: reqwest::Client::new(),
        }
    }

    /// Helper to make GET request
    pub fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.get(format!("{}{}", self.address, path))
    }

    /// Helper to make POST request
    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.post(format!("{}{}", self.address, path))
    }

    /// Helper to make GET request with Bearer token
    pub fn get_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.get(path).bearer_auth(token)
    }

    /// Helper to make DELETE request with Bearer token
    pub fn delete_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.api_client
            .delete(format!("{}{}", self.address, path))
            .bearer_auth(token)
    }

    /// Register a user through the API
    pub async fn register(&self, username: &str, password: &str) -> reqwest::Response {
        self.post("/api/users/register")
            .json(&json!({ "username": username, "password": password }))
            .send()
            .await
            .expect("Failed to execute request")
    }

    /// Log a user in through the API with a form-encoded password grant
    pub async fn login(&self, username: &str, password: &str) -> reqwest::Response {
        self.post("/api/users/login")
            .form(&[("username", username), ("password", password)])
            .send()
            .await
            .expect("Failed to execute request")
    }

    /// Register then log in, returning the access token
    pub async fn register_and_login(&self, username: &str, password: &str) -> String {
        self.register(username, password).await;

        let body: serde_json::Value = self
            .login(username, password)
            .await
            .json()
            .await
            .expect("Failed to parse response");

        body["data"]["access_token"]
            .as_str()
            .expect("Missing access token")
            .to_string()
    }
}
