mod common;

use auth::TokenSettings;
use chrono::Duration;
use common::TestApp;
use reqwest::header::WWW_AUTHENTICATE;
use reqwest::StatusCode;

#[tokio::test]
async fn test_register_success() {
    let app = TestApp::spawn().await;

    let response = app.register("alice", "secret123").await;

    assert_eq!(response.status(), StatusCode::CREATED);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status_code"], 201);
    assert_eq!(body["data"]["username"], "alice");
    assert!(body["data"]["id"].is_string());
    assert!(body["data"]["created_at"].is_string());
    assert!(body["data"].get("password_hash").is_none());
}

#[tokio::test]
async fn test_register_duplicate_username() {
    let app = TestApp::spawn().await;

    app.register("alice", "secret123").await;
    let response = app.register("alice", "other").await;

    assert_eq!(response.status(), StatusCode::CONFLICT);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert!(body["data"]["message"]
        .as_str()
        .unwrap()
        .contains("already exists"));
}

#[tokio::test]
async fn test_register_empty_username() {
    let app = TestApp::spawn().await;

    let response = app.register("", "secret123").await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert!(body["data"]["message"]
        .as_str()
        .unwrap()
        .contains("must not be empty"));
}

#[tokio::test]
async fn test_register_free_form_usernames() {
    let app = TestApp::spawn().await;

    for name in ["bob.smith", "al", "alice@example.com"] {
        let response = app.register(name, "secret123").await;
        assert_eq!(response.status(), StatusCode::CREATED);

        let response = app.login(name, "secret123").await;
        assert_eq!(response.status(), StatusCode::OK);
    }
}

#[tokio::test]
async fn test_register_empty_password() {
    let app = TestApp::spawn().await;

    let response = app.register("alice", "").await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_login_and_access_protected_route() {
    let app = TestApp::spawn().await;
    app.register("alice", "secret123").await;

    let response = app.login("alice", "secret123").await;
    assert_eq!(response.status(), StatusCode::OK);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["token_type"], "bearer");
    assert!(body["data"]["expires_at"].is_string());
    let token = body["data"]["access_token"].as_str().unwrap();
    assert_eq!(token.split('.').count(), 3);

    let response = app
        .get_authenticated("/api/users/me", token)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);
    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["username"], "alice");
}

#[tokio::test]
async fn test_login_rejects_json_body() {
    let app = TestApp::spawn().await;
    app.register("alice", "secret123").await;

    let response = app
        .post("/api/users/login")
        .json(&serde_json::json!({ "username": "alice", "password": "secret123" }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
}

#[tokio::test]
async fn test_login_failures_are_indistinguishable() {
    let app = TestApp::spawn().await;
    app.register("alice", "secret123").await;

    let wrong_password = app.login("alice", "wrong").await;
    let unknown_user = app.login("nobody", "secret123").await;

    assert_eq!(wrong_password.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(unknown_user.status(), StatusCode::UNAUTHORIZED);

    let wrong_password: serde_json::Value = wrong_password.json().await.unwrap();
    let unknown_user: serde_json::Value = unknown_user.json().await.unwrap();
    assert_eq!(wrong_password, unknown_user);
    assert_eq!(wrong_password["data"]["message"], "Invalid credentials");
}

#[tokio::test]
async fn test_protected_route_requires_bearer_token() {
    let app = TestApp::spawn().await;

    let response = app
        .get("/api/users/me")
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(response.headers()[WWW_AUTHENTICATE], "Bearer");
}

#[tokio::test]
async fn test_token_rejections_share_one_response() {
    let app = TestApp::spawn().await;
    let token = app.register_and_login("alice", "secret123").await;

    let (signed_part, signature) = token.rsplit_once('.').unwrap();
    let mut tampered_signature: Vec<char> = signature.chars().collect();
    tampered_signature[0] = if tampered_signature[0] == 'A' { 'B' } else { 'A' };
    let tampered = format!(
        "{}.{}",
        signed_part,
        tampered_signature.into_iter().collect::<String>()
    );

    let missing = app.get("/api/users/me").send().await.unwrap();
    let garbage = app
        .get_authenticated("/api/users/me", "not-a-token")
        .send()
        .await
        .unwrap();
    let forged = app
        .get_authenticated("/api/users/me", &tampered)
        .send()
        .await
        .unwrap();

    let mut bodies = Vec::new();
    for response in [missing, garbage, forged] {
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        bodies.push(response.json::<serde_json::Value>().await.unwrap());
    }
    assert!(bodies.windows(2).all(|pair| pair[0] == pair[1]));
}

#[tokio::test]
async fn test_deleted_account_token_is_rejected() {
    let app = TestApp::spawn().await;
    let token = app.register_and_login("alice", "secret123").await;

    let response = app
        .delete_authenticated("/api/users/me", &token)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = app
        .get_authenticated("/api/users/me", &token)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = app.login("alice", "secret123").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_expired_token_is_rejected() {
    let app =
        TestApp::spawn_with(TokenSettings::new(Duration::seconds(1), Duration::zero())).await;
    let token = app.register_and_login("alice", "secret123").await;

    tokio::time::sleep(std::time::Duration::from_millis(2100)).await;

    let response = app
        .get_authenticated("/api/users/me", &token)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_token_from_gate_is_accepted_over_http() {
    let app = TestApp::spawn().await;
    app.register("alice", "secret123").await;

    let token = app
        .gate
        .login("alice", "secret123")
        .await
        .expect("Login failed");

    let response = app
        .get_authenticated("/api/users/me", token.as_str())
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::OK);
}
