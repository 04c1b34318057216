//! End-to-end account flows against the in-memory store

mod common;

use axum::http::StatusCode;
use fake::{faker::internet::en::SafeEmail, Fake};
use serde_json::json;

#[tokio::test]
async fn test_register_login_and_fetch_profile() {
    let app = common::TestApp::in_memory();

    let (status, registered) = app
        .post(
            "/accounts",
            &json!({"email": "a@x.com", "password": "secret123", "role": "user", "language": "en"}),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert!(registered["account"].get("password_hash").is_none());

    let (status, login) = app
        .post("/login", &json!({"email": "a@x.com", "password": "secret123"}))
        .await;
    assert_eq!(status, StatusCode::OK);
    let token = login["token"].as_str().unwrap();

    let (status, profile) = app.get_auth("/accounts", token).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(profile["id"], registered["account"]["id"]);
    assert_eq!(profile["email"], "a@x.com");
    assert_eq!(profile["role"], "user");
    assert_eq!(profile["language"], "en");
    assert!(profile.get("password_hash").is_none());
}

#[tokio::test]
async fn test_legacy_field_names_are_accepted() {
    let app = common::TestApp::in_memory();

    let (status, body) = app
        .post(
            "/accounts",
            &json!({"email": "b@x.com", "password": "secret123", "rol": "admin", "lenguage": "es"}),
        )
        .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["account"]["role"], "admin");
    assert_eq!(body["account"]["language"], "es");
}

#[tokio::test]
async fn test_profiles_are_isolated_per_token() {
    let app = common::TestApp::in_memory();
    let first: String = SafeEmail().fake();
    let second = format!("other.{}", first);

    let first_token = app.register_and_login(&first, "password-one").await;
    let second_token = app.register_and_login(&second, "password-two").await;

    let (_, profile) = app.get_auth("/accounts", &first_token).await;
    assert_eq!(profile["email"], first.as_str());

    let (_, profile) = app.get_auth("/accounts", &second_token).await;
    assert_eq!(profile["email"], second.as_str());
}

#[tokio::test]
async fn test_token_from_login_expires_after_an_hour() {
    let app = common::TestApp::in_memory();
    let token = app.register_and_login("c@x.com", "secret123").await;

    let later = chrono::Utc::now() + chrono::Duration::seconds(3601);
    assert!(app.state.jwt().verify_at(&token, later).is_err());
    assert_eq!(app.state.jwt().verify(&token).unwrap(), "c@x.com");
}

#[tokio::test]
async fn test_second_registration_with_same_email_fails() {
    let app = common::TestApp::in_memory();
    let body = json!({"email": "d@x.com", "password": "secret123"});

    let (status, _) = app.post("/accounts", &body).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, response) = app.post("/accounts", &body).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(response["error"]["code"], "DUPLICATE_EMAIL");
}
