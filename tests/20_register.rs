mod common;

use anyhow::Result;
use reqwest::StatusCode;
use serde_json::{json, Value};

use common::{decode, session_set_cookie, session_token, unique_email, TestServer};

async fn error_message(res: reqwest::Response) -> Result<String> {
    let body = res.json::<Value>().await?;
    Ok(body["errorMessage"].as_str().unwrap_or_default().to_string())
}

#[tokio::test]
async fn register_sets_session_cookie_with_empty_body() -> Result<()> {
    let server = TestServer::spawn().await?;
    let email = unique_email("register");

    let res = server.register(&email, "secret1", "secret1").await?;
    assert_eq!(res.status(), StatusCode::OK);

    let set_cookie = session_set_cookie(&res).expect("token cookie");
    assert!(set_cookie.contains("HttpOnly"));
    assert!(set_cookie.contains("SameSite=Lax"));
    assert!(!set_cookie.contains("Secure"));

    let token = session_token(&res).expect("token value");
    let claims = decode(&token).expect("registration token verifies");
    assert!(claims.username.is_none());
    assert!(claims.user_tags.is_none());

    assert!(res.text().await?.is_empty());
    Ok(())
}

#[tokio::test]
async fn register_rejects_five_character_password() -> Result<()> {
    let server = TestServer::spawn().await?;

    let res = server.register(&unique_email("short"), "12345", "12345").await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert!(session_set_cookie(&res).is_none());
    assert_eq!(
        error_message(res).await?,
        "Please enter a password of at least 6 characters."
    );
    Ok(())
}

#[tokio::test]
async fn register_rejects_missing_fields() -> Result<()> {
    let server = TestServer::spawn().await?;

    let res = server
        .client
        .post(server.url("/register"))
        .json(&json!({ "email": "a@example.com", "password": "secret1" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert_eq!(error_message(res).await?, "Please enter all required fields.");

    // No body at all behaves the same way
    let res = server.client.post(server.url("/register")).send().await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert_eq!(error_message(res).await?, "Please enter all required fields.");
    Ok(())
}

#[tokio::test]
async fn register_rejects_mismatched_confirmation() -> Result<()> {
    let server = TestServer::spawn().await?;

    let res = server.register(&unique_email("mismatch"), "secret1", "secret2").await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        error_message(res).await?,
        "Please enter the same password twice for verification."
    );
    Ok(())
}

#[tokio::test]
async fn register_accepts_password_confirmation_alias() -> Result<()> {
    let server = TestServer::spawn().await?;

    let res = server
        .client
        .post(server.url("/register"))
        .json(&json!({
            "email": unique_email("alias"),
            "password": "secret1",
            "passwordConfirmation": "secret1"
        }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    Ok(())
}

#[tokio::test]
async fn register_twice_with_same_email() -> Result<()> {
    let server = TestServer::spawn().await?;
    let email = unique_email("twice");

    let first = server.register(&email, "secret1", "secret1").await?;
    assert_eq!(first.status(), StatusCode::OK);

    let second = server.register(&email, "secret2", "secret2").await?;
    assert_eq!(second.status(), StatusCode::BAD_REQUEST);
    assert!(session_set_cookie(&second).is_none());
    assert_eq!(
        error_message(second).await?,
        "An account with this email already exists."
    );
    Ok(())
}

#[tokio::test]
async fn legacy_register_path() -> Result<()> {
    let server = TestServer::spawn().await?;

    let res = server
        .client
        .post(server.url("/auth/"))
        .json(&json!({
            "email": unique_email("legacy"),
            "password": "secret1",
            "passwordVerify": "secret1"
        }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    assert!(session_token(&res).is_some());
    Ok(())
}

#[tokio::test]
async fn legacy_register_path_without_trailing_slash() -> Result<()> {
    let server = TestServer::spawn().await?;

    let res = server
        .client
        .post(server.url("/auth"))
        .json(&json!({
            "email": unique_email("legacy-bare"),
            "password": "secret1",
            "passwordVerify": "secret1"
        }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    assert!(session_token(&res).is_some());
    Ok(())
}
