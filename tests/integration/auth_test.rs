//! Registration, login, logout, and session validation.

use http::StatusCode;
use uuid::Uuid;

use crate::require_test_app;

#[tokio::test]
async fn register_then_login_and_logout() {
    let app = require_test_app!();

    let (token, _user_id) = app.register_user("alice").await;

    // The registration token authenticates immediately.
    let me = app.request("GET", "/api/user", None, Some(&token)).await;
    assert_eq!(me.status, StatusCode::OK);
    let username = me.json["username"].as_str().unwrap().to_string();

    // A fresh login works with the same credentials.
    let login = app
        .request(
            "POST",
            "/api/login",
            Some(serde_json::json!({
                "username": username,
                "password": "plum-Tractor-91",
            })),
            None,
        )
        .await;
    assert_eq!(login.status, StatusCode::OK);
    assert!(login.json["token"].as_str().is_some());

    // Logout invalidates the token.
    let logout = app.request("POST", "/api/logout", None, Some(&token)).await;
    assert_eq!(logout.status, StatusCode::OK);

    let after = app.request("GET", "/api/user", None, Some(&token)).await;
    assert_eq!(after.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn duplicate_username_and_email_conflict() {
    let app = require_test_app!();

    let (token, _) = app.register_user("dupe").await;
    let me = app.request("GET", "/api/user", None, Some(&token)).await;
    let username = me.json["username"].as_str().unwrap().to_string();
    let email = me.json["email"].as_str().unwrap().to_string();

    // Same username, fresh email.
    let dup_username = app
        .request(
            "POST",
            "/api/register",
            Some(serde_json::json!({
                "username": username,
                "email": format!("fresh-{}@test.edu", Uuid::new_v4().simple()),
                "password": "plum-Tractor-91",
                "full_name": "Dup",
                "year": 1,
            })),
            None,
        )
        .await;
    assert_eq!(dup_username.status, StatusCode::CONFLICT);

    // Fresh username, same email.
    let dup_email = app
        .request(
            "POST",
            "/api/register",
            Some(serde_json::json!({
                "username": format!("fresh-{}", Uuid::new_v4().simple()),
                "email": email,
                "password": "plum-Tractor-91",
                "full_name": "Dup",
                "year": 1,
            })),
            None,
        )
        .await;
    assert_eq!(dup_email.status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn wrong_password_rejected() {
    let app = require_test_app!();

    let (token, _) = app.register_user("bob").await;
    let me = app.request("GET", "/api/user", None, Some(&token)).await;
    let username = me.json["username"].as_str().unwrap().to_string();

    let login = app
        .request(
            "POST",
            "/api/login",
            Some(serde_json::json!({
                "username": username,
                "password": "definitely-wrong",
            })),
            None,
        )
        .await;
    assert_eq!(login.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn missing_token_rejected() {
    let app = require_test_app!();

    let response = app.request("GET", "/api/user", None, None).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn weak_password_rejected() {
    let app = require_test_app!();

    let response = app
        .request(
            "POST",
            "/api/register",
            Some(serde_json::json!({
                "username": format!("weak-{}", Uuid::new_v4().simple()),
                "email": format!("weak-{}@test.edu", Uuid::new_v4().simple()),
                "password": "password",
                "full_name": "Weak",
                "year": 1,
            })),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn password_change_requires_current_password() {
    let app = require_test_app!();

    let (token, user_id) = app.register_user("pwchange").await;

    let wrong = app
        .request(
            "PUT",
            &format!("/api/user/{user_id}/password"),
            Some(serde_json::json!({
                "current_password": "not-the-password",
                "new_password": "fresh-Engine-42",
            })),
            Some(&token),
        )
        .await;
    assert_eq!(wrong.status, StatusCode::UNAUTHORIZED);

    let right = app
        .request(
            "PUT",
            &format!("/api/user/{user_id}/password"),
            Some(serde_json::json!({
                "current_password": "plum-Tractor-91",
                "new_password": "fresh-Engine-42",
            })),
            Some(&token),
        )
        .await;
    assert_eq!(right.status, StatusCode::OK);
}
