//! Register/login flow and guard behaviour.

use anyhow::Result;
use axum::http::StatusCode;
use serde_json::{Value, json};

use atrium_model::routes::{self, replace_param};

#[path = "support/mod.rs"]
mod support;

use support::{bearer, build_test_app, register_user};

#[tokio::test]
async fn register_then_login_issues_usable_tokens() -> Result<()> {
    let (server, _) = build_test_app()?;
    let (user_id, register_token) = register_user(&server, "ana", "ana-password").await?;

    // The registration token already authorizes protected routes.
    server
        .get(routes::user::DETAILS)
        .add_header("Authorization", bearer(&register_token))
        .await
        .assert_status_ok();

    let response = server
        .post(routes::auth::LOGIN)
        .json(&json!({ "username": "ana", "password": "ana-password" }))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["user_id"].as_i64(), Some(user_id));

    // Login normalizes the name the same way registration does.
    server
        .post(routes::auth::LOGIN)
        .json(&json!({ "username": "  Ana  ", "password": "ana-password" }))
        .await
        .assert_status_ok();

    let login_token = body["access_token"].as_str().expect("token issued");
    let details = server
        .get(routes::user::DETAILS)
        .add_header("Authorization", bearer(login_token))
        .await;
    details.assert_status_ok();
    let details_body: Value = details.json();
    assert_eq!(details_body["id"].as_i64(), Some(user_id));
    // Login stamps last_login.
    assert!(!details_body["last_login"].is_null());

    Ok(())
}

#[tokio::test]
async fn login_rejects_bad_credentials() -> Result<()> {
    let (server, _) = build_test_app()?;
    register_user(&server, "ana", "ana-password").await?;

    server
        .post(routes::auth::LOGIN)
        .json(&json!({ "username": "ana", "password": "wrong-password" }))
        .await
        .assert_status(StatusCode::UNAUTHORIZED);

    server
        .post(routes::auth::LOGIN)
        .json(&json!({ "username": "nobody", "password": "ana-password" }))
        .await
        .assert_status(StatusCode::UNAUTHORIZED);

    Ok(())
}

#[tokio::test]
async fn register_validates_and_rejects_duplicates() -> Result<()> {
    let (server, _) = build_test_app()?;
    register_user(&server, "ana", "ana-password").await?;

    server
        .post(routes::auth::REGISTER)
        .json(&json!({
            "username": "ana",
            "display_name": "Ana Again",
            "password": "ana-password"
        }))
        .await
        .assert_status(StatusCode::CONFLICT);

    server
        .post(routes::auth::REGISTER)
        .json(&json!({
            "username": "a!",
            "display_name": "Bad Name",
            "password": "long-enough-password"
        }))
        .await
        .assert_status(StatusCode::BAD_REQUEST);

    Ok(())
}

#[tokio::test]
async fn token_for_a_deleted_user_stops_working() -> Result<()> {
    let (server, _) = build_test_app()?;
    let (_, admin_token) = register_user(&server, "keeper", "keeper-password").await?;
    let (target_id, target_token) = register_user(&server, "target", "target-password").await?;

    server
        .delete(&replace_param(routes::user::ITEM, "{id}", &target_id.to_string()))
        .add_header("Authorization", bearer(&admin_token))
        .await
        .assert_status(StatusCode::NO_CONTENT);

    // The guard re-resolves the identity on every request, so the stale
    // token no longer authenticates.
    server
        .get(routes::user::DETAILS)
        .add_header("Authorization", bearer(&target_token))
        .await
        .assert_status(StatusCode::UNAUTHORIZED);

    Ok(())
}

#[tokio::test]
async fn deactivated_users_cannot_authenticate() -> Result<()> {
    let (server, _) = build_test_app()?;
    let (_, admin_token) = register_user(&server, "keeper", "keeper-password").await?;
    let (target_id, target_token) = register_user(&server, "target", "target-password").await?;

    server
        .put(&replace_param(routes::user::ITEM, "{id}", &target_id.to_string()))
        .add_header("Authorization", bearer(&admin_token))
        .json(&json!({ "is_active": false }))
        .await
        .assert_status_ok();

    server
        .get(routes::user::DETAILS)
        .add_header("Authorization", bearer(&target_token))
        .await
        .assert_status(StatusCode::UNAUTHORIZED);

    server
        .post(routes::auth::LOGIN)
        .json(&json!({ "username": "target", "password": "target-password" }))
        .await
        .assert_status(StatusCode::FORBIDDEN);

    Ok(())
}
