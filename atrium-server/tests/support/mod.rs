use std::sync::Arc;

use anyhow::Result;
use axum_test::TestServer;
use serde_json::{Value, json};

use atrium_model::routes;
use atrium_server::{
    AppState, create_app,
    infra::config::Config,
    store::{MemoryUserStore, UserStore},
};

// Used by test modules, but not every test binary touches every helper.
#[allow(unused)]
pub fn bearer(token: &str) -> String {
    format!("Bearer {}", token)
}

/// Build a test server over the in-memory store with a fixed signing key.
#[allow(unused)]
pub fn build_test_app() -> Result<(TestServer, AppState)> {
    let config = Config {
        server_host: "127.0.0.1".into(),
        server_port: 0,
        database_url: None,
        cors_allowed_origins: vec![],
        dev_mode: true,
        auth_token_key: "test-token-signing-key".into(),
    };

    let users: Arc<dyn UserStore> = Arc::new(MemoryUserStore::new());
    let state = AppState::new(users, Arc::new(config));

    let server = TestServer::new(create_app(state.clone()))
        .map_err(|err| anyhow::anyhow!(err.to_string()))?;

    Ok((server, state))
}

/// Register a user through the public endpoint; returns `(user_id, token)`.
#[allow(unused)]
pub async fn register_user(
    server: &TestServer,
    username: &str,
    password: &str,
) -> Result<(i64, String)> {
    let response = server
        .post(routes::auth::REGISTER)
        .json(&json!({
            "username": username,
            "display_name": format!("{} display", username),
            "password": password
        }))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();

    let user_id = body["user_id"].as_i64().expect("user_id provided");
    let access_token = body["access_token"]
        .as_str()
        .expect("access_token provided")
        .to_string();

    Ok((user_id, access_token))
}
