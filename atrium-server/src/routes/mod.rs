//! Route table.
//!
//! Binding between (method, path) pairs and handlers lives here, built once
//! at startup. Protected routes are wrapped in the auth middleware so the
//! guard runs before any user handler.

use axum::{
    Json, Router,
    http::HeaderValue,
    middleware,
    routing::{delete, get, post, put},
};
use serde_json::json;
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::warn;

use atrium_model::routes;

use crate::{
    infra::app_state::AppState,
    users::{auth, handlers as user_handlers},
};

/// Create all API routes.
pub fn create_api_router(state: AppState) -> Router<AppState> {
    Router::new()
        // Public authentication endpoints
        .route(routes::auth::REGISTER, post(auth::handlers::register))
        .route(routes::auth::LOGIN, post(auth::handlers::login))
        // Merge protected routes
        .merge(create_protected_routes(state))
}

/// Create protected routes that require authentication.
fn create_protected_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route(routes::user::COLLECTION, post(user_handlers::create_user))
        .route(routes::user::COLLECTION, get(user_handlers::list_users))
        .route(routes::user::DETAILS, get(user_handlers::current_user_details))
        .route(routes::user::ITEM, put(user_handlers::update_user))
        .route(routes::user::ITEM, delete(user_handlers::delete_user))
        .layer(middleware::from_fn_with_state(
            state,
            auth::middleware::auth_middleware,
        ))
}

/// Assemble the full application: routes, CORS, request tracing.
pub fn create_app(state: AppState) -> Router {
    let cors_layer = build_cors_layer(&state);

    Router::new()
        .route(routes::HEALTH, get(health_handler))
        .merge(create_api_router(state.clone()))
        .layer(cors_layer)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn build_cors_layer(state: &AppState) -> CorsLayer {
    if state.config.dev_mode {
        return CorsLayer::permissive();
    }

    let origins: Vec<HeaderValue> = state
        .config
        .cors_allowed_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(origin, "ignoring unparseable CORS origin");
                None
            }
        })
        .collect();

    if origins.is_empty() {
        return CorsLayer::permissive();
    }

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(Any)
        .allow_headers(Any)
}

async fn health_handler() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}
