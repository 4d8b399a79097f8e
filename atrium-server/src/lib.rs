//! Atrium server library.
//!
//! Exposes the application wiring so integration tests can assemble the
//! router exactly as `main` does.

pub mod infra;
pub mod routes;
pub mod store;
pub mod users;

pub use infra::app_state::AppState;
pub use routes::create_app;
