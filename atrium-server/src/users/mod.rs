pub mod auth;
pub mod handlers;
pub mod service;

pub use service::UserService;
