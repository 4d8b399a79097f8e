use std::{fmt, sync::Arc};

use crate::infra::config::Config;
use crate::store::UserStore;

/// Shared application state.
///
/// Holds immutable references only: the store port and the configuration are
/// acquired once at startup and never reassigned, so cloning the state per
/// request is just two `Arc` bumps.
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserStore>,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(users: Arc<dyn UserStore>, config: Arc<Config>) -> Self {
        Self { users, config }
    }

    pub fn token_key(&self) -> &[u8] {
        self.config.auth_token_key.as_bytes()
    }
}

impl fmt::Debug for AppState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppState").finish_non_exhaustive()
    }
}
