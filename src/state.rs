// src/state.rs
use std::sync::Arc;

use crate::config::Config;
use crate::services::relay::BackendRelay;

pub type SharedState = Arc<AppState>;

pub struct AppState {
    pub relay: BackendRelay,
}

impl AppState {
    pub fn new(config: &Config) -> Self {
        Self {
            relay: BackendRelay::new(&config.backend_url),
        }
    }
}
