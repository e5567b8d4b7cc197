// src/state.rs
use std::sync::Arc;

use crate::config::{Config, DEFAULT_BODY_LIMIT};

pub type SharedState = Arc<AppState>;

/// Read-only settings handed to every handler.
#[derive(Debug, Clone)]
pub struct AppState {
    pub body_limit: usize,
}

impl AppState {
    pub fn new(body_limit: usize) -> Self {
        Self { body_limit }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.body_limit)
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(DEFAULT_BODY_LIMIT)
    }
}
