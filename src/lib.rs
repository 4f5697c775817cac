pub mod api;
pub mod backend;
pub mod config;
pub mod error;
pub mod metadata;
pub mod orchestrator;
pub mod resolver;

use std::sync::Arc;
use config::Config;
use error::Result;
use orchestrator::Orchestrator;

/// Application state that will be shared across handlers. Read-only; each
/// request runs against it without further coordination.
#[derive(Clone)]
pub struct AppState {
    pub orchestrator: Arc<Orchestrator>,
}

impl AppState {
    pub fn new(config: &Config) -> Result<Self> {
        Ok(AppState {
            orchestrator: Arc::new(Orchestrator::new(config)?),
        })
    }
}
