use std::sync::Arc;

use axum::extract::FromRef;

use crate::{services::kubernetes::Orchestrator, utilities::config::Config};

#[derive(Clone)]
pub struct AppState {
    pub orchestrator: Arc<dyn Orchestrator>,
    pub config: Config,
}

impl AppState {
    pub fn new(orchestrator: Arc<dyn Orchestrator>, config: Config) -> Self {
        Self {
            orchestrator,
            config,
        }
    }
}

impl FromRef<AppState> for Arc<dyn Orchestrator> {
    fn from_ref(state: &AppState) -> Self {
        Arc::clone(&state.orchestrator)
    }
}

impl FromRef<AppState> for Config {
    fn from_ref(state: &AppState) -> Self {
        state.config.clone()
    }
}
