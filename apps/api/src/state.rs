use std::sync::Arc;

use crate::config::Config;
use crate::strategy::dispatcher::StrategyGenerator;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Pluggable generative backend. Production: `GeminiClient`.
    /// Tests swap in stub implementations.
    pub generator: Arc<dyn StrategyGenerator>,
    pub config: Config,
}
