use std::sync::Arc;

use crate::analysis::service::CareerAnalysisService;
use crate::config::Config;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// The analysis orchestrator. Owns the gateway and the recommendation
    /// cache. Total API: handlers never see an analysis error.
    pub service: Arc<CareerAnalysisService>,
    pub config: Config,
}
