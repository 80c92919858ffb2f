use std::sync::Arc;

use crate::config::Config;
use crate::llm_client::TextGenerator;
use crate::plan::PlanCache;
use crate::profile::ProfileStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// `LlmClient` when an API key is configured, otherwise `DisabledGenerator`.
    pub llm: Arc<dyn TextGenerator>,
    pub profiles: Arc<dyn ProfileStore>,
    pub plans: Arc<PlanCache>,
    pub config: Config,
}
