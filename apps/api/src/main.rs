mod assessment;
mod config;
mod errors;
mod goals;
mod llm_client;
mod plan;
mod profile;
mod routes;
mod state;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::llm_client::{DisabledGenerator, LlmClient, TextGenerator};
use crate::plan::PlanCache;
use crate::profile::{InMemoryProfileStore, ProfileStore, RedisProfileStore};
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on malformed numeric env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting SkillPath API v{}", env!("CARGO_PKG_VERSION"));

    // Text generation: live client with a key, heuristic-only without
    let llm: Arc<dyn TextGenerator> = match &config.anthropic_api_key {
        Some(key) => {
            let client = LlmClient::new(key.clone())?;
            info!("LLM client initialized (model: {})", llm_client::MODEL);
            Arc::new(client)
        }
        None => {
            warn!("ANTHROPIC_API_KEY not set; assessments will use heuristic scoring");
            Arc::new(DisabledGenerator)
        }
    };

    // Profile store
    let profiles: Arc<dyn ProfileStore> = match &config.redis_url {
        Some(url) => {
            let store = RedisProfileStore::open(url)?;
            info!("Redis profile store initialized");
            Arc::new(store)
        }
        None => {
            info!("REDIS_URL not set; profiles are kept in memory");
            Arc::new(InMemoryProfileStore::new())
        }
    };

    let plans = Arc::new(PlanCache::new(config.plan_policy));
    info!("Plan policy: {:?}", config.plan_policy);

    // Build app state
    let state = AppState {
        llm,
        profiles,
        plans,
        config: config.clone(),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
