mod config;
mod courses;
mod errors;
mod llm_client;
mod routes;
mod skills;
mod state;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::courses::catalog::CatalogStore;
use crate::llm_client::{GeminiClient, TextGenerator};
use crate::routes::build_router;
use crate::skills::extractor::SkillExtractor;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting SkillsTown API v{}", env!("CARGO_PKG_VERSION"));

    // Course catalog, loaded once and reloadable over HTTP
    let catalog = CatalogStore::open(config.catalog_path.clone());
    if catalog.current().await.is_empty() {
        warn!("Course catalog is empty; search and recommendations will return no courses");
    }

    // Skill extractor: LLM when a key is configured, regex fallback otherwise
    let generator = build_generator(&config);
    let extractor = Arc::new(SkillExtractor::new(generator, config.max_skills));

    let state = AppState {
        config: config.clone(),
        catalog,
        extractor,
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// A client that fails to build leaves the service on the fallback path
/// instead of refusing to start.
fn build_generator(config: &Config) -> Option<Arc<dyn TextGenerator>> {
    let api_key = config.gemini_api_key.clone()?;
    match GeminiClient::new(
        config.gemini_api_url.clone(),
        api_key,
        Duration::from_secs(config.llm_timeout_secs),
    ) {
        Ok(client) => {
            info!("LLM client initialized ({})", config.gemini_api_url);
            Some(Arc::new(client))
        }
        Err(e) => {
            warn!("Could not build LLM client: {e}");
            None
        }
    }
}
