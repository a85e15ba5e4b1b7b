use std::sync::Arc;

use crate::config::Config;
use crate::courses::catalog::CatalogStore;
use crate::skills::extractor::SkillExtractor;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Course catalog snapshot, swappable through the reload endpoint.
    pub catalog: CatalogStore,
    pub extractor: Arc<SkillExtractor>,
}
