use std::sync::Arc;

use crate::catalog::SkillCatalog;
use crate::config::Config;
use crate::matching::scorer::{CatalogFitScorer, FitScorer};

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Immutable roles + synonyms, built once at startup.
    pub catalog: Arc<SkillCatalog>,
    /// Pluggable fit scorer. Default: CatalogFitScorer over `catalog`.
    pub fit_scorer: Arc<dyn FitScorer>,
}

impl AppState {
    pub fn new(config: Config, catalog: SkillCatalog) -> Self {
        let catalog = Arc::new(catalog);
        let fit_scorer = Arc::new(CatalogFitScorer::new(Arc::clone(&catalog)));
        Self {
            config,
            catalog,
            fit_scorer,
        }
    }
}
