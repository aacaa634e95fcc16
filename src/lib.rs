pub mod config;
pub mod error;
pub mod models;
pub mod server;
pub mod services;
pub mod utils;

pub use config::Config;
pub use error::{AppError, AppResult};
pub use models::*;

use anyhow::Result;
use services::catalog::CatalogStore;
use services::interactions::InteractionIndex;
use services::recommendation::RecommendationEngine;
use services::scoring::{ScoringAdapter, SvdModel};
use std::sync::Arc;

/// Immutable process-wide serving state, built once before the listener
/// binds. Requests only ever read from it.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub catalog: Arc<CatalogStore>,
    pub interactions: Arc<InteractionIndex>,
    pub engine: Arc<RecommendationEngine>,
}

impl AppState {
    /// Loads the catalog, interaction index and scoring model. Any
    /// failure here is fatal; there is no partial-availability mode.
    pub fn new(config: Config) -> Result<Self> {
        let config = Arc::new(config);

        let catalog = Arc::new(CatalogStore::load(&config.data.movies_path)?);
        let interactions = Arc::new(InteractionIndex::load(&config.data.ratings_path)?);
        let model = Arc::new(SvdModel::load(&config.model.path)?);

        let engine = Arc::new(RecommendationEngine::new(
            catalog.clone(),
            interactions.clone(),
            ScoringAdapter::bind(model),
            config.server.workers,
        )?);

        Ok(Self {
            config,
            catalog,
            interactions,
            engine,
        })
    }
}

pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();
}
