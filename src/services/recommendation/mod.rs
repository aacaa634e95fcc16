use crate::error::{AppError, AppResult};
use crate::models::ScoredMovie;
use crate::services::catalog::CatalogStore;
use crate::services::interactions::InteractionIndex;
use crate::services::scoring::ScoringAdapter;
use crate::utils::top_k_by_score;
use rayon::prelude::*;
use std::sync::Arc;
use tracing::info;

/// Candidate generation, scoring, ranking and top-K selection over the
/// startup-loaded state.
pub struct RecommendationEngine {
    catalog: Arc<CatalogStore>,
    interactions: Arc<InteractionIndex>,
    scoring: ScoringAdapter,
    pool: Arc<rayon::ThreadPool>,
}

impl RecommendationEngine {
    pub fn new(
        catalog: Arc<CatalogStore>,
        interactions: Arc<InteractionIndex>,
        scoring: ScoringAdapter,
        workers: usize,
    ) -> anyhow::Result<Self> {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(workers.max(1))
            .thread_name(|i| format!("scoring-{i}"))
            .build()?;
        Ok(Self {
            catalog,
            interactions,
            scoring,
            pool: Arc::new(pool),
        })
    }

    pub fn is_model_bound(&self) -> bool {
        self.scoring.is_bound()
    }

    /// Top-`k` unseen movies for `user_id`, ranked by predicted rating
    /// (ties break on ascending movie id).
    ///
    /// Fails with `UserNotFound` for users absent from the interaction
    /// index and `ModelUnavailable` when no model is bound. A ranked id
    /// missing from the catalog is a `MissingMovie` consistency error.
    pub fn recommend(&self, user_id: u32, k: usize) -> AppResult<Vec<ScoredMovie>> {
        let seen = self
            .interactions
            .seen_items(user_id)
            .ok_or(AppError::UserNotFound(user_id))?;
        let scorer = self.scoring.bound()?;

        let candidates: Vec<u32> = self
            .catalog
            .all_ids()
            .iter()
            .copied()
            .filter(|id| !seen.contains(id))
            .collect();

        info!(
            "Predicting ratings for {} movies for user {}",
            candidates.len(),
            user_id
        );

        // Each candidate evaluation is independent and the model is
        // read-only at inference time, so scoring fans out over the
        // dedicated pool.
        let scored: Vec<(u32, f32)> = self.pool.install(|| {
            candidates
                .par_iter()
                .map(|&id| (id, scorer.score(user_id, id)))
                .collect()
        });

        top_k_by_score(scored, k)
            .into_iter()
            .map(|(id, score)| {
                let movie = self
                    .catalog
                    .get(id)
                    .cloned()
                    .ok_or(AppError::MissingMovie(id))?;
                Ok(ScoredMovie { movie, score })
            })
            .collect()
    }
}
