use crate::error::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;
use tracing::info;

/// Capability interface over the opaque predictive model.
///
/// Implementations must be pure and safe to call concurrently; the
/// engine fans scoring out across worker threads.
pub trait Scorer: Send + Sync {
    /// Estimated rating for a user/item pair. Must accept any ids;
    /// unseen ids degrade to a fallback estimate rather than failing.
    fn score(&self, user_id: u32, item_id: u32) -> f32;
}

/// Latent factors and bias for one user or item.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FactorRow {
    pub bias: f32,
    pub factors: Vec<f32>,
}

/// Biased-SVD parameters as exported by the external trainer.
///
/// `score` reproduces the usual biased matrix-factorization estimate:
/// global mean plus the biases and factor dot product for whichever of
/// the two ids the model has seen, clamped to the rating scale. A fully
/// unknown pair falls back to the global mean.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SvdModel {
    pub rating_scale: (f32, f32),
    pub global_mean: f32,
    pub users: HashMap<u32, FactorRow>,
    pub items: HashMap<u32, FactorRow>,
}

impl SvdModel {
    pub fn load(path: &Path) -> AppResult<Self> {
        let bytes =
            std::fs::read(path).map_err(|e| AppError::data_unavailable(path, e))?;
        let model: SvdModel = serde_json::from_slice(&bytes)
            .map_err(|e| AppError::data_unavailable(path, e))?;
        info!(
            "Loaded SVD model from {} ({} users, {} items)",
            path.display(),
            model.users.len(),
            model.items.len()
        );
        Ok(model)
    }
}

impl Scorer for SvdModel {
    fn score(&self, user_id: u32, item_id: u32) -> f32 {
        let user = self.users.get(&user_id);
        let item = self.items.get(&item_id);

        let mut estimate = self.global_mean;
        if let Some(user) = user {
            estimate += user.bias;
        }
        if let Some(item) = item {
            estimate += item.bias;
        }
        if let (Some(user), Some(item)) = (user, item) {
            estimate += user
                .factors
                .iter()
                .zip(item.factors.iter())
                .map(|(p, q)| p * q)
                .sum::<f32>();
        }

        let (lo, hi) = self.rating_scale;
        estimate.clamp(lo, hi)
    }
}

/// Wraps the model behind a uniform call, mirroring the serving cache:
/// the adapter may exist unbound, and scoring against an unbound
/// adapter is a request-scoped 503, not a panic.
#[derive(Clone)]
pub struct ScoringAdapter {
    model: Option<Arc<dyn Scorer>>,
}

impl ScoringAdapter {
    pub fn unbound() -> Self {
        Self { model: None }
    }

    pub fn bind(model: Arc<dyn Scorer>) -> Self {
        Self { model: Some(model) }
    }

    pub fn is_bound(&self) -> bool {
        self.model.is_some()
    }

    /// The bound scorer, or `ModelUnavailable`.
    pub fn bound(&self) -> AppResult<Arc<dyn Scorer>> {
        self.model.clone().ok_or(AppError::ModelUnavailable)
    }
}
