use crate::error::{AppError, AppResult};
use crate::models::{HealthResponse, PredictionResponse};
use crate::AppState;
use axum::{
    extract::{Path, State},
    response::Json,
    routing::get,
    Router,
};
use std::time::Duration;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    if state.engine.is_model_bound() && !state.catalog.is_empty() {
        Json(HealthResponse::ok("Recommendation API is running!"))
    } else {
        Json(HealthResponse::error("Model or data is not loaded!"))
    }
}

async fn get_recommendations(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> AppResult<Json<PredictionResponse>> {
    // Parsed by hand so a malformed segment surfaces as a 400 with the
    // contract's detail body instead of a framework rejection.
    let user_id: u32 = user_id
        .parse()
        .map_err(|_| AppError::InvalidInput(user_id.clone()))?;

    let engine = state.engine.clone();
    let k = state.config.recommendation.top_k;

    // The scoring pass walks the whole unseen catalog; keep it off the
    // async executor.
    let ranked = tokio::task::spawn_blocking(move || engine.recommend(user_id, k))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

    Ok(Json(PredictionResponse {
        user_id,
        recommendations: ranked.into_iter().map(|s| s.movie).collect(),
    }))
}

pub fn create_router(state: AppState) -> Router {
    let timeout = Duration::from_secs(state.config.server.request_timeout_secs);

    Router::new()
        .route("/", get(health_check))
        .route("/recommend/:user_id", get(get_recommendations))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive())
                .layer(TimeoutLayer::new(timeout)),
        )
        .with_state(state)
}
