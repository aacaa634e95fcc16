use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

/// Application-level errors.
///
/// Startup errors (`DataUnavailable`) abort the process before the
/// listener binds; everything else is request-scoped and translated to
/// a response at the handler boundary.
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    /// A startup input file is missing or malformed. Fatal.
    #[error("{0}")]
    DataUnavailable(String),

    /// The requested user has no interaction records.
    #[error("User ID {0} not found in the ratings data.")]
    UserNotFound(u32),

    /// The user id path segment did not parse as a positive integer.
    #[error("Invalid user id: {0}")]
    InvalidInput(String),

    /// The scoring adapter has no model bound.
    #[error("Model is not loaded.")]
    ModelUnavailable,

    /// A ranked movie id was absent from the catalog. Indicates the
    /// catalog and ratings data are out of sync.
    #[error("Movie ID {0} is missing from the catalog.")]
    MissingMovie(u32),

    /// Anything else that escapes the serving path.
    #[error("Internal server error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn data_unavailable(path: &std::path::Path, reason: impl std::fmt::Display) -> Self {
        Self::DataUnavailable(format!("{}: {}", path.display(), reason))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match self {
            AppError::UserNotFound(_) => StatusCode::NOT_FOUND,
            AppError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            AppError::ModelUnavailable => StatusCode::SERVICE_UNAVAILABLE,
            AppError::MissingMovie(_) => {
                tracing::error!("catalog inconsistency: {}", self);
                StatusCode::INTERNAL_SERVER_ERROR
            }
            AppError::DataUnavailable(_) | AppError::Internal(_) => {
                tracing::error!("request failed: {}", self);
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let body = Json(json!({
            "detail": self.to_string()
        }));

        (status, body).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_not_found_message_contains_id() {
        let err = AppError::UserNotFound(999999);
        assert_eq!(
            err.to_string(),
            "User ID 999999 not found in the ratings data."
        );
    }

    #[test]
    fn model_unavailable_message_matches_contract() {
        assert_eq!(AppError::ModelUnavailable.to_string(), "Model is not loaded.");
    }

    #[test]
    fn status_mapping() {
        assert_eq!(
            AppError::UserNotFound(1).into_response().status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::InvalidInput("abc".into()).into_response().status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::ModelUnavailable.into_response().status(),
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(
            AppError::MissingMovie(7).into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
