use serde::{Deserialize, Serialize};

/// A recommendable movie as loaded from the catalog file.
///
/// Field names on the wire follow the external contract
/// (`MovieID` / `Title` / `Genres`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Movie {
    #[serde(rename = "MovieID")]
    pub id: u32,
    #[serde(rename = "Title")]
    pub title: String,
    #[serde(rename = "Genres")]
    pub genres: String,
}

impl Movie {
    pub fn new(id: u32, title: impl Into<String>, genres: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            genres: genres.into(),
        }
    }
}

/// A movie paired with its predicted rating, as produced by the engine.
/// The score is an engine-internal detail and does not appear on the wire.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredMovie {
    pub movie: Movie,
    pub score: f32,
}

/// Success payload for `GET /recommend/{user_id}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictionResponse {
    #[serde(rename = "UserID")]
    pub user_id: u32,
    #[serde(rename = "Recommendations")]
    pub recommendations: Vec<Movie>,
}

/// Payload for the `GET /` health check.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub message: String,
}

impl HealthResponse {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            status: "ok".to_string(),
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status: "error".to_string(),
            message: message.into(),
        }
    }
}
