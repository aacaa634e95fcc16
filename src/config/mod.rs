use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub data: DataConfig,
    pub model: ModelConfig,
    pub recommendation: RecommendationConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Size of the rayon pool used for candidate scoring.
    pub workers: usize,
    /// Hard ceiling on request handling; a user with a short history
    /// triggers a full-catalog scoring pass.
    pub request_timeout_secs: u64,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> anyhow::Result<SocketAddr> {
        Ok(format!("{}:{}", self.host, self.port).parse()?)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataConfig {
    /// `::`-delimited file with columns UserID, MovieID, Rating, Timestamp.
    pub ratings_path: PathBuf,
    /// `::`-delimited, Latin-1 encoded file with columns MovieID, Title, Genres.
    pub movies_path: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelConfig {
    /// Persisted SVD artifact exported by the external trainer.
    pub path: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendationConfig {
    pub top_k: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 8080,
                workers: num_cpus::get(),
                request_timeout_secs: 30,
            },
            data: DataConfig {
                ratings_path: PathBuf::from("data/raw/ratings.dat"),
                movies_path: PathBuf::from("data/raw/movies.dat"),
            },
            model: ModelConfig {
                path: PathBuf::from("models/svd_model.json"),
            },
            recommendation: RecommendationConfig { top_k: 10 },
        }
    }
}

impl Config {
    pub fn from_file(path: &str) -> anyhow::Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(path))
            .add_source(config::Environment::with_prefix("MOVIEREC"))
            .build()?;

        Ok(settings.try_deserialize()?)
    }
}
