use crate::error::{AppError, AppResult};
use crate::models::Movie;
use std::collections::HashMap;
use std::path::Path;
use tracing::info;

const FIELD_SEPARATOR: &str = "::";

/// Read-only movie catalog, loaded once at startup.
///
/// Lookups go through a hash map keyed by id; `all_ids` preserves the
/// file's load order so candidate generation is stable across calls.
#[derive(Debug)]
pub struct CatalogStore {
    movies: HashMap<u32, Movie>,
    ids: Vec<u32>,
}

impl CatalogStore {
    /// Loads the catalog from a `::`-delimited, Latin-1 encoded file
    /// with columns MovieID, Title, Genres.
    pub fn load(path: &Path) -> AppResult<Self> {
        let bytes =
            std::fs::read(path).map_err(|e| AppError::data_unavailable(path, e))?;
        // The catalog file is Latin-1; every byte maps directly to the
        // same Unicode code point.
        let text: String = bytes.iter().map(|&b| b as char).collect();

        let mut movies = Vec::new();
        for (lineno, line) in text.lines().enumerate() {
            if line.is_empty() {
                continue;
            }
            let mut fields = line.splitn(3, FIELD_SEPARATOR);
            let (id, title, genres) = match (fields.next(), fields.next(), fields.next()) {
                (Some(id), Some(title), Some(genres)) => (id, title, genres),
                _ => {
                    return Err(AppError::data_unavailable(
                        path,
                        format!("line {}: expected 3 '::'-delimited fields", lineno + 1),
                    ))
                }
            };
            let id: u32 = id.parse().map_err(|_| {
                AppError::data_unavailable(
                    path,
                    format!("line {}: invalid movie id {:?}", lineno + 1, id),
                )
            })?;
            movies.push(Movie::new(id, title, genres));
        }

        let store = Self::from_movies(movies);
        info!("Loaded {} movies from {}", store.len(), path.display());
        Ok(store)
    }

    /// Builds a catalog from already-parsed movies. Duplicate ids keep
    /// the first occurrence.
    pub fn from_movies(movies: impl IntoIterator<Item = Movie>) -> Self {
        let mut map = HashMap::new();
        let mut ids = Vec::new();
        for movie in movies {
            if !map.contains_key(&movie.id) {
                ids.push(movie.id);
                map.insert(movie.id, movie);
            }
        }
        Self { movies: map, ids }
    }

    pub fn get(&self, id: u32) -> Option<&Movie> {
        self.movies.get(&id)
    }

    /// All movie ids in load order.
    pub fn all_ids(&self) -> &[u32] {
        &self.ids
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}
