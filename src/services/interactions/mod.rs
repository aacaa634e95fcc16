use crate::error::{AppError, AppResult};
use std::collections::{HashMap, HashSet};
use std::path::Path;
use tracing::info;

const FIELD_SEPARATOR: &str = "::";

/// Per-user sets of already-rated movies, grouped once at startup from
/// the raw interaction file.
///
/// `seen_items` returns `None` for unknown users so callers cannot
/// mistake a missing user for a user with an empty history.
#[derive(Debug)]
pub struct InteractionIndex {
    seen: HashMap<u32, HashSet<u32>>,
}

impl InteractionIndex {
    /// Loads the index from a `::`-delimited file with columns
    /// UserID, MovieID, Rating, Timestamp. The rating and timestamp
    /// are validated but not retained; serving only needs the pair.
    pub fn load(path: &Path) -> AppResult<Self> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| AppError::data_unavailable(path, e))?;

        let mut records = Vec::new();
        for (lineno, line) in text.lines().enumerate() {
            if line.is_empty() {
                continue;
            }
            let fields: Vec<&str> = line.split(FIELD_SEPARATOR).collect();
            if fields.len() != 4 {
                return Err(AppError::data_unavailable(
                    path,
                    format!("line {}: expected 4 '::'-delimited fields", lineno + 1),
                ));
            }
            let user_id: u32 = fields[0].parse().map_err(|_| {
                AppError::data_unavailable(
                    path,
                    format!("line {}: invalid user id {:?}", lineno + 1, fields[0]),
                )
            })?;
            let movie_id: u32 = fields[1].parse().map_err(|_| {
                AppError::data_unavailable(
                    path,
                    format!("line {}: invalid movie id {:?}", lineno + 1, fields[1]),
                )
            })?;
            if fields[2].parse::<f32>().is_err() || fields[3].parse::<i64>().is_err() {
                return Err(AppError::data_unavailable(
                    path,
                    format!("line {}: invalid rating or timestamp", lineno + 1),
                ));
            }
            records.push((user_id, movie_id));
        }

        let index = Self::from_records(records);
        info!(
            "Built interaction index for {} users from {}",
            index.user_count(),
            path.display()
        );
        Ok(index)
    }

    /// Groups `(user_id, movie_id)` records by user. O(records).
    pub fn from_records(records: impl IntoIterator<Item = (u32, u32)>) -> Self {
        let mut seen: HashMap<u32, HashSet<u32>> = HashMap::new();
        for (user_id, movie_id) in records {
            seen.entry(user_id).or_default().insert(movie_id);
        }
        Self { seen }
    }

    pub fn has_user(&self, user_id: u32) -> bool {
        self.seen.contains_key(&user_id)
    }

    /// The set of movies the user has already rated, or `None` when the
    /// user has no interaction records at all.
    pub fn seen_items(&self, user_id: u32) -> Option<&HashSet<u32>> {
        self.seen.get(&user_id)
    }

    pub fn user_count(&self) -> usize {
        self.seen.len()
    }
}
