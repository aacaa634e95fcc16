use movierec::services::scoring::{FactorRow, SvdModel};
use movierec::{AppState, Config};
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// Writes a complete fixture data directory: a 15-movie catalog, a
/// ratings file where user 1 has rated movies 1-5 and user 2 has rated
/// everything but movies 1-3, and an SVD artifact that favors higher
/// movie ids.
fn write_fixtures(dir: &Path) -> Config {
    let movies: String = (1..=15)
        .map(|id| format!("{id}::Movie {id} (199{})::Drama|Comedy\n", id % 10))
        .collect();
    fs::write(dir.join("movies.dat"), movies).unwrap();

    let mut ratings = String::new();
    for movie_id in 1..=5 {
        ratings.push_str(&format!("1::{movie_id}::4::978300760\n"));
    }
    for movie_id in 4..=15 {
        ratings.push_str(&format!("2::{movie_id}::3::978300761\n"));
    }
    fs::write(dir.join("ratings.dat"), ratings).unwrap();

    let items: HashMap<u32, FactorRow> = (1..=15)
        .map(|id| {
            (
                id,
                FactorRow {
                    bias: id as f32 / 100.0,
                    factors: vec![0.1, 0.1],
                },
            )
        })
        .collect();
    let mut users = HashMap::new();
    users.insert(
        1,
        FactorRow {
            bias: 0.2,
            factors: vec![1.0, 0.5],
        },
    );
    users.insert(
        2,
        FactorRow {
            bias: -0.1,
            factors: vec![0.3, 0.3],
        },
    );
    let model = SvdModel {
        rating_scale: (1.0, 5.0),
        global_mean: 3.5,
        users,
        items,
    };
    fs::write(
        dir.join("svd_model.json"),
        serde_json::to_string(&model).unwrap(),
    )
    .unwrap();

    let mut config = Config::default();
    config.data.movies_path = dir.join("movies.dat");
    config.data.ratings_path = dir.join("ratings.dat");
    config.model.path = dir.join("svd_model.json");
    config.server.workers = 2;
    config
}

#[test]
fn startup_loads_all_three_structures() {
    let dir = TempDir::new().unwrap();
    let state = AppState::new(write_fixtures(dir.path())).unwrap();

    assert_eq!(state.catalog.len(), 15);
    assert_eq!(state.interactions.user_count(), 2);
    assert!(state.engine.is_model_bound());
}

#[test]
fn recommendations_never_overlap_seen_items() {
    let dir = TempDir::new().unwrap();
    let state = AppState::new(write_fixtures(dir.path())).unwrap();

    let result = state.engine.recommend(1, 10).unwrap();
    assert_eq!(result.len(), 10);
    let seen = state.interactions.seen_items(1).unwrap();
    for scored in &result {
        assert!(!seen.contains(&scored.movie.id));
        assert!(!scored.movie.title.is_empty());
    }
}

#[test]
fn scores_descend_and_results_are_deterministic() {
    let dir = TempDir::new().unwrap();
    let state = AppState::new(write_fixtures(dir.path())).unwrap();

    let first = state.engine.recommend(1, 10).unwrap();
    for pair in first.windows(2) {
        assert!(pair[0].score >= pair[1].score);
    }

    let second = state.engine.recommend(1, 10).unwrap();
    let ids = |r: &[movierec::ScoredMovie]| r.iter().map(|s| s.movie.id).collect::<Vec<_>>();
    assert_eq!(ids(&first), ids(&second));
}

#[test]
fn user_with_three_unseen_movies_gets_exactly_three() {
    let dir = TempDir::new().unwrap();
    let state = AppState::new(write_fixtures(dir.path())).unwrap();

    // User 2 has rated movies 4..=15; only 1, 2, 3 remain.
    let result = state.engine.recommend(2, 10).unwrap();
    let mut ids: Vec<u32> = result.iter().map(|s| s.movie.id).collect();
    ids.sort_unstable();
    assert_eq!(ids, vec![1, 2, 3]);
}

#[test]
fn unknown_user_is_not_found() {
    let dir = TempDir::new().unwrap();
    let state = AppState::new(write_fixtures(dir.path())).unwrap();

    let err = state.engine.recommend(999999, 10).unwrap_err();
    assert!(err.to_string().contains("999999"));
}

#[test]
fn missing_ratings_file_aborts_startup() {
    let dir = TempDir::new().unwrap();
    let mut config = write_fixtures(dir.path());
    config.data.ratings_path = dir.path().join("does_not_exist.dat");

    assert!(AppState::new(config).is_err());
}

#[test]
fn malformed_movies_file_aborts_startup() {
    let dir = TempDir::new().unwrap();
    let config = write_fixtures(dir.path());
    fs::write(dir.path().join("movies.dat"), "garbage without separators\n").unwrap();

    assert!(AppState::new(config).is_err());
}

#[test]
fn corrupt_model_artifact_aborts_startup() {
    let dir = TempDir::new().unwrap();
    let config = write_fixtures(dir.path());
    fs::write(dir.path().join("svd_model.json"), "{not json").unwrap();

    assert!(AppState::new(config).is_err());
}
