use std::cmp::Ordering;

/// Sorts `(id, score)` pairs by descending score and keeps the first
/// `k`. Ties (including NaN pairs) break on ascending id so results
/// are reproducible for a fixed model.
pub fn top_k_by_score(mut scored: Vec<(u32, f32)>, k: usize) -> Vec<(u32, f32)> {
    scored.sort_unstable_by(|a, b| {
        b.1.partial_cmp(&a.1)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.0.cmp(&b.0))
    });
    scored.truncate(k);
    scored
}
