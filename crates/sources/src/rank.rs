//! Score ordering shared by every ranked list in the workspace.

use std::cmp::Ordering;

/// Ranking key of a score: `NaN` means "no signal" and sorts as `-inf`
#[inline]
pub fn rank_key(score: f32) -> f32 {
    if score.is_nan() {
        f32::NEG_INFINITY
    } else {
        score
    }
}

/// Descending comparison of two scores with `NaN` always last.
///
/// Equal keys compare `Equal`, so a stable sort keeps input order among ties.
pub fn descending(a: f32, b: f32) -> Ordering {
    rank_key(b)
        .partial_cmp(&rank_key(a))
        .unwrap_or(Ordering::Equal)
}

/// Rank `(position, score)` pairs of one matrix row.
///
/// Excludes `skip`, sorts by descending score (ties keep ascending position)
/// and keeps the first `k`.
pub(crate) fn top_k(row: &[f32], skip: usize, k: usize) -> Vec<(usize, f32)> {
    let mut ranked: Vec<(usize, f32)> = row
        .iter()
        .copied()
        .enumerate()
        .filter(|&(position, _)| position != skip)
        .collect();
    ranked.sort_by(|a, b| descending(a.1, b.1));
    ranked.truncate(k);
    ranked
}
