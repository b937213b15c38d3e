//! Cosine similarity and ranking.

use std::cmp::Ordering;

use muq_core::ScoredLabel;

/// `dot(a, b) / (|a| * |b|)`, accumulated in f64 and clamped to [-1, 1].
///
/// Returns 0.0 when either vector has zero norm or the lengths differ: a degenerate vector is
/// maximally dissimilar, never an error.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.is_empty() || a.len() != b.len() {
        return 0.0;
    }

    let mut dot = 0.0f64;
    let mut norm_a = 0.0f64;
    let mut norm_b = 0.0f64;
    for (x, y) in a.iter().zip(b.iter()) {
        let (x, y) = (*x as f64, *y as f64);
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }

    let sim = dot / (norm_a.sqrt() * norm_b.sqrt());
    if sim.is_nan() {
        return 0.0;
    }
    sim.clamp(-1.0, 1.0) as f32
}

/// Sorts descending by score. The sort is stable, so equal scores keep input (lexicon
/// declaration) order. NaN scores sort last.
pub fn rank(mut scored: Vec<ScoredLabel>) -> Vec<ScoredLabel> {
    scored.sort_by(|a, b| match (a.score.is_nan(), b.score.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal),
    });
    scored
}
