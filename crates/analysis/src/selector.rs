//! Tag selection: keep ranked labels whose score reaches the threshold.

use muq_core::ScoredLabel;

/// Score a label needs to count as detected in one utterance. Shared by both categories;
/// override through configuration (`TAG_THRESHOLD`).
pub const DEFAULT_TAG_THRESHOLD: f32 = 0.9;

/// Labels with `score >= threshold`, in ranked order. Empty input or nothing above the
/// threshold yields an empty list.
pub fn select(ranked: &[ScoredLabel], threshold: f32) -> Vec<String> {
    ranked
        .iter()
        .filter(|s| s.score >= threshold)
        .map(|s| s.label.clone())
        .collect()
}
