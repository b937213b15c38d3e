//! Cache key for a tag set.

use muq_core::TagSet;

/// Version of the key format below. Stored next to every cached row; bump it whenever
/// [`cache_key`] changes so stale rows stop matching.
pub const KEY_SCHEME: &str = "tags-v1";

/// `sorted(emotions).join(",") + "_" + sorted(concepts).join(",")`.
///
/// Sorting makes the key independent of detection order, so the same tags reached in a different
/// conversation hit the same row.
pub fn cache_key(tags: &TagSet) -> String {
    let mut emotions: Vec<&str> = tags.emotions.iter().map(String::as_str).collect();
    let mut concepts: Vec<&str> = tags.concepts.iter().map(String::as_str).collect();
    emotions.sort_unstable();
    concepts.sort_unstable();
    format!("{}_{}", emotions.join(","), concepts.join(","))
}
