//! Tag accumulation across turns.
//!
//! The conversation's tag set only grows: existing tags keep their positions, newly detected
//! ones are appended in detection order, nothing is ever removed.

use std::collections::HashSet;

use lexicon::LexiconStore;
use muq_core::{Category, TagSet};
use tracing::warn;

/// Per-category cap on accumulated tags. Detections beyond it are dropped.
pub const DEFAULT_MAX_TAGS_PER_CATEGORY: usize = 20;

/// Order-preserving union of `existing` and `detected`, per category, uncapped.
pub fn merge(existing: &TagSet, detected: &TagSet) -> TagSet {
    merge_capped(existing, detected, usize::MAX)
}

/// Like [`merge`], but stops appending once a category holds `cap` tags. Existing tags are
/// never dropped even if they already exceed the cap.
pub fn merge_capped(existing: &TagSet, detected: &TagSet, cap: usize) -> TagSet {
    let mut merged = TagSet::default();
    for category in Category::ALL {
        let out = merged.labels_mut(category);
        let mut seen: HashSet<String> = HashSet::new();
        for tag in existing.labels(category) {
            if seen.insert(tag.clone()) {
                out.push(tag.clone());
            }
        }
        for tag in detected.labels(category) {
            if out.len() >= cap {
                break;
            }
            if seen.insert(tag.clone()) {
                out.push(tag.clone());
            }
        }
    }
    merged
}

/// Tags present in `after` but not in `before`, in `after` order.
pub fn new_tags(before: &TagSet, after: &TagSet) -> TagSet {
    let mut added = TagSet::default();
    for category in Category::ALL {
        let known: HashSet<&String> = before.labels(category).iter().collect();
        *added.labels_mut(category) = after
            .labels(category)
            .iter()
            .filter(|t| !known.contains(t))
            .cloned()
            .collect();
    }
    added
}

/// Cleans a caller-supplied tag set: trims labels, drops blanks and duplicates, and drops labels
/// the lexicon does not know (with a warning).
pub fn normalize(tags: &TagSet, lexicon: &LexiconStore) -> TagSet {
    let mut clean = TagSet::default();
    for category in Category::ALL {
        let mut seen = HashSet::new();
        let out = clean.labels_mut(category);
        for raw in tags.labels(category) {
            let label = raw.trim();
            if label.is_empty() || !seen.insert(label.to_string()) {
                continue;
            }
            if !lexicon.contains(category, label) {
                warn!(category = %category, label, "unknown accumulated tag dropped");
                continue;
            }
            out.push(label.to_string());
        }
    }
    clean
}
