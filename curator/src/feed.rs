//! Public feed: past recommendations, newest first, paginated.

use muq_core::{FeedItem, FeedPage, Pagination, TagSet};
use recommend::parse_payload;
use storage::{ExchangeRecord, ExchangeRepository};
use tracing::{info, warn};

pub const DEFAULT_FEED_PAGE: usize = 1;
pub const DEFAULT_FEED_LIMIT: usize = 3;
pub const MAX_FEED_LIMIT: usize = 50;

/// Page < 1 becomes 1; limit is clamped to `1..=MAX_FEED_LIMIT`.
pub fn normalize_paging(page: Option<usize>, limit: Option<usize>) -> (usize, usize) {
    let page = page.unwrap_or(DEFAULT_FEED_PAGE).max(1);
    let limit = limit.unwrap_or(DEFAULT_FEED_LIMIT).clamp(1, MAX_FEED_LIMIT);
    (page, limit)
}

fn to_item(record: ExchangeRecord) -> Option<FeedItem> {
    match parse_payload(&record.payload, &TagSet::default()) {
        Ok(parsed) => Some(FeedItem {
            id: record.id,
            question: record.question,
            emotion_keywords: parsed.emotion_tags,
            concept_keywords: parsed.concept_tags,
            books: parsed.books,
            created_at: record.created_at,
        }),
        Err(reason) => {
            warn!(id = %record.id, reason = %reason, "feed row skipped: payload unreadable");
            None
        }
    }
}

/// Slices `items` (already newest first) into the requested page. Out-of-range paging is
/// clamped as in [`normalize_paging`].
pub fn paginate(items: Vec<FeedItem>, page: usize, limit: usize) -> FeedPage {
    let (page, limit) = normalize_paging(Some(page), Some(limit));
    let total = items.len();
    let start = (page - 1).saturating_mul(limit);
    let page_items: Vec<FeedItem> = items.into_iter().skip(start).take(limit).collect();
    FeedPage {
        items: page_items,
        pagination: Pagination {
            page,
            limit,
            total,
            has_more: page.saturating_mul(limit) < total,
            total_pages: total.div_ceil(limit),
        },
        error: None,
    }
}

/// Builds one feed page. A storage failure yields an empty page carrying the error message.
pub async fn load_feed(
    repo: &ExchangeRepository,
    page: Option<usize>,
    limit: Option<usize>,
) -> FeedPage {
    let (page, limit) = normalize_paging(page, limit);
    match repo.list_all_newest_first().await {
        Ok(records) => {
            let items: Vec<FeedItem> = records.into_iter().filter_map(to_item).collect();
            let out = paginate(items, page, limit);
            info!(
                page,
                limit,
                total = out.pagination.total,
                returned = out.items.len(),
                "step: feed loaded"
            );
            out
        }
        Err(e) => {
            warn!(error = %e, "feed unavailable, returning empty page");
            FeedPage {
                error: Some(e.to_string()),
                ..paginate(Vec::new(), page, limit)
            }
        }
    }
}
