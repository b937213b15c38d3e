//! Wire format of a recommendation.
//!
//! The model answers (and the exchange log stores) an object keyed in Korean:
//!
//! ```json
//! {
//!   "감정 키워드": ["외로움"],
//!   "인식/개념 키워드": ["소외"],
//!   "실제 존재하는 추천 도서 목록": [
//!     {"제목": "...", "작가": "...", "한 줄 요약": "...", "추천 이유": "..."}
//!   ]
//! }
//! ```
//!
//! Nothing outside this module sees those keys.

use muq_core::{Book, RecommendationRecord, TagSet};
use prompt::recommendation::{
    KEY_AUTHOR, KEY_BOOKS, KEY_CONCEPT_KEYWORDS, KEY_EMOTION_KEYWORDS, KEY_REASON, KEY_SUMMARY,
    KEY_TITLE,
};
use serde_json::{json, Map, Value};

/// Parses a wire payload. `fallback_tags` fill in keyword lists the payload omits.
///
/// Returns the failure reason on error. A payload is rejected whole rather than repaired: no
/// object, no book array, an empty book array, or any book without a title or author.
pub fn parse_payload(raw: &str, fallback_tags: &TagSet) -> Result<RecommendationRecord, String> {
    let value: Value = serde_json::from_str(strip_code_fence(raw))
        .map_err(|e| format!("not valid JSON: {}", e))?;
    let Value::Object(obj) = value else {
        return Err("top-level value is not an object".to_string());
    };

    let books = match obj.get(KEY_BOOKS) {
        Some(Value::Array(items)) => items
            .iter()
            .enumerate()
            .map(|(i, item)| parse_book(i, item))
            .collect::<Result<Vec<_>, _>>()?,
        Some(_) => return Err(format!("'{}' is not an array", KEY_BOOKS)),
        None => return Err(format!("missing '{}'", KEY_BOOKS)),
    };
    if books.is_empty() {
        return Err(format!("'{}' is empty", KEY_BOOKS));
    }

    Ok(RecommendationRecord {
        emotion_tags: string_list(&obj, KEY_EMOTION_KEYWORDS)
            .unwrap_or_else(|| fallback_tags.emotions.clone()),
        concept_tags: string_list(&obj, KEY_CONCEPT_KEYWORDS)
            .unwrap_or_else(|| fallback_tags.concepts.clone()),
        books,
    })
}

/// Serializes a record back into the wire shape for storage.
pub fn to_payload(record: &RecommendationRecord) -> String {
    let books: Vec<Value> = record
        .books
        .iter()
        .map(|b| {
            json!({
                KEY_TITLE: b.title,
                KEY_AUTHOR: b.author,
                KEY_SUMMARY: b.summary,
                KEY_REASON: b.reason,
            })
        })
        .collect();
    json!({
        KEY_EMOTION_KEYWORDS: record.emotion_tags,
        KEY_CONCEPT_KEYWORDS: record.concept_tags,
        KEY_BOOKS: books,
    })
    .to_string()
}

fn parse_book(index: usize, item: &Value) -> Result<Book, String> {
    let Value::Object(obj) = item else {
        return Err(format!("book #{} is not an object", index));
    };
    let text = |key: &str| {
        obj.get(key)
            .and_then(Value::as_str)
            .map(|s| s.trim().to_string())
            .unwrap_or_default()
    };

    let title = text(KEY_TITLE);
    let author = text(KEY_AUTHOR);
    if title.is_empty() || author.is_empty() {
        return Err(format!("book #{} is missing a title or author", index));
    }
    Ok(Book {
        title,
        author,
        summary: text(KEY_SUMMARY),
        reason: text(KEY_REASON),
    })
}

fn string_list(obj: &Map<String, Value>, key: &str) -> Option<Vec<String>> {
    let items = obj.get(key)?.as_array()?;
    Some(
        items
            .iter()
            .filter_map(Value::as_str)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(String::from)
            .collect(),
    )
}

/// Accepts a payload wrapped in a Markdown code fence.
fn strip_code_fence(raw: &str) -> &str {
    let trimmed = raw.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let body = rest.strip_prefix("json").unwrap_or(rest);
    body.strip_suffix("```").unwrap_or(body).trim()
}
