//! Book recommendation prompt and the JSON key schema the model answers in.
//!
//! The schema keys are Korean because the stored exchange log and the model contract have always
//! used them; the recommend crate translates them into stable field names.

use crate::join_or_none;

pub const KEY_EMOTION_KEYWORDS: &str = "감정 키워드";
pub const KEY_CONCEPT_KEYWORDS: &str = "인식/개념 키워드";
pub const KEY_BOOKS: &str = "실제 존재하는 추천 도서 목록";
pub const KEY_TITLE: &str = "제목";
pub const KEY_AUTHOR: &str = "작가";
pub const KEY_SUMMARY: &str = "한 줄 요약";
pub const KEY_REASON: &str = "추천 이유";

fn json_array<S: AsRef<str>>(labels: &[S]) -> String {
    let labels: Vec<&str> = labels.iter().map(|l| l.as_ref()).collect();
    serde_json::to_string(&labels).unwrap_or_else(|_| "[]".to_string())
}

/// System prompt: tags in, strict JSON book list out. Only the tags are sent, never the raw
/// conversation.
pub fn system_prompt<E: AsRef<str>, C: AsRef<str>>(emotions: &[E], concepts: &[C]) -> String {
    format!(
        "당신은 감정과 개념을 분석하여 책을 추천하는 북 큐레이터입니다.\n\n\
         ** 분석된 태그 **\n\
         감정 태그: {emotion_list}\n\
         개념 태그: {concept_list}\n\n\
         위 태그들을 바탕으로 정확한 책 추천을 해주세요.\n\n\
         형식에 맞춰 JSON으로만 응답하십시오:\n\
         {{\n\
         \x20 \"{k_emotions}\": {emotion_json},\n\
         \x20 \"{k_concepts}\": {concept_json},\n\
         \x20 \"{k_books}\": [\n\
         \x20   {{\n\
         \x20     \"{k_title}\": \"책 제목\",\n\
         \x20     \"{k_author}\": \"작가명\",\n\
         \x20     \"{k_summary}\": \"요약\",\n\
         \x20     \"{k_reason}\": \"추천 이유\"\n\
         \x20   }}\n\
         \x20 ]\n\
         }}\n\n\
         **주의사항:**\n\
         - 실제 존재하는 책만 추천\n\
         - 가상의 책 생성 금지\n\
         - 분석된 태그와 관련성이 높은 책을 3~5권 추천",
        emotion_list = join_or_none(emotions),
        concept_list = join_or_none(concepts),
        emotion_json = json_array(emotions),
        concept_json = json_array(concepts),
        k_emotions = KEY_EMOTION_KEYWORDS,
        k_concepts = KEY_CONCEPT_KEYWORDS,
        k_books = KEY_BOOKS,
        k_title = KEY_TITLE,
        k_author = KEY_AUTHOR,
        k_summary = KEY_SUMMARY,
        k_reason = KEY_REASON,
    )
}

/// User message listing every tag, emotions first.
pub fn user_message<E: AsRef<str>, C: AsRef<str>>(emotions: &[E], concepts: &[C]) -> String {
    let all: Vec<&str> = emotions
        .iter()
        .map(|e| e.as_ref())
        .chain(concepts.iter().map(|c| c.as_ref()))
        .collect();
    format!("다음 태그들에 맞는 책을 추천해주세요: {}", all.join(", "))
}
