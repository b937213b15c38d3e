//! Direct scoring prompt: one call rates every lexicon label of both categories against the
//! utterance. The reply shape is
//! `{"emotions": [{"tag": "...", "score": 0.0}], "concepts": [...]}`.

/// Reply key for the emotion score list.
pub const KEY_EMOTIONS: &str = "emotions";
/// Reply key for the concept score list.
pub const KEY_CONCEPTS: &str = "concepts";
/// Per-item key holding the label.
pub const KEY_TAG: &str = "tag";
/// Per-item key holding the 0..=1 score.
pub const KEY_SCORE: &str = "score";

/// A label and its description as shown to the model.
#[derive(Debug, Clone, Copy)]
pub struct LabelLine<'a> {
    pub label: &'a str,
    pub description: &'a str,
}

fn push_section(out: &mut String, title: &str, lines: &[LabelLine<'_>]) {
    out.push_str(title);
    out.push('\n');
    for line in lines {
        out.push_str("- ");
        out.push_str(line.label);
        if !line.description.trim().is_empty() {
            out.push_str(": ");
            out.push_str(line.description.trim());
        }
        out.push('\n');
    }
    out.push('\n');
}

/// System prompt listing both vocabularies and the required JSON reply shape.
pub fn system_prompt(emotions: &[LabelLine<'_>], concepts: &[LabelLine<'_>]) -> String {
    let mut out = String::from(
        "당신은 사용자의 문장에서 감정과 개념을 찾아내는 분석가입니다. \
         아래 목록에 있는 태그만 사용하고, 목록에 없는 태그를 만들지 마세요.\n\n",
    );
    push_section(&mut out, "[감정 목록]", emotions);
    push_section(&mut out, "[개념 목록]", concepts);
    out.push_str(&format!(
        "각 태그가 사용자의 문장과 얼마나 관련 있는지 0과 1 사이의 점수로 평가하세요. \
         관련 있는 태그만 포함하세요.\n\
         반드시 다음 JSON 형식으로만 응답하세요:\n\
         {{\"{e}\": [{{\"{t}\": \"태그\", \"{s}\": 0.0}}], \"{c}\": [{{\"{t}\": \"태그\", \"{s}\": 0.0}}]}}",
        e = KEY_EMOTIONS,
        c = KEY_CONCEPTS,
        t = KEY_TAG,
        s = KEY_SCORE,
    ));
    out
}

/// User message: the utterance to score.
pub fn user_message(utterance: &str) -> String {
    utterance.trim().to_string()
}
