//! Dialogue steering prompt. The model gets the tag state and the latest utterance and answers
//! with one short sentence that either asks for what is missing or announces readiness.

use crate::join_or_none;

/// Target reply length in characters. Stated in the prompt; not enforced on the reply.
pub const REPLY_CHAR_TARGET: usize = 50;

const PERSONA: &str = "당신은 말 없는 책방 '묵(黙)'의 주인입니다. \
손님이 털어놓는 이야기를 조용히 듣고, 알맞은 책을 건네기 위해 \
손님의 감정과 그 감정을 만든 생각(개념)을 파악해야 합니다.";

const ASK_EMOTION: &str =
    "아직 손님의 감정을 모릅니다. 지금 어떤 기분인지 부드럽게 물어보세요.";

const ASK_CONCEPT: &str = "감정은 파악했지만, 그 감정이 어떤 생각이나 상황에서 비롯되었는지 모릅니다. \
그 배경을 조심스럽게 물어보세요.";

const ANNOUNCE_READY: &str = "감정과 개념을 모두 파악했습니다. \
이제 책을 추천해 드릴 준비가 되었다고 짧게 알려 주세요.";

/// What the next reply should steer toward, derived from the tag state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogueGoal {
    AskEmotion,
    AskConcept,
    AnnounceReady,
}

impl DialogueGoal {
    /// Missing emotion wins over missing concept; both present means ready.
    pub fn from_state(has_emotion: bool, has_concept: bool) -> Self {
        match (has_emotion, has_concept) {
            (false, _) => DialogueGoal::AskEmotion,
            (true, false) => DialogueGoal::AskConcept,
            (true, true) => DialogueGoal::AnnounceReady,
        }
    }

    fn instruction(&self) -> &'static str {
        match self {
            DialogueGoal::AskEmotion => ASK_EMOTION,
            DialogueGoal::AskConcept => ASK_CONCEPT,
            DialogueGoal::AnnounceReady => ANNOUNCE_READY,
        }
    }
}

/// System prompt for the steering reply.
pub fn system_prompt<E: AsRef<str>, C: AsRef<str>>(
    emotions: &[E],
    concepts: &[C],
    can_recommend: bool,
) -> String {
    let goal = if can_recommend {
        DialogueGoal::AnnounceReady
    } else {
        DialogueGoal::from_state(!emotions.is_empty(), !concepts.is_empty())
    };
    format!(
        "{persona}\n\n\
         현재까지 파악한 감정: {emotions}\n\
         현재까지 파악한 개념: {concepts}\n\n\
         {instruction}\n\n\
         규칙:\n\
         - {target}자 이내의 한두 문장으로 답하세요.\n\
         - 존댓말을 쓰고, 아직 책 제목은 말하지 마세요.\n\
         - 마크다운이나 따옴표 없이 평문으로만 답하세요.",
        persona = PERSONA,
        emotions = join_or_none(emotions),
        concepts = join_or_none(concepts),
        instruction = goal.instruction(),
        target = REPLY_CHAR_TARGET,
    )
}

/// User message: the raw utterance, trimmed.
pub fn user_message(utterance: &str) -> String {
    utterance.trim().to_string()
}
