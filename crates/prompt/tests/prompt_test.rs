//! Tests for the prompt builders: state is injected correctly and reply schemas are stated.

use prompt::dialogue::{self, DialogueGoal};
use prompt::recommendation;
use prompt::scoring::{self, LabelLine};
use prompt::NONE_YET;

#[test]
fn dialogue_goal_follows_tag_state() {
    assert_eq!(DialogueGoal::from_state(false, false), DialogueGoal::AskEmotion);
    assert_eq!(DialogueGoal::from_state(false, true), DialogueGoal::AskEmotion);
    assert_eq!(DialogueGoal::from_state(true, false), DialogueGoal::AskConcept);
    assert_eq!(DialogueGoal::from_state(true, true), DialogueGoal::AnnounceReady);
}

/// **Test: Empty state asks for an emotion.**
///
/// **Expected:** Both tag lines show the placeholder; the instruction asks about feelings.
#[test]
fn dialogue_prompt_with_no_tags_asks_for_emotion() {
    let empty: [&str; 0] = [];
    let p = dialogue::system_prompt(&empty, &empty, false);
    assert!(p.contains(&format!("현재까지 파악한 감정: {}", NONE_YET)));
    assert!(p.contains(&format!("현재까지 파악한 개념: {}", NONE_YET)));
    assert!(p.contains("어떤 기분인지"));
}

#[test]
fn dialogue_prompt_with_emotion_only_asks_for_concept() {
    let p = dialogue::system_prompt(&["외로움"], &[] as &[&str], false);
    assert!(p.contains("현재까지 파악한 감정: 외로움"));
    assert!(p.contains("배경을"));
    assert!(!p.contains("준비가 되었다"));
}

#[test]
fn dialogue_prompt_ready_announces() {
    let p = dialogue::system_prompt(&["슬픔", "외로움"], &["소외"], true);
    assert!(p.contains("슬픔, 외로움"));
    assert!(p.contains("준비가 되었다"));
    assert!(p.contains(&format!("{}자 이내", dialogue::REPLY_CHAR_TARGET)));
}

#[test]
fn scoring_prompt_lists_labels_and_schema() {
    let emotions = [LabelLine {
        label: "외로움",
        description: "혼자라고 느끼는 마음",
    }];
    let concepts = [LabelLine {
        label: "소외",
        description: "",
    }];
    let p = scoring::system_prompt(&emotions, &concepts);
    assert!(p.contains("- 외로움: 혼자라고 느끼는 마음"));
    assert!(p.contains("- 소외\n"));
    assert!(p.contains("\"emotions\""));
    assert!(p.contains("\"score\""));
    assert_eq!(scoring::user_message("  요즘 너무 외로워요 \n"), "요즘 너무 외로워요");
}

/// **Test: Recommendation prompt embeds the tags, not the utterance, and the Korean schema.**
#[test]
fn recommendation_prompt_embeds_tags_as_json() {
    let p = recommendation::system_prompt(&["슬픔"], &["소외", "세대 단절"]);
    assert!(p.contains("감정 태그: 슬픔"));
    assert!(p.contains("개념 태그: 소외, 세대 단절"));
    assert!(p.contains(r#""감정 키워드": ["슬픔"]"#));
    assert!(p.contains(r#""인식/개념 키워드": ["소외","세대 단절"]"#));
    assert!(p.contains(recommendation::KEY_BOOKS));
    assert!(p.contains("가상의 책 생성 금지"));

    let u = recommendation::user_message(&["슬픔"], &["소외"]);
    assert_eq!(u, "다음 태그들에 맞는 책을 추천해주세요: 슬픔, 소외");
}
