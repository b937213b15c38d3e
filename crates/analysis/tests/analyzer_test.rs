//! Analyzer strategy tests: embedding similarity, direct LLM scoring and fallback.

mod common;

use std::sync::Arc;

use analysis::{
    parse_scores, EmbeddingAnalyzer, FallbackAnalyzer, LlmScoringAnalyzer, TagAnalyzer,
    DEFAULT_TAG_THRESHOLD,
};
use common::{lexicon_without_vectors, sample_lexicon, KeywordEmbeddingService, ScriptedLlm};
use muq_core::{Category, CuratorError};

fn lonely_service() -> KeywordEmbeddingService {
    KeywordEmbeddingService::new(vec![0.0, 0.0, 1.0]).rule("외로워요", vec![1.0, 0.05, 0.0])
}

#[tokio::test]
async fn test_lonely_utterance_detects_loneliness() {
    let lexicon = sample_lexicon();
    let analyzer = EmbeddingAnalyzer::new(Arc::new(lonely_service()));

    let analysis = analyzer.analyze("요즘 너무 외로워요", &lexicon).await.unwrap();

    let top = &analysis.emotions.ranked[0];
    assert_eq!(top.label, "외로움");
    assert!(top.score >= DEFAULT_TAG_THRESHOLD, "score was {}", top.score);
    assert_eq!(
        analysis.selected(Category::Emotion, DEFAULT_TAG_THRESHOLD),
        vec!["외로움".to_string()]
    );
    assert_eq!(
        analysis.selected(Category::Concept, DEFAULT_TAG_THRESHOLD),
        vec!["소외".to_string()]
    );
}

#[tokio::test]
async fn test_every_label_is_ranked_with_bounded_score() {
    let lexicon = sample_lexicon();
    let analyzer = EmbeddingAnalyzer::new(Arc::new(lonely_service()));

    let analysis = analyzer.analyze("요즘 너무 외로워요", &lexicon).await.unwrap();

    assert_eq!(analysis.emotions.ranked.len(), 2);
    assert_eq!(analysis.concepts.ranked.len(), 2);
    for s in analysis.emotions.ranked.iter().chain(analysis.concepts.ranked.iter()) {
        assert!((-1.0..=1.0).contains(&s.score));
    }
    let scores: Vec<f32> = analysis.concepts.ranked.iter().map(|s| s.score).collect();
    assert!(scores.windows(2).all(|w| w[0] >= w[1]));
}

#[tokio::test]
async fn test_entries_without_vectors_are_embedded_on_demand() {
    let service = Arc::new(
        KeywordEmbeddingService::new(vec![0.0, 0.0, 0.0])
            .rule("외로워요", vec![1.0, 0.0, 0.0])
            .rule("외로움", vec![1.0, 0.0, 0.0])
            .rule("불안", vec![0.0, 1.0, 0.0])
            .rule("소외", vec![0.0, 0.0, 1.0]),
    );
    let analyzer = EmbeddingAnalyzer::new(service.clone());

    let analysis = analyzer
        .analyze("요즘 너무 외로워요", &lexicon_without_vectors())
        .await
        .unwrap();

    // utterance + three entries
    assert_eq!(service.call_count(), 4);
    assert_eq!(analysis.emotions.ranked[0].label, "외로움");
    assert!((analysis.emotions.ranked[0].score - 1.0).abs() < 1e-6);
}

/// **Test: stored vectors from another embedding model are re-embedded, not scored as 0.**
///
/// Setup: 3-d stored vectors, a service returning 4-d vectors.
/// Action: analyze a lonely utterance.
/// Expected: every entry is embedded on demand and 외로움 still clears the threshold.
#[tokio::test]
async fn test_stale_dimension_vectors_are_embedded_on_demand() {
    let service = Arc::new(
        KeywordEmbeddingService::new(vec![0.0, 0.0, 0.0, 1.0])
            .rule("외로워요", vec![1.0, 0.0, 0.0, 0.0])
            .rule("외로움", vec![1.0, 0.0, 0.0, 0.0])
            .rule("소외", vec![0.95, 0.0, 0.0, 0.31]),
    );
    let analyzer = EmbeddingAnalyzer::new(service.clone());

    let analysis = analyzer
        .analyze("요즘 너무 외로워요", &sample_lexicon())
        .await
        .unwrap();

    // utterance + four re-embedded entries
    assert_eq!(service.call_count(), 5);
    assert_eq!(
        analysis.selected(Category::Emotion, DEFAULT_TAG_THRESHOLD),
        vec!["외로움".to_string()]
    );
    assert_eq!(
        analysis.selected(Category::Concept, DEFAULT_TAG_THRESHOLD),
        vec!["소외".to_string()]
    );
}

#[tokio::test]
async fn test_failed_entry_embedding_drops_only_that_entry() {
    let service = Arc::new(
        KeywordEmbeddingService::new(vec![0.0, 0.0, 1.0])
            .rule("외로워요", vec![1.0, 0.0, 0.0])
            .rule("외로움", vec![1.0, 0.0, 0.0])
            .failing_on("불안"),
    );
    let analyzer = EmbeddingAnalyzer::new(service);

    let analysis = analyzer
        .analyze("요즘 너무 외로워요", &lexicon_without_vectors())
        .await
        .unwrap();

    let labels: Vec<&str> = analysis.emotions.ranked.iter().map(|s| s.label.as_str()).collect();
    assert_eq!(labels, vec!["외로움"]);
    assert_eq!(analysis.concepts.ranked.len(), 1);
}

#[tokio::test]
async fn test_failed_utterance_embedding_is_a_service_error() {
    let service = Arc::new(lonely_service().failing_on("외로워요"));
    let analyzer = EmbeddingAnalyzer::new(service);

    let err = analyzer
        .analyze("요즘 너무 외로워요", &sample_lexicon())
        .await
        .unwrap_err();
    assert!(matches!(err, CuratorError::EmbeddingService(_)));
}

#[tokio::test]
async fn test_blank_utterance_is_invalid_input() {
    let analyzer = EmbeddingAnalyzer::new(Arc::new(lonely_service()));
    let err = analyzer.analyze("   ", &sample_lexicon()).await.unwrap_err();
    assert!(matches!(err, CuratorError::InvalidInput(_)));
}

#[tokio::test]
async fn test_llm_scoring_uses_json_mode_and_lists_labels() {
    let llm = Arc::new(ScriptedLlm::replying(
        r#"{"emotions":[{"tag":"외로움","score":0.95}],"concepts":[{"tag":"소외","score":0.91}]}"#,
    ));
    let analyzer = LlmScoringAnalyzer::new(llm.clone());

    let analysis = analyzer.analyze("요즘 너무 외로워요", &sample_lexicon()).await.unwrap();

    assert_eq!(llm.call_count(), 1);
    let options = llm.last_options.lock().unwrap().unwrap();
    assert!(options.json_response);
    assert_eq!(options.temperature, 0.0);
    let messages = llm.last_messages.lock().unwrap().clone();
    assert!(messages[0].content.contains("외로움"));
    assert!(messages[0].content.contains("성장"));
    assert_eq!(messages[1].content, "요즘 너무 외로워요");

    assert_eq!(analysis.selected(Category::Emotion, 0.9), vec!["외로움".to_string()]);
    assert_eq!(analysis.selected(Category::Concept, 0.9), vec!["소외".to_string()]);
}

#[test]
fn test_parse_scores_drops_untrusted_items() {
    let lexicon = sample_lexicon();
    let raw = r#"{
        "emotions": [
            {"tag": "분노", "score": 0.99},
            {"tag": "불안", "score": 1.5},
            {"tag": "외로움", "score": "high"},
            {"tag": "외로움", "score": 0.7},
            {"tag": "외로움", "score": 0.2},
            {"score": 0.8}
        ],
        "concepts": [
            {"tag": "성장", "score": 0.5},
            {"tag": "소외", "score": 0.5}
        ]
    }"#;

    let analysis = parse_scores(raw, &lexicon);

    assert_eq!(analysis.emotions.ranked.len(), 1);
    assert_eq!(analysis.emotions.ranked[0].label, "외로움");
    assert!((analysis.emotions.ranked[0].score - 0.7).abs() < 1e-6);
    // equal scores fall back to lexicon order
    let concepts: Vec<&str> = analysis.concepts.ranked.iter().map(|s| s.label.as_str()).collect();
    assert_eq!(concepts, vec!["소외", "성장"]);
}

#[test]
fn test_parse_scores_accepts_fenced_reply() {
    let raw = "```json\n{\"emotions\":[{\"tag\":\"불안\",\"score\":0.92}]}\n```";
    let analysis = parse_scores(raw, &sample_lexicon());
    assert_eq!(analysis.emotions.ranked[0].label, "불안");
    assert!(analysis.concepts.ranked.is_empty());
}

#[tokio::test]
async fn test_malformed_llm_reply_means_no_detections() {
    let llm = Arc::new(ScriptedLlm::replying("죄송해요, 잘 모르겠어요."));
    let analyzer = LlmScoringAnalyzer::new(llm);

    let analysis = analyzer.analyze("요즘 너무 외로워요", &sample_lexicon()).await.unwrap();
    assert!(analysis.emotions.ranked.is_empty());
    assert!(analysis.concepts.ranked.is_empty());
}

#[tokio::test]
async fn test_llm_call_failure_is_a_completion_error() {
    let analyzer = LlmScoringAnalyzer::new(Arc::new(ScriptedLlm::failing("503")));
    let err = analyzer
        .analyze("요즘 너무 외로워요", &sample_lexicon())
        .await
        .unwrap_err();
    assert!(matches!(err, CuratorError::CompletionService(_)));
}

#[tokio::test]
async fn test_fallback_runs_llm_when_embedding_fails() {
    let embedding = Arc::new(EmbeddingAnalyzer::new(Arc::new(
        lonely_service().failing_on("외로워요"),
    )));
    let llm = Arc::new(ScriptedLlm::replying(
        r#"{"emotions":[{"tag":"외로움","score":0.93}],"concepts":[]}"#,
    ));
    let analyzer = FallbackAnalyzer::new(embedding, Arc::new(LlmScoringAnalyzer::new(llm.clone())));

    let analysis = analyzer.analyze("요즘 너무 외로워요", &sample_lexicon()).await.unwrap();

    assert_eq!(llm.call_count(), 1);
    assert_eq!(analysis.emotions.ranked[0].label, "외로움");
}

#[tokio::test]
async fn test_fallback_skips_llm_on_success_and_on_bad_input() {
    let llm = Arc::new(ScriptedLlm::replying("{}"));
    let analyzer = FallbackAnalyzer::new(
        Arc::new(EmbeddingAnalyzer::new(Arc::new(lonely_service()))),
        Arc::new(LlmScoringAnalyzer::new(llm.clone())),
    );
    let lexicon = sample_lexicon();

    analyzer.analyze("요즘 너무 외로워요", &lexicon).await.unwrap();
    let err = analyzer.analyze("", &lexicon).await.unwrap_err();

    assert!(matches!(err, CuratorError::InvalidInput(_)));
    assert_eq!(llm.call_count(), 0);
}
