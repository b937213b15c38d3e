//! Direct LLM scoring analyzer.
//!
//! One chat completion rates every label of both lexicons. The reply is untrusted: labels
//! outside the lexicon, missing or out-of-range scores and duplicates are dropped, and a reply
//! that is not the expected JSON counts as "nothing detected" rather than a failure.

use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;
use lexicon::LexiconStore;
use llm_client::{CompletionOptions, LlmClient};
use muq_core::{preview, AnalysisResult, Category, CuratorError, Result, ScoredLabel};
use prompt::scoring::{self, LabelLine, KEY_CONCEPTS, KEY_EMOTIONS, KEY_SCORE, KEY_TAG};
use serde_json::Value;
use tracing::{info, warn};

use crate::similarity::rank;
use crate::strategy::{Analysis, TagAnalyzer};

pub struct LlmScoringAnalyzer {
    llm: Arc<dyn LlmClient>,
    temperature: f32,
}

impl LlmScoringAnalyzer {
    pub fn new(llm: Arc<dyn LlmClient>) -> Self {
        Self {
            llm,
            temperature: 0.0,
        }
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }
}

fn label_lines(lexicon: &LexiconStore, category: Category) -> Vec<LabelLine<'_>> {
    lexicon
        .entries(category)
        .iter()
        .map(|e| LabelLine {
            label: &e.label,
            description: &e.description,
        })
        .collect()
}

#[async_trait]
impl TagAnalyzer for LlmScoringAnalyzer {
    fn name(&self) -> &'static str {
        "llm"
    }

    async fn analyze(&self, text: &str, lexicon: &LexiconStore) -> Result<Analysis> {
        let text = text.trim();
        if text.is_empty() {
            return Err(CuratorError::InvalidInput(
                "utterance to analyze is empty".to_string(),
            ));
        }
        info!(text_preview = %preview(text), "step: llm scoring start");

        let system = scoring::system_prompt(
            &label_lines(lexicon, Category::Emotion),
            &label_lines(lexicon, Category::Concept),
        );
        let reply = self
            .llm
            .complete(
                &system,
                &scoring::user_message(text),
                CompletionOptions::json(self.temperature),
            )
            .await
            .map_err(|e| CuratorError::CompletionService(e.to_string()))?;

        let analysis = parse_scores(&reply, lexicon);
        info!(
            emotions = analysis.emotions.ranked.len(),
            concepts = analysis.concepts.ranked.len(),
            "step: llm scoring done"
        );
        Ok(analysis)
    }
}

/// Parses a scoring reply against the lexicon. Never fails: an unreadable reply yields an empty
/// analysis.
pub fn parse_scores(raw: &str, lexicon: &LexiconStore) -> Analysis {
    let value = match parse_json_object(raw) {
        Some(v) => v,
        None => {
            warn!(raw_preview = %preview(raw), "scoring reply is not a JSON object, treating as no detections");
            return Analysis::empty();
        }
    };

    Analysis {
        emotions: parse_category(&value, KEY_EMOTIONS, Category::Emotion, lexicon),
        concepts: parse_category(&value, KEY_CONCEPTS, Category::Concept, lexicon),
    }
}

/// Accepts the bare object or an object wrapped in surrounding prose or code fences.
fn parse_json_object(raw: &str) -> Option<Value> {
    let raw = raw.trim();
    if let Ok(v @ Value::Object(_)) = serde_json::from_str::<Value>(raw) {
        return Some(v);
    }
    let start = raw.find('{')?;
    let end = raw.rfind('}')?;
    if end <= start {
        return None;
    }
    match serde_json::from_str::<Value>(&raw[start..=end]) {
        Ok(v @ Value::Object(_)) => Some(v),
        _ => None,
    }
}

fn parse_category(
    value: &Value,
    key: &str,
    category: Category,
    lexicon: &LexiconStore,
) -> AnalysisResult {
    let Some(items) = value.get(key).and_then(Value::as_array) else {
        return AnalysisResult::empty(category);
    };
    let entries = lexicon.entries(category);

    let mut seen = HashSet::new();
    let mut kept: Vec<(usize, ScoredLabel)> = Vec::new();
    for item in items {
        let Some(tag) = item.get(KEY_TAG).and_then(Value::as_str).map(str::trim) else {
            continue;
        };
        let Some(score) = item.get(KEY_SCORE).and_then(Value::as_f64) else {
            warn!(category = %category, tag, "scored tag without numeric score dropped");
            continue;
        };
        if !score.is_finite() || !(0.0..=1.0).contains(&score) {
            warn!(category = %category, tag, score, "scored tag outside [0, 1] dropped");
            continue;
        }
        let Some(index) = entries.iter().position(|e| e.label == tag) else {
            warn!(category = %category, tag, "scored tag not in lexicon dropped");
            continue;
        };
        if !seen.insert(index) {
            continue;
        }
        kept.push((index, ScoredLabel::new(tag, score as f32)));
    }

    // Lexicon order first so the stable rank breaks ties by declaration order.
    kept.sort_by_key(|(index, _)| *index);
    AnalysisResult {
        category,
        ranked: rank(kept.into_iter().map(|(_, s)| s).collect()),
    }
}
