//! Curator config: analyzer strategy, thresholds, timeouts, temperatures, file locations.
//! Loaded from env.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use analysis::{AnalyzerKind, DEFAULT_MAX_TAGS_PER_CATEGORY, DEFAULT_TAG_THRESHOLD};
use anyhow::Result;
use lexicon::LexiconPaths;
use recommend::DEFAULT_RECOMMEND_TEMPERATURE;

pub const DEFAULT_THINKING_MESSAGE: &str = "thinking…";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 90;

#[derive(Debug, Clone)]
pub struct CuratorConfig {
    /// ANALYZER_STRATEGY: embedding | llm | embedding+llm
    pub analyzer_strategy: String,
    /// TAG_THRESHOLD
    pub tag_threshold: f32,
    /// MAX_TAGS_PER_CATEGORY
    pub max_tags_per_category: usize,
    /// REQUEST_TIMEOUT_SECS, applied to every request-path external call
    pub request_timeout_secs: u64,
    /// THINKING_MESSAGE, the reply used when the dialogue call fails
    pub thinking_message: String,
    pub dialogue_temperature: f32,
    pub recommend_temperature: f32,
    pub scoring_temperature: f32,
    pub emotion_lexicon_path: PathBuf,
    pub concept_lexicon_path: PathBuf,
    pub emotion_embeddings_path: PathBuf,
    pub concept_embeddings_path: PathBuf,
    /// Exchange log database (SQLite file path or `sqlite:` URL)
    pub database_url: String,
    /// Log file path
    pub log_file: String,
}

impl Default for CuratorConfig {
    fn default() -> Self {
        Self {
            analyzer_strategy: AnalyzerKind::default().as_str().to_string(),
            tag_threshold: DEFAULT_TAG_THRESHOLD,
            max_tags_per_category: DEFAULT_MAX_TAGS_PER_CATEGORY,
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            thinking_message: DEFAULT_THINKING_MESSAGE.to_string(),
            dialogue_temperature: 0.7,
            recommend_temperature: DEFAULT_RECOMMEND_TEMPERATURE,
            scoring_temperature: 0.0,
            emotion_lexicon_path: PathBuf::from("data/emotion.json"),
            concept_lexicon_path: PathBuf::from("data/concept.json"),
            emotion_embeddings_path: PathBuf::from("data/emotion_embeddings.json"),
            concept_embeddings_path: PathBuf::from("data/concept_embeddings.json"),
            database_url: "muq.db".to_string(),
            log_file: "logs/muq.log".to_string(),
        }
    }
}

fn var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|s| !s.trim().is_empty())
}

fn parsed<T: std::str::FromStr>(name: &str, default: T) -> T {
    var(name).and_then(|s| s.trim().parse().ok()).unwrap_or(default)
}

impl CuratorConfig {
    /// Load from environment variables. Unset or unparsable values keep their defaults.
    pub fn from_env() -> Result<Self> {
        let d = Self::default();
        Ok(Self {
            analyzer_strategy: var("ANALYZER_STRATEGY").unwrap_or(d.analyzer_strategy),
            tag_threshold: parsed("TAG_THRESHOLD", d.tag_threshold),
            max_tags_per_category: parsed("MAX_TAGS_PER_CATEGORY", d.max_tags_per_category),
            request_timeout_secs: parsed("REQUEST_TIMEOUT_SECS", d.request_timeout_secs),
            thinking_message: var("THINKING_MESSAGE").unwrap_or(d.thinking_message),
            dialogue_temperature: parsed("DIALOGUE_TEMPERATURE", d.dialogue_temperature),
            recommend_temperature: parsed("RECOMMEND_TEMPERATURE", d.recommend_temperature),
            scoring_temperature: parsed("SCORING_TEMPERATURE", d.scoring_temperature),
            emotion_lexicon_path: var("EMOTION_LEXICON_PATH")
                .map(PathBuf::from)
                .unwrap_or(d.emotion_lexicon_path),
            concept_lexicon_path: var("CONCEPT_LEXICON_PATH")
                .map(PathBuf::from)
                .unwrap_or(d.concept_lexicon_path),
            emotion_embeddings_path: var("EMOTION_EMBEDDINGS_PATH")
                .map(PathBuf::from)
                .unwrap_or(d.emotion_embeddings_path),
            concept_embeddings_path: var("CONCEPT_EMBEDDINGS_PATH")
                .map(PathBuf::from)
                .unwrap_or(d.concept_embeddings_path),
            database_url: var("DATABASE_URL").unwrap_or(d.database_url),
            log_file: var("LOG_FILE").unwrap_or(d.log_file),
        })
    }

    /// Validate config: threshold in (0, 1], positive cap and timeout, known strategy.
    pub fn validate(&self) -> Result<()> {
        if !(self.tag_threshold > 0.0 && self.tag_threshold <= 1.0) {
            anyhow::bail!(
                "TAG_THRESHOLD must be in (0, 1], got {}",
                self.tag_threshold
            );
        }
        if self.max_tags_per_category == 0 {
            anyhow::bail!("MAX_TAGS_PER_CATEGORY must be at least 1");
        }
        if self.request_timeout_secs == 0 {
            anyhow::bail!("REQUEST_TIMEOUT_SECS must be at least 1");
        }
        self.analyzer_kind()?;
        Ok(())
    }

    pub fn analyzer_kind(&self) -> Result<AnalyzerKind> {
        Ok(self.analyzer_strategy.parse::<AnalyzerKind>()?)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn lexicon_paths(&self) -> LexiconPaths {
        LexiconPaths {
            emotions: self.emotion_lexicon_path.clone(),
            concepts: self.concept_lexicon_path.clone(),
            emotion_embeddings: Some(self.emotion_embeddings_path.clone()),
            concept_embeddings: Some(self.concept_embeddings_path.clone()),
        }
    }
}
