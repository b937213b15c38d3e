//! Orchestrator: the two entry points a front door calls.
//!
//! - [`Curator::turn`]: analyze one utterance, fold the detected tags into the caller's tag set
//!   and produce a steering reply. Never triggers a recommendation.
//! - [`Curator::recommend`]: resolve books for a tag set that already satisfies the gate.
//!
//! The tag set lives with the caller; nothing here keeps per-conversation state.

use std::sync::Arc;
use std::time::Duration;

use analysis::{merge_capped, new_tags, normalize, Analysis, TagAnalyzer};
use lexicon::LexiconStore;
use muq_core::{
    preview, Category, CuratorError, FeedPage, RecommendationResponse, Result, TagSet, TagState,
    TurnRequest, TurnResponse,
};
use recommend::RecommendationResolver;
use storage::ExchangeRepository;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::config::CuratorConfig;
use crate::deadline::bounded;
use crate::dialogue::DialogueResponder;
use crate::feed::{load_feed, normalize_paging, paginate};

/// Per-request knobs taken from [`CuratorConfig`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TurnSettings {
    pub tag_threshold: f32,
    pub max_tags_per_category: usize,
    pub request_timeout: Duration,
}

impl Default for TurnSettings {
    fn default() -> Self {
        TurnSettings::from(&CuratorConfig::default())
    }
}

impl From<&CuratorConfig> for TurnSettings {
    fn from(config: &CuratorConfig) -> Self {
        Self {
            tag_threshold: config.tag_threshold,
            max_tags_per_category: config.max_tags_per_category,
            request_timeout: config.request_timeout(),
        }
    }
}

pub struct Curator {
    lexicon: Arc<LexiconStore>,
    analyzer: Arc<dyn TagAnalyzer>,
    responder: DialogueResponder,
    resolver: RecommendationResolver,
    exchange_log: Option<ExchangeRepository>,
    settings: TurnSettings,
}

impl Curator {
    pub fn new(
        lexicon: Arc<LexiconStore>,
        analyzer: Arc<dyn TagAnalyzer>,
        responder: DialogueResponder,
        resolver: RecommendationResolver,
    ) -> Self {
        Self {
            lexicon,
            analyzer,
            responder,
            resolver,
            exchange_log: None,
            settings: TurnSettings::default(),
        }
    }

    pub fn with_settings(mut self, settings: TurnSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Exchange log the feed reads from.
    pub fn with_exchange_log(mut self, repo: ExchangeRepository) -> Self {
        self.exchange_log = Some(repo);
        self
    }

    pub fn lexicon(&self) -> &LexiconStore {
        &self.lexicon
    }

    pub fn analyzer_name(&self) -> &'static str {
        self.analyzer.name()
    }

    /// One conversational turn.
    ///
    /// Fails only on blank input or cancellation. Analysis failures degrade to "nothing detected
    /// this turn"; dialogue failures degrade to the placeholder reply.
    pub async fn turn(&self, request: TurnRequest, cancel: &CancellationToken) -> Result<TurnResponse> {
        let text = request.user_input.trim();
        if text.is_empty() {
            return Err(CuratorError::InvalidInput("userInput is empty".to_string()));
        }
        let existing = normalize(
            &request.accumulated_tags.unwrap_or_default(),
            &self.lexicon,
        );
        info!(
            text_preview = %preview(text),
            emotions = ?existing.emotions,
            concepts = ?existing.concepts,
            analyzer = self.analyzer.name(),
            "step: turn start"
        );

        let analysis = self.analyze(text, cancel).await?;
        let detected = TagSet::new(
            analysis.selected(Category::Emotion, self.settings.tag_threshold),
            analysis.selected(Category::Concept, self.settings.tag_threshold),
        );

        let merged = merge_capped(&existing, &detected, self.settings.max_tags_per_category);
        let added = new_tags(&existing, &merged);
        let dropped = (detected.emotions.len() + detected.concepts.len())
            .saturating_sub(added.emotions.len() + added.concepts.len());
        if dropped > 0 {
            debug!(dropped, "detections already present or over the tag cap");
        }

        let message = self.reply(text, &merged, cancel).await?;
        let state = TagState::from(merged);

        info!(
            new_emotions = ?added.emotions,
            new_concepts = ?added.concepts,
            can_recommend = state.can_recommend,
            "step: turn done"
        );
        Ok(TurnResponse {
            message,
            accumulated_tags: state.tags,
            new_tags: added,
            can_recommend: state.can_recommend,
            has_emotion: state.has_emotion,
            has_concept: state.has_concept,
        })
    }

    /// Resolves a book list for `tags`. Errors propagate: there is no safe substitute for a
    /// recommendation.
    pub async fn recommend(
        &self,
        tags: TagSet,
        cancel: &CancellationToken,
    ) -> Result<RecommendationResponse> {
        let tags = normalize(&tags, &self.lexicon);
        info!(emotions = ?tags.emotions, concepts = ?tags.concepts, "step: recommend start");

        let resolved = bounded(
            "recommendation",
            self.settings.request_timeout,
            cancel,
            self.resolver.resolve(&tags),
        )
        .await?;

        Ok(RecommendationResponse {
            accumulated_tags: tags,
            books: resolved.record.books,
            from_cache: resolved.from_cache,
        })
    }

    /// One page of the public feed. Without an exchange log the feed is empty.
    pub async fn feed(&self, page: Option<usize>, limit: Option<usize>) -> FeedPage {
        match &self.exchange_log {
            Some(repo) => load_feed(repo, page, limit).await,
            None => {
                let (page, limit) = normalize_paging(page, limit);
                paginate(Vec::new(), page, limit)
            }
        }
    }

    async fn analyze(&self, text: &str, cancel: &CancellationToken) -> Result<Analysis> {
        let outcome = bounded(
            "analysis",
            self.settings.request_timeout,
            cancel,
            self.analyzer.analyze(text, &self.lexicon),
        )
        .await;
        match outcome {
            Ok(analysis) => Ok(analysis),
            Err(e) if cancel.is_cancelled() => Err(e),
            Err(e) => {
                warn!(
                    analyzer = self.analyzer.name(),
                    error = %e,
                    "analysis failed, continuing with no new tags"
                );
                Ok(Analysis::empty())
            }
        }
    }

    async fn reply(&self, text: &str, tags: &TagSet, cancel: &CancellationToken) -> Result<String> {
        let outcome = bounded(
            "dialogue",
            self.settings.request_timeout,
            cancel,
            self.responder.reply(text, tags),
        )
        .await;
        match outcome {
            Ok(message) => Ok(message),
            Err(e) if cancel.is_cancelled() => Err(e),
            Err(e) => {
                warn!(error = %e, "dialogue reply failed, using placeholder");
                Ok(self.responder.placeholder().to_string())
            }
        }
    }
}
