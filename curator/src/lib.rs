//! # Curator
//!
//! Wires the lexicon, the configured analyzer, the dialogue responder, the recommendation
//! resolver and the exchange log into a [`Curator`].
//!
//! ## Modules
//!
//! - [`config`] – CuratorConfig (env)
//! - [`deadline`] – timeout + cancellation around external calls
//! - [`dialogue`] – DialogueResponder
//! - [`feed`] – feed paging over the exchange log
//! - [`orchestrator`] – Curator (turn / recommend / feed)

pub mod config;
pub mod deadline;
pub mod dialogue;
pub mod feed;
pub mod orchestrator;

use std::sync::Arc;

use analysis::{AnalyzerKind, EmbeddingAnalyzer, FallbackAnalyzer, LlmScoringAnalyzer, TagAnalyzer};
use embedding::EmbeddingService;
use lexicon::LexiconStore;
use llm_client::LlmClient;
use muq_core::{CuratorError, Result};
use recommend::{ExchangeLogCache, RecommendationResolver};
use storage::ExchangeRepository;
use tracing::info;

pub use config::CuratorConfig;
pub use deadline::bounded;
pub use dialogue::DialogueResponder;
pub use feed::{load_feed, DEFAULT_FEED_LIMIT, DEFAULT_FEED_PAGE, MAX_FEED_LIMIT};
pub use orchestrator::{Curator, TurnSettings};
pub use tokio_util::sync::CancellationToken;

/// Builds the analyzer selected by `kind`.
pub fn build_analyzer(
    kind: AnalyzerKind,
    embedding: Arc<dyn EmbeddingService>,
    llm: Arc<dyn LlmClient>,
    scoring_temperature: f32,
) -> Arc<dyn TagAnalyzer> {
    let scoring = || Arc::new(LlmScoringAnalyzer::new(llm.clone()).with_temperature(scoring_temperature));
    match kind {
        AnalyzerKind::Embedding => Arc::new(EmbeddingAnalyzer::new(embedding)),
        AnalyzerKind::Llm => scoring(),
        AnalyzerKind::EmbeddingWithLlmFallback => Arc::new(FallbackAnalyzer::new(
            Arc::new(EmbeddingAnalyzer::new(embedding)),
            scoring(),
        )),
    }
}

/// Loads the lexicon, opens the exchange log and assembles a [`Curator`] from a validated config
/// and the two external services.
pub async fn build(
    config: &CuratorConfig,
    embedding: Arc<dyn EmbeddingService>,
    llm: Arc<dyn LlmClient>,
) -> Result<Curator> {
    let kind = config
        .analyzer_kind()
        .map_err(|e| CuratorError::InvalidInput(e.to_string()))?;

    let lexicon = Arc::new(LexiconStore::load(&config.lexicon_paths())?);
    if lexicon.is_empty() {
        return Err(CuratorError::Lexicon("both lexicons are empty".to_string()));
    }

    let repo = ExchangeRepository::new(&config.database_url)
        .await
        .map_err(|e| CuratorError::Storage(e.to_string()))?;

    let analyzer = build_analyzer(kind, embedding, llm.clone(), config.scoring_temperature);
    let responder = DialogueResponder::new(llm.clone())
        .with_temperature(config.dialogue_temperature)
        .with_placeholder(config.thinking_message.clone());
    let resolver = RecommendationResolver::new(llm, Arc::new(ExchangeLogCache::new(repo.clone())))
        .with_temperature(config.recommend_temperature);

    info!(
        analyzer = analyzer.name(),
        lexicon_entries = lexicon.len(),
        embedding_dim = ?lexicon.embedding_dim(),
        database_url = %config.database_url,
        "step: curator ready"
    );

    Ok(Curator::new(lexicon, analyzer, responder, resolver)
        .with_settings(TurnSettings::from(config))
        .with_exchange_log(repo))
}
