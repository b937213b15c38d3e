//! Primary analyzer with a fallback for service failures.

use std::sync::Arc;

use async_trait::async_trait;
use lexicon::LexiconStore;
use muq_core::{CuratorError, Result};
use tracing::warn;

use crate::strategy::{Analysis, TagAnalyzer};

/// Runs `primary`; when it fails for any reason other than bad input, runs `fallback` instead.
pub struct FallbackAnalyzer {
    primary: Arc<dyn TagAnalyzer>,
    fallback: Arc<dyn TagAnalyzer>,
}

impl FallbackAnalyzer {
    pub fn new(primary: Arc<dyn TagAnalyzer>, fallback: Arc<dyn TagAnalyzer>) -> Self {
        Self { primary, fallback }
    }
}

#[async_trait]
impl TagAnalyzer for FallbackAnalyzer {
    fn name(&self) -> &'static str {
        "embedding+llm"
    }

    async fn analyze(&self, text: &str, lexicon: &LexiconStore) -> Result<Analysis> {
        match self.primary.analyze(text, lexicon).await {
            Ok(analysis) => Ok(analysis),
            Err(e @ CuratorError::InvalidInput(_)) => Err(e),
            Err(e) => {
                warn!(
                    primary = self.primary.name(),
                    fallback = self.fallback.name(),
                    error = %e,
                    "primary analyzer failed, falling back"
                );
                self.fallback.analyze(text, lexicon).await
            }
        }
    }
}
