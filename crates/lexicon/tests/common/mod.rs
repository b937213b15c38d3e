//! Shared test utilities for lexicon integration tests.

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use embedding::EmbeddingService;

/// Embedding service that fails its first `failures` calls, then returns a vector whose
/// length is the input's char count (so callers can tell texts apart).
#[allow(dead_code)]
pub struct FlakyEmbeddingService {
    failures: usize,
    pub calls: AtomicUsize,
}

#[allow(dead_code)]
impl FlakyEmbeddingService {
    pub fn new(failures: usize) -> Self {
        Self {
            failures,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl EmbeddingService for FlakyEmbeddingService {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, anyhow::Error> {
        let n = self.calls.fetch_add(1, Ordering::SeqCst);
        if n < self.failures {
            anyhow::bail!("simulated outage #{}", n + 1);
        }
        Ok(vec![1.0; text.chars().count().max(1)])
    }

    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, anyhow::Error> {
        let mut out = Vec::with_capacity(texts.len());
        for t in texts {
            out.push(self.embed(t).await?);
        }
        Ok(out)
    }
}

#[allow(dead_code)]
pub const EMOTIONS_JSON: &str = r#"[
  {"label": "외로움", "aliases": ["고독"], "description": "혼자라고 느끼는 마음", "cluster": "슬픔 계열"},
  {"label": "불안", "description": "앞일이 걱정되는 마음"}
]"#;

#[allow(dead_code)]
pub const CONCEPTS_JSON: &str = r#"[
  {"label": "소외", "description": "무리에서 밀려난 느낌", "example_prompts": ["아무도 나를 찾지 않아요"]}
]"#;
