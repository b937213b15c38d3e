//! Shared test utilities for analysis integration tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use embedding::EmbeddingService;
use lexicon::{LexiconEntry, LexiconStore};
use llm_client::{CompletionOptions, LlmClient};
use muq_core::Category;
use prompt::ChatMessage;

/// Embedding service answering by substring: the first rule whose key occurs in the text wins,
/// otherwise `default`. Texts containing `fail_on` fail.
#[allow(dead_code)]
pub struct KeywordEmbeddingService {
    rules: Vec<(String, Vec<f32>)>,
    default: Vec<f32>,
    fail_on: Option<String>,
    calls: AtomicUsize,
}

#[allow(dead_code)]
impl KeywordEmbeddingService {
    pub fn new(default: Vec<f32>) -> Self {
        Self {
            rules: Vec::new(),
            default,
            fail_on: None,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn rule(mut self, key: &str, vector: Vec<f32>) -> Self {
        self.rules.push((key.to_string(), vector));
        self
    }

    pub fn failing_on(mut self, key: &str) -> Self {
        self.fail_on = Some(key.to_string());
        self
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl EmbeddingService for KeywordEmbeddingService {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, anyhow::Error> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(key) = &self.fail_on {
            if text.contains(key.as_str()) {
                anyhow::bail!("embedding backend unavailable");
            }
        }
        Ok(self
            .rules
            .iter()
            .find(|(key, _)| text.contains(key.as_str()))
            .map(|(_, v)| v.clone())
            .unwrap_or_else(|| self.default.clone()))
    }

    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, anyhow::Error> {
        let mut out = Vec::with_capacity(texts.len());
        for t in texts {
            out.push(self.embed(t).await?);
        }
        Ok(out)
    }
}

/// LLM client that returns a fixed reply (or a fixed error) and records what it was sent.
#[allow(dead_code)]
pub struct ScriptedLlm {
    reply: Result<String, String>,
    calls: AtomicUsize,
    pub last_messages: Mutex<Vec<ChatMessage>>,
    pub last_options: Mutex<Option<CompletionOptions>>,
}

#[allow(dead_code)]
impl ScriptedLlm {
    pub fn replying(reply: &str) -> Self {
        Self {
            reply: Ok(reply.to_string()),
            calls: AtomicUsize::new(0),
            last_messages: Mutex::new(Vec::new()),
            last_options: Mutex::new(None),
        }
    }

    pub fn failing(error: &str) -> Self {
        Self {
            reply: Err(error.to_string()),
            ..Self::replying("")
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl LlmClient for ScriptedLlm {
    async fn get_llm_response_with_messages(
        &self,
        messages: Vec<ChatMessage>,
        options: CompletionOptions,
    ) -> anyhow::Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_messages.lock().unwrap() = messages;
        *self.last_options.lock().unwrap() = Some(options);
        match &self.reply {
            Ok(text) => Ok(text.clone()),
            Err(e) => Err(anyhow::anyhow!(e.clone())),
        }
    }
}

/// Lexicon with precomputed 3-d vectors:
/// emotions 외로움 `[1,0,0]`, 불안 `[0,1,0]`; concepts 소외 `[0.95,0,0.31]`, 성장 `[0,0,1]`.
#[allow(dead_code)]
pub fn sample_lexicon() -> LexiconStore {
    LexiconStore::new(
        vec![
            LexiconEntry::new(Category::Emotion, "외로움", "혼자라고 느끼는 마음")
                .with_aliases(vec!["고독".to_string()])
                .with_embedding(vec![1.0, 0.0, 0.0]),
            LexiconEntry::new(Category::Emotion, "불안", "앞일이 걱정되는 마음")
                .with_embedding(vec![0.0, 1.0, 0.0]),
        ],
        vec![
            LexiconEntry::new(Category::Concept, "소외", "무리에서 밀려난 느낌")
                .with_embedding(vec![0.95, 0.0, 0.31]),
            LexiconEntry::new(Category::Concept, "성장", "더 나은 내가 되는 과정")
                .with_embedding(vec![0.0, 0.0, 1.0]),
        ],
    )
    .expect("sample lexicon is valid")
}

/// Same labels as [`sample_lexicon`] but without vectors, so entries are embedded on demand.
#[allow(dead_code)]
pub fn lexicon_without_vectors() -> LexiconStore {
    LexiconStore::new(
        vec![
            LexiconEntry::new(Category::Emotion, "외로움", "혼자라고 느끼는 마음"),
            LexiconEntry::new(Category::Emotion, "불안", "앞일이 걱정되는 마음"),
        ],
        vec![LexiconEntry::new(Category::Concept, "소외", "무리에서 밀려난 느낌")],
    )
    .expect("lexicon is valid")
}
