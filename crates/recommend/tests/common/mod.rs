//! Shared test utilities for recommendation tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use llm_client::{CompletionOptions, LlmClient};
use muq_core::{CuratorError, Result, TagSet};
use prompt::ChatMessage;
use recommend::RecommendationCache;

#[allow(dead_code)]
pub const BOOKS_REPLY: &str = r#"{
  "감정 키워드": ["외로움"],
  "인식/개념 키워드": ["소외"],
  "실제 존재하는 추천 도서 목록": [
    {"제목": "외로움의 철학", "작가": "라르스 스벤젠", "한 줄 요약": "외로움을 사유하는 책", "추천 이유": "혼자인 시간을 다르게 보게 해요"}
  ]
}"#;

#[allow(dead_code)]
pub fn lonely_tags() -> TagSet {
    TagSet::new(vec!["외로움".to_string()], vec!["소외".to_string()])
}

/// LLM client returning a fixed reply and counting calls.
#[allow(dead_code)]
pub struct ScriptedLlm {
    reply: std::result::Result<String, String>,
    calls: AtomicUsize,
    pub last_messages: Mutex<Vec<ChatMessage>>,
}

#[allow(dead_code)]
impl ScriptedLlm {
    pub fn replying(reply: &str) -> Self {
        Self {
            reply: Ok(reply.to_string()),
            calls: AtomicUsize::new(0),
            last_messages: Mutex::new(Vec::new()),
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
        _options: CompletionOptions,
    ) -> anyhow::Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_messages.lock().unwrap() = messages;
        match &self.reply {
            Ok(text) => Ok(text.clone()),
            Err(e) => Err(anyhow::anyhow!(e.clone())),
        }
    }
}

/// Cache whose backend is always down.
#[allow(dead_code)]
#[derive(Default)]
pub struct DownCache {
    pub lookups: AtomicUsize,
    pub appends: AtomicUsize,
}

#[async_trait]
impl RecommendationCache for DownCache {
    async fn lookup(&self, _key: &str) -> Result<Option<String>> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        Err(CuratorError::CacheUnavailable("connection refused".to_string()))
    }

    async fn append(&self, _key: &str, _payload: &str) -> Result<()> {
        self.appends.fetch_add(1, Ordering::SeqCst);
        Err(CuratorError::CacheUnavailable("connection refused".to_string()))
    }
}
