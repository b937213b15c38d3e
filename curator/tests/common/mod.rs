//! Shared test utilities for curator integration tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use analysis::EmbeddingAnalyzer;
use async_trait::async_trait;
use curator::{Curator, DialogueResponder, TurnSettings};
use embedding::EmbeddingService;
use lexicon::{LexiconEntry, LexiconStore};
use llm_client::{CompletionOptions, LlmClient};
use muq_core::Category;
use prompt::ChatMessage;
use recommend::{InMemoryCache, RecommendationResolver};

#[allow(dead_code)]
pub const BOOKS_REPLY: &str = r#"{
  "감정 키워드": ["외로움"],
  "인식/개념 키워드": ["소외"],
  "실제 존재하는 추천 도서 목록": [
    {"제목": "외로움의 철학", "작가": "라르스 스벤젠", "한 줄 요약": "외로움을 사유하는 책", "추천 이유": "혼자인 시간을 다르게 보게 해요"}
  ]
}"#;

/// Embedding service answering by substring; unknown text maps to `[0, 0, 1]`.
/// "외로워요" → `[1, 0.05, 0]`, "밀려났어요" → `[0.5, 0, 0.87]`. Texts containing "고장" fail.
#[derive(Default)]
pub struct StubEmbedding {
    calls: AtomicUsize,
}

#[allow(dead_code)]
impl StubEmbedding {
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl EmbeddingService for StubEmbedding {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, anyhow::Error> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if text.contains("고장") {
            anyhow::bail!("embedding backend unavailable");
        }
        Ok(if text.contains("외로워요") {
            vec![1.0, 0.05, 0.0]
        } else if text.contains("밀려났어요") {
            vec![0.5, 0.0, 0.87]
        } else {
            vec![0.0, 0.0, 1.0]
        })
    }

    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, anyhow::Error> {
        let mut out = Vec::with_capacity(texts.len());
        for t in texts {
            out.push(self.embed(t).await?);
        }
        Ok(out)
    }
}

/// LLM stub that answers dialogue and recommendation prompts differently, optionally after a
/// delay, and records the dialogue system prompts it saw.
pub struct RoutedLlm {
    dialogue: Result<String, String>,
    recommendation: Result<String, String>,
    delay: Option<Duration>,
    pub dialogue_calls: AtomicUsize,
    pub recommendation_calls: AtomicUsize,
    pub dialogue_prompts: Mutex<Vec<String>>,
}

#[allow(dead_code)]
impl RoutedLlm {
    pub fn new() -> Self {
        Self {
            dialogue: Ok("그런 마음이 든 데에는 어떤 일이 있었나요?".to_string()),
            recommendation: Ok(BOOKS_REPLY.to_string()),
            delay: None,
            dialogue_calls: AtomicUsize::new(0),
            recommendation_calls: AtomicUsize::new(0),
            dialogue_prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn dialogue_failing(mut self) -> Self {
        self.dialogue = Err("chat backend unavailable".to_string());
        self
    }

    pub fn recommendation_reply(mut self, reply: &str) -> Self {
        self.recommendation = Ok(reply.to_string());
        self
    }

    pub fn slow(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }
}

#[async_trait]
impl LlmClient for RoutedLlm {
    async fn get_llm_response_with_messages(
        &self,
        messages: Vec<ChatMessage>,
        _options: CompletionOptions,
    ) -> anyhow::Result<String> {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        let system = messages.first().map(|m| m.content.clone()).unwrap_or_default();
        let reply = if system.contains("북 큐레이터") {
            self.recommendation_calls.fetch_add(1, Ordering::SeqCst);
            &self.recommendation
        } else {
            self.dialogue_calls.fetch_add(1, Ordering::SeqCst);
            self.dialogue_prompts.lock().unwrap().push(system);
            &self.dialogue
        };
        reply.clone().map_err(|e| anyhow::anyhow!(e))
    }
}

/// 외로움 `[1,0,0]`, 불안 `[0,1,0]`; concepts 소외 `[0.5,0,0.87]`, 성장 `[0,0,1]`.
/// "요즘 너무 외로워요" crosses 0.9 only for 외로움.
pub fn lexicon() -> LexiconStore {
    LexiconStore::new(
        vec![
            LexiconEntry::new(Category::Emotion, "외로움", "혼자라고 느끼는 마음")
                .with_embedding(vec![1.0, 0.0, 0.0]),
            LexiconEntry::new(Category::Emotion, "불안", "앞일이 걱정되는 마음")
                .with_embedding(vec![0.0, 1.0, 0.0]),
        ],
        vec![
            LexiconEntry::new(Category::Concept, "소외", "무리에서 밀려난 느낌")
                .with_embedding(vec![0.5, 0.0, 0.87]),
            LexiconEntry::new(Category::Concept, "성장", "더 나은 내가 되는 과정")
                .with_embedding(vec![0.0, 0.0, 1.0]),
        ],
    )
    .expect("test lexicon is valid")
}

#[allow(dead_code)]
pub fn curator(llm: Arc<RoutedLlm>, settings: TurnSettings) -> Curator {
    Curator::new(
        Arc::new(lexicon()),
        Arc::new(EmbeddingAnalyzer::new(Arc::new(StubEmbedding::default()))),
        DialogueResponder::new(llm.clone()),
        RecommendationResolver::new(llm, Arc::new(InMemoryCache::new())),
    )
    .with_settings(settings)
}
