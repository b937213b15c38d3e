//! LLM configuration: trait and env-based implementation.

use std::env;
use std::time::Duration;

use anyhow::{Context, Result};

/// Chat model used when `CHAT_MODEL` is unset.
pub const DEFAULT_CHAT_MODEL: &str = "gpt-4o";

const DEFAULT_LLM_TIMEOUT_SECS: u64 = 60;

/// LLM configuration interface for OpenAI-compatible APIs.
pub trait LlmConfig: Send + Sync {
    fn api_key(&self) -> &str;
    fn base_url(&self) -> Option<&str>;
    fn model(&self) -> &str;
    fn timeout(&self) -> Duration;
}

/// LLM config loaded from environment variables.
#[derive(Debug, Clone)]
pub struct EnvLlmConfig {
    pub openai_api_key: String,
    pub openai_base_url: Option<String>,
    pub chat_model: String,
    pub timeout_secs: u64,
}

impl LlmConfig for EnvLlmConfig {
    fn api_key(&self) -> &str {
        &self.openai_api_key
    }
    fn base_url(&self) -> Option<&str> {
        self.openai_base_url.as_deref()
    }
    fn model(&self) -> &str {
        &self.chat_model
    }
    fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl EnvLlmConfig {
    /// Load from environment variables. OPENAI_API_KEY is required.
    pub fn from_env() -> Result<Self> {
        let openai_api_key = env::var("OPENAI_API_KEY").context("OPENAI_API_KEY not set")?;
        let openai_base_url = env::var("OPENAI_BASE_URL")
            .ok()
            .filter(|s| !s.trim().is_empty());
        let chat_model = env::var("CHAT_MODEL")
            .ok()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_CHAT_MODEL.to_string());
        let timeout_secs = env::var("LLM_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(DEFAULT_LLM_TIMEOUT_SECS);
        Ok(Self {
            openai_api_key,
            openai_base_url,
            chat_model,
            timeout_secs,
        })
    }

    pub fn validate(&self) -> Result<()> {
        if self.timeout_secs == 0 {
            anyhow::bail!("LLM_TIMEOUT_SECS must be greater than 0");
        }
        Ok(())
    }
}
