//! Text-completion service boundary.
//!
//! The message parser only ever talks to [`Completer`]; the OpenAI-compatible
//! HTTP client lives here so tests can swap in a stub.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const API_KEY_ENV: &str = "OPENAI_API_KEY";
pub const MODEL_ENV: &str = "KHATA_LLM_MODEL";
pub const BASE_URL_ENV: &str = "KHATA_LLM_BASE_URL";
pub const TIMEOUT_ENV: &str = "KHATA_LLM_TIMEOUT_SECS";

const DEFAULT_MODEL: &str = "gpt-4o-mini";
const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    pub system: String,
    pub user: String,
    pub temperature: f32,
    pub max_tokens: u32,
}

#[derive(Debug, Clone, Error)]
pub enum CompletionError {
    #[error("`{variable}` is not set")]
    NotConfigured { variable: &'static str },
    #[error("request failed: {0}")]
    Transport(String),
    #[error("request timed out after {0:?}")]
    Timeout(Duration),
    #[error("service returned {status}: {body}")]
    Status { status: u16, body: String },
    #[error("response could not be decoded: {0}")]
    Decode(String),
    #[error("response had no content")]
    EmptyContent,
}

pub trait Completer {
    fn complete(&self, request: &CompletionRequest) -> Result<String, CompletionError>;
}

#[derive(Debug, Clone)]
pub struct CompletionConfig {
    pub api_key: Option<String>,
    pub model: String,
    pub base_url: String,
    pub timeout: Duration,
}

impl CompletionConfig {
    pub fn from_env() -> Self {
        let timeout_secs = std::env::var(TIMEOUT_ENV)
            .ok()
            .and_then(|value| value.trim().parse::<u64>().ok())
            .filter(|value| *value > 0)
            .unwrap_or(DEFAULT_TIMEOUT_SECS);

        Self {
            api_key: non_empty_env(API_KEY_ENV),
            model: non_empty_env(MODEL_ENV).unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            base_url: non_empty_env(BASE_URL_ENV)
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            timeout: Duration::from_secs(timeout_secs),
        }
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.base_url.trim_end_matches('/'))
    }
}

fn non_empty_env(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

/// Chat-completions client for OpenAI-compatible endpoints.
#[derive(Debug, Clone)]
pub struct OpenAiCompleter {
    config: CompletionConfig,
}

impl OpenAiCompleter {
    pub fn new(config: CompletionConfig) -> Self {
        Self { config }
    }

    pub fn from_env() -> Self {
        Self::new(CompletionConfig::from_env())
    }
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 2],
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    content: Option<String>,
}

impl Completer for OpenAiCompleter {
    fn complete(&self, request: &CompletionRequest) -> Result<String, CompletionError> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .ok_or(CompletionError::NotConfigured {
                variable: API_KEY_ENV,
            })?;

        let client = reqwest::blocking::Client::builder()
            .timeout(self.config.timeout)
            .build()
            .map_err(|error| CompletionError::Transport(error.to_string()))?;

        let body = ChatRequest {
            model: &self.config.model,
            messages: [
                ChatMessage {
                    role: "system",
                    content: &request.system,
                },
                ChatMessage {
                    role: "user",
                    content: &request.user,
                },
            ],
            temperature: request.temperature,
            max_tokens: request.max_tokens,
        };

        tracing::debug!(model = %self.config.model, "sending completion request");
        let response = client
            .post(self.config.endpoint())
            .bearer_auth(api_key)
            .json(&body)
            .send()
            .map_err(|error| {
                if error.is_timeout() {
                    CompletionError::Timeout(self.config.timeout)
                } else {
                    CompletionError::Transport(error.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(CompletionError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: ChatResponse = response
            .json()
            .map_err(|error| CompletionError::Decode(error.to_string()))?;

        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .filter(|content| !content.trim().is_empty())
            .ok_or(CompletionError::EmptyContent)
    }
}
