//! LLM client trait and request types

use futures::Stream;
use serde::Serialize;
use serde_json::{Map, Value};
use spindle_core::{ChatMessage, ChatResponse, ChatStreamEvent};
use std::pin::Pin;

/// Result type for LLM operations
pub type LlmResult<T> = Result<T, LlmError>;

/// LLM error types
#[derive(Debug, thiserror::Error)]
pub enum LlmError {
    #[error("request failed: {0}")]
    RequestFailed(String),

    #[error("authentication failed: {0}")]
    AuthFailed(String),

    #[error("rate limited: retry after {retry_after_ms}ms")]
    RateLimited { retry_after_ms: u64 },

    #[error("invalid response: {0}")]
    InvalidResponse(String),

    #[error("stream error: {0}")]
    StreamError(String),

    #[error("network error: {0}")]
    NetworkError(#[from] reqwest::Error),
}

/// Call-ready request to a chat completions endpoint.
#[derive(Clone, Debug, Serialize)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub stream: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_p: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
    /// Provider parameters outside the typed set, flattened into the payload.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ChatRequest {
    pub fn new(model: impl Into<String>, messages: Vec<ChatMessage>) -> Self {
        Self {
            model: model.into(),
            messages,
            stream: false,
            temperature: None,
            top_p: None,
            max_tokens: None,
            extra: Map::new(),
        }
    }
}

/// Stream of events from a streaming chat call.
pub type ChatStream = Pin<Box<dyn Stream<Item = LlmResult<ChatStreamEvent>> + Send>>;

/// Outbound model-calling client.
///
/// Implementations own their connection pooling and must be safe to share
/// across concurrent turns. Faults pass through to the caller unchanged; no
/// retry happens at this layer.
#[async_trait::async_trait]
pub trait LlmClient: Send + Sync {
    /// Single blocking round trip.
    async fn chat(&self, request: ChatRequest) -> LlmResult<ChatResponse>;

    /// Streaming call. The returned stream holds at most one in-flight chunk
    /// and ends when the transport signals completion. Dropping it aborts
    /// the underlying request.
    async fn stream_chat(&self, request: ChatRequest) -> LlmResult<ChatStream>;
}
