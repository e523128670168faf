//! Parameter-merging service binding a model profile to a client

use crate::client::{ChatRequest, ChatStream, LlmClient, LlmResult};
use serde_json::{Map, Value};
use spindle_core::{ChatMessage, ChatResponse, ModelProfile};
use std::sync::Arc;

/// Per-call parameter overrides, highest merge precedence.
pub type CallOverrides = Map<String, Value>;

/// LLM operations bound to one model profile.
///
/// Call parameters merge lowest to highest: the profile's typed defaults
/// (each included only if set), the profile's open extra map, then caller
/// overrides. Later entries overwrite earlier ones on key collision.
pub struct LlmService {
    client: Arc<dyn LlmClient>,
    profile: ModelProfile,
}

impl LlmService {
    pub fn new(client: Arc<dyn LlmClient>, profile: ModelProfile) -> Self {
        Self { client, profile }
    }

    pub fn profile(&self) -> &ModelProfile {
        &self.profile
    }

    /// Single blocking round trip with merged parameters.
    pub async fn chat(
        &self,
        messages: Vec<ChatMessage>,
        overrides: CallOverrides,
    ) -> LlmResult<ChatResponse> {
        let request = self.merged_request(messages, overrides, false);
        self.client.chat(request).await
    }

    /// Streaming call with merged parameters.
    pub async fn stream(
        &self,
        messages: Vec<ChatMessage>,
        overrides: CallOverrides,
    ) -> LlmResult<ChatStream> {
        let request = self.merged_request(messages, overrides, true);
        self.client.stream_chat(request).await
    }

    fn merged_request(
        &self,
        messages: Vec<ChatMessage>,
        overrides: CallOverrides,
        stream: bool,
    ) -> ChatRequest {
        let mut params = Map::new();
        if let Some(t) = self.profile.temperature {
            params.insert("temperature".to_string(), t.into());
        }
        if let Some(p) = self.profile.top_p {
            params.insert("top_p".to_string(), p.into());
        }
        if let Some(m) = self.profile.max_tokens {
            params.insert("max_tokens".to_string(), m.into());
        }
        for (key, value) in &self.profile.extra {
            params.insert(key.clone(), value.clone());
        }
        for (key, value) in overrides {
            params.insert(key, value);
        }

        ChatRequest {
            model: self.profile.model.clone(),
            messages,
            stream,
            temperature: take_f32(&mut params, "temperature"),
            top_p: take_f32(&mut params, "top_p"),
            max_tokens: take_u32(&mut params, "max_tokens"),
            extra: params,
        }
    }
}

fn take_f32(params: &mut Map<String, Value>, key: &str) -> Option<f32> {
    params.remove(key).and_then(|v| v.as_f64()).map(|v| v as f32)
}

fn take_u32(params: &mut Map<String, Value>, key: &str) -> Option<u32> {
    params.remove(key).and_then(|v| v.as_u64()).map(|v| v as u32)
}
