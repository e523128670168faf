//! OpenAI-compatible chat completions client with SSE streaming

use crate::client::{ChatRequest, ChatStream, LlmClient, LlmError, LlmResult};
use futures::StreamExt;
use reqwest::Client;
use serde_json::Value;
use spindle_core::{ChatResponse, ChatStreamEvent, Usage};
use std::time::Duration;
use tracing::{debug, error};

/// Configuration for the OpenAI-compatible client.
#[derive(Clone, Debug)]
pub struct OpenAiConfig {
    pub base_url: String,
    pub api_key: Option<String>,
    /// Applied to non-streaming calls only; streaming calls run until the
    /// transport completes.
    pub timeout_s: f64,
}

impl Default for OpenAiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8000/v1".to_string(),
            api_key: None,
            timeout_s: 60.0,
        }
    }
}

pub struct OpenAiClient {
    client: Client,
    config: OpenAiConfig,
}

impl OpenAiClient {
    pub fn new(config: OpenAiConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.config.base_url = url.into();
        self
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/chat/completions",
            self.config.base_url.trim_end_matches('/')
        )
    }

    fn request(&self, body: &ChatRequest) -> reqwest::RequestBuilder {
        let mut req = self.client.post(self.endpoint()).json(body);
        if let Some(key) = &self.config.api_key {
            req = req.bearer_auth(key);
        }
        req
    }
}

#[async_trait::async_trait]
impl LlmClient for OpenAiClient {
    async fn chat(&self, mut request: ChatRequest) -> LlmResult<ChatResponse> {
        request.stream = false;
        debug!("chat request: model={}", request.model);

        let response = self
            .request(&request)
            .timeout(Duration::from_secs_f64(self.config.timeout_s))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!("chat completions error {}: {}", status, body);
            return Err(status_error(status, body));
        }

        let data: Value = response.json().await?;
        Ok(parse_response(&data))
    }

    async fn stream_chat(&self, mut request: ChatRequest) -> LlmResult<ChatStream> {
        request.stream = true;
        debug!("stream request: model={}", request.model);

        let response = self.request(&request).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!("chat completions error {}: {}", status, body);
            return Err(status_error(status, body));
        }

        Ok(Box::pin(parse_sse_stream(response.bytes_stream())))
    }
}

fn status_error(status: reqwest::StatusCode, body: String) -> LlmError {
    match status.as_u16() {
        401 | 403 => LlmError::AuthFailed(body),
        429 => LlmError::RateLimited {
            retry_after_ms: 60_000,
        },
        _ => LlmError::RequestFailed(format!("{}: {}", status, body)),
    }
}

fn parse_response(data: &Value) -> ChatResponse {
    let choice = data["choices"].get(0);
    let text = choice
        .and_then(|c| c["message"]["content"].as_str().or_else(|| c["text"].as_str()))
        .unwrap_or_default()
        .to_string();
    let finish_reason = choice
        .and_then(|c| c["finish_reason"].as_str())
        .map(str::to_string);

    ChatResponse {
        text,
        finish_reason,
        usage: parse_usage(data.get("usage")),
    }
}

fn parse_usage(value: Option<&Value>) -> Option<Usage> {
    let map = value?.as_object()?;
    let field = |key: &str| map.get(key).and_then(Value::as_u64).map(|v| v as u32);
    Some(Usage {
        prompt_tokens: field("prompt_tokens"),
        completion_tokens: field("completion_tokens"),
        total_tokens: field("total_tokens"),
    })
}

fn parse_sse_stream(
    bytes_stream: impl futures::Stream<Item = Result<bytes::Bytes, reqwest::Error>> + Send + 'static,
) -> impl futures::Stream<Item = LlmResult<ChatStreamEvent>> + Send {
    async_stream::stream! {
        let mut buffer = String::new();
        tokio::pin!(bytes_stream);

        'outer: while let Some(chunk_result) = bytes_stream.next().await {
            let chunk = match chunk_result {
                Ok(c) => c,
                Err(e) => {
                    yield Err(LlmError::StreamError(e.to_string()));
                    continue;
                }
            };

            buffer.push_str(&String::from_utf8_lossy(&chunk));

            while let Some(line_end) = buffer.find('\n') {
                let line = buffer[..line_end].trim().to_string();
                buffer = buffer[line_end + 1..].to_string();

                let Some(data) = line.strip_prefix("data:") else {
                    continue;
                };
                let data = data.trim_start();

                if data == "[DONE]" {
                    yield Ok(ChatStreamEvent::StreamDone { finish_reason: None });
                    break 'outer;
                }

                let chunk_json: Value = match serde_json::from_str(data) {
                    Ok(v) => v,
                    Err(_) => continue,
                };
                let choice = chunk_json["choices"].get(0);

                if let Some(text) = choice.and_then(|c| c["delta"]["content"].as_str()) {
                    if !text.is_empty() {
                        yield Ok(ChatStreamEvent::TokenDelta {
                            text: text.to_string(),
                        });
                    }
                }

                if let Some(usage) = parse_usage(chunk_json.get("usage")) {
                    yield Ok(ChatStreamEvent::StreamUsage { usage });
                }

                if let Some(reason) = choice.and_then(|c| c["finish_reason"].as_str()) {
                    yield Ok(ChatStreamEvent::StreamDone {
                        finish_reason: Some(reason.to_string()),
                    });
                    break 'outer;
                }
            }
        }
    }
}
