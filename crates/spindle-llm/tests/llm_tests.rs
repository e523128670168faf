//! Tests for spindle-llm: parameter merging and the client seam

use futures::StreamExt;
use serde_json::json;
use spindle_core::{ChatMessage, ChatResponse, ChatStreamEvent, ModelProfile, Usage};
use spindle_llm::{CallOverrides, ChatRequest, ChatStream, LlmClient, LlmResult, LlmService};
use std::sync::{Arc, Mutex};
use uuid::Uuid;

/// Records every request and replays canned responses.
struct MockClient {
    requests: Mutex<Vec<ChatRequest>>,
    events: Vec<ChatStreamEvent>,
}

impl MockClient {
    fn new() -> Self {
        Self {
            requests: Mutex::new(Vec::new()),
            events: Vec::new(),
        }
    }

    fn with_events(mut self, events: Vec<ChatStreamEvent>) -> Self {
        self.events = events;
        self
    }

    fn last_request(&self) -> ChatRequest {
        self.requests
            .lock()
            .unwrap()
            .last()
            .cloned()
            .expect("no request recorded")
    }
}

#[async_trait::async_trait]
impl LlmClient for MockClient {
    async fn chat(&self, request: ChatRequest) -> LlmResult<ChatResponse> {
        self.requests.lock().unwrap().push(request);
        Ok(ChatResponse {
            text: "ok".to_string(),
            finish_reason: Some("stop".to_string()),
            usage: None,
        })
    }

    async fn stream_chat(&self, request: ChatRequest) -> LlmResult<ChatStream> {
        self.requests.lock().unwrap().push(request);
        let events: Vec<LlmResult<ChatStreamEvent>> =
            self.events.iter().cloned().map(Ok).collect();
        Ok(Box::pin(futures::stream::iter(events)))
    }
}

fn profile() -> ModelProfile {
    ModelProfile {
        id: Uuid::new_v4(),
        name: "test".to_string(),
        model: "test-model".to_string(),
        temperature: None,
        top_p: None,
        max_tokens: None,
        extra: serde_json::Map::new(),
    }
}

fn messages() -> Vec<ChatMessage> {
    vec![ChatMessage::user("hi")]
}

// ===========================================================================
// Parameter merging
// ===========================================================================

#[tokio::test]
async fn profile_defaults_are_applied() {
    let mut p = profile();
    p.temperature = Some(0.5);
    p.max_tokens = Some(100);

    let mock = Arc::new(MockClient::new());
    let service = LlmService::new(mock.clone(), p);
    service.chat(messages(), CallOverrides::new()).await.unwrap();

    let request = mock.last_request();
    assert_eq!(request.model, "test-model");
    assert_eq!(request.temperature, Some(0.5));
    assert_eq!(request.top_p, None);
    assert_eq!(request.max_tokens, Some(100));
    assert!(!request.stream);
}

#[tokio::test]
async fn profile_extra_overrides_typed_defaults() {
    let mut p = profile();
    p.temperature = Some(0.5);
    p.extra.insert("temperature".to_string(), json!(0.9));

    let mock = Arc::new(MockClient::new());
    let service = LlmService::new(mock.clone(), p);
    service.chat(messages(), CallOverrides::new()).await.unwrap();

    assert_eq!(mock.last_request().temperature, Some(0.9));
}

#[tokio::test]
async fn caller_overrides_win_over_extra() {
    let mut p = profile();
    p.extra.insert("temperature".to_string(), json!(0.9));

    let mut overrides = CallOverrides::new();
    overrides.insert("temperature".to_string(), json!(0.1));

    let mock = Arc::new(MockClient::new());
    let service = LlmService::new(mock.clone(), p);
    service.chat(messages(), overrides).await.unwrap();

    assert_eq!(mock.last_request().temperature, Some(0.1));
}

#[tokio::test]
async fn unknown_parameters_land_in_extra() {
    let mut p = profile();
    p.extra.insert("stop".to_string(), json!(["\n"]));

    let mut overrides = CallOverrides::new();
    overrides.insert("seed".to_string(), json!(42));

    let mock = Arc::new(MockClient::new());
    let service = LlmService::new(mock.clone(), p);
    service.chat(messages(), overrides).await.unwrap();

    let request = mock.last_request();
    assert_eq!(request.extra["seed"], json!(42));
    assert_eq!(request.extra["stop"], json!(["\n"]));
    assert_eq!(request.temperature, None);
}

#[tokio::test]
async fn non_numeric_typed_override_is_discarded() {
    let mut overrides = CallOverrides::new();
    overrides.insert("temperature".to_string(), json!("hot"));

    let mock = Arc::new(MockClient::new());
    let service = LlmService::new(mock.clone(), profile());
    service.chat(messages(), overrides).await.unwrap();

    let request = mock.last_request();
    assert_eq!(request.temperature, None);
    assert!(!request.extra.contains_key("temperature"));
}

#[tokio::test]
async fn stream_sets_the_stream_flag() {
    let mock = Arc::new(MockClient::new());
    let service = LlmService::new(mock.clone(), profile());
    service
        .stream(messages(), CallOverrides::new())
        .await
        .unwrap();

    assert!(mock.last_request().stream);
}

// ===========================================================================
// Streaming passthrough
// ===========================================================================

#[tokio::test]
async fn stream_preserves_event_order() {
    let events = vec![
        ChatStreamEvent::TokenDelta {
            text: "a".to_string(),
        },
        ChatStreamEvent::TokenDelta {
            text: "b".to_string(),
        },
        ChatStreamEvent::StreamUsage {
            usage: Usage {
                prompt_tokens: Some(3),
                completion_tokens: Some(2),
                total_tokens: Some(5),
            },
        },
        ChatStreamEvent::StreamDone {
            finish_reason: Some("stop".to_string()),
        },
    ];
    let mock = Arc::new(MockClient::new().with_events(events.clone()));
    let service = LlmService::new(mock.clone(), profile());

    let stream = service
        .stream(messages(), CallOverrides::new())
        .await
        .unwrap();
    let received: Vec<ChatStreamEvent> = stream.map(|e| e.unwrap()).collect().await;

    assert_eq!(received, events);
}

// ===========================================================================
// ChatRequest serialization
// ===========================================================================

#[test]
fn request_flattens_extra_and_skips_unset() {
    let mut request = ChatRequest::new("m", messages());
    request.extra.insert("seed".to_string(), json!(7));

    let json = serde_json::to_value(&request).unwrap();
    assert_eq!(json["seed"], json!(7));
    assert!(json.get("extra").is_none());
    assert!(json.get("temperature").is_none());
    assert_eq!(json["model"], "m");
    assert_eq!(json["stream"], false);
}
