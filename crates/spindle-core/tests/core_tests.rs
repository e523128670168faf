//! Tests for spindle-core: types, wire protocol, and plan error codes

use spindle_core::*;
use uuid::Uuid;

// ===========================================================================
// Role / ChatMessage
// ===========================================================================

#[test]
fn role_serde_lowercase() {
    assert_eq!(serde_json::to_string(&Role::System).unwrap(), r#""system""#);
    assert_eq!(
        serde_json::to_string(&Role::Developer).unwrap(),
        r#""developer""#
    );
    let back: Role = serde_json::from_str(r#""assistant""#).unwrap();
    assert_eq!(back, Role::Assistant);
}

#[test]
fn chat_message_constructors() {
    let msg = ChatMessage::user("hello");
    assert_eq!(msg.role, Role::User);
    assert_eq!(msg.content, "hello");
    assert!(msg.name.is_none());

    assert_eq!(ChatMessage::system("s").role, Role::System);
    assert_eq!(ChatMessage::assistant("a").role, Role::Assistant);
}

#[test]
fn chat_message_name_skipped_when_unset() {
    let json = serde_json::to_string(&ChatMessage::user("hi")).unwrap();
    assert!(!json.contains("name"));
}

// ===========================================================================
// Usage
// ===========================================================================

#[test]
fn usage_skips_unset_fields() {
    let usage = Usage {
        prompt_tokens: Some(10),
        completion_tokens: None,
        total_tokens: None,
    };
    let json = serde_json::to_string(&usage).unwrap();
    assert!(json.contains("prompt_tokens"));
    assert!(!json.contains("completion_tokens"));
    assert!(!json.contains("total_tokens"));
}

#[test]
fn usage_default_is_all_unset() {
    let usage = Usage::default();
    assert!(usage.prompt_tokens.is_none());
    assert!(usage.completion_tokens.is_none());
    assert!(usage.total_tokens.is_none());
}

// ===========================================================================
// WireEvent
// ===========================================================================

#[test]
fn wire_event_token_serde() {
    let event = WireEvent::token("hi", true, false);
    let json = serde_json::to_value(&event).unwrap();
    assert_eq!(json["type"], "token");
    assert_eq!(json["content"], "hi");
    assert_eq!(json["is_first"], true);
    assert_eq!(json["is_last"], false);

    let back: WireEvent = serde_json::from_value(json).unwrap();
    assert_eq!(back, event);
}

#[test]
fn wire_event_done_serde() {
    let json = serde_json::to_value(&WireEvent::Done).unwrap();
    assert_eq!(json, serde_json::json!({ "type": "done" }));
}

#[test]
fn wire_event_error_serde() {
    let event = WireEvent::error("EXECUTION_ERROR", "boom");
    let json = serde_json::to_value(&event).unwrap();
    assert_eq!(json["type"], "error");
    assert_eq!(json["code"], "EXECUTION_ERROR");
    assert_eq!(json["message"], "boom");
}

#[test]
fn wire_event_terminality() {
    assert!(WireEvent::Done.is_terminal());
    assert!(WireEvent::error("X", "y").is_terminal());
    assert!(!WireEvent::token("t", false, false).is_terminal());
}

// ===========================================================================
// TurnRequest
// ===========================================================================

#[test]
fn turn_request_bindings_default_to_empty() {
    let request: TurnRequest = serde_json::from_value(serde_json::json!({
        "request_id": "r",
        "session_id": "s",
        "user_id": "u",
        "graph_profile_id": "g",
        "message": "hi",
    }))
    .unwrap();
    assert!(request.model_bindings.is_empty());
}

// ===========================================================================
// Profiles
// ===========================================================================

#[test]
fn model_profile_minimal_deserialize() {
    let profile: ModelProfile = serde_json::from_value(serde_json::json!({
        "id": Uuid::new_v4(),
        "name": "fast",
        "model": "gpt-oss-120b",
    }))
    .unwrap();
    assert!(profile.temperature.is_none());
    assert!(profile.top_p.is_none());
    assert!(profile.max_tokens.is_none());
    assert!(profile.extra.is_empty());
}

#[test]
fn model_profile_extra_roundtrip() {
    let mut extra = serde_json::Map::new();
    extra.insert("seed".to_string(), serde_json::json!(7));
    let profile = ModelProfile {
        id: Uuid::new_v4(),
        name: "seeded".to_string(),
        model: "m".to_string(),
        temperature: Some(0.2),
        top_p: None,
        max_tokens: Some(256),
        extra,
    };
    let json = serde_json::to_value(&profile).unwrap();
    let back: ModelProfile = serde_json::from_value(json).unwrap();
    assert_eq!(back, profile);
}

// ===========================================================================
// PlanError
// ===========================================================================

#[test]
fn plan_error_codes_are_stable() {
    let id = Uuid::new_v4();
    let cases = [
        (
            PlanError::InvalidRequestId("x".into()),
            "INVALID_REQUEST_ID",
        ),
        (
            PlanError::InvalidSessionId("x".into()),
            "INVALID_SESSION_ID",
        ),
        (PlanError::InvalidUserId("x".into()), "INVALID_USER_ID"),
        (
            PlanError::InvalidGraphProfileId("x".into()),
            "INVALID_GRAPH_PROFILE_ID",
        ),
        (
            PlanError::GraphProfileNotFound(id),
            "GRAPH_PROFILE_NOT_FOUND",
        ),
        (
            PlanError::GraphBuilderNotFound("g".into()),
            "GRAPH_BUILDER_NOT_FOUND",
        ),
        (
            PlanError::InvalidModelProfileId("x".into()),
            "INVALID_MODEL_PROFILE_ID",
        ),
        (
            PlanError::ModelProfileNotFound(id),
            "MODEL_PROFILE_NOT_FOUND",
        ),
        (PlanError::NoModelProfile, "NO_MODEL_PROFILE"),
    ];
    for (error, code) in cases {
        assert_eq!(error.code(), code);
    }
}

#[test]
fn plan_error_message_names_the_offender() {
    let error = PlanError::GraphBuilderNotFound("missing_graph".into());
    assert!(error.to_string().contains("missing_graph"));

    let error = PlanError::InvalidRequestId("not-a-uuid".into());
    assert!(error.to_string().contains("not-a-uuid"));
}
