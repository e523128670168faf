//! Turn wire protocol
//!
//! Inbound: one `TurnRequest` per call, all identifiers as untrusted strings.
//! Outbound: a sequence of `WireEvent`s closed by exactly one terminal event
//! (done or error), never both, never neither.

use serde::{Deserialize, Serialize};

/// Binds a model profile to a logical slot for one turn.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ModelBinding {
    pub slot_name: String,
    pub model_profile_id: String,
}

/// Inbound request for one conversational turn.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TurnRequest {
    pub request_id: String,
    pub session_id: String,
    pub user_id: String,
    pub graph_profile_id: String,
    #[serde(default)]
    pub model_bindings: Vec<ModelBinding>,
    pub message: String,
}

/// Outward-facing wire event.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum WireEvent {
    /// A chunk of generated text.
    Token {
        content: String,
        is_first: bool,
        is_last: bool,
    },
    /// Terminal: the turn completed.
    Done,
    /// Terminal: the turn failed.
    Error { code: String, message: String },
}

impl WireEvent {
    pub fn token(content: impl Into<String>, is_first: bool, is_last: bool) -> Self {
        Self::Token {
            content: content.into(),
            is_first,
            is_last,
        }
    }

    pub fn error(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Error {
            code: code.into(),
            message: message.into(),
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Done | Self::Error { .. })
    }
}
