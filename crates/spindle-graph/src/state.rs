//! Per-turn graph working state

use spindle_core::ModelProfile;
use std::collections::HashMap;
use uuid::Uuid;

/// Mutable working state threaded through one graph run.
///
/// The message log is append-only: node deltas contribute new entries and
/// never replace prior ones. The graph runtime owns the state between node
/// invocations; nodes only see a shared reference.
#[derive(Clone, Debug)]
pub struct GraphState {
    pub request_id: Uuid,
    pub session_id: Uuid,
    pub user_id: Uuid,
    pub model_bindings: HashMap<String, ModelProfile>,
    messages: Vec<String>,
}

impl GraphState {
    pub fn new(
        request_id: Uuid,
        session_id: Uuid,
        user_id: Uuid,
        model_bindings: HashMap<String, ModelProfile>,
    ) -> Self {
        Self {
            request_id,
            session_id,
            user_id,
            model_bindings,
            messages: Vec::new(),
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.messages.push(message.into());
        self
    }

    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    /// Append entries to the message log.
    pub fn push_messages(&mut self, entries: impl IntoIterator<Item = String>) {
        self.messages.extend(entries);
    }
}
