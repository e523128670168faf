//! Graph node contract and the custom-payload stream writer

use crate::graph::GraphResult;
use crate::state::GraphState;
use serde_json::{json, Value};
use spindle_core::Usage;
use tokio::sync::mpsc;

/// Writes custom payloads into the current graph run's item stream.
///
/// Payloads are tagged maps; the reserved `type` key is what distinguishes
/// them from node state deltas downstream. Sends suspend until the consumer
/// takes the previous item, so a node streams no faster than its caller.
#[derive(Clone)]
pub struct StreamWriter {
    tx: mpsc::Sender<GraphResult<Value>>,
}

impl StreamWriter {
    pub(crate) fn new(tx: mpsc::Sender<GraphResult<Value>>) -> Self {
        Self { tx }
    }

    /// Write a raw custom payload. Dropped silently once the turn has been
    /// torn down.
    pub async fn write(&self, item: Value) {
        let _ = self.tx.send(Ok(item)).await;
    }

    /// Emit a text chunk.
    pub async fn token_delta(&self, text: impl Into<String>) {
        self.write(json!({ "type": "token_delta", "content": text.into() }))
            .await;
    }

    /// Emit provider usage counts.
    pub async fn usage(&self, usage: &Usage) {
        self.write(json!({ "type": "stream_usage", "usage": usage }))
            .await;
    }

    /// Emit stream completion.
    pub async fn done(&self, finish_reason: Option<&str>) {
        self.write(json!({ "type": "stream_done", "finish_reason": finish_reason }))
            .await;
    }
}

/// A named unit of work within a graph.
///
/// Custom payloads go through the writer as they are produced; the returned
/// object is the node's state delta, emitted keyed by the node name after
/// the node completes. A `messages` array in the delta is appended to the
/// state log.
#[async_trait::async_trait]
pub trait GraphNode: Send + Sync {
    /// Node name; events it emits are attributed to this name.
    fn name(&self) -> &str;

    async fn run(&self, state: &GraphState, writer: &StreamWriter) -> GraphResult<Value>;
}
