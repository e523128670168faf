//! Graph abstraction and the sequential node runtime

use crate::node::{GraphNode, StreamWriter};
use crate::state::GraphState;
use futures::Stream;
use serde_json::{Map, Value};
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};
use tokio::sync::mpsc;
use tokio_util::task::AbortOnDropHandle;
use tracing::debug;

/// Result type for graph execution
pub type GraphResult<T> = Result<T, GraphError>;

#[derive(Debug, thiserror::Error)]
pub enum GraphError {
    #[error(transparent)]
    Llm(#[from] spindle_llm::LlmError),

    #[error("invalid state delta from node '{node}': {message}")]
    InvalidDelta { node: String, message: String },
}

/// Stream of raw internal items produced by one graph run.
///
/// Items are either node-keyed state deltas (objects with no reserved
/// `type` key) or `type`-tagged custom payloads.
pub type GraphItemStream = Pin<Box<dyn Stream<Item = GraphResult<Value>> + Send>>;

/// A named, pluggable unit of execution.
///
/// Each `stream` call starts a fresh run over the given state.
pub trait OrchestratorGraph: Send + Sync {
    fn stream(&self, state: GraphState) -> GraphItemStream;
}

/// Runs its nodes in order, one at a time.
///
/// While a node runs, its writer payloads are forwarded as they arrive;
/// after it returns, its delta is applied to the state and emitted keyed by
/// the node name. The driving task is aborted when the stream is dropped,
/// so a canceled turn leaves no work behind.
pub struct SequentialGraph {
    nodes: Vec<Arc<dyn GraphNode>>,
}

impl SequentialGraph {
    pub fn new(nodes: Vec<Arc<dyn GraphNode>>) -> Self {
        Self { nodes }
    }
}

impl OrchestratorGraph for SequentialGraph {
    fn stream(&self, state: GraphState) -> GraphItemStream {
        let nodes = self.nodes.clone();
        let (tx, rx) = mpsc::channel(1);
        let handle = tokio::spawn(run_nodes(nodes, state, tx));

        Box::pin(GraphRun {
            rx,
            _handle: AbortOnDropHandle::new(handle),
        })
    }
}

async fn run_nodes(
    nodes: Vec<Arc<dyn GraphNode>>,
    mut state: GraphState,
    tx: mpsc::Sender<GraphResult<Value>>,
) {
    let writer = StreamWriter::new(tx.clone());

    for node in nodes {
        let name = node.name().to_string();
        debug!(node = %name, "running graph node");

        let delta = match node.run(&state, &writer).await {
            Ok(delta) => delta,
            Err(e) => {
                let _ = tx.send(Err(e)).await;
                return;
            }
        };

        if let Err(e) = apply_delta(&mut state, &name, &delta) {
            let _ = tx.send(Err(e)).await;
            return;
        }

        let mut update = Map::new();
        update.insert(name, delta);
        if tx.send(Ok(Value::Object(update))).await.is_err() {
            return;
        }
    }
}

fn apply_delta(state: &mut GraphState, node: &str, delta: &Value) -> GraphResult<()> {
    let invalid = |message: &str| GraphError::InvalidDelta {
        node: node.to_string(),
        message: message.to_string(),
    };

    let obj = delta.as_object().ok_or_else(|| invalid("not an object"))?;

    if let Some(messages) = obj.get("messages") {
        let entries = messages
            .as_array()
            .ok_or_else(|| invalid("messages is not an array"))?;
        let mut appended = Vec::with_capacity(entries.len());
        for entry in entries {
            let text = entry
                .as_str()
                .ok_or_else(|| invalid("messages entry is not a string"))?;
            appended.push(text.to_string());
        }
        state.push_messages(appended);
    }

    Ok(())
}

struct GraphRun {
    rx: mpsc::Receiver<GraphResult<Value>>,
    _handle: AbortOnDropHandle<()>,
}

impl Stream for GraphRun {
    type Item = GraphResult<Value>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.get_mut().rx.poll_recv(cx)
    }
}
