//! Echo graph - replays the last message as token chunks
//!
//! No model call involved; used for smoke checks and wiring tests.

use crate::graph::{GraphResult, OrchestratorGraph, SequentialGraph};
use crate::node::{GraphNode, StreamWriter};
use crate::services::Services;
use crate::state::GraphState;
use serde_json::{json, Value};
use std::sync::Arc;

pub const GRAPH_NAME: &str = "echo_v1";

struct Echo;

#[async_trait::async_trait]
impl GraphNode for Echo {
    fn name(&self) -> &str {
        "echo"
    }

    async fn run(&self, state: &GraphState, writer: &StreamWriter) -> GraphResult<Value> {
        let message = state.messages().last().cloned().unwrap_or_default();

        let words: Vec<&str> = message.split_whitespace().collect();
        let mut accumulated = String::new();
        for (i, word) in words.iter().enumerate() {
            let chunk = if i + 1 < words.len() {
                format!("{} ", word)
            } else {
                word.to_string()
            };
            writer.token_delta(chunk.clone()).await;
            accumulated.push_str(&chunk);
        }
        writer.done(None).await;

        Ok(json!({ "messages": [accumulated] }))
    }
}

pub fn build(_services: Services) -> Arc<dyn OrchestratorGraph> {
    Arc::new(SequentialGraph::new(vec![Arc::new(Echo)]))
}
