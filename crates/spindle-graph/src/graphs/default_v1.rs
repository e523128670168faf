//! Default single-node generation graph

use crate::graph::{GraphResult, OrchestratorGraph, SequentialGraph};
use crate::node::{GraphNode, StreamWriter};
use crate::services::Services;
use crate::state::GraphState;
use futures::StreamExt;
use serde_json::{json, Value};
use spindle_core::{ChatMessage, ChatStreamEvent};
use spindle_llm::CallOverrides;
use std::sync::Arc;

pub const GRAPH_NAME: &str = "default_graph_v1";

/// Streams a completion for the accumulated conversation from the main
/// model, forwarding token, usage, and done payloads as they arrive.
struct LlmGenerate {
    services: Services,
}

#[async_trait::async_trait]
impl GraphNode for LlmGenerate {
    fn name(&self) -> &str {
        "llm_generate"
    }

    async fn run(&self, state: &GraphState, writer: &StreamWriter) -> GraphResult<Value> {
        let messages: Vec<ChatMessage> = state
            .messages()
            .iter()
            .map(|m| ChatMessage::user(m.clone()))
            .collect();

        let mut stream = self
            .services
            .llm_main
            .stream(messages, CallOverrides::new())
            .await?;

        let mut text = String::new();
        while let Some(event) = stream.next().await {
            match event? {
                ChatStreamEvent::TokenDelta { text: chunk } => {
                    text.push_str(&chunk);
                    writer.token_delta(chunk).await;
                }
                ChatStreamEvent::StreamUsage { usage } => {
                    writer.usage(&usage).await;
                }
                ChatStreamEvent::StreamDone { finish_reason } => {
                    writer.done(finish_reason.as_deref()).await;
                    break;
                }
            }
        }

        Ok(json!({ "messages": [text] }))
    }
}

pub fn build(services: Services) -> Arc<dyn OrchestratorGraph> {
    Arc::new(SequentialGraph::new(vec![Arc::new(LlmGenerate {
        services,
    })]))
}
