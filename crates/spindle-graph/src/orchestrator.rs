//! Turn orchestrator - drives a graph and translates its stream

use crate::graph::OrchestratorGraph;
use crate::state::GraphState;
use crate::translate::{translate, SourcedEventStream};
use std::sync::Arc;

/// Executes one graph run and exposes it as sourced events.
pub struct ChatOrchestrator {
    graph: Arc<dyn OrchestratorGraph>,
}

impl ChatOrchestrator {
    pub fn new(graph: Arc<dyn OrchestratorGraph>) -> Self {
        Self { graph }
    }

    /// Run the graph against the initial state.
    ///
    /// Events are forwarded as they arrive, with no buffering of the turn
    /// and no reordering; faults from the graph or the model call propagate
    /// unchanged.
    pub fn execute(&self, initial_state: GraphState) -> SourcedEventStream {
        translate(self.graph.stream(initial_state))
    }
}
