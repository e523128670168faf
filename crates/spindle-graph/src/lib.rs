//! Spindle Graph - pluggable execution graphs, node contract, and event translation

pub mod graph;
pub mod graphs;
pub mod node;
pub mod orchestrator;
pub mod registry;
pub mod services;
pub mod state;
pub mod translate;

pub use graph::{GraphError, GraphItemStream, GraphResult, OrchestratorGraph, SequentialGraph};
pub use graphs::default_registry;
pub use node::{GraphNode, StreamWriter};
pub use orchestrator::ChatOrchestrator;
pub use registry::{GraphBuilder, GraphRegistry};
pub use services::Services;
pub use state::GraphState;
pub use translate::{translate, SourcedEventStream};
