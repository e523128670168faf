//! Built-in graph topologies

pub mod default_v1;
pub mod echo_v1;

use crate::registry::GraphRegistry;

/// Registry with all built-in graphs registered.
pub fn default_registry() -> GraphRegistry {
    let mut registry = GraphRegistry::new();
    registry.register(default_v1::GRAPH_NAME, default_v1::build);
    registry.register(echo_v1::GRAPH_NAME, echo_v1::build);
    registry
}
