//! Graph registry - name to builder resolution

use crate::graph::OrchestratorGraph;
use crate::services::Services;
use std::collections::HashMap;
use std::sync::Arc;

/// Builds a runnable graph instance from a service bundle.
pub type GraphBuilder = fn(Services) -> Arc<dyn OrchestratorGraph>;

/// Read-only name to builder mapping, populated at process start and passed
/// explicitly to the plan builder. Resolution is exact and case-sensitive,
/// no fallback.
pub struct GraphRegistry {
    builders: HashMap<String, GraphBuilder>,
}

impl Default for GraphRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl GraphRegistry {
    pub fn new() -> Self {
        Self {
            builders: HashMap::new(),
        }
    }

    /// Register a builder. Replaces any existing builder with the same name.
    pub fn register(&mut self, name: impl Into<String>, builder: GraphBuilder) {
        self.builders.insert(name.into(), builder);
    }

    pub fn get(&self, name: &str) -> Option<GraphBuilder> {
        self.builders.get(name).copied()
    }

    pub fn list(&self) -> Vec<&str> {
        self.builders.keys().map(|s| s.as_str()).collect()
    }
}
