//! Binds a validated plan into a runnable orchestrator

use crate::plan::TurnPlan;
use spindle_graph::{ChatOrchestrator, Services};
use spindle_llm::{LlmClient, LlmService};
use std::sync::Arc;

/// Creates orchestrators from turn plans, sharing one outbound client
/// across all turns.
pub struct OrchestratorFactory {
    client: Arc<dyn LlmClient>,
}

impl OrchestratorFactory {
    pub fn new(client: Arc<dyn LlmClient>) -> Self {
        Self { client }
    }

    /// Bind the plan's main model profile into the service bundle and
    /// instantiate its graph.
    pub fn create(&self, plan: &TurnPlan) -> ChatOrchestrator {
        let llm_main = LlmService::new(self.client.clone(), plan.main_model_profile.clone());
        let services = Services {
            llm_main: Arc::new(llm_main),
        };
        let graph = (plan.graph_builder)(services);
        ChatOrchestrator::new(graph)
    }
}
