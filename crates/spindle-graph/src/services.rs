//! Service bundle handed to graph builders

use spindle_llm::LlmService;
use std::sync::Arc;

/// Services available to graph nodes for one turn.
#[derive(Clone)]
pub struct Services {
    /// LLM service bound to the turn's main model profile.
    pub llm_main: Arc<LlmService>,
}
