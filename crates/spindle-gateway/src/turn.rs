//! One turn end-to-end: plan, bind, execute, frame

use crate::bridge;
use crate::factory::OrchestratorFactory;
use crate::plan::TurnPlan;
use crate::profiles::ProfileStore;
use futures::stream::{self, BoxStream};
use futures::StreamExt;
use spindle_core::{TurnRequest, WireEvent};
use spindle_graph::{GraphRegistry, GraphState};
use std::sync::Arc;
use tracing::{info, warn};

/// Per-process dependencies shared by all turns. Read-only once built; no
/// turn mutates state visible to another.
pub struct AppContext {
    pub profiles: Arc<dyn ProfileStore>,
    pub registry: GraphRegistry,
    pub factory: OrchestratorFactory,
}

/// Run one turn against the shared context.
///
/// The returned stream always ends with exactly one terminal event: plan
/// validation failures and execution faults alike surface as a single
/// error event, and no token chunk precedes a plan failure.
pub fn run_turn(context: &AppContext, request: TurnRequest) -> BoxStream<'static, WireEvent> {
    let plan = match TurnPlan::build(&request, context.profiles.as_ref(), &context.registry) {
        Ok(plan) => plan,
        Err(e) => {
            warn!(code = e.code(), "turn plan rejected: {}", e);
            return stream::iter([WireEvent::error(e.code(), e.to_string())]).boxed();
        }
    };

    info!(
        request_id = %plan.request_id,
        graph = %plan.graph_profile.graph_name,
        model = %plan.main_model_profile.model,
        "executing turn"
    );

    let orchestrator = context.factory.create(&plan);
    let state = GraphState::new(
        plan.request_id,
        plan.session_id,
        plan.user_id,
        plan.model_bindings.clone(),
    )
    .with_message(request.message);

    bridge::frame(orchestrator.execute(state)).boxed()
}
