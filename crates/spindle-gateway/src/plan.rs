//! Turn plan - parsed and validated request bound to resolved profiles

use crate::profiles::ProfileStore;
use spindle_core::{GraphProfile, ModelProfile, PlanError, TurnRequest};
use spindle_graph::{GraphBuilder, GraphRegistry};
use std::collections::HashMap;
use uuid::Uuid;

/// Fully-resolved, immutable execution plan for one turn.
///
/// Built once per request, read-only thereafter, discarded at end of turn.
/// Every identifier it holds resolved to a known profile at build time.
#[derive(Clone, Debug)]
pub struct TurnPlan {
    pub request_id: Uuid,
    pub session_id: Uuid,
    pub user_id: Uuid,
    pub graph_profile_id: Uuid,
    pub graph_profile: GraphProfile,
    pub graph_builder: GraphBuilder,
    pub model_bindings: HashMap<String, ModelProfile>,
    pub main_model_profile: ModelProfile,
}

impl TurnPlan {
    /// Parse and validate a turn request against the profile store and the
    /// graph registry. The first failing field wins and no partial plan is
    /// ever returned.
    pub fn build(
        request: &TurnRequest,
        profiles: &dyn ProfileStore,
        registry: &GraphRegistry,
    ) -> Result<TurnPlan, PlanError> {
        let request_id = Uuid::parse_str(&request.request_id)
            .map_err(|_| PlanError::InvalidRequestId(request.request_id.clone()))?;
        let session_id = Uuid::parse_str(&request.session_id)
            .map_err(|_| PlanError::InvalidSessionId(request.session_id.clone()))?;
        let user_id = Uuid::parse_str(&request.user_id)
            .map_err(|_| PlanError::InvalidUserId(request.user_id.clone()))?;
        let graph_profile_id = Uuid::parse_str(&request.graph_profile_id)
            .map_err(|_| PlanError::InvalidGraphProfileId(request.graph_profile_id.clone()))?;

        let graph_profile = profiles
            .get_graph_profile(graph_profile_id)
            .ok_or(PlanError::GraphProfileNotFound(graph_profile_id))?;

        let graph_builder = registry
            .get(&graph_profile.graph_name)
            .ok_or_else(|| PlanError::GraphBuilderNotFound(graph_profile.graph_name.clone()))?;

        let mut model_bindings = HashMap::new();
        for binding in &request.model_bindings {
            let model_profile_id = Uuid::parse_str(&binding.model_profile_id)
                .map_err(|_| PlanError::InvalidModelProfileId(binding.model_profile_id.clone()))?;
            let model_profile = profiles
                .get_model_profile(model_profile_id)
                .ok_or(PlanError::ModelProfileNotFound(model_profile_id))?;
            // Rebinding a slot overwrites: last write wins.
            model_bindings.insert(binding.slot_name.clone(), model_profile);
        }

        let main_model_profile = model_bindings
            .get("main")
            .cloned()
            .ok_or(PlanError::NoModelProfile)?;

        Ok(TurnPlan {
            request_id,
            session_id,
            user_id,
            graph_profile_id,
            graph_profile,
            graph_builder,
            model_bindings,
            main_model_profile,
        })
    }
}
