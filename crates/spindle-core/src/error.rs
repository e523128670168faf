//! Plan validation errors and stable wire codes

use thiserror::Error;
use uuid::Uuid;

/// Wire code for faults raised while driving a graph or calling the model.
pub const EXECUTION_ERROR: &str = "EXECUTION_ERROR";

/// Validation failure while building a turn plan.
///
/// Validation short-circuits: the first failing field wins and no partial
/// plan is ever produced. `code()` is the stable string surfaced on the wire.
#[derive(Debug, Error)]
pub enum PlanError {
    #[error("invalid request_id format: {0}")]
    InvalidRequestId(String),

    #[error("invalid session_id format: {0}")]
    InvalidSessionId(String),

    #[error("invalid user_id format: {0}")]
    InvalidUserId(String),

    #[error("invalid graph_profile_id format: {0}")]
    InvalidGraphProfileId(String),

    #[error("graph profile {0} not found")]
    GraphProfileNotFound(Uuid),

    #[error("graph builder for '{0}' not found")]
    GraphBuilderNotFound(String),

    #[error("invalid model_profile_id format: {0}")]
    InvalidModelProfileId(String),

    #[error("model profile {0} not found")]
    ModelProfileNotFound(Uuid),

    #[error("no model profile bound to the \"main\" slot")]
    NoModelProfile,
}

impl PlanError {
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidRequestId(_) => "INVALID_REQUEST_ID",
            Self::InvalidSessionId(_) => "INVALID_SESSION_ID",
            Self::InvalidUserId(_) => "INVALID_USER_ID",
            Self::InvalidGraphProfileId(_) => "INVALID_GRAPH_PROFILE_ID",
            Self::GraphProfileNotFound(_) => "GRAPH_PROFILE_NOT_FOUND",
            Self::GraphBuilderNotFound(_) => "GRAPH_BUILDER_NOT_FOUND",
            Self::InvalidModelProfileId(_) => "INVALID_MODEL_PROFILE_ID",
            Self::ModelProfileNotFound(_) => "MODEL_PROFILE_NOT_FOUND",
            Self::NoModelProfile => "NO_MODEL_PROFILE",
        }
    }
}
