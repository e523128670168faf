//! Spindle Core - shared types, profiles, wire protocol, and error handling

pub mod error;
pub mod profile;
pub mod protocol;
pub mod types;

pub use error::{PlanError, EXECUTION_ERROR};
pub use profile::{GraphProfile, ModelProfile};
pub use protocol::*;
pub use types::*;
