//! Spindle Gateway - turn planning, wire framing, and the HTTP server

pub mod bridge;
pub mod factory;
pub mod plan;
pub mod profiles;
pub mod server;
pub mod turn;

pub use factory::OrchestratorFactory;
pub use plan::TurnPlan;
pub use profiles::{InMemoryProfileStore, ProfileSeed, ProfileStore};
pub use server::{start_gateway, BindMode, GatewayConfig};
pub use turn::{run_turn, AppContext};
