//! Configuration profiles resolved per turn

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A stored graph configuration: which named graph to run, at which version.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GraphProfile {
    pub id: Uuid,
    pub name: String,
    pub version_major: u32,
    pub version_minor: u32,
    /// Registry key of the graph this profile selects.
    pub graph_name: String,
}

/// A stored model configuration with call defaults.
///
/// Immutable once loaded; the typed defaults and the open extra map are
/// merged into every call made through a service bound to this profile.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ModelProfile {
    pub id: Uuid,
    pub name: String,
    /// Target model string sent to the provider.
    pub model: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_p: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
    /// Open-ended provider parameters, merged over the typed defaults.
    #[serde(default, skip_serializing_if = "serde_json::Map::is_empty")]
    pub extra: serde_json::Map<String, serde_json::Value>,
}
