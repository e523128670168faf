//! Profile lookup - storage interface plus the in-memory implementation

use dashmap::DashMap;
use serde::Deserialize;
use spindle_core::{GraphProfile, ModelProfile};
use uuid::Uuid;

/// Profile lookup by identifier.
///
/// Lookups are synchronous and expected to be fast; caching or batching is
/// the implementation's concern, not the caller's.
pub trait ProfileStore: Send + Sync {
    fn get_graph_profile(&self, id: Uuid) -> Option<GraphProfile>;
    fn get_model_profile(&self, id: Uuid) -> Option<ModelProfile>;
}

/// Concurrent in-memory profile store.
#[derive(Default)]
pub struct InMemoryProfileStore {
    graph_profiles: DashMap<Uuid, GraphProfile>,
    model_profiles: DashMap<Uuid, ModelProfile>,
}

impl InMemoryProfileStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_seed(seed: ProfileSeed) -> Self {
        let store = Self::new();
        for profile in seed.graph_profiles {
            store.insert_graph_profile(profile);
        }
        for profile in seed.model_profiles {
            store.insert_model_profile(profile);
        }
        store
    }

    pub fn insert_graph_profile(&self, profile: GraphProfile) {
        self.graph_profiles.insert(profile.id, profile);
    }

    pub fn insert_model_profile(&self, profile: ModelProfile) {
        self.model_profiles.insert(profile.id, profile);
    }
}

impl ProfileStore for InMemoryProfileStore {
    fn get_graph_profile(&self, id: Uuid) -> Option<GraphProfile> {
        self.graph_profiles.get(&id).map(|p| p.value().clone())
    }

    fn get_model_profile(&self, id: Uuid) -> Option<ModelProfile> {
        self.model_profiles.get(&id).map(|p| p.value().clone())
    }
}

/// Seed file shape for loading profiles at startup.
#[derive(Debug, Default, Deserialize)]
pub struct ProfileSeed {
    #[serde(default)]
    pub graph_profiles: Vec<GraphProfile>,
    #[serde(default)]
    pub model_profiles: Vec<ModelProfile>,
}
