//! Application state for the Pricing Engine API.
//!
//! Each pricing session owns an exclusive engine instance behind its own
//! mutex. A recompute mutates several fields in a required order, so the
//! session lock is held for the whole mutate-recompute-project unit of
//! work. Sessions are never shared across ids.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::{Mutex, RwLock};
use uuid::Uuid;

use crate::calculation::{PricingEngine, RateModel};
use crate::config::EngineDefaults;

/// Shared application state.
///
/// Holds the engine defaults used to seed new sessions and the live
/// session registry.
#[derive(Clone)]
pub struct AppState {
    defaults: Arc<EngineDefaults>,
    sessions: Arc<RwLock<HashMap<Uuid, Arc<Mutex<PricingEngine>>>>>,
}

impl AppState {
    /// Creates a new application state with the given defaults.
    pub fn new(defaults: EngineDefaults) -> Self {
        Self {
            defaults: Arc::new(defaults),
            sessions: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Returns the engine defaults.
    pub fn defaults(&self) -> &EngineDefaults {
        &self.defaults
    }

    /// Creates a new pricing session and returns its id.
    pub async fn create_session(&self) -> Uuid {
        let model = RateModel::with_defaults(&self.defaults);
        let engine = PricingEngine::with_defaults(model, &self.defaults);

        let id = Uuid::new_v4();
        self.sessions
            .write()
            .await
            .insert(id, Arc::new(Mutex::new(engine)));
        id
    }

    /// Looks up a session's engine by id.
    pub async fn session(&self, id: Uuid) -> Option<Arc<Mutex<PricingEngine>>> {
        self.sessions.read().await.get(&id).cloned()
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(EngineDefaults::builtin())
    }
}
