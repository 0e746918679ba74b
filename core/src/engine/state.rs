use std::sync::Arc;

use serde::Serialize;
use tokio::sync::RwLock;

/// Where the player last died.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Corpse {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub zone: String,
}

/// Live player state in map coordinates.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PlayerState {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    /// Direction of travel in radians, from `atan2(dy, dx)`.
    pub heading: f64,
    /// Empty until the first zone is known.
    pub zone: String,
    /// Set while a corpse is waiting to be recovered.
    pub corpse: Option<Corpse>,
}

impl PlayerState {
    pub fn has_corpse(&self) -> bool {
        self.corpse.is_some()
    }

    pub fn zone(&self) -> Option<&str> {
        (!self.zone.is_empty()).then_some(self.zone.as_str())
    }
}

/// Read side of the engine's state.
///
/// The engine is the only writer; every read returns a copy taken under the
/// lock, so fields in one snapshot are always consistent with each other.
#[derive(Debug, Clone, Default)]
pub struct PlayerStateHandle {
    inner: Arc<RwLock<PlayerState>>,
}

impl PlayerStateHandle {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn snapshot(&self) -> PlayerState {
        self.inner.read().await.clone()
    }

    /// For readers outside the async runtime (render loops).
    ///
    /// Panics if called from within an async context.
    pub fn blocking_snapshot(&self) -> PlayerState {
        self.inner.blocking_read().clone()
    }

    pub(crate) async fn publish(&self, state: &PlayerState) {
        self.inner.write().await.clone_from(state);
    }
}
