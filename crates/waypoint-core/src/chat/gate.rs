//! Per-session single-flight turn gate.
//!
//! At most one turn may be in flight per session. A second submission
//! while one is pending is rejected with `TurnError::TurnInProgress` --
//! the server-side analog of the submit-disabling loading flag. Rejection,
//! not queuing or cancellation.

use std::sync::Arc;

use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use uuid::Uuid;
use waypoint_types::error::TurnError;

/// Tracks which sessions currently have a turn in flight.
#[derive(Clone, Default)]
pub struct TurnGate {
    active: Arc<DashMap<Uuid, ()>>,
}

impl TurnGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim the in-flight slot for a session.
    ///
    /// Returns a guard that releases the slot when dropped, or
    /// `TurnError::TurnInProgress` if the session already has a turn
    /// in flight.
    pub fn begin(&self, session_id: Uuid) -> Result<TurnGuard, TurnError> {
        match self.active.entry(session_id) {
            Entry::Occupied(_) => Err(TurnError::TurnInProgress),
            Entry::Vacant(entry) => {
                entry.insert(());
                Ok(TurnGuard {
                    active: Arc::clone(&self.active),
                    session_id,
                })
            }
        }
    }
}

/// RAII guard for an in-flight turn. Releases the session's slot on drop,
/// including on error and panic unwind paths.
pub struct TurnGuard {
    active: Arc<DashMap<Uuid, ()>>,
    session_id: Uuid,
}

impl Drop for TurnGuard {
    fn drop(&mut self) {
        self.active.remove(&self.session_id);
    }
}
