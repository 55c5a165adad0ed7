//! Application state shared across all request handlers.

use crease_client::{EventStore, NextBall};
use std::sync::Arc;

/// Application state that is shared across all request handlers.
///
/// This is cloneable and cheap to pass around (both handles are behind Arc).
/// The collaborators are injected as trait objects so the pipeline never
/// touches ambient globals and tests can substitute doubles.
#[derive(Clone)]
pub struct AppState {
    /// Long-lived handle to the append-only event store.
    pub event_store: Arc<dyn EventStore>,
    /// Client for the next-ball prediction service.
    pub next_ball: Arc<dyn NextBall>,
}

impl AppState {
    /// Create a new AppState with the given collaborator handles.
    pub fn new(event_store: Arc<dyn EventStore>, next_ball: Arc<dyn NextBall>) -> Self {
        Self {
            event_store,
            next_ball,
        }
    }
}
