//! HTTP API for the gateway.
//!
//! A single route: `/event` accepts delivery submissions (POST) and CORS
//! preflights (OPTIONS). Any other method gets 405 from the method router.

use axum::{Router, routing::post};

use crate::state::AppState;

mod event;

/// Build the event API router.
pub fn router() -> Router<AppState> {
    Router::new().route("/event", post(event::submit_event).options(event::preflight))
}
