//! `POST /event` — the request pipeline.
//!
//! One submission runs through four stages in a fixed order: read the body,
//! decode it into a [`DeliveryEvent`], validate it, append it to the event
//! store. Unless the caller opts out with `?nextEvent=false`, a successful
//! write is followed by a lookup against the next-ball service and the hint
//! is returned verbatim as the 201 body.
//!
//! The first failing stage terminates the request. Client faults (unreadable
//! body, failed validation) map to 400; server faults (undecodable payload,
//! store or downstream failures) map to 500. A downstream failure after a
//! successful write still reports 500 even though the event is already
//! durable; callers that retry will double-submit.

use axum::{
    body::Bytes,
    extract::{Query, State, rejection::BytesRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use crease_core::{DeliveryEvent, ValidationOutcome};
use serde::Deserialize;

use crate::state::AppState;

/// Query parameters accepted by `POST /event`.
#[derive(Debug, Default, Deserialize)]
pub(super) struct EventQuery {
    /// Enrichment opt-out: the literal string `"false"` skips the next-ball
    /// lookup. Anything else, including absence, requests it.
    #[serde(rename = "nextEvent")]
    next_event: Option<String>,
}

impl EventQuery {
    fn wants_next_event(&self) -> bool {
        self.next_event.as_deref() != Some("false")
    }
}

/// `OPTIONS /event` — CORS preflight, no further work.
pub(super) async fn preflight() -> StatusCode {
    StatusCode::OK
}

/// `POST /event` — submit one delivery event.
pub(super) async fn submit_event(
    State(state): State<AppState>,
    Query(query): Query<EventQuery>,
    body: Result<Bytes, BytesRejection>,
) -> Response {
    let body = match body {
        Ok(body) => body,
        Err(e) => {
            tracing::error!(error = %e, "Unable to read event from request");
            return (StatusCode::BAD_REQUEST, "Unable to read event").into_response();
        }
    };

    let event: DeliveryEvent = match serde_json::from_slice(&body) {
        Ok(event) => event,
        Err(e) => {
            tracing::error!(error = %e, "Failed to parse event as a delivery");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to parse event: {e}"),
            )
                .into_response();
        }
    };

    match event.validate() {
        ValidationOutcome::Valid => {}
        ValidationOutcome::Error(e) => {
            tracing::error!(error = %e, "Failed to validate delivery");
            return (StatusCode::BAD_REQUEST, format!("Invalid event passed - {e}"))
                .into_response();
        }
        ValidationOutcome::Invalid(reason) => {
            // Reason is logged only; the client gets the generic rejection.
            tracing::error!(reason = %reason, "Rejected semantically invalid delivery");
            return (StatusCode::BAD_REQUEST, "Invalid delivery received").into_response();
        }
    }

    let event_id = match state.event_store.push_event(&event, false).await {
        Ok(id) => id,
        Err(e) => {
            tracing::error!(error = %e, "Failed to push event to the event store");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to push event: {e}"),
            )
                .into_response();
        }
    };
    if event_id.is_empty() {
        // Store-side silent failure sentinel.
        tracing::error!("Event store accepted the write without returning an id");
        return (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error").into_response();
    }

    if query.wants_next_event() {
        tracing::info!(match_id = event.match_id, "Getting next event for match");
        match state.next_ball.next_event(event.match_id).await {
            Err(e) => {
                // The write above is already durable and is not rolled back.
                tracing::error!(error = %e, "Failed to get next event");
                return (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    format!("Error from next ball processor - {e}"),
                )
                    .into_response();
            }
            Ok(hint) if !hint.is_empty() => {
                tracing::info!(event_id = %event_id, "Successfully pushed event to the store");
                return (StatusCode::CREATED, hint).into_response();
            }
            // An empty hint means the match has no next event; fall through
            // to the plain success response.
            Ok(_) => {}
        }
    }

    tracing::info!(event_id = %event_id, "Successfully pushed event to the store");
    StatusCode::CREATED.into_response()
}
