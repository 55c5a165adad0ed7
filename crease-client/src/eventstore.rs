//! Client for the append-only event store.
//!
//! Deliveries are appended to one stream per match (`match-{id}`). Each write
//! carries a fresh `ES-EventId` so the store can deduplicate on its side; this
//! client never reuses or checks ids itself.

use async_trait::async_trait;
use crease_core::DeliveryEvent;
use reqwest::{Client, StatusCode};
use url::Url;
use uuid::Uuid;

/// Errors produced when talking to the event store.
#[derive(Debug, thiserror::Error)]
pub enum EventStoreError {
    /// Transport-level failure (DNS, TLS, connection reset, …).
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// The store returned a non-2xx status code.
    #[error("event store error: status {status}, body: {body}")]
    Api { status: StatusCode, body: String },

    /// The event could not be serialized for the wire.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// The stream path could not be joined onto the base URL.
    #[error("invalid url: {0}")]
    Url(#[from] url::ParseError),
}

/// Append-only persistence for delivery events.
///
/// Implementations must be safe to share across request-handling tasks; the
/// gateway holds one handle for the process lifetime.
#[async_trait]
pub trait EventStore: Send + Sync {
    /// Append one event to the store and return its identifier.
    ///
    /// An `Ok` result with an **empty** identifier is the store's signal of a
    /// silent write failure; callers must treat it as one. `require_ack`
    /// asks the store to confirm the write before responding.
    async fn push_event(
        &self,
        event: &DeliveryEvent,
        require_ack: bool,
    ) -> Result<String, EventStoreError>;
}

/// HTTP implementation of [`EventStore`].
#[derive(Debug, Clone)]
pub struct HttpEventStore {
    http: Client,
    base_url: Url,
}

impl HttpEventStore {
    /// Create a client for the store at `base_url`.
    pub fn new(base_url: Url) -> Self {
        Self {
            http: Client::new(),
            base_url,
        }
    }

    /// Replace the default `reqwest::Client` with a custom one (e.g. to
    /// configure timeouts or a proxy).
    pub fn with_http_client(mut self, client: Client) -> Self {
        self.http = client;
        self
    }

    /// Probe the store once at startup. Any response means reachable; the
    /// store's own status page content is not interpreted.
    pub async fn connect(&self) -> bool {
        match self.http.get(self.base_url.clone()).send().await {
            Ok(_) => true,
            Err(e) => {
                tracing::error!(error = %e, url = %self.base_url, "Event store unreachable");
                false
            }
        }
    }

    fn stream_url(&self, match_id: i64) -> Result<Url, url::ParseError> {
        self.base_url.join(&format!("streams/{}", stream_for_match(match_id)))
    }
}

/// Stream name for a match, one stream per match.
pub fn stream_for_match(match_id: i64) -> String {
    format!("match-{match_id}")
}

#[async_trait]
impl EventStore for HttpEventStore {
    async fn push_event(
        &self,
        event: &DeliveryEvent,
        require_ack: bool,
    ) -> Result<String, EventStoreError> {
        let event_id = Uuid::new_v4();
        let url = self.stream_url(event.match_id)?;
        let body = serde_json::to_vec(event)?;

        let resp = self
            .http
            .post(url)
            .header("Content-Type", "application/json")
            .header("ES-EventId", event_id.to_string())
            .header("ES-EventType", "delivery")
            .header("ES-RequireAck", if require_ack { "true" } else { "false" })
            .body(body)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(EventStoreError::Api { status, body });
        }

        Ok(event_id.to_string())
    }
}
