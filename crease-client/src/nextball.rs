//! Client for the next-ball prediction service.
//!
//! Given a match id, the service proposes the next event a scoring client
//! should expect. The response body is passed through the gateway verbatim;
//! this client never parses it. Note that the downstream status code is also
//! not interpreted: any reachable response counts as a hint, matching the
//! behaviour scoring clients already depend on.

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::Client;
use url::Url;

/// Errors produced when asking for the next expected event.
#[derive(Debug, thiserror::Error)]
pub enum NextBallError {
    /// Transport-level failure, or the response body could not be read.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// The lookup URL could not be constructed.
    #[error("invalid url: {0}")]
    Url(#[from] url::ParseError),
}

/// Source of next-event hints.
#[async_trait]
pub trait NextBall: Send + Sync {
    /// Fetch the next expected event for a match, as an opaque payload.
    ///
    /// An empty payload is a legitimate answer: it means the match has no
    /// next event (e.g. the match is over).
    async fn next_event(&self, match_id: i64) -> Result<Bytes, NextBallError>;
}

/// HTTP implementation of [`NextBall`].
#[derive(Debug, Clone)]
pub struct HttpNextBallClient {
    http: Client,
    base_url: Url,
}

impl HttpNextBallClient {
    /// Create a client for the prediction service at `host`:`port`.
    pub fn new(host: &str, port: u16) -> Result<Self, url::ParseError> {
        Ok(Self {
            http: Client::new(),
            base_url: Url::parse(&format!("http://{host}:{port}/"))?,
        })
    }

    /// Replace the default `reqwest::Client` with a custom one.
    pub fn with_http_client(mut self, client: Client) -> Self {
        self.http = client;
        self
    }

    fn request_url(&self, match_id: i64) -> Url {
        let mut url = self.base_url.clone();
        url.query_pairs_mut().append_pair("match", &match_id.to_string());
        url
    }
}

#[async_trait]
impl NextBall for HttpNextBallClient {
    async fn next_event(&self, match_id: i64) -> Result<Bytes, NextBallError> {
        let resp = self.http.get(self.request_url(match_id)).send().await?;
        let body = resp.bytes().await?;
        Ok(body)
    }
}
