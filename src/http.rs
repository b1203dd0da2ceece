//! HTTP client wrapper for webshell API requests.

use std::time::Duration;

use reqwest::{Client, Method, RequestBuilder, Response};
use tracing::debug;

use crate::error::{HarnessError, Result};

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(5000);

const INITIAL_BACKOFF_MS: u64 = 250;
const MAX_BACKOFF_MS: u64 = 8_000;

/// HTTP client for making requests to the webshell server.
///
/// `timeout` bounds a whole exchange for ordinary calls. Streamed transfers
/// are only bounded per connect and per read, so a large upload or download
/// may take longer as long as data keeps moving.
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
    timeout: Duration,
}

impl HttpClient {
    /// Create a new HTTP client with the default timeout.
    pub fn new() -> Result<Self> {
        Self::with_timeout(DEFAULT_TIMEOUT)
    }

    /// Create a new HTTP client whose requests abort after `timeout`.
    pub fn with_timeout(timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .connect_timeout(timeout)
            .read_timeout(timeout)
            .build()
            .map_err(|e| HarnessError::Config(format!("Failed to build client: {}", e)))?;
        Ok(Self { client, timeout })
    }

    /// Create a new HTTP client routed through a proxy.
    pub fn with_proxy(proxy: &str, timeout: Duration) -> Result<Self> {
        let proxy = reqwest::Proxy::all(proxy)
            .map_err(|e| HarnessError::Config(format!("Invalid proxy: {}", e)))?;

        let client = Client::builder()
            .proxy(proxy)
            .connect_timeout(timeout)
            .read_timeout(timeout)
            .build()
            .map_err(|e| HarnessError::Config(format!("Failed to build client: {}", e)))?;

        Ok(Self { client, timeout })
    }

    /// Per-request timeout.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Start a request that must complete within the timeout.
    pub fn request(&self, method: Method, url: &str) -> RequestBuilder {
        self.client.request(method, url).timeout(self.timeout)
    }

    /// Start a request whose body streams; only connect and individual
    /// reads are bounded by the timeout.
    pub fn stream_request(&self, method: Method, url: &str) -> RequestBuilder {
        self.client.request(method, url)
    }

    /// Send a request, retrying up to `retries` times when the connection
    /// could not be established.
    ///
    /// Requests that reached the server (including timeouts) are never
    /// retried, and neither are requests with a streamed body.
    pub async fn send(&self, request: RequestBuilder, retries: u32) -> Result<Response> {
        let mut delay_ms = INITIAL_BACKOFF_MS;
        let mut attempt = 0;
        let mut pending = request;

        loop {
            let spare = pending.try_clone();
            match pending.send().await {
                Ok(response) => return Ok(response),
                Err(e) if e.is_connect() && attempt < retries => {
                    let Some(next) = spare else {
                        return Err(HarnessError::RequestError(e));
                    };
                    attempt += 1;
                    debug!(attempt, delay_ms, "connect failed, retrying: {}", e);
                    tokio::time::sleep(Duration::from_millis(delay_ms)).await;
                    delay_ms = (delay_ms * 2).min(MAX_BACKOFF_MS);
                    pending = next;
                }
                Err(e) => return Err(HarnessError::RequestError(e)),
            }
        }
    }
}
