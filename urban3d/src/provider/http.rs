//! HTTP client abstraction for testability

use super::types::ProviderError;
use std::future::Future;
use std::sync::OnceLock;
use std::time::Duration;
use tracing::{debug, trace, warn};

/// User-Agent sent with every request.
///
/// Overpass operators ask clients to identify themselves.
pub const USER_AGENT: &str = concat!("urban3d/", env!("CARGO_PKG_VERSION"), " (contact: none)");

/// Trait for asynchronous HTTP client operations.
///
/// Lets providers be exercised against mock clients in tests.
pub trait AsyncHttpClient: Send + Sync {
    /// Performs an async HTTP POST with a raw body and extra headers.
    ///
    /// # Arguments
    ///
    /// * `url` - The URL to request
    /// * `body` - Request body
    /// * `headers` - Slice of (header_name, header_value) tuples
    /// * `timeout` - Whole-request timeout
    ///
    /// # Returns
    ///
    /// The response body as bytes, or an error. Non-2xx statuses map to
    /// [`ProviderError::HttpStatus`].
    fn post_with_headers(
        &self,
        url: &str,
        body: String,
        headers: &[(&str, &str)],
        timeout: Duration,
    ) -> impl Future<Output = Result<Vec<u8>, ProviderError>> + Send;
}

static SHARED_CLIENT: OnceLock<reqwest::Client> = OnceLock::new();

/// Async HTTP client implementation using reqwest.
///
/// All instances created with [`AsyncReqwestClient::shared`] reuse one
/// process-wide connection pool.
#[derive(Clone)]
pub struct AsyncReqwestClient {
    client: reqwest::Client,
}

impl AsyncReqwestClient {
    /// Returns a handle to the process-wide client, building it on first use.
    pub fn shared() -> Result<Self, ProviderError> {
        if let Some(client) = SHARED_CLIENT.get() {
            return Ok(Self {
                client: client.clone(),
            });
        }

        let built = Self::build_client()?;
        let client = SHARED_CLIENT.get_or_init(|| built).clone();
        Ok(Self { client })
    }

    fn build_client() -> Result<reqwest::Client, ProviderError> {
        reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .pool_idle_timeout(Duration::from_secs(90))
            .tcp_keepalive(Duration::from_secs(30))
            .build()
            .map_err(|e| {
                ProviderError::HttpError(format!("Failed to create async HTTP client: {}", e))
            })
    }
}

impl AsyncHttpClient for AsyncReqwestClient {
    async fn post_with_headers(
        &self,
        url: &str,
        body: String,
        headers: &[(&str, &str)],
        timeout: Duration,
    ) -> Result<Vec<u8>, ProviderError> {
        trace!(url = url, bytes = body.len(), "HTTP POST request starting");

        let mut request = self.client.post(url).timeout(timeout).body(body);
        for (name, value) in headers {
            request = request.header(*name, *value);
        }

        let response = match request.send().await {
            Ok(resp) => {
                debug!(
                    url = url,
                    status = resp.status().as_u16(),
                    "HTTP response received"
                );
                resp
            }
            Err(e) => {
                warn!(
                    url = url,
                    error = %e,
                    is_connect = e.is_connect(),
                    is_timeout = e.is_timeout(),
                    "HTTP request failed"
                );
                return Err(ProviderError::HttpError(format!("Request failed: {}", e)));
            }
        };

        if !response.status().is_success() {
            warn!(
                url = url,
                status = response.status().as_u16(),
                "HTTP error status"
            );
            return Err(ProviderError::HttpStatus {
                status: response.status().as_u16(),
                url: url.to_string(),
            });
        }

        response
            .bytes()
            .await
            .map(|b| b.to_vec())
            .map_err(|e| ProviderError::HttpError(format!("Failed to read response: {}", e)))
    }
}
