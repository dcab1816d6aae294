//! Rate-limited request executor
//!
//! Every response is checked for a `retry-after` directive. When present the
//! executor pauses for that long, whatever the status. Only a 429 triggers a
//! re-issue of the same request; any other status is handed back to the caller.

use super::rate_limit::RateLimitSignal;
use super::pacing::Pacer;
use super::transport::{HttpRequest, HttpResponse, ReqwestTransport, Transport};
use crate::config::ClientConfig;
use crate::error::{Error, Result};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, AUTHORIZATION};
use reqwest::Method;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use tracing::{debug, warn};

/// HTTP client that honours the server's rate limit headers
pub struct RateLimitedClient<T = ReqwestTransport> {
    transport: T,
    config: Arc<ClientConfig>,
    headers: HeaderMap,
    pacer: Option<Pacer>,
}

impl RateLimitedClient<ReqwestTransport> {
    /// Create a client backed by reqwest
    pub fn new(config: Arc<ClientConfig>) -> Result<Self> {
        let transport = ReqwestTransport::new(&config)?;
        Self::with_transport(config, transport)
    }
}

impl<T: Transport> RateLimitedClient<T> {
    /// Create a client over a custom transport
    pub fn with_transport(config: Arc<ClientConfig>, transport: T) -> Result<Self> {
        let headers = build_headers(&config)?;
        let pacer = config.throttle.as_ref().map(Pacer::new);

        Ok(Self {
            transport,
            config,
            headers,
            pacer,
        })
    }

    /// Shared configuration
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Get the underlying transport
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Issue one logical request, waiting and retrying as the server directs
    ///
    /// Returns the first response that is not a 429. Transport failures are
    /// returned immediately and never retried.
    pub async fn execute(&self, method: Method, url: &str) -> Result<HttpResponse> {
        let url = self.config.resolve_url(url)?;
        let mut rate_limited = 0u32;

        debug!("Request: {} {}", method, url);

        loop {
            if let Some(ref pacer) = self.pacer {
                pacer.ready().await;
            }

            let response = self
                .transport
                .send(HttpRequest {
                    method: method.clone(),
                    url: url.clone(),
                    headers: self.headers.clone(),
                })
                .await?;

            let signal = RateLimitSignal::from_headers(&response.headers);
            let retry = response.is_rate_limited();

            if retry {
                if let Some(max) = self.config.max_rate_limit_retries {
                    if rate_limited >= max {
                        return Err(Error::RateLimited {
                            retry_after_seconds: signal.retry_after_seconds.unwrap_or(0),
                        });
                    }
                }
            }

            pause(&signal, &url).await;

            if !retry {
                debug!(
                    "Response {} for {} {}",
                    response.status.as_u16(),
                    method,
                    url
                );
                return Ok(response);
            }

            rate_limited += 1;
            debug!("Rate limited (429) on {}, attempt {}", url, rate_limited);
        }
    }

    /// Make a GET request
    pub async fn get(&self, url: &str) -> Result<HttpResponse> {
        self.execute(Method::GET, url).await
    }

    /// GET a single resource and return its raw body
    pub async fn get_bytes(&self, url: &str) -> Result<bytes::Bytes> {
        let response = self.get(url).await?.error_for_status()?;
        Ok(response.body)
    }

    /// GET a single resource and parse it as JSON
    pub async fn get_json<D: DeserializeOwned>(&self, url: &str) -> Result<D> {
        self.get(url).await?.error_for_status()?.json()
    }
}

impl<T> std::fmt::Debug for RateLimitedClient<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RateLimitedClient")
            .field("config", &self.config)
            .field("pacer", &self.pacer)
            .finish_non_exhaustive()
    }
}

/// Sleep for the server-requested interval, if any
async fn pause(signal: &RateLimitSignal, url: &str) {
    let Some(delay) = signal.wait_duration() else {
        return;
    };

    if let Some(cause) = signal.cause() {
        warn!("{}, waiting {:?} before continuing ({})", cause, delay, url);
    }
    tokio::time::sleep(delay).await;
}

/// Authorization and default headers attached to every request
fn build_headers(config: &ClientConfig) -> Result<HeaderMap> {
    let mut headers = HeaderMap::new();

    let mut auth = HeaderValue::from_str(&config.authorization())
        .map_err(|_| Error::config("api_key contains characters not allowed in a header"))?;
    auth.set_sensitive(true);
    headers.insert(AUTHORIZATION, auth);

    for (key, value) in &config.default_headers {
        let name = HeaderName::from_bytes(key.as_bytes())
            .map_err(|_| Error::config(format!("Invalid header name: {key}")))?;
        let value = HeaderValue::from_str(value)
            .map_err(|_| Error::config(format!("Invalid value for header {key}")))?;
        headers.insert(name, value);
    }

    Ok(headers)
}
