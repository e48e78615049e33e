//! HTTP transport: one physical exchange, plus the retry governor around it.

use bytes::Bytes;
use serde_json::Value;
use tracing::{debug, info, instrument, warn};

use crate::auth::Credentials;
use crate::config::ClientConfig;
use crate::error::{Error, ErrorKind, Result};
use crate::pagination::CancelToken;
use crate::path::ResolvedPath;
use crate::request::{RequestDescriptor, ResponseForm};
use crate::response::ResponseEnvelope;
use crate::retry::RetryPolicy;

/// HTTP transport bound to one base URL and one set of credentials.
#[derive(Clone)]
pub struct Transport {
    inner: reqwest::Client,
    config: ClientConfig,
    base_url: String,
    credentials: Credentials,
}

impl std::fmt::Debug for Transport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Transport")
            .field("base_url", &self.base_url)
            .field("credentials", &self.credentials)
            .finish_non_exhaustive()
    }
}

impl Transport {
    /// Create a transport for the given base URL (e.g. `https://acme.zendesk.com/api/v2`).
    pub fn new(
        base_url: impl Into<String>,
        credentials: Credentials,
        config: ClientConfig,
    ) -> Result<Self> {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        url::Url::parse(&base_url)?;

        if !credentials.is_valid() {
            return Err(Error::new(ErrorKind::Config(
                "credentials must not be empty".to_string(),
            )));
        }

        let inner = config.http.build_client()?;

        Ok(Self {
            inner,
            config,
            base_url,
            credentials,
        })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Full URL for a resolved path. Absolute paths are used as-is.
    pub fn url_for(&self, path: &ResolvedPath) -> Result<String> {
        let url = if path.is_absolute() {
            path.to_string()
        } else {
            format!("{}/{}", self.base_url, path)
        };
        url::Url::parse(&url)?;
        Ok(url)
    }

    /// Execute a request, retrying rate-limited and transient failures.
    ///
    /// When the attempt budget is spent, or `cancel` fires before a backoff
    /// sleep, the last response is returned unmodified for the caller to
    /// classify.
    #[instrument(skip(self, request, cancel), fields(method = ?request.method(), path = %request.path()))]
    pub async fn execute(
        &self,
        request: &RequestDescriptor,
        cancel: Option<&CancelToken>,
    ) -> Result<ResponseEnvelope> {
        let Some(retry) = self.config.retry.clone() else {
            return self.send_once(request).await;
        };
        let mut policy = RetryPolicy::new(retry);

        loop {
            let envelope = self.send_once(request).await?;
            policy.record_attempt();

            if !policy.config().is_retryable_status(envelope.status) {
                return Ok(envelope);
            }

            let Some(delay) = policy.next_delay(envelope.retry_hint()) else {
                warn!(
                    attempts = policy.attempts(),
                    status = envelope.status,
                    "Retry budget exhausted"
                );
                return Ok(envelope);
            };

            if cancel.is_some_and(CancelToken::is_cancelled) {
                debug!(attempts = policy.attempts(), "Cancelled before retry");
                return Ok(envelope);
            }

            warn!(
                attempt = policy.attempts(),
                status = envelope.status,
                delay_ms = delay.as_millis(),
                "Request failed, retrying"
            );
            tokio::time::sleep(delay).await;
        }
    }

    /// Perform exactly one HTTP exchange.
    async fn send_once(&self, request: &RequestDescriptor) -> Result<ResponseEnvelope> {
        let url = self.url_for(request.path())?;

        let mut req = self
            .inner
            .request(request.method().to_reqwest(), &url)
            .header("Authorization", self.credentials.authorization_header())
            .header("Accept", "application/json");

        for (name, value) in &request.options().headers {
            req = req.header(name.as_str(), value.as_str());
        }

        if let Some(body) = request.body() {
            req = req.json(body);
        }

        if self.config.enable_tracing {
            debug!(method = ?request.method(), url = %url, "Sending request");
        }

        let response = req.send().await?;
        let status = response.status().as_u16();
        let headers = response.headers().clone();
        let raw: Bytes = response.bytes().await?;

        if self.config.enable_tracing {
            if (200..300).contains(&status) {
                debug!(status, content_length = raw.len(), "Response received");
            } else {
                info!(status, content_length = raw.len(), "Non-success response");
            }
        }

        let body = decode_body(status, &raw, request.options().form)?;
        Ok(ResponseEnvelope::new(status, headers, body))
    }
}

/// Empty bodies decode to `Null`. Undecodable JSON is a fault only on 2xx.
fn decode_body(status: u16, raw: &[u8], form: ResponseForm) -> Result<Value> {
    if raw.iter().all(u8::is_ascii_whitespace) {
        return Ok(Value::Null);
    }
    let text = || Value::String(String::from_utf8_lossy(raw).into_owned());

    match form {
        ResponseForm::Text => Ok(text()),
        ResponseForm::Json => match serde_json::from_slice(raw) {
            Ok(value) => Ok(value),
            Err(err) if (200..300).contains(&status) => Err(err.into()),
            Err(_) => Ok(text()),
        },
    }
}
