//! Client configuration, fixed at construction.
//!
//! ```rust,ignore
//! let config = ClientConfig::builder()
//!     .with_retry(RetryConfig::default().with_max_attempts(5))
//!     .with_page_size(100)
//!     .with_timeout(Duration::from_secs(60))
//!     .build();
//! ```

use std::time::Duration;

use crate::error::{Error, ErrorKind, Result};
use crate::retry::RetryConfig;

/// Everything a [`ResourceClient`](crate::ResourceClient) needs besides its
/// base URL and credentials.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Connection-level settings for the underlying `reqwest::Client`.
    pub http: HttpConfig,
    /// `None` sends every request exactly once.
    pub retry: Option<RetryConfig>,
    pub pagination: PaginationConfig,
    /// Emit per-exchange `debug!` events. Retry warnings are always logged.
    pub enable_tracing: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            http: HttpConfig::default(),
            retry: Some(RetryConfig::default()),
            pagination: PaginationConfig::default(),
            enable_tracing: true,
        }
    }
}

impl ClientConfig {
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder {
            config: ClientConfig::default(),
        }
    }
}

/// Connection pool, timeout and header settings.
#[derive(Debug, Clone)]
pub struct HttpConfig {
    /// Whole-request deadline, body included.
    pub timeout: Duration,
    pub connect_timeout: Duration,
    pub pool_idle_timeout: Duration,
    pub pool_max_idle_per_host: usize,
    pub user_agent: String,
    /// Advertise gzip/deflate and decode compressed bodies.
    pub compression: bool,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(10),
            pool_idle_timeout: Duration::from_secs(90),
            pool_max_idle_per_host: 10,
            user_agent: crate::USER_AGENT.to_string(),
            compression: true,
        }
    }
}

impl HttpConfig {
    /// Build the pooled HTTP client these settings describe.
    pub(crate) fn build_client(&self) -> Result<reqwest::Client> {
        reqwest::Client::builder()
            .timeout(self.timeout)
            .connect_timeout(self.connect_timeout)
            .pool_idle_timeout(self.pool_idle_timeout)
            .pool_max_idle_per_host(self.pool_max_idle_per_host)
            .user_agent(&self.user_agent)
            .gzip(self.compression)
            .deflate(self.compression)
            .build()
            .map_err(|e| Error::with_source(ErrorKind::Config(e.to_string()), e))
    }
}

/// Fluent construction of a [`ClientConfig`], starting from the defaults.
#[derive(Debug)]
pub struct ClientConfigBuilder {
    config: ClientConfig,
}

impl ClientConfigBuilder {
    pub fn with_retry(mut self, retry: RetryConfig) -> Self {
        self.config.retry = Some(retry);
        self
    }

    pub fn without_retry(mut self) -> Self {
        self.config.retry = None;
        self
    }

    pub fn with_pagination(mut self, pagination: PaginationConfig) -> Self {
        self.config.pagination = pagination;
        self
    }

    /// Shorthand for `pagination.page_size`.
    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.config.pagination.page_size = Some(page_size);
        self
    }

    pub fn with_http(mut self, http: HttpConfig) -> Self {
        self.config.http = http;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.config.http.timeout = timeout;
        self
    }

    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.config.http.connect_timeout = timeout;
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.config.http.user_agent = user_agent.into();
        self
    }

    pub fn with_compression(mut self, enabled: bool) -> Self {
        self.config.http.compression = enabled;
        self
    }

    pub fn with_tracing(mut self, enabled: bool) -> Self {
        self.config.enable_tracing = enabled;
        self
    }

    pub fn build(self) -> ClientConfig {
        self.config
    }
}

/// Configuration for paginated fetches.
#[derive(Debug, Clone)]
pub struct PaginationConfig {
    /// `per_page` sent with the first request when the caller did not set one.
    pub page_size: Option<u32>,
    /// Hard ceiling on pages fetched by one call.
    pub max_pages: usize,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            page_size: None,
            max_pages: 10_000,
        }
    }
}

impl PaginationConfig {
    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = Some(page_size);
        self
    }

    pub fn with_max_pages(mut self, max_pages: usize) -> Self {
        self.max_pages = max_pages;
        self
    }
}
