//! Error types for zd-client.

use std::collections::BTreeMap;
use std::time::Duration;

/// Result type alias for zd-client operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for zd-client operations.
#[derive(Debug, thiserror::Error)]
#[error("{kind}")]
pub struct Error {
    pub kind: ErrorKind,
    /// Lower-level cause, when there is one.
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl Error {
    pub fn new(kind: ErrorKind) -> Self {
        Self { kind, source: None }
    }

    pub fn with_source(
        kind: ErrorKind,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            kind,
            source: Some(Box::new(source)),
        }
    }

    /// Shorthand for an `InvalidPath` error.
    pub fn invalid_path(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidPath(message.into()))
    }

    /// Shorthand for a `Pagination` error.
    pub fn pagination(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Pagination(message.into()))
    }

    /// Still rate limited once the retry budget was spent.
    pub fn is_rate_limited(&self) -> bool {
        matches!(self.kind, ErrorKind::RateLimitExceeded { .. })
    }

    /// 401 only; a 403 means the credentials worked.
    pub fn is_auth_error(&self) -> bool {
        matches!(self.kind, ErrorKind::Authentication(_))
    }

    /// Returns true if no HTTP response was obtained.
    pub fn is_network(&self) -> bool {
        matches!(self.kind, ErrorKind::Network(_))
    }

    /// Returns the HTTP status behind this error, when there was one.
    pub fn status(&self) -> Option<u16> {
        match &self.kind {
            ErrorKind::Authentication(_) => Some(401),
            ErrorKind::Authorization(_) => Some(403),
            ErrorKind::NotFound(_) => Some(404),
            ErrorKind::Conflict(_) => Some(409),
            ErrorKind::Validation { .. } => Some(422),
            ErrorKind::RateLimitExceeded { .. } => Some(429),
            ErrorKind::Server { status, .. } | ErrorKind::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Server wait hint carried by a rate-limit error.
    pub fn retry_after(&self) -> Option<Duration> {
        match &self.kind {
            ErrorKind::RateLimitExceeded { retry_after } => *retry_after,
            _ => None,
        }
    }
}

/// What went wrong. Status-driven kinds come from [`ResponseEnvelope::classify`](crate::ResponseEnvelope::classify).
#[derive(Debug, thiserror::Error)]
pub enum ErrorKind {
    /// Malformed path segment sequence.
    #[error("Invalid path: {0}")]
    InvalidPath(String),

    /// No HTTP response was obtained (DNS, connection reset, timeout).
    #[error("Network error: {0}")]
    Network(String),

    /// 401: credentials rejected.
    #[error("Authentication error: {0}")]
    Authentication(String),

    /// 403: credentials valid but lacking permission.
    #[error("Authorization error: {0}")]
    Authorization(String),

    /// 404.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Record validation failed (HTTP 422).
    #[error("Validation error: {message}")]
    Validation {
        message: String,
        /// Field name to the descriptions reported for it.
        details: BTreeMap<String, Vec<String>>,
    },

    /// Conflicting write (HTTP 409).
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Rate limit still in effect after the retry budget was spent (HTTP 429).
    #[error("Rate limit exceeded{}", retry_after.map(|d| format!(", retry after {:?}", d)).unwrap_or_default())]
    RateLimitExceeded { retry_after: Option<Duration> },

    /// Server error (HTTP 5xx) not resolved by retry.
    #[error("Server error: {status} {message}")]
    Server { status: u16, message: String },

    /// Malformed page during a paginated fetch.
    #[error("Pagination error: {0}")]
    Pagination(String),

    /// Any other non-2xx response.
    #[error("HTTP error: {status} {message}")]
    Http { status: u16, message: String },

    /// A 2xx body or request payload that is not the expected JSON.
    #[error("JSON error: {0}")]
    Json(String),

    /// Unusable base URL, credentials or HTTP settings.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        let kind = if err.is_timeout() {
            ErrorKind::Network(format!("request timed out: {}", err))
        } else if err.is_builder() {
            ErrorKind::Config(err.to_string())
        } else if err.is_decode() {
            ErrorKind::Json(err.to_string())
        } else {
            ErrorKind::Network(err.to_string())
        };

        Error::with_source(kind, err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::with_source(ErrorKind::Json(err.to_string()), err)
    }
}

impl From<url::ParseError> for Error {
    fn from(err: url::ParseError) -> Self {
        Error::with_source(ErrorKind::Config(format!("Invalid URL: {}", err)), err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_is_rate_limited() {
        let err = Error::new(ErrorKind::RateLimitExceeded {
            retry_after: Some(Duration::from_secs(30)),
        });
        assert!(err.is_rate_limited());
        assert_eq!(err.retry_after(), Some(Duration::from_secs(30)));
        assert_eq!(err.status(), Some(429));

        let err = Error::new(ErrorKind::Network("reset".into()));
        assert!(!err.is_rate_limited());
        assert_eq!(err.retry_after(), None);
        assert_eq!(err.status(), None);
    }

    #[test]
    fn test_error_is_auth_error() {
        let err = Error::new(ErrorKind::Authentication("Couldn't authenticate you".into()));
        assert!(err.is_auth_error());

        let err = Error::new(ErrorKind::Authorization("forbidden".into()));
        assert!(!err.is_auth_error());
    }

    #[test]
    fn test_display() {
        let mut details = BTreeMap::new();
        details.insert("name".to_string(), vec!["Name: is already taken".to_string()]);
        let validation = Error::new(ErrorKind::Validation {
            message: "Record validation errors".into(),
            details,
        });
        assert_eq!(validation.to_string(), "Validation error: Record validation errors");
        assert_eq!(validation.status(), Some(422));

        let server = Error::new(ErrorKind::Server {
            status: 503,
            message: "Service Unavailable".into(),
        });
        assert_eq!(server.to_string(), "Server error: 503 Service Unavailable");

        let limited = Error::new(ErrorKind::RateLimitExceeded {
            retry_after: Some(Duration::from_secs(30)),
        });
        assert_eq!(limited.to_string(), "Rate limit exceeded, retry after 30s");
        assert_eq!(
            Error::new(ErrorKind::RateLimitExceeded { retry_after: None }).to_string(),
            "Rate limit exceeded"
        );

        assert_eq!(
            Error::invalid_path("empty identifier").to_string(),
            "Invalid path: empty identifier"
        );
        assert_eq!(
            Error::pagination("page 2 has no `organizations` array").to_string(),
            "Pagination error: page 2 has no `organizations` array"
        );
    }

    #[test]
    fn test_from_serde_json_error() {
        let err: Error = serde_json::from_str::<serde_json::Value>("{\"organization\":")
            .unwrap_err()
            .into();
        assert!(matches!(err.kind, ErrorKind::Json(_)));
        assert!(err.source.is_some());
    }

    #[test]
    fn test_from_url_parse_error() {
        let err: Error = url::Url::parse("acme.zendesk.com/api/v2").unwrap_err().into();
        assert!(matches!(err.kind, ErrorKind::Config(_)));
        assert!(err.to_string().starts_with("Configuration error: Invalid URL"));
    }
}
