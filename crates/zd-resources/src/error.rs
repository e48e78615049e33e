//! Error types for zd-resources.

/// Result type alias for zd-resources operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for zd-resources operations.
#[derive(Debug, thiserror::Error)]
#[error("{kind}")]
pub struct Error {
    pub kind: ErrorKind,
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl Error {
    pub fn new(kind: ErrorKind) -> Self {
        Self { kind, source: None }
    }

    /// The client error behind this one, untouched.
    pub fn client_error(&self) -> Option<&zendesk_client::Error> {
        match &self.kind {
            ErrorKind::Client(err) => Some(err),
            _ => None,
        }
    }

    /// Returns true if the server kept rate limiting after every retry.
    pub fn is_rate_limited(&self) -> bool {
        self.client_error().is_some_and(zendesk_client::Error::is_rate_limited)
    }

    /// Returns the HTTP status behind this error, when there was one.
    pub fn status(&self) -> Option<u16> {
        self.client_error().and_then(zendesk_client::Error::status)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ErrorKind {
    /// Anything the core client reported, kind preserved.
    #[error(transparent)]
    Client(zendesk_client::Error),

    /// A wrapper argument that cannot form a valid request.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

impl From<zendesk_client::Error> for Error {
    fn from(err: zendesk_client::Error) -> Self {
        Error::new(ErrorKind::Client(err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use zendesk_client::ErrorKind as ClientErrorKind;

    #[test]
    fn test_client_error_is_preserved() {
        let err: Error = zendesk_client::Error::new(ClientErrorKind::NotFound(
            "RecordNotFound".to_string(),
        ))
        .into();

        assert_eq!(err.status(), Some(404));
        assert!(matches!(
            err.client_error().map(|e| &e.kind),
            Some(ClientErrorKind::NotFound(_))
        ));
        assert_eq!(err.to_string(), "Not found: RecordNotFound");
    }

    #[test]
    fn test_rate_limited_passthrough() {
        let err: Error = zendesk_client::Error::new(ClientErrorKind::RateLimitExceeded {
            retry_after: None,
        })
        .into();
        assert!(err.is_rate_limited());
    }

    #[test]
    fn test_invalid_argument() {
        let err = Error::new(ErrorKind::InvalidArgument("ids must not be empty".into()));
        assert!(err.client_error().is_none());
        assert_eq!(err.status(), None);
        assert_eq!(err.to_string(), "Invalid argument: ids must not be empty");
    }
}
