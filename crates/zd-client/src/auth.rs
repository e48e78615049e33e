//! Authentication schemes.
//!
//! Exactly one scheme is active per client; `Debug` output redacts secrets.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

/// Credentials for the Zendesk API.
#[derive(Clone)]
pub enum Credentials {
    /// `Authorization: Basic base64(email:password)`.
    Basic { email: String, password: String },
    /// `Authorization: Basic base64(email/token:token)`.
    ApiToken { email: String, token: String },
    /// `Authorization: Bearer token` (OAuth access token).
    Bearer(String),
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Credentials::Basic { email, .. } => f
                .debug_struct("Basic")
                .field("email", email)
                .field("password", &"[REDACTED]")
                .finish(),
            Credentials::ApiToken { email, .. } => f
                .debug_struct("ApiToken")
                .field("email", email)
                .field("token", &"[REDACTED]")
                .finish(),
            Credentials::Bearer(_) => f.debug_tuple("Bearer").field(&"[REDACTED]").finish(),
        }
    }
}

impl Credentials {
    pub fn basic(email: impl Into<String>, password: impl Into<String>) -> Self {
        Credentials::Basic {
            email: email.into(),
            password: password.into(),
        }
    }

    pub fn api_token(email: impl Into<String>, token: impl Into<String>) -> Self {
        Credentials::ApiToken {
            email: email.into(),
            token: token.into(),
        }
    }

    pub fn bearer(token: impl Into<String>) -> Self {
        Credentials::Bearer(token.into())
    }

    /// Returns true if the credentials appear to be usable (non-empty).
    pub fn is_valid(&self) -> bool {
        match self {
            Credentials::Basic { email, password } => !email.is_empty() && !password.is_empty(),
            Credentials::ApiToken { email, token } => !email.is_empty() && !token.is_empty(),
            Credentials::Bearer(token) => !token.is_empty(),
        }
    }

    /// The `Authorization` header value for this scheme.
    pub fn authorization_header(&self) -> String {
        match self {
            Credentials::Basic { email, password } => {
                format!("Basic {}", STANDARD.encode(format!("{}:{}", email, password)))
            }
            Credentials::ApiToken { email, token } => {
                format!("Basic {}", STANDARD.encode(format!("{}/token:{}", email, token)))
            }
            Credentials::Bearer(token) => format!("Bearer {}", token),
        }
    }
}
