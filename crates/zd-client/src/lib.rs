//! # zd-client
//!
//! Core HTTP client infrastructure for the Zendesk Support API.
//!
//! This crate provides the shared orchestration core every resource wrapper
//! delegates to:
//! - Path building from literal, identifier and query-parameter segments
//! - Basic, API-token and Bearer authentication
//! - Rate limit handling driven by `Retry-After` / reset headers
//! - Bounded retry of transient server errors
//! - Pagination across offset, URL and cursor based endpoints
//! - Classification of error responses
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    Resource wrappers                        │
//! │  (zd-resources: Organizations, JobStatuses, ...)            │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                   ResourceClient                            │
//! │  - get / get_all / post / put / delete                      │
//! │  - Classifies non-2xx responses into Error                  │
//! │  - Drives the pagination walker                             │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    Transport                                │
//! │  - One HTTP exchange with auth and JSON body                │
//! │  - Retry governor for 429 and transient 5xx                 │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```rust,ignore
//! use zendesk_client::{Credentials, ResourceClient, Segment};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), zendesk_client::Error> {
//!     let creds = Credentials::api_token("agent@example.com", "secret");
//!     let client = ResourceClient::for_subdomain("acme", creds)?;
//!
//!     let all = client
//!         .get_all(vec![Segment::from("organizations")], "organizations")
//!         .await?;
//!     println!("{} organizations", all.items.len());
//!
//!     let created = client
//!         .post(
//!             vec![Segment::from("organizations")],
//!             &serde_json::json!({"organization": {"name": "Acme"}}),
//!         )
//!         .await?;
//!     println!("{}", created.body["organization"]["id"]);
//!
//!     Ok(())
//! }
//! ```

mod auth;
mod client;
mod config;
mod error;
mod job;
mod pagination;
mod path;
mod request;
mod response;
mod retry;
mod transport;

pub use auth::Credentials;
pub use client::ResourceClient;
pub use config::{ClientConfig, ClientConfigBuilder, HttpConfig, PaginationConfig};
pub use error::{Error, ErrorKind, Result};
pub use job::{JobResult, JobState, JobStatus};
pub use pagination::{AggregatedResult, CancelToken, Cursor};
pub use path::{EndpointPath, Identifier, QueryParams, QueryValue, ResolvedPath, Segment};
pub use request::{RequestDescriptor, RequestMethod, RequestOptions, ResponseForm};
pub use response::{RateLimitInfo, ResponseEnvelope};
pub use retry::{BackoffStrategy, RetryConfig, RetryPolicy};
pub use transport::Transport;

/// User-Agent string for the client
pub const USER_AGENT: &str = concat!("zendesk-api-rs/", env!("CARGO_PKG_VERSION"));

/// Base URL template for hosted Zendesk accounts.
pub fn subdomain_url(subdomain: &str) -> String {
    format!("https://{}.zendesk.com/api/v2", subdomain)
}
