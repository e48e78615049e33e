//! # zendesk-api
//!
//! A Zendesk Support API client library for Rust.
//!
//! One shared core handles path construction, authentication, rate-limit
//! recovery and pagination; resource wrappers declare endpoints on top of it.
//!
//! ## Security
//!
//! - Credentials are redacted in Debug output
//! - Tracing skips credentials and request bodies
//! - Error messages taken from response bodies are sanitized
//!
//! ## Crates
//!
//! - **zendesk-client** - Core HTTP client: paths, transport, retry governor, pagination
//! - **zendesk-resources** - Resource wrappers: organizations, job statuses
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use zendesk_api::{Credentials, ZendeskClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let zendesk = ZendeskClient::for_subdomain(
//!         "acme",
//!         Credentials::api_token("agent@acme.com", "api-token"),
//!     )?;
//!
//!     let organizations = zendesk.organizations().list().await?;
//!     for org in &organizations.items {
//!         println!("{}", org["name"]);
//!     }
//!
//!     Ok(())
//! }
//! ```

#[cfg(feature = "client")]
pub use zendesk_client as client;
#[cfg(feature = "resources")]
pub use zendesk_resources as resources;

#[cfg(feature = "client")]
pub use zendesk_client::{ClientConfig, Credentials, ResourceClient};
#[cfg(feature = "resources")]
pub use zendesk_resources::{JobStatuses, Organizations, ZendeskClient};
