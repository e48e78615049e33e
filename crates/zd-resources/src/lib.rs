//! # zd-resources
//!
//! Declarative Zendesk Support API resource wrappers.
//!
//! Each wrapper method names the path segments and verb of one endpoint and
//! returns what the core [`ResourceClient`] produces. Rate limiting, retries
//! and pagination all happen in the core.
//!
//! ## Example
//!
//! ```rust,ignore
//! use zendesk_resources::{Credentials, ZendeskClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), zendesk_resources::Error> {
//!     let zendesk = ZendeskClient::for_subdomain(
//!         "acme",
//!         Credentials::api_token("agent@acme.com", "token"),
//!     )?;
//!
//!     let all = zendesk.organizations().list().await?;
//!     println!("{} organizations", all.len());
//!
//!     let job = zendesk.organizations().destroy_many(&[1, 2, 3]).await?;
//!     let status = zendesk.job_statuses().show(&job.id).await?;
//!     println!("job {} is {:?}", status.id, status.status);
//!
//!     Ok(())
//! }
//! ```

mod error;
mod job_statuses;
mod organizations;

pub use error::{Error, ErrorKind, Result};
pub use job_statuses::JobStatuses;
pub use organizations::Organizations;

// Re-export core types that users need to build and read calls
pub use zendesk_client::{
    AggregatedResult, CancelToken, ClientConfig, ClientConfigBuilder, Credentials, JobState,
    JobStatus, ResourceClient, ResponseEnvelope,
};

/// Entry point that hands out resource wrappers over one shared client.
#[derive(Debug, Clone)]
pub struct ZendeskClient {
    client: ResourceClient,
}

impl ZendeskClient {
    /// Create a client for the given API base URL.
    pub fn new(base_url: impl Into<String>, credentials: Credentials) -> Result<Self> {
        Ok(Self::from_client(ResourceClient::new(base_url, credentials)?))
    }

    /// Create a client for `https://{subdomain}.zendesk.com/api/v2`.
    pub fn for_subdomain(subdomain: &str, credentials: Credentials) -> Result<Self> {
        Ok(Self::from_client(ResourceClient::for_subdomain(
            subdomain,
            credentials,
        )?))
    }

    /// Create a client with custom configuration.
    pub fn with_config(
        base_url: impl Into<String>,
        credentials: Credentials,
        config: ClientConfig,
    ) -> Result<Self> {
        Ok(Self::from_client(ResourceClient::with_config(
            base_url,
            credentials,
            config,
        )?))
    }

    pub fn from_client(client: ResourceClient) -> Self {
        Self { client }
    }

    /// Get the underlying ResourceClient.
    pub fn inner(&self) -> &ResourceClient {
        &self.client
    }

    pub fn organizations(&self) -> Organizations {
        Organizations::new(self.client.clone())
    }

    pub fn job_statuses(&self) -> JobStatuses {
        JobStatuses::new(self.client.clone())
    }
}

/// Reject an empty id list before it reaches the wire.
pub(crate) fn require_ids<T>(ids: &[T], what: &str) -> Result<()> {
    if ids.is_empty() {
        return Err(Error::new(ErrorKind::InvalidArgument(format!(
            "{what} must not be empty"
        ))));
    }
    Ok(())
}
