//! Organizations endpoints.
//!
//! Every method is a declaration of segments and verb delegated to the core
//! [`ResourceClient`]. Collection reads walk every page; bulk writes answer
//! with a queued [`JobStatus`](zendesk_client::JobStatus).

use zendesk_client::ResourceClient;

mod bulk;
mod read;
mod write;

/// Primary array field of organization collection pages.
const COLLECTION_KEY: &str = "organizations";

/// Organizations API wrapper.
///
/// # Example
///
/// ```rust,ignore
/// use zendesk_resources::Organizations;
///
/// let organizations = Organizations::new(client.clone());
///
/// let acme = organizations.show(42).await?;
/// let everything = organizations.list().await?;
/// let job = organizations.destroy_many(&[1, 2, 3]).await?;
/// ```
#[derive(Debug, Clone)]
pub struct Organizations {
    client: ResourceClient,
}

impl Organizations {
    pub fn new(client: ResourceClient) -> Self {
        Self { client }
    }

    /// Get the underlying ResourceClient.
    pub fn client(&self) -> &ResourceClient {
        &self.client
    }
}
