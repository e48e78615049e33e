//! Single-record organization writes.

use serde::Serialize;
use tracing::instrument;
use zendesk_client::{ResponseEnvelope, Segment};

use crate::error::Result;

impl super::Organizations {
    /// Create an organization. `body` is the `{"organization": {...}}` payload.
    #[instrument(skip(self, body))]
    pub async fn create<B: Serialize + ?Sized>(&self, body: &B) -> Result<ResponseEnvelope> {
        Ok(self
            .client
            .post(vec![Segment::from("organizations")], body)
            .await?)
    }

    /// Create, or update the organization matching the payload's `id` / `external_id`.
    #[instrument(skip(self, body))]
    pub async fn create_or_update<B: Serialize + ?Sized>(
        &self,
        body: &B,
    ) -> Result<ResponseEnvelope> {
        Ok(self
            .client
            .post(
                vec![Segment::from("organizations"), Segment::from("create_or_update")],
                body,
            )
            .await?)
    }

    #[instrument(skip(self, body))]
    pub async fn update<B: Serialize + ?Sized>(
        &self,
        organization_id: u64,
        body: &B,
    ) -> Result<ResponseEnvelope> {
        Ok(self
            .client
            .put(
                vec![Segment::from("organizations"), Segment::from(organization_id)],
                body,
            )
            .await?)
    }

    /// Delete one organization. Succeeds with an empty envelope on 204.
    #[instrument(skip(self))]
    pub async fn delete(&self, organization_id: u64) -> Result<ResponseEnvelope> {
        Ok(self
            .client
            .delete(vec![Segment::from("organizations"), Segment::from(organization_id)])
            .await?)
    }
}
