//! Bulk organization writes. Each queues a background job.

use serde::Serialize;
use tracing::{debug, instrument};
use zendesk_client::{JobStatus, QueryParams, Segment};

use crate::error::Result;

impl super::Organizations {
    /// Create many organizations. `body` is the `{"organizations": [...]}` payload.
    #[instrument(skip(self, body))]
    pub async fn create_many<B: Serialize + ?Sized>(&self, body: &B) -> Result<JobStatus> {
        let envelope = self
            .client
            .post(
                vec![Segment::from("organizations"), Segment::from("create_many")],
                body,
            )
            .await?;
        let job = JobStatus::from_envelope(&envelope)?;
        debug!(job_id = %job.id, "Queued create_many");
        Ok(job)
    }

    /// Update many organizations, each identified by the `id` in its payload entry.
    #[instrument(skip(self, body))]
    pub async fn update_many<B: Serialize + ?Sized>(&self, body: &B) -> Result<JobStatus> {
        let envelope = self
            .client
            .put(
                vec![Segment::from("organizations"), Segment::from("update_many")],
                body,
            )
            .await?;
        let job = JobStatus::from_envelope(&envelope)?;
        debug!(job_id = %job.id, "Queued update_many");
        Ok(job)
    }

    /// Delete many organizations by id.
    #[instrument(skip(self))]
    pub async fn destroy_many(&self, organization_ids: &[u64]) -> Result<JobStatus> {
        crate::require_ids(organization_ids, "organization ids")?;
        let envelope = self
            .client
            .delete(vec![
                Segment::from("organizations"),
                Segment::from("destroy_many"),
                Segment::from(QueryParams::new().with("ids", organization_ids)),
            ])
            .await?;
        let job = JobStatus::from_envelope(&envelope)?;
        debug!(job_id = %job.id, count = organization_ids.len(), "Queued destroy_many");
        Ok(job)
    }
}
