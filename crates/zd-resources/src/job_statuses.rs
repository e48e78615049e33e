//! Job status endpoints for polling bulk operations.

use serde_json::Value;
use tracing::instrument;
use zendesk_client::{AggregatedResult, JobStatus, QueryParams, ResourceClient, Segment};

use crate::error::{Error, ErrorKind, Result};

/// Job statuses API wrapper.
#[derive(Debug, Clone)]
pub struct JobStatuses {
    client: ResourceClient,
}

impl JobStatuses {
    pub fn new(client: ResourceClient) -> Self {
        Self { client }
    }

    /// Recent background jobs, raw records.
    #[instrument(skip(self))]
    pub async fn list(&self) -> Result<AggregatedResult> {
        Ok(self
            .client
            .get_all(vec![Segment::from("job_statuses")], "job_statuses")
            .await?)
    }

    /// Current state of one job.
    #[instrument(skip(self))]
    pub async fn show(&self, job_id: &str) -> Result<JobStatus> {
        let envelope = self
            .client
            .get(vec![Segment::from("job_statuses"), Segment::id(job_id)])
            .await?;
        Ok(JobStatus::from_envelope(&envelope)?)
    }

    #[instrument(skip(self))]
    pub async fn show_many(&self, job_ids: &[&str]) -> Result<Vec<JobStatus>> {
        crate::require_ids(job_ids, "job ids")?;
        let envelope = self
            .client
            .get(vec![
                Segment::from("job_statuses"),
                Segment::from("show_many"),
                Segment::from(QueryParams::new().with("ids", job_ids.to_vec())),
            ])
            .await?;

        match envelope.body.get("job_statuses") {
            Some(Value::Array(records)) => records
                .iter()
                .map(|record| {
                    serde_json::from_value(record.clone())
                        .map_err(|e| Error::from(zendesk_client::Error::from(e)))
                })
                .collect(),
            _ => Err(Error::new(ErrorKind::Client(zendesk_client::Error::new(
                zendesk_client::ErrorKind::Json(
                    "response has no `job_statuses` array".to_string(),
                ),
            )))),
        }
    }
}
