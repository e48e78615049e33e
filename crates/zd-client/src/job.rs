//! Job status records returned by bulk operations.
//!
//! Bulk calls (`create_many`, `update_many`, `destroy_many`, ...) answer with a
//! queued job. The client does not poll; callers fetch `job_statuses/{id}`
//! with [`ResourceClient::get`](crate::ResourceClient::get) until the state
//! is terminal.

use serde::{Deserialize, Serialize};

use crate::error::{Error, ErrorKind, Result};
use crate::response::ResponseEnvelope;

/// Background job states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobState {
    Queued,
    Working,
    Completed,
    Failed,
    Killed,
}

impl JobState {
    /// Check if job is in a terminal state.
    pub fn is_terminal(&self) -> bool {
        matches!(self, JobState::Completed | JobState::Failed | JobState::Killed)
    }

    /// Check if job completed successfully.
    pub fn is_success(&self) -> bool {
        matches!(self, JobState::Completed)
    }
}

/// A bulk job and, once complete, its per-item results.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobStatus {
    pub id: String,
    pub status: JobState,
    pub url: Option<String>,
    pub total: Option<u64>,
    pub progress: Option<u64>,
    pub message: Option<String>,
    #[serde(default)]
    pub results: Vec<JobResult>,
}

/// Outcome for one item of a bulk job.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobResult {
    pub id: Option<u64>,
    pub index: Option<u64>,
    pub external_id: Option<String>,
    pub action: Option<String>,
    pub status: Option<String>,
    pub success: Option<bool>,
    pub error: Option<String>,
    pub details: Option<String>,
}

impl JobStatus {
    /// Decode the `job_status` object of a bulk response or a status poll.
    pub fn from_envelope(envelope: &ResponseEnvelope) -> Result<Self> {
        let record = envelope.body.get("job_status").ok_or_else(|| {
            Error::new(ErrorKind::Json(
                "response has no `job_status` object".to_string(),
            ))
        })?;
        Ok(serde_json::from_value(record.clone())?)
    }

    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }

    /// Items reported as failed.
    pub fn failures(&self) -> impl Iterator<Item = &JobResult> {
        self.results
            .iter()
            .filter(|r| r.success == Some(false) || r.error.is_some())
    }
}
