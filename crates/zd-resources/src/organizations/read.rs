//! Organization lookups and collection reads.

use tracing::instrument;
use zendesk_client::{AggregatedResult, CancelToken, QueryParams, ResponseEnvelope, Segment};

use super::COLLECTION_KEY;
use crate::error::Result;

impl super::Organizations {
    /// Every organization in the account.
    #[instrument(skip(self))]
    pub async fn list(&self) -> Result<AggregatedResult> {
        Ok(self
            .client
            .get_all(vec![Segment::from("organizations")], COLLECTION_KEY)
            .await?)
    }

    /// Like [`list`](Self::list), stopping at the next page boundary once `cancel` fires.
    #[instrument(skip(self, cancel))]
    pub async fn list_with_cancel(&self, cancel: &CancelToken) -> Result<AggregatedResult> {
        Ok(self
            .client
            .get_all_with_cancel(vec![Segment::from("organizations")], COLLECTION_KEY, cancel)
            .await?)
    }

    /// Organizations a user belongs to.
    #[instrument(skip(self))]
    pub async fn list_by_user(&self, user_id: u64) -> Result<AggregatedResult> {
        Ok(self
            .client
            .get_all(
                vec![
                    Segment::from("users"),
                    Segment::from(user_id),
                    Segment::from("organizations"),
                ],
                COLLECTION_KEY,
            )
            .await?)
    }

    #[instrument(skip(self))]
    pub async fn show(&self, organization_id: u64) -> Result<ResponseEnvelope> {
        Ok(self
            .client
            .get(vec![Segment::from("organizations"), Segment::from(organization_id)])
            .await?)
    }

    /// Several organizations by id in one call.
    #[instrument(skip(self))]
    pub async fn show_many(&self, organization_ids: &[u64]) -> Result<AggregatedResult> {
        crate::require_ids(organization_ids, "organization ids")?;
        Ok(self
            .client
            .get_all(
                vec![
                    Segment::from("organizations"),
                    Segment::from("show_many"),
                    Segment::from(QueryParams::new().with("ids", organization_ids)),
                ],
                COLLECTION_KEY,
            )
            .await?)
    }

    #[instrument(skip(self))]
    pub async fn show_many_by_external_ids(
        &self,
        external_ids: &[&str],
    ) -> Result<AggregatedResult> {
        crate::require_ids(external_ids, "external ids")?;
        Ok(self
            .client
            .get_all(
                vec![
                    Segment::from("organizations"),
                    Segment::from("show_many"),
                    Segment::from(QueryParams::new().with("external_ids", external_ids.to_vec())),
                ],
                COLLECTION_KEY,
            )
            .await?)
    }

    /// Ticket and user counts for an organization.
    #[instrument(skip(self))]
    pub async fn related(&self, organization_id: u64) -> Result<ResponseEnvelope> {
        Ok(self
            .client
            .get(vec![
                Segment::from("organizations"),
                Segment::from(organization_id),
                Segment::from("related"),
            ])
            .await?)
    }

    #[instrument(skip(self))]
    pub async fn search_by_external_id(&self, external_id: &str) -> Result<AggregatedResult> {
        Ok(self
            .client
            .get_all(
                vec![
                    Segment::from("organizations"),
                    Segment::from("search"),
                    Segment::from(QueryParams::new().with("external_id", external_id)),
                ],
                COLLECTION_KEY,
            )
            .await?)
    }

    /// Organizations whose name starts with `name`.
    #[instrument(skip(self))]
    pub async fn autocomplete(&self, name: &str) -> Result<AggregatedResult> {
        Ok(self
            .client
            .get_all(
                vec![
                    Segment::from("organizations"),
                    Segment::from("autocomplete"),
                    Segment::from(QueryParams::new().with("name", name)),
                ],
                COLLECTION_KEY,
            )
            .await?)
    }

    /// Incremental export of organizations changed since `start_time` (Unix seconds).
    ///
    /// Follows the export stream until the server reports `end_of_stream`.
    #[instrument(skip(self))]
    pub async fn incremental(&self, start_time: i64) -> Result<AggregatedResult> {
        Ok(self
            .client
            .get_all(
                vec![
                    Segment::from("incremental"),
                    Segment::from("organizations"),
                    Segment::from(QueryParams::new().with("start_time", start_time)),
                ],
                COLLECTION_KEY,
            )
            .await?)
    }
}
