//! Resource client: the `get` / `get_all` / `post` / `put` / `delete` façade.
//!
//! Every resource wrapper holds a clone of one `ResourceClient` and describes
//! its calls as segment sequences. This is the single place where non-2xx
//! responses become [`Error`](crate::Error)s.
//!
//! ## Security
//!
//! - Credentials are redacted in Debug output
//! - Request bodies are skipped in tracing spans

use serde::Serialize;
use tracing::{debug, instrument};

use crate::auth::Credentials;
use crate::config::ClientConfig;
use crate::error::Result;
use crate::pagination::{AggregatedResult, CancelToken, PageWalker};
use crate::path::{EndpointPath, Segment};
use crate::request::{RequestDescriptor, RequestMethod, RequestOptions};
use crate::response::ResponseEnvelope;
use crate::transport::Transport;

/// High-level Zendesk API client.
///
/// Cloning is cheap: clones share the connection pool and the read-only
/// configuration, so independent calls can run concurrently.
///
/// # Example
///
/// ```rust,ignore
/// use zendesk_client::{Credentials, QueryParams, ResourceClient, Segment};
///
/// let client = ResourceClient::for_subdomain("acme", Credentials::bearer(token))?;
///
/// // Single fetch
/// let org = client.get(vec![Segment::from("organizations"), Segment::from(42u64)]).await?;
///
/// // Every page of a collection
/// let all = client.get_all(vec![Segment::from("organizations")], "organizations").await?;
///
/// // Bulk delete
/// let job = client
///     .delete(vec![
///         Segment::from("organizations"),
///         Segment::from("destroy_many"),
///         Segment::from(QueryParams::new().with("ids", vec![1u64, 2, 3])),
///     ])
///     .await?;
/// ```
#[derive(Debug, Clone)]
pub struct ResourceClient {
    transport: Transport,
}

impl ResourceClient {
    /// Create a client for the given API base URL.
    pub fn new(base_url: impl Into<String>, credentials: Credentials) -> Result<Self> {
        Self::with_config(base_url, credentials, ClientConfig::default())
    }

    /// Create a client for a hosted account (`https://{subdomain}.zendesk.com/api/v2`).
    pub fn for_subdomain(subdomain: &str, credentials: Credentials) -> Result<Self> {
        Self::new(crate::subdomain_url(subdomain), credentials)
    }

    /// Create a client with custom configuration.
    pub fn with_config(
        base_url: impl Into<String>,
        credentials: Credentials,
        config: ClientConfig,
    ) -> Result<Self> {
        Ok(Self {
            transport: Transport::new(base_url, credentials, config)?,
        })
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &str {
        self.transport.base_url()
    }

    /// Get the client configuration.
    pub fn config(&self) -> &ClientConfig {
        self.transport.config()
    }

    // =========================================================================
    // Single requests
    // =========================================================================

    /// GET one response. Paginated payloads are returned as-is.
    pub async fn get(&self, segments: impl IntoIterator<Item = Segment>) -> Result<ResponseEnvelope> {
        self.request(RequestMethod::Get, segments, None::<&()>, RequestOptions::default())
            .await
    }

    /// GET with per-call options.
    pub async fn get_with_options(
        &self,
        segments: impl IntoIterator<Item = Segment>,
        options: RequestOptions,
    ) -> Result<ResponseEnvelope> {
        self.request(RequestMethod::Get, segments, None::<&()>, options)
            .await
    }

    /// POST a JSON body: create, upsert and `create_many` style calls.
    pub async fn post<B: Serialize + ?Sized>(
        &self,
        segments: impl IntoIterator<Item = Segment>,
        body: &B,
    ) -> Result<ResponseEnvelope> {
        self.request(RequestMethod::Post, segments, Some(body), RequestOptions::default())
            .await
    }

    /// PUT a JSON body: update and `update_many` style calls.
    pub async fn put<B: Serialize + ?Sized>(
        &self,
        segments: impl IntoIterator<Item = Segment>,
        body: &B,
    ) -> Result<ResponseEnvelope> {
        self.request(RequestMethod::Put, segments, Some(body), RequestOptions::default())
            .await
    }

    /// DELETE: single deletes and `destroy_many`.
    pub async fn delete(
        &self,
        segments: impl IntoIterator<Item = Segment>,
    ) -> Result<ResponseEnvelope> {
        self.request(RequestMethod::Delete, segments, None::<&()>, RequestOptions::default())
            .await
    }

    /// Build, send and classify one logical request.
    #[instrument(skip_all, fields(method = ?method))]
    pub async fn request<B: Serialize + ?Sized>(
        &self,
        method: RequestMethod,
        segments: impl IntoIterator<Item = Segment>,
        body: Option<&B>,
        options: RequestOptions,
    ) -> Result<ResponseEnvelope> {
        let path = EndpointPath::new(segments).resolve()?;
        let mut request = RequestDescriptor::new(method, path).with_options(options);
        if let Some(body) = body {
            request = request.with_json(body)?;
        }

        let envelope = self.transport.execute(&request, None).await?;
        if self.config().enable_tracing {
            debug!(path = %request.path(), status = envelope.status, "Request complete");
        }
        envelope.classify()
    }

    // =========================================================================
    // Paginated requests
    // =========================================================================

    /// GET every page of a collection and concatenate each page's `key` array.
    pub async fn get_all(
        &self,
        segments: impl IntoIterator<Item = Segment>,
        key: &str,
    ) -> Result<AggregatedResult> {
        self.get_all_with_options(segments, key, RequestOptions::default(), None)
            .await
    }

    /// Like [`get_all`](Self::get_all), stopping early once `cancel` fires.
    ///
    /// A cancelled walk returns the pages gathered so far with `cancelled` set.
    pub async fn get_all_with_cancel(
        &self,
        segments: impl IntoIterator<Item = Segment>,
        key: &str,
        cancel: &CancelToken,
    ) -> Result<AggregatedResult> {
        self.get_all_with_options(segments, key, RequestOptions::default(), Some(cancel))
            .await
    }

    /// Paginated GET with per-call options and an optional cancellation signal.
    #[instrument(skip(self, segments, options, cancel))]
    pub async fn get_all_with_options(
        &self,
        segments: impl IntoIterator<Item = Segment>,
        key: &str,
        options: RequestOptions,
        cancel: Option<&CancelToken>,
    ) -> Result<AggregatedResult> {
        let first = EndpointPath::new(segments).resolve()?;
        let walker = PageWalker {
            transport: &self.transport,
            config: &self.config().pagination,
            key,
        };
        walker.walk(first, options, cancel).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::path::QueryParams;
    use crate::retry::RetryConfig;
    use std::time::Duration;
    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client(server: &MockServer) -> ResourceClient {
        ResourceClient::with_config(
            server.uri(),
            Credentials::api_token("agent@example.com", "abc123"),
            ClientConfig::builder()
                .with_retry(
                    RetryConfig::default()
                        .with_initial_delay(Duration::from_millis(5))
                        .with_max_retry_after(Duration::from_millis(20)),
                )
                .build(),
        )
        .unwrap()
    }

    #[test]
    fn test_subdomain_url() {
        let client = ResourceClient::for_subdomain("acme", Credentials::bearer("t")).unwrap();
        assert_eq!(client.base_url(), "https://acme.zendesk.com/api/v2");
    }

    #[test]
    fn test_debug_redacts_credentials() {
        let client = ResourceClient::new(
            "https://acme.zendesk.com/api/v2",
            Credentials::bearer("super-secret"),
        )
        .unwrap();
        let debug = format!("{:?}", client);
        assert!(!debug.contains("super-secret"));
        assert!(debug.contains("[REDACTED]"));
    }

    #[tokio::test]
    async fn test_get_single() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/organizations/42"))
            .and(header(
                "Authorization",
                Credentials::api_token("agent@example.com", "abc123")
                    .authorization_header()
                    .as_str(),
            ))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({"organization": {"id": 42}})),
            )
            .mount(&server)
            .await;

        let env = client(&server)
            .get(vec![Segment::from("organizations"), Segment::from(42u64)])
            .await
            .unwrap();
        assert_eq!(env.body["organization"]["id"], 42);
    }

    #[tokio::test]
    async fn test_get_does_not_follow_pages() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/organizations"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "organizations": [{"id": 1}],
                "next_page": format!("{}/organizations?page=2", server.uri()),
            })))
            .expect(1)
            .mount(&server)
            .await;

        let env = client(&server).get(vec![Segment::from("organizations")]).await.unwrap();
        assert_eq!(env.body["organizations"].as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_delete_many_path() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/organizations/destroy_many"))
            .and(query_param("ids", "1,2,3"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "job_status": {"id": "j1", "status": "queued"}
            })))
            .expect(1)
            .mount(&server)
            .await;

        let env = client(&server)
            .delete(vec![
                Segment::from("organizations"),
                Segment::from("destroy_many"),
                Segment::from(QueryParams::new().with("ids", vec![1u64, 2, 3])),
            ])
            .await
            .unwrap();
        assert_eq!(env.body["job_status"]["status"], "queued");

        let requests = server.received_requests().await.unwrap();
        assert_eq!(requests[0].url.path(), "/organizations/destroy_many");
        assert_eq!(requests[0].url.query(), Some("ids=1,2,3"));
    }

    #[tokio::test]
    async fn test_no_content_is_empty_result() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/organizations/5"))
            .respond_with(ResponseTemplate::new(204))
            .mount(&server)
            .await;

        let env = client(&server)
            .delete(vec![Segment::from("organizations"), Segment::from(5u64)])
            .await
            .unwrap();
        assert_eq!(env.status, 204);
        assert!(env.is_empty());
    }

    #[tokio::test]
    async fn test_put_validation_error() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/organizations/5"))
            .respond_with(ResponseTemplate::new(422).set_body_json(serde_json::json!({
                "error": "RecordInvalid",
                "description": "Record validation errors",
                "details": {"name": [{"description": "Name: is already taken"}]}
            })))
            .mount(&server)
            .await;

        let err = client(&server)
            .put(
                vec![Segment::from("organizations"), Segment::from(5u64)],
                &serde_json::json!({"organization": {"name": "Taken"}}),
            )
            .await
            .unwrap_err();
        match err.kind {
            ErrorKind::Validation { details, .. } => {
                assert_eq!(details["name"], vec!["Name: is already taken".to_string()]);
            }
            other => panic!("unexpected kind: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_invalid_path_sends_nothing() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let err = client(&server)
            .get(vec![
                Segment::from(QueryParams::new().with("page", 1u64)),
                Segment::from("organizations"),
            ])
            .await
            .unwrap_err();
        assert!(matches!(err.kind, ErrorKind::InvalidPath(_)));
    }

    #[tokio::test]
    async fn test_post_create_or_update() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/organizations/create_or_update"))
            .respond_with(
                ResponseTemplate::new(201)
                    .set_body_json(serde_json::json!({"organization": {"id": 9, "name": "Acme"}})),
            )
            .mount(&server)
            .await;

        let env = client(&server)
            .post(
                vec![Segment::from("organizations"), Segment::from("create_or_update")],
                &serde_json::json!({"organization": {"name": "Acme"}}),
            )
            .await
            .unwrap();
        assert_eq!(env.status, 201);
    }
}
