use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use std::time::Duration;

use wiremock::{MockServer, Request, Respond, ResponseTemplate};
use zendesk_api::client::{PaginationConfig, RetryConfig};
use zendesk_api::{ClientConfig, Credentials, ZendeskClient};

/// Route test logs through `RUST_LOG`. Safe to call from every test.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Client with short backoffs so retry paths stay fast.
pub fn zendesk(server: &MockServer) -> ZendeskClient {
    init_tracing();
    let config = ClientConfig::builder()
        .with_retry(
            RetryConfig::default()
                .with_initial_delay(Duration::from_millis(5))
                .with_max_delay(Duration::from_millis(20))
                .with_max_retry_after(Duration::from_millis(10)),
        )
        .with_pagination(PaginationConfig::default().with_page_size(2))
        .build();
    ZendeskClient::with_config(
        server.uri(),
        Credentials::api_token("agent@example.com", "e2e-token"),
        config,
    )
    .unwrap()
}

/// Replies with each template in turn, then repeats the last.
pub struct Scripted {
    pub calls: Arc<AtomicU32>,
    pub responses: Vec<ResponseTemplate>,
}

impl Scripted {
    pub fn new(responses: Vec<ResponseTemplate>) -> (Self, Arc<AtomicU32>) {
        let calls = Arc::new(AtomicU32::new(0));
        (
            Self {
                calls: calls.clone(),
                responses,
            },
            calls,
        )
    }
}

impl Respond for Scripted {
    fn respond(&self, _request: &Request) -> ResponseTemplate {
        let n = self.calls.fetch_add(1, Ordering::SeqCst) as usize;
        self.responses[n.min(self.responses.len() - 1)].clone()
    }
}
