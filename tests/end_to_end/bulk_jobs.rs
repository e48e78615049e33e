use std::sync::atomic::Ordering;

use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};
use zendesk_api::client::JobState;

use crate::common::{zendesk, Scripted};

fn job(status: &str, results: serde_json::Value) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "job_status": {"id": "job-1", "status": status, "total": 3, "results": results}
    }))
}

#[tokio::test]
async fn test_destroy_many_then_poll_until_complete() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/organizations/destroy_many"))
        .and(query_param("ids", "1,2,3"))
        .respond_with(job("queued", json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let (polls, calls) = Scripted::new(vec![
        job("working", json!([])),
        job(
            "completed",
            json!([
                {"id": 1, "action": "delete", "success": true},
                {"id": 2, "action": "delete", "success": true},
                {"id": 3, "action": "delete", "success": false, "error": "OrganizationNotFound"}
            ]),
        ),
    ]);
    Mock::given(method("GET"))
        .and(path("/job_statuses/job-1"))
        .respond_with(polls)
        .mount(&server)
        .await;

    let zendesk = zendesk(&server);
    let queued = zendesk.organizations().destroy_many(&[1, 2, 3]).await.unwrap();
    assert_eq!(queued.status, JobState::Queued);

    let jobs = zendesk.job_statuses();
    let mut status = jobs.show(&queued.id).await.unwrap();
    while !status.is_terminal() {
        status = jobs.show(&queued.id).await.unwrap();
    }

    assert_eq!(status.status, JobState::Completed);
    assert_eq!(calls.load(Ordering::SeqCst), 2);
    let failed: Vec<_> = status.failures().filter_map(|r| r.id).collect();
    assert_eq!(failed, vec![3]);
}
