use std::sync::atomic::Ordering;

use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::common::{zendesk, Scripted};

#[tokio::test]
async fn test_list_recovers_from_rate_limit_mid_walk() {
    let server = MockServer::start().await;
    let base = server.uri();

    Mock::given(method("GET"))
        .and(path("/organizations"))
        .and(query_param("per_page", "2"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "organizations": [{"id": 3}],
            "next_page": null,
            "count": 3,
        })))
        .expect(1)
        .mount(&server)
        .await;

    let (first_page, calls) = Scripted::new(vec![
        ResponseTemplate::new(429)
            .insert_header("Retry-After", "30")
            .insert_header("X-Rate-Limit", "700")
            .insert_header("X-Rate-Limit-Remaining", "0"),
        ResponseTemplate::new(200).set_body_json(json!({
            "organizations": [{"id": 1}, {"id": 2}],
            "next_page": format!("{base}/organizations?page=2&per_page=2"),
            "count": 3,
        })),
    ]);
    Mock::given(method("GET"))
        .and(path("/organizations"))
        .and(query_param("per_page", "2"))
        .respond_with(first_page)
        .up_to_n_times(2)
        .mount(&server)
        .await;

    let all = zendesk(&server).organizations().list().await.unwrap();

    assert_eq!(all.len(), 3);
    assert_eq!(all.count, Some(3));
    assert_eq!(all.pages, 2);
    assert_eq!(calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_persistent_rate_limit_surfaces_unchanged() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/organizations/1"))
        .respond_with(ResponseTemplate::new(429).insert_header("Retry-After", "5"))
        .expect(3)
        .mount(&server)
        .await;

    let err = zendesk(&server).organizations().show(1).await.unwrap_err();
    assert!(err.is_rate_limited());
    assert_eq!(err.status(), Some(429));
}
