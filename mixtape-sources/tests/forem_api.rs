mod common;

use common::{init_test_tracing, received};
use mixtape_pipeline::traits::{ArticleSource, CommentSource};
use mixtape_sources::ForemApi;
use mixtape_sources::forem::ArticleFeed;
use serde_json::json;
use std::time::Duration;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn forem(server: &MockServer) -> ForemApi {
    ForemApi::new(&server.uri())
        .unwrap()
        .with_rate_limit_delay(Duration::from_millis(10))
}

fn forest() -> serde_json::Value {
    json!([
        {
            "body_html": "<p>https://open.spotify.com/track/abc</p>",
            "children": [{ "body_html": "<p>reply</p>", "children": [] }]
        }
    ])
}

#[tokio::test]
async fn comments_retry_once_after_rate_limit() {
    init_test_tracing();
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/comments"))
        .and(query_param("a_id", "42"))
        .respond_with(ResponseTemplate::new(429))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/comments"))
        .and(query_param("a_id", "42"))
        .respond_with(ResponseTemplate::new(200).set_body_json(forest()))
        .mount(&server)
        .await;

    let tree = forem(&server).fetch_comment_tree(42).await;
    assert_eq!(tree.len(), 1);
    assert_eq!(tree[0].children.len(), 1);
    assert_eq!(received(&server).await, 2);
}

#[tokio::test]
async fn comments_rate_limited_twice_yield_empty_forest() {
    init_test_tracing();
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/comments"))
        .respond_with(ResponseTemplate::new(429))
        .expect(2)
        .mount(&server)
        .await;

    let tree = forem(&server).fetch_comment_tree(7).await;
    assert!(tree.is_empty());
}

#[tokio::test]
async fn comments_server_error_is_not_retried() {
    init_test_tracing();
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/comments"))
        .respond_with(ResponseTemplate::new(503))
        .expect(1)
        .mount(&server)
        .await;

    assert!(forem(&server).fetch_comment_tree(7).await.is_empty());
}

#[tokio::test]
async fn undecodable_comments_yield_empty_forest() {
    init_test_tracing();
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/comments"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    assert!(forem(&server).fetch_comment_tree(7).await.is_empty());
}

#[tokio::test]
async fn articles_are_filtered_by_feed_and_truncated() {
    init_test_tracing();
    let server = MockServer::start().await;
    let articles: Vec<_> = (1..=12)
        .map(|id| json!({ "id": id, "title": format!("Music Monday #{id}") }))
        .collect();
    Mock::given(method("GET"))
        .and(path("/api/articles"))
        .and(query_param("username", "someone"))
        .and(query_param("tag", "jams"))
        .respond_with(ResponseTemplate::new(200).set_body_json(articles))
        .expect(1)
        .mount(&server)
        .await;

    let api = forem(&server).with_feed(ArticleFeed {
        username: "someone".into(),
        tag: "jams".into(),
    });
    let got = api.fetch_articles(10).await.unwrap();
    assert_eq!(got.len(), 10);
    assert_eq!(got[0].id, 1);
    assert_eq!(got[9].title.as_deref(), Some("Music Monday #10"));
}

#[tokio::test]
async fn article_listing_failure_is_an_error() {
    init_test_tracing();
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/articles"))
        .respond_with(ResponseTemplate::new(500).set_body_string("down"))
        .expect(1)
        .mount(&server)
        .await;

    let err = forem(&server).fetch_articles(10).await.unwrap_err();
    assert!(err.to_string().contains("forem articles"));
}
