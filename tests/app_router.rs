mod common;

use axum::http::StatusCode;
use axum_test::TestServer;
use serde_json::json;

fn setup(ctx: &common::TestContext) -> TestServer {
    TestServer::new(common::full_app(ctx.state.clone())).unwrap()
}

#[tokio::test]
async fn test_create_then_redirect_through_full_stack() {
    let ctx = common::create_test_context();
    let server = setup(&ctx);

    let created = server
        .post("/api/urls")
        .json(&json!({ "url": "https://www.google.com" }))
        .await;
    created.assert_status(StatusCode::CREATED);

    let code = created.json::<serde_json::Value>()["code"]
        .as_str()
        .unwrap()
        .to_string();

    let redirect = server.get(&format!("/{}", code)).await;
    redirect.assert_status(StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(redirect.header("location"), "https://www.google.com");

    let aliased = server.get(&format!("/url/{}", code)).await;
    aliased.assert_status(StatusCode::TEMPORARY_REDIRECT);

    let looked_up = server.get(&format!("/api/urls/{}", code)).await;
    looked_up.assert_status_ok();
    assert_eq!(
        looked_up.json::<serde_json::Value>()["url"],
        "https://www.google.com"
    );
}

#[tokio::test]
async fn test_trailing_slash_is_normalized() {
    let ctx = common::create_test_context();
    let server = setup(&ctx);

    server
        .post("/api/urls")
        .json(&json!({ "url": "https://example.com" }))
        .await
        .assert_status(StatusCode::CREATED);

    server
        .get("/1/")
        .await
        .assert_status(StatusCode::TEMPORARY_REDIRECT);
}

#[tokio::test]
async fn test_health_is_not_treated_as_code() {
    let ctx = common::create_test_context();
    let server = setup(&ctx);

    let response = server.get("/health").await;

    response.assert_status_ok();
    assert_eq!(response.json::<serde_json::Value>()["status"], "healthy");
}

#[tokio::test]
async fn test_listing_requires_token_but_creation_does_not() {
    let ctx = common::create_test_context();
    let server = setup(&ctx);

    server.get("/api/urls").await.assert_status_unauthorized();

    server
        .post("/api/urls")
        .json(&json!({ "url": "https://example.com" }))
        .await
        .assert_status(StatusCode::CREATED);
}

#[tokio::test]
async fn test_owned_creation_shows_up_in_listing() {
    let ctx = common::create_test_context();
    let alice = ctx.issue_token(1, "alice-token").await;
    let bob = ctx.issue_token(2, "bob-token").await;
    let server = setup(&ctx);

    for url in ["https://a.com", "https://b.com"] {
        server
            .post("/api/urls")
            .authorization_bearer(&alice)
            .json(&json!({ "url": url }))
            .await
            .assert_status(StatusCode::CREATED);
    }
    server
        .post("/api/urls")
        .authorization_bearer(&bob)
        .json(&json!({ "url": "https://c.com" }))
        .await
        .assert_status(StatusCode::CREATED);
    server
        .post("/api/urls")
        .json(&json!({ "url": "https://d.com" }))
        .await
        .assert_status(StatusCode::CREATED);

    let json = server
        .get("/api/urls")
        .authorization_bearer(&alice)
        .await
        .json::<serde_json::Value>();

    assert_eq!(json["total"], 2);
    assert_eq!(json["items"][0]["url"], "https://a.com");
    assert_eq!(json["items"][1]["url"], "https://b.com");

    let json = server
        .get("/api/urls")
        .authorization_bearer(&bob)
        .await
        .json::<serde_json::Value>();

    assert_eq!(json["total"], 1);
    assert_eq!(json["items"][0]["url"], "https://c.com");
}

#[tokio::test]
async fn test_rate_limiter_keys_on_peer_address() {
    let ctx = common::create_test_context();
    let server = setup(&ctx);

    let first = server.get("/api/urls").await;
    first.assert_status_unauthorized();

    let mut limited = false;
    for _ in 0..15 {
        if server.get("/api/urls").await.status_code() == StatusCode::TOO_MANY_REQUESTS {
            limited = true;
            break;
        }
    }

    assert!(limited);
}
