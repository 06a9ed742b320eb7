use crate::e2e::helpers;

use helpers::{TestContext, TestOptions};
use hyper::StatusCode;
use test_context::test_context;

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_return_ok_for_health_check(ctx: &TestContext) {
    let response = ctx.client.get("/health").await.unwrap();

    response.assert_status(StatusCode::OK);

    // Health endpoint returns plain text
    let body = String::from_utf8(response.body_bytes.clone()).unwrap();
    assert_eq!(body, "OK");
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_return_ready_status(ctx: &TestContext) {
    let response = ctx.client.get("/health/ready").await.unwrap();

    response.assert_status(StatusCode::OK);

    let body = response.body.as_ref().unwrap();
    assert_eq!(body.get("status").and_then(|v| v.as_str()), Some("ready"));
    assert_eq!(body.get("synthesis").and_then(|v| v.as_str()), Some("configured"));
    assert_eq!(body.get("storage").and_then(|v| v.as_str()), Some("configured"));
    assert_eq!(body.get("database").and_then(|v| v.as_str()), Some("not_configured"));
}

#[tokio::test]
async fn it_should_not_be_ready_without_api_key() {
    let ctx = TestContext::with_options(TestOptions {
        api_key: None,
        ..Default::default()
    })
    .await
    .unwrap();

    let response = ctx.client.get("/health/ready").await.unwrap();

    response.assert_status(StatusCode::SERVICE_UNAVAILABLE);
    let body = response.body.as_ref().unwrap();
    assert_eq!(body.get("status").and_then(|v| v.as_str()), Some("not_ready"));
    assert_eq!(body.get("synthesis").and_then(|v| v.as_str()), Some("not_configured"));
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_include_request_id_in_responses(ctx: &TestContext) {
    let response = ctx.client.get("/health").await.unwrap();
    response.assert_header_exists("x-request-id");

    let response = ctx.client.get("/api/voices").await.unwrap();
    response.assert_header_exists("x-request-id");

    // Preflight is answered by the CORS layer without reaching the router
    let response = ctx
        .client
        .options(
            "/api/speech",
            &[
                ("origin", "https://app.example.com"),
                ("access-control-request-method", "POST"),
            ],
        )
        .await
        .unwrap();
    response.assert_status(StatusCode::OK);
    response.assert_header_exists("x-request-id");
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_echo_caller_request_id(ctx: &TestContext) {
    let request_id = "2f1c8a9e-6b1d-4c7e-9a55-0d3c2b1a4f60";

    let response = ctx
        .client
        .request(hyper::Method::GET, "/health", None, &[("x-request-id", request_id)])
        .await
        .unwrap();

    assert_eq!(response.header("x-request-id").map(String::as_str), Some(request_id));
}
