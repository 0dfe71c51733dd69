//! Router tests driven through `tower::ServiceExt::oneshot`.

use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use http::{Method, Request, StatusCode};
use serde_json::{json, Value};
use tower::ServiceExt;

use vectool_config::CorsConfig;
use vectool_mcp::McpHandler;
use vectool_protocol::{JsonRpcRequest, RequestId};
use vectool_runtime::{build_registry, CatalogOptions, Dispatcher, RuntimeConfig};
use vectool_store_memory::{MemoryStore, MemoryStoreOptions};
use vectool_transport_http::{build_router, cors_layer, AppState};

fn dispatcher() -> Arc<Dispatcher> {
    let store = Arc::new(MemoryStore::with_options(MemoryStoreOptions {
        latency: Duration::ZERO,
        ..MemoryStoreOptions::default()
    }));
    let registry = build_registry(store, &CatalogOptions::default()).expect("registry");
    Arc::new(Dispatcher::new(registry, &RuntimeConfig::default()))
}

fn app(dispatcher: Arc<Dispatcher>) -> axum::Router {
    build_router(AppState { dispatcher }, None)
}

async fn send(router: axum::Router, req: Request<Body>) -> (StatusCode, Value) {
    let resp = router.oneshot(req).await.expect("response");
    let status = resp.status();
    let bytes = axum::body::to_bytes(resp.into_body(), 1024 * 1024)
        .await
        .expect("body");
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("json body")
    };
    (status, body)
}

fn call(body: impl Into<String>) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri("/tools/call")
        .header("content-type", "application/json")
        .body(Body::from(body.into()))
        .expect("request")
}

fn call_tool(name: &str, arguments: Value) -> Request<Body> {
    call(json!({"name": name, "arguments": arguments}).to_string())
}

#[tokio::test]
async fn health_reports_version() {
    let req = Request::get("/health").body(Body::empty()).expect("request");
    let (status, body) = send(app(dispatcher()), req).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
}

#[tokio::test]
async fn tools_list_is_sorted_catalog() {
    let req = Request::get("/tools/list").body(Body::empty()).expect("request");
    let (status, body) = send(app(dispatcher()), req).await;
    assert_eq!(status, StatusCode::OK);
    let names: Vec<&str> = body["tools"]
        .as_array()
        .expect("tools")
        .iter()
        .map(|t| t["name"].as_str().expect("name"))
        .collect();
    assert_eq!(names.len(), 13);
    let mut sorted = names.clone();
    sorted.sort_unstable();
    assert_eq!(names, sorted);
    assert!(names.contains(&"query"));
}

#[tokio::test]
async fn http_and_mcp_listings_agree() {
    let dispatcher = dispatcher();
    let req = Request::get("/tools/list").body(Body::empty()).expect("request");
    let (_, body) = send(app(Arc::clone(&dispatcher)), req).await;

    let mcp = McpHandler::new(dispatcher);
    let out = mcp
        .handle(JsonRpcRequest::new(RequestId::Number(1), "tools/list", None))
        .await;
    let mcp_tools = out.result().expect("result")["tools"].clone();

    let http_tools = body["tools"].as_array().expect("tools");
    let mcp_tools = mcp_tools.as_array().expect("tools");
    assert_eq!(http_tools.len(), mcp_tools.len());
    for (h, m) in http_tools.iter().zip(mcp_tools) {
        assert_eq!(h["name"], m["name"]);
        assert_eq!(h["description"], m["description"]);
        assert_eq!(h["input_schema"], m["inputSchema"]);
    }
}

#[tokio::test]
async fn docs_lifecycle_over_http() {
    let d = dispatcher();

    let (status, body) = send(
        app(Arc::clone(&d)),
        call_tool("create_collection", json!({"name": "Docs", "type": "text"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.get("error").is_none(), "unexpected error: {body}");

    let (_, body) = send(
        app(Arc::clone(&d)),
        call_tool(
            "insert_documents",
            json!({"collection": "Docs", "documents": [
                {"url": "https://a", "text": "alpha"},
                {"url": "https://b", "text": "beta"}
            ]}),
        ),
    )
    .await;
    assert_eq!(body["result"]["ids"].as_array().expect("ids").len(), 2);

    let (_, body) = send(
        app(Arc::clone(&d)),
        call_tool("query", json!({"collection": "Docs", "query": "alpha"})),
    )
    .await;
    let results = body["result"]["results"].as_array().expect("results");
    assert_eq!(results[0]["document"]["text"], "alpha");

    let (_, body) = send(
        app(Arc::clone(&d)),
        call_tool("delete_collection", json!({"name": "Docs"})),
    )
    .await;
    assert!(body.get("error").is_none());

    let (status, body) = send(app(d), call_tool("get_collection_info", json!({"collection": "Docs"}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["kind"], "not_found");
    assert!(body["error"].as_str().expect("error").contains("Docs"));
}

#[tokio::test]
async fn business_failures_are_ok_with_kind() {
    let d = dispatcher();
    let (status, body) = send(app(Arc::clone(&d)), call_tool("no_such_tool", json!({}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["kind"], "not_found");

    let (status, body) = send(app(d), call_tool("create_collection", json!({"name": ""}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["kind"], "invalid_argument");
    assert!(body.get("result").is_none());
}

#[tokio::test]
async fn missing_arguments_default_to_empty_object() {
    let (status, body) = send(app(dispatcher()), call(r#"{"name":"list_collections"}"#)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["result"], json!({"collections": []}));
}

#[tokio::test]
async fn malformed_body_is_bad_request() {
    let (status, body) = send(app(dispatcher()), call("{not json")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().is_some());

    let (status, _) = send(app(dispatcher()), call(r#"{"arguments":{}}"#)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn unknown_route_is_not_found() {
    let req = Request::get("/nope").body(Body::empty()).expect("request");
    let (status, body) = send(app(dispatcher()), req).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "not found");
}

#[tokio::test]
async fn wrong_method_is_rejected() {
    let req = Request::get("/tools/call").body(Body::empty()).expect("request");
    let resp = app(dispatcher()).oneshot(req).await.expect("response");
    assert_eq!(resp.status(), StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn preflight_answered_when_cors_configured() {
    let cors = cors_layer(&CorsConfig {
        allowed_origins: vec!["https://app.example.com".into()],
        ..CorsConfig::default()
    })
    .expect("cors");
    let router = build_router(AppState { dispatcher: dispatcher() }, cors);

    let req = Request::builder()
        .method(Method::OPTIONS)
        .uri("/tools/call")
        .header("origin", "https://app.example.com")
        .header("access-control-request-method", "POST")
        .body(Body::empty())
        .expect("request");
    let resp = router.oneshot(req).await.expect("response");
    assert!(resp.status().is_success());
    assert_eq!(
        resp.headers()
            .get("access-control-allow-origin")
            .expect("allow-origin"),
        "https://app.example.com"
    );
}

#[tokio::test]
async fn no_cors_headers_without_origins() {
    let req = Request::get("/health")
        .header("origin", "https://app.example.com")
        .body(Body::empty())
        .expect("request");
    let resp = app(dispatcher()).oneshot(req).await.expect("response");
    assert!(resp.headers().get("access-control-allow-origin").is_none());
}
