//! Axum router for the HTTP tool surface.
//! Routes: `GET /health`, `GET /tools/list`, `POST /tools/call`.

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::json;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::debug;

use vectool_protocol::http::{
    HealthResponse, ToolCallRequest, ToolCallResponse, ToolDescriptor, ToolsListResponse,
};
use vectool_runtime::Dispatcher;

/// Shared state threaded through all axum handlers.
#[derive(Clone)]
pub struct AppState {
    /// The tool dispatcher.
    pub dispatcher: Arc<Dispatcher>,
}

/// Builds the axum `Router` with all routes, request tracing and optional CORS.
///
/// CORS is the outermost layer so preflights are answered before routing.
pub fn build_router(state: AppState, cors: Option<CorsLayer>) -> Router {
    let router = Router::new()
        .route("/health", get(handle_health))
        .route("/tools/list", get(handle_tools_list))
        .route("/tools/call", post(handle_tools_call))
        .fallback(handle_not_found)
        .with_state(state)
        .layer(TraceLayer::new_for_http());
    match cors {
        Some(cors) => router.layer(cors),
        None => router,
    }
}

async fn handle_health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

async fn handle_tools_list(State(state): State<AppState>) -> Json<ToolsListResponse> {
    let tools = state
        .dispatcher
        .registry()
        .list()
        .into_iter()
        .map(|tool| ToolDescriptor {
            name: tool.name().to_string(),
            description: tool.description().to_string(),
            input_schema: tool.input_schema().clone(),
        })
        .collect();
    Json(ToolsListResponse { tools })
}

/// Business failures are `200` with `error` and `kind`; only a body that is
/// not a call request gets `400`.
async fn handle_tools_call(State(state): State<AppState>, body: String) -> Response {
    let request: ToolCallRequest = match serde_json::from_str(&body) {
        Ok(r) => r,
        Err(e) => {
            debug!(error = %e, "rejecting malformed call body");
            return (
                StatusCode::BAD_REQUEST,
                Json(json!({"error": format!("invalid request body: {e}")})),
            )
                .into_response();
        }
    };

    let response = match state.dispatcher.invoke(&request.name, request.arguments).await {
        Ok(result) => ToolCallResponse::success(result),
        Err(e) => ToolCallResponse::failure(e.kind.as_str(), e.message),
    };
    (StatusCode::OK, Json(response)).into_response()
}

async fn handle_not_found() -> Response {
    (StatusCode::NOT_FOUND, Json(json!({"error": "not found"}))).into_response()
}
