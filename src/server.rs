use crate::config::ProxyConfig;
use crate::logging::SharedLogger;
use crate::models::{list_models, ModelList};
use crate::proxy;
use crate::translate::openai_types::{ChatCompletionRequest, ChatErrorResponse};

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use bytes::Bytes;
use chrono::Utc;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub const SERVICE_NAME: &str = "oneminai-proxy";

#[derive(Clone)]
pub struct AppState {
    pub config: ProxyConfig,
    pub client: reqwest::Client,
    pub logger: SharedLogger,
    /// Unix timestamp stamped on listed models.
    pub started_at: i64,
}

impl AppState {
    pub fn new(config: ProxyConfig, client: reqwest::Client, logger: SharedLogger) -> Self {
        Self {
            config,
            client,
            logger,
            started_at: Utc::now().timestamp(),
        }
    }
}

pub fn build_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(handle_root))
        .route("/health", get(handle_health))
        .route("/v1/models", get(handle_models))
        .route("/v1/chat/completions", post(handle_chat_completions))
        .route("/chat/completions", post(handle_chat_completions))
        .fallback(handle_not_found)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn handle_chat_completions(State(state): State<Arc<AppState>>, body: Bytes) -> Response {
    let req: ChatCompletionRequest = match serde_json::from_slice(&body) {
        Ok(r) => r,
        Err(e) => {
            state
                .logger
                .error("server", format!("Failed to parse request: {}", e));
            let err = ChatErrorResponse::invalid_request(format!("Invalid request body: {}", e));
            return (StatusCode::BAD_REQUEST, Json(err)).into_response();
        }
    };

    if req.messages.is_empty() {
        state.logger.warn("server", "Rejected request with no messages");
        let err = ChatErrorResponse::invalid_request("Messages array is required");
        return (StatusCode::BAD_REQUEST, Json(err)).into_response();
    }

    if req.stream.unwrap_or(false) {
        state
            .logger
            .warn("server", "Streaming is not supported, answering in one body");
    }

    state.logger.info(
        "server",
        format!(
            "Request: model={} messages={}",
            req.model,
            req.messages.len()
        ),
    );

    let resp = proxy::complete(&req, &state.config, &state.client, &state.logger).await;
    Json(resp).into_response()
}

async fn handle_models(State(state): State<Arc<AppState>>) -> Json<ModelList> {
    Json(list_models(&state.config, state.started_at))
}

async fn handle_health() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "healthy",
        "timestamp": Utc::now().to_rfc3339(),
        "service": SERVICE_NAME,
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

async fn handle_root() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "service": SERVICE_NAME,
        "version": env!("CARGO_PKG_VERSION"),
        "status": "running",
        "endpoints": {
            "health": "/health",
            "chat_completions": "/v1/chat/completions",
            "models": "/v1/models",
        },
    }))
}

async fn handle_not_found() -> (StatusCode, Json<serde_json::Value>) {
    (
        StatusCode::NOT_FOUND,
        Json(serde_json::json!({ "error": "Not Found" })),
    )
}
