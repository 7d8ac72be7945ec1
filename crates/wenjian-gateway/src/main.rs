//! Wenjian Gateway — HTTP front for the antique authentication responder.
//! Routes: `/` info, `/api/health`, `POST /api/chat`; everything else is a JSON 404.

use axum::{
    body::{Body, Bytes},
    extract::{ConnectInfo, State},
    http::{HeaderValue, Method, Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use std::any::Any as PanicPayload;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use wenjian_core::{ChatRequest, ChatResponse, ErrorKind, GatewayConfig, Responder};

#[derive(Clone)]
struct AppState {
    config: Arc<GatewayConfig>,
    responder: Arc<Responder>,
}

#[tokio::main]
async fn main() {
    if let Err(e) = dotenvy::dotenv() {
        eprintln!("[wenjian-gateway] .env not loaded: {} (using system environment)", e);
    }

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = match GatewayConfig::load() {
        Ok(c) => c,
        Err(e) => {
            tracing::error!("[WENJIAN SYSTEM] Configuration error: {}", e);
            std::process::exit(1);
        }
    };

    let responder = match config.build_responder() {
        Ok(r) => r,
        Err(e) => {
            tracing::error!("[WENJIAN SYSTEM] Knowledge base error: {}", e);
            std::process::exit(1);
        }
    };

    tracing::info!(
        "[WENJIAN SYSTEM] {} categories loaded, {} rules active.",
        responder.knowledge().len(),
        responder.rules().rules().len()
    );

    let addr = config.bind_addr();
    let app = build_app(AppState {
        config: Arc::new(config),
        responder: Arc::new(responder),
    });

    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(l) => l,
        Err(e) => {
            tracing::error!("[WENJIAN SYSTEM] Cannot bind {}: {}", addr, e);
            std::process::exit(1);
        }
    };
    tracing::info!("[WENJIAN SYSTEM] Listening on {}", addr);

    if let Err(e) = axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await
    {
        tracing::error!("[WENJIAN SYSTEM] Server error: {}", e);
        std::process::exit(1);
    }
}

fn build_app(state: AppState) -> Router {
    let origins = state.config.cors_origins.clone();

    let router = Router::new()
        .route("/", get(home))
        .route("/api/health", get(health))
        .route("/api/chat", post(chat))
        .fallback(not_found)
        .with_state(state);
    apply_layers(router, &origins)
}

/// Panic guard, CORS and request logging, outermost last.
fn apply_layers(router: Router, origins: &[String]) -> Router {
    router
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(cors_layer(origins))
        .layer(axum::middleware::from_fn(log_requests))
}

/// A handler panic becomes a JSON 500; the payload is logged, never returned.
fn panic_response(payload: Box<dyn PanicPayload + Send + 'static>) -> Response {
    let detail = payload
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| payload.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic");
    tracing::error!("[WENJIAN HTTP] Handler panicked: {}", detail);
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(serde_json::json!({
            "error": "服务器内部错误",
            "status": "error",
        })),
    )
        .into_response()
}

/// Empty origin list allows any origin.
fn cors_layer(origins: &[String]) -> CorsLayer {
    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|o| HeaderValue::from_str(o.trim()).ok())
        .collect();

    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(Any);

    if allowed.is_empty() {
        layer.allow_origin(Any)
    } else {
        layer.allow_origin(AllowOrigin::list(allowed))
    }
}

async fn log_requests(
    connect: Option<ConnectInfo<SocketAddr>>,
    request: Request<Body>,
    next: Next,
) -> Response {
    let peer = connect
        .map(|ConnectInfo(addr)| addr.to_string())
        .unwrap_or_else(|| "unknown".to_string());
    tracing::info!(
        "[WENJIAN HTTP] {} {} from {}",
        request.method(),
        request.uri().path(),
        peer
    );
    next.run(request).await
}

async fn home() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "message": "🎉 文鉴通助手后端API运行正常",
        "status": "success",
        "version": wenjian_core::version(),
        "service": "文物鉴定专业API",
    }))
}

async fn health(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "healthy",
        "service": state.config.service_name,
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "endpoints": {
            "chat": "/api/chat (POST)",
            "health": "/api/health (GET)",
        }
    }))
}

/// POST /api/chat: 400 for caller errors, 500 for internal failures, 200 otherwise.
async fn chat(State(state): State<AppState>, body: Bytes) -> (StatusCode, Json<ChatResponse>) {
    let request = match ChatRequest::from_json_slice(&body) {
        Ok(r) => r,
        Err(e) => {
            tracing::warn!("[WENJIAN HTTP] Rejected chat payload: {}", e);
            return (StatusCode::BAD_REQUEST, Json(ChatResponse::rejected(&e)));
        }
    };

    let (outcome, response) = state.responder.handle(&request);
    let code = match outcome.error {
        None => StatusCode::OK,
        Some(ErrorKind::Input) => StatusCode::BAD_REQUEST,
        Some(ErrorKind::Internal) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (code, Json(response))
}

async fn not_found() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(serde_json::json!({
            "error": "接口不存在",
            "status": "error",
        })),
    )
}
