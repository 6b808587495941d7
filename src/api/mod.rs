use anyhow::{Context, Result};
use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Serialize;
use tower_http::cors::CorsLayer;

use crate::config::EffectiveConfig;
use crate::core::{AnalysisRequest, AnalysisResponse};
use crate::engine::Engine;
use crate::registry::{self, ModelsResponse};

pub const SERVICE_NAME: &str = "cryptoscope";

#[derive(Clone)]
pub struct AppState {
    pub engine: Engine,
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
    service: &'static str,
    version: &'static str,
}

#[derive(Debug, Serialize)]
struct ReadyResponse {
    status: &'static str,
    service: &'static str,
}

#[derive(Debug, Serialize)]
struct ErrorDetail {
    detail: &'static str,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .route("/ready", get(ready))
        .route("/v1/analyze", post(analyze))
        .route("/v1/train", post(train))
        .route("/v1/models", get(models))
        .with_state(state)
}

pub async fn serve(cfg: &EffectiveConfig, host: &str, port: u16) -> Result<()> {
    let state = AppState {
        engine: Engine::new(),
    };
    let mut app = router(state);
    if cfg.cors.allow_any_origin {
        app = app.layer(CorsLayer::permissive());
    }

    let listener = tokio::net::TcpListener::bind(format!("{host}:{port}"))
        .await
        .with_context(|| format!("{host}:{port} で待ち受けを開始できません"))?;
    tracing::info!("listening on http://{host}:{port}");
    axum::serve(listener, app).await?;
    Ok(())
}

async fn root() -> &'static str {
    "cryptoscope - crypto implementation risk analysis\n\nEndpoints:\n  GET  /health\n  GET  /ready\n  POST /v1/analyze\n  POST /v1/train\n  GET  /v1/models"
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        service: SERVICE_NAME,
        version: env!("CARGO_PKG_VERSION"),
    })
}

async fn ready() -> Json<ReadyResponse> {
    Json(ReadyResponse {
        status: "ready",
        service: SERVICE_NAME,
    })
}

async fn analyze(
    State(state): State<AppState>,
    Json(request): Json<AnalysisRequest>,
) -> Json<AnalysisResponse> {
    tracing::info!(
        analysis_type = %request.analysis_type,
        implementation_count = request.crypto_implementations.len(),
        "analysis request received"
    );

    let response = state.engine.analyze(&request);

    tracing::info!(
        total_analyzed = response.summary.total_analyzed,
        high_risk_count = response.summary.high_risk_count,
        anomalies_detected = response.summary.anomalies_detected,
        overall_risk_level = %response.summary.overall_risk_level,
        "analysis completed"
    );

    Json(response)
}

async fn train() -> (StatusCode, Json<ErrorDetail>) {
    (
        StatusCode::NOT_IMPLEMENTED,
        Json(ErrorDetail {
            detail: "Model training not yet implemented",
        }),
    )
}

async fn models() -> Json<ModelsResponse> {
    Json(registry::available_models())
}
