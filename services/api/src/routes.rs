use crate::infra::AppState;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use medcare::error::AppError;
use medcare::risk::{
    risk_router, BatchAssessor, BatchReport, HistoryRepository, ModelSelection,
    RiskAssessmentService, RiskLevel,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::io::Cursor;
use std::sync::Arc;
use tracing::info;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct BatchRequest {
    pub(crate) csv: String,
    #[serde(default)]
    pub(crate) selected_model: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct BatchResponse {
    pub(crate) requested_model: String,
    pub(crate) assessed: usize,
    pub(crate) rejected: usize,
    pub(crate) high_risk: usize,
    pub(crate) medium_risk: usize,
    pub(crate) low_risk: usize,
    #[serde(flatten)]
    pub(crate) report: BatchReport,
}

pub(crate) fn with_risk_routes<R>(service: Arc<RiskAssessmentService<R>>) -> axum::Router
where
    R: HistoryRepository + 'static,
{
    risk_router(service)
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
        .route("/api/v1/risk/batch", axum::routing::post(batch_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

pub(crate) async fn batch_endpoint(
    Extension(state): Extension<AppState>,
    Json(payload): Json<BatchRequest>,
) -> Result<Json<BatchResponse>, AppError> {
    let BatchRequest {
        csv,
        selected_model,
    } = payload;

    let selection = ModelSelection::resolve(
        selected_model.as_deref(),
        state.engine.config().default_model,
    );
    let report = BatchAssessor::new(&state.engine, selection.clone())
        .assess_reader(Cursor::new(csv.into_bytes()))?;

    let response = BatchResponse {
        requested_model: selection.requested().to_string(),
        assessed: report.assessed().count(),
        rejected: report.rejected_count(),
        high_risk: report.level_count(RiskLevel::High),
        medium_risk: report.level_count(RiskLevel::Medium),
        low_risk: report.level_count(RiskLevel::Low),
        report,
    };
    info!(
        assessed = response.assessed,
        rejected = response.rejected,
        model = %response.requested_model,
        "scored patient batch"
    );

    Ok(Json(response))
}
