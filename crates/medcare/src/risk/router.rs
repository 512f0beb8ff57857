use std::collections::BTreeMap;
use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use serde_json::json;

use super::domain::{AssessmentId, PatientForm};
use super::repository::{HistoryError, HistoryRecord, HistoryRepository};
use super::service::{RiskAssessmentService, RiskServiceError};

const DEFAULT_HISTORY_LIMIT: usize = 20;

/// Router builder exposing HTTP endpoints for scoring and history lookups.
pub fn risk_router<R>(service: Arc<RiskAssessmentService<R>>) -> Router
where
    R: HistoryRepository + 'static,
{
    Router::new()
        .route("/api/v1/risk/assessments", post(assess_handler::<R>))
        .route(
            "/api/v1/risk/assessments/:assessment_id",
            get(assessment_handler::<R>),
        )
        .route("/api/v1/risk/history", get(history_handler::<R>))
        .route("/api/v1/risk/models", get(models_handler::<R>))
        .with_state(service)
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct HistoryQuery {
    #[serde(default)]
    pub(crate) limit: Option<usize>,
}

pub(crate) async fn assess_handler<R>(
    State(service): State<Arc<RiskAssessmentService<R>>>,
    axum::Json(form): axum::Json<PatientForm>,
) -> Response
where
    R: HistoryRepository + 'static,
{
    match service.assess(form) {
        Ok(receipt) => (StatusCode::CREATED, axum::Json(receipt)).into_response(),
        Err(RiskServiceError::Validation(error)) => {
            let field_errors: BTreeMap<_, _> = error
                .field_messages()
                .into_iter()
                .map(|message| (message.field.wire_name(), message.message))
                .collect();
            let payload = json!({
                "error": error.to_string(),
                "missingFields": error.missing,
                "fieldErrors": field_errors,
            });
            (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(payload)).into_response()
        }
        Err(other) => internal_error(other),
    }
}

pub(crate) async fn assessment_handler<R>(
    State(service): State<Arc<RiskAssessmentService<R>>>,
    Path(assessment_id): Path<String>,
) -> Response
where
    R: HistoryRepository + 'static,
{
    let id = AssessmentId(assessment_id);
    match service.get(&id) {
        Ok(record) => (StatusCode::OK, axum::Json(record)).into_response(),
        Err(RiskServiceError::History(HistoryError::NotFound)) => {
            let payload = json!({
                "assessmentId": id.0,
                "error": "assessment not found",
            });
            (StatusCode::NOT_FOUND, axum::Json(payload)).into_response()
        }
        Err(other) => internal_error(other),
    }
}

pub(crate) async fn history_handler<R>(
    State(service): State<Arc<RiskAssessmentService<R>>>,
    Query(query): Query<HistoryQuery>,
) -> Response
where
    R: HistoryRepository + 'static,
{
    let limit = query.limit.unwrap_or(DEFAULT_HISTORY_LIMIT);
    match service.history(limit) {
        Ok(records) => {
            let entries: Vec<_> = records.iter().map(HistoryRecord::summary_view).collect();
            let payload = json!({
                "count": entries.len(),
                "entries": entries,
            });
            (StatusCode::OK, axum::Json(payload)).into_response()
        }
        Err(other) => internal_error(other),
    }
}

pub(crate) async fn models_handler<R>(
    State(service): State<Arc<RiskAssessmentService<R>>>,
) -> Response
where
    R: HistoryRepository + 'static,
{
    (StatusCode::OK, axum::Json(service.models())).into_response()
}

fn internal_error(error: RiskServiceError) -> Response {
    let payload = json!({
        "error": error.to_string(),
    });
    (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
}
