use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::Utc;
use serde::Serialize;
use tracing::{debug, info, warn};

use super::domain::{AssessmentId, PatientForm, PatientId};
use super::evaluation::{EngineConfig, RiskEngine};
use super::models::{ModelId, ModelProfile, ModelSelection};
use super::repository::{HistoryError, HistoryRecord, HistoryRepository};
use super::validation::{plausibility_warnings, validate, PlausibilityWarning, ValidationError};

/// Service composing validation, the scoring engine, and prediction history.
pub struct RiskAssessmentService<R> {
    engine: Arc<RiskEngine>,
    history: Arc<R>,
}

static ASSESSMENT_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_assessment_id() -> AssessmentId {
    let id = ASSESSMENT_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    AssessmentId(format!("pred-{id:06}"))
}

impl<R> RiskAssessmentService<R>
where
    R: HistoryRepository + 'static,
{
    pub fn new(history: Arc<R>, config: EngineConfig) -> Self {
        Self::with_engine(Arc::new(RiskEngine::new(config)), history)
    }

    pub fn with_engine(engine: Arc<RiskEngine>, history: Arc<R>) -> Self {
        Self { engine, history }
    }

    pub fn engine(&self) -> &RiskEngine {
        &self.engine
    }

    /// Validate a submitted form, score it, and append the result to history.
    pub fn assess(&self, form: PatientForm) -> Result<AssessmentReceipt, RiskServiceError> {
        let inputs = match validate(&form) {
            Ok(inputs) => inputs,
            Err(error) => {
                debug!(%error, "rejected risk assessment submission");
                return Err(error.into());
            }
        };

        let default_model = self.engine.config().default_model;
        let selection = ModelSelection::resolve(form.selected_model.as_deref(), default_model);
        if let Some(error) = selection.configuration_error() {
            warn!(%error, fallback = %default_model, "scoring without model calibration");
        }

        let assessment = self.engine.evaluate(&inputs, &selection);
        let warnings = plausibility_warnings(&inputs);

        let record = HistoryRecord {
            assessment_id: next_assessment_id(),
            recorded_at: Utc::now(),
            patient_id: form
                .patient_id
                .map(|id| id.trim().to_string())
                .filter(|id| !id.is_empty())
                .map(PatientId),
            requested_model: selection.requested().to_string(),
            inputs,
            assessment,
        };

        let stored = self.history.append(record)?;
        info!(
            assessment_id = %stored.assessment_id.0,
            risk_percentage = stored.assessment.risk_percentage,
            risk_level = %stored.assessment.risk_level,
            warnings = warnings.len(),
            "risk assessment recorded"
        );

        Ok(AssessmentReceipt {
            record: stored,
            warnings,
        })
    }

    /// Fetch a recorded assessment for API responses.
    pub fn get(&self, assessment_id: &AssessmentId) -> Result<HistoryRecord, RiskServiceError> {
        let record = self
            .history
            .fetch(assessment_id)?
            .ok_or(HistoryError::NotFound)?;
        Ok(record)
    }

    pub fn history(&self, limit: usize) -> Result<Vec<HistoryRecord>, RiskServiceError> {
        Ok(self.history.recent(limit)?)
    }

    pub fn models(&self) -> Vec<ModelView> {
        let default_model = self.engine.config().default_model;
        self.engine
            .catalog()
            .entries()
            .map(|(id, profile)| ModelView {
                id,
                is_default: id == default_model,
                confidence: profile.confidence(),
                profile: *profile,
            })
            .collect()
    }
}

/// Result of a successful submission.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentReceipt {
    #[serde(flatten)]
    pub record: HistoryRecord,
    pub warnings: Vec<PlausibilityWarning>,
}

/// Catalog entry exposed to clients choosing a model.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelView {
    pub id: ModelId,
    pub is_default: bool,
    pub confidence: u8,
    #[serde(flatten)]
    pub profile: ModelProfile,
}

/// Error raised by the assessment service.
#[derive(Debug, thiserror::Error)]
pub enum RiskServiceError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    History(#[from] HistoryError),
}
