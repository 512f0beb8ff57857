use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use axum::response::Response;
use serde_json::Value;

use crate::risk::domain::{AssessmentId, ClinicalField, PatientForm, PatientInputs};
use crate::risk::evaluation::{EngineConfig, RiskEngine};
use crate::risk::repository::{HistoryError, HistoryRecord, HistoryRepository};
use crate::risk::validation::validate;
use crate::risk::{risk_router, RiskAssessmentService};

/// First row of the Pima dataset: scores 70% high with the ensemble model.
pub(super) fn reference_form() -> PatientForm {
    PatientForm::sample()
}

/// Second row of the Pima dataset: a low risk non-diabetic patient.
pub(super) fn low_risk_form() -> PatientForm {
    PatientForm::new()
        .with_value(ClinicalField::Pregnancies, 1.0)
        .with_value(ClinicalField::Glucose, 85.0)
        .with_value(ClinicalField::BloodPressure, 66.0)
        .with_value(ClinicalField::SkinThickness, 29.0)
        .with_value(ClinicalField::Insulin, 0.0)
        .with_value(ClinicalField::Bmi, 26.6)
        .with_value(ClinicalField::DiabetesPedigreeFunction, 0.351)
        .with_value(ClinicalField::Age, 31.0)
}

pub(super) fn hypertensive_form() -> PatientForm {
    reference_form().with_value(ClinicalField::BloodPressure, 135.0)
}

pub(super) fn inputs(form: &PatientForm) -> PatientInputs {
    validate(form).expect("fixture form is valid")
}

pub(super) fn engine() -> RiskEngine {
    RiskEngine::new(EngineConfig::default())
}

pub(super) fn build_service() -> (RiskAssessmentService<MemoryHistory>, Arc<MemoryHistory>) {
    let history = Arc::new(MemoryHistory::default());
    let service = RiskAssessmentService::new(history.clone(), EngineConfig::default());
    (service, history)
}

pub(super) fn router_with_service(service: RiskAssessmentService<MemoryHistory>) -> axum::Router {
    risk_router(Arc::new(service))
}

#[derive(Default, Clone)]
pub(super) struct MemoryHistory {
    pub(super) records: Arc<Mutex<VecDeque<HistoryRecord>>>,
}

impl MemoryHistory {
    pub(super) fn len(&self) -> usize {
        self.records.lock().expect("history mutex poisoned").len()
    }
}

impl HistoryRepository for MemoryHistory {
    fn append(&self, record: HistoryRecord) -> Result<HistoryRecord, HistoryError> {
        let mut guard = self.records.lock().expect("history mutex poisoned");
        guard.push_front(record.clone());
        Ok(record)
    }

    fn fetch(&self, id: &AssessmentId) -> Result<Option<HistoryRecord>, HistoryError> {
        let guard = self.records.lock().expect("history mutex poisoned");
        Ok(guard.iter().find(|record| &record.assessment_id == id).cloned())
    }

    fn recent(&self, limit: usize) -> Result<Vec<HistoryRecord>, HistoryError> {
        let guard = self.records.lock().expect("history mutex poisoned");
        Ok(guard.iter().take(limit).cloned().collect())
    }
}

pub(super) struct UnavailableHistory;

impl HistoryRepository for UnavailableHistory {
    fn append(&self, _record: HistoryRecord) -> Result<HistoryRecord, HistoryError> {
        Err(HistoryError::Unavailable("storage offline".to_string()))
    }

    fn fetch(&self, _id: &AssessmentId) -> Result<Option<HistoryRecord>, HistoryError> {
        Err(HistoryError::Unavailable("storage offline".to_string()))
    }

    fn recent(&self, _limit: usize) -> Result<Vec<HistoryRecord>, HistoryError> {
        Err(HistoryError::Unavailable("storage offline".to_string()))
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
