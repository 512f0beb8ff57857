use std::collections::VecDeque;
use std::sync::{Mutex, PoisonError};

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::domain::{AssessmentId, PatientId, PatientInputs};
use super::evaluation::RiskAssessment;

/// Stored prediction with the inputs that produced it.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryRecord {
    pub assessment_id: AssessmentId,
    pub recorded_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub patient_id: Option<PatientId>,
    pub requested_model: String,
    pub inputs: PatientInputs,
    pub assessment: RiskAssessment,
}

impl HistoryRecord {
    pub fn summary_view(&self) -> HistorySummaryView {
        HistorySummaryView {
            assessment_id: self.assessment_id.clone(),
            recorded_at: self.recorded_at,
            patient_id: self.patient_id.clone(),
            risk_percentage: self.assessment.risk_percentage,
            risk_level: self.assessment.risk_level.label(),
            model_used: self.assessment.model_used.clone(),
        }
    }
}

/// Compact listing row for history endpoints.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HistorySummaryView {
    pub assessment_id: AssessmentId,
    pub recorded_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub patient_id: Option<PatientId>,
    pub risk_percentage: u8,
    pub risk_level: &'static str,
    pub model_used: String,
}

/// Storage abstraction for prediction history so the service can be exercised in isolation.
pub trait HistoryRepository: Send + Sync {
    fn append(&self, record: HistoryRecord) -> Result<HistoryRecord, HistoryError>;
    fn fetch(&self, id: &AssessmentId) -> Result<Option<HistoryRecord>, HistoryError>;
    /// Newest first, at most `limit` entries.
    fn recent(&self, limit: usize) -> Result<Vec<HistoryRecord>, HistoryError>;
}

#[derive(Debug, thiserror::Error)]
pub enum HistoryError {
    #[error("assessment already recorded")]
    Conflict,
    #[error("assessment not found")]
    NotFound,
    #[error("history unavailable: {0}")]
    Unavailable(String),
}

/// Bounded in-process history; the oldest entry is evicted once capacity is reached.
#[derive(Debug)]
pub struct InMemoryHistory {
    capacity: usize,
    records: Mutex<VecDeque<HistoryRecord>>,
}

impl InMemoryHistory {
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            capacity,
            records: Mutex::new(VecDeque::with_capacity(capacity)),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Entries currently held; a poisoned lock still reports the stored count.
    pub fn len(&self) -> usize {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(
        &self,
    ) -> Result<std::sync::MutexGuard<'_, VecDeque<HistoryRecord>>, HistoryError> {
        self.records
            .lock()
            .map_err(|_| HistoryError::Unavailable("history lock poisoned".to_string()))
    }
}

impl Default for InMemoryHistory {
    fn default() -> Self {
        Self::with_capacity(100)
    }
}

impl HistoryRepository for InMemoryHistory {
    fn append(&self, record: HistoryRecord) -> Result<HistoryRecord, HistoryError> {
        let mut guard = self.lock()?;
        if guard
            .iter()
            .any(|existing| existing.assessment_id == record.assessment_id)
        {
            return Err(HistoryError::Conflict);
        }
        guard.push_front(record.clone());
        guard.truncate(self.capacity);
        Ok(record)
    }

    fn fetch(&self, id: &AssessmentId) -> Result<Option<HistoryRecord>, HistoryError> {
        let guard = self.lock()?;
        Ok(guard
            .iter()
            .find(|record| &record.assessment_id == id)
            .cloned())
    }

    fn recent(&self, limit: usize) -> Result<Vec<HistoryRecord>, HistoryError> {
        let guard = self.lock()?;
        Ok(guard.iter().take(limit).cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::risk::domain::PatientForm;
    use crate::risk::evaluation::RiskEngine;
    use crate::risk::models::{ModelId, ModelSelection};
    use crate::risk::validation::validate;

    fn record(sequence: usize) -> HistoryRecord {
        let inputs = validate(&PatientForm::sample()).expect("sample is valid");
        let assessment =
            RiskEngine::default().evaluate(&inputs, &ModelSelection::Catalog(ModelId::Ensemble));
        HistoryRecord {
            assessment_id: AssessmentId(format!("pred-{sequence:06}")),
            recorded_at: Utc::now(),
            patient_id: None,
            requested_model: "ensemble".to_string(),
            inputs,
            assessment,
        }
    }

    #[test]
    fn evicts_oldest_entries_beyond_capacity() {
        let history = InMemoryHistory::with_capacity(3);
        for sequence in 1..=5 {
            history.append(record(sequence)).expect("append succeeds");
        }

        let ids: Vec<_> = history
            .recent(10)
            .expect("listing succeeds")
            .into_iter()
            .map(|record| record.assessment_id.0)
            .collect();
        assert_eq!(ids, vec!["pred-000005", "pred-000004", "pred-000003"]);
        assert_eq!(history.len(), 3);
        assert!(history
            .fetch(&AssessmentId("pred-000001".to_string()))
            .expect("fetch succeeds")
            .is_none());
    }

    #[test]
    fn rejects_duplicate_ids() {
        let history = InMemoryHistory::default();
        history.append(record(1)).expect("first append");
        assert!(matches!(
            history.append(record(1)),
            Err(HistoryError::Conflict)
        ));
    }

    #[test]
    fn poisoned_store_keeps_reporting_its_length() {
        let history = std::sync::Arc::new(InMemoryHistory::default());
        history.append(record(1)).expect("append succeeds");
        history.append(record(2)).expect("append succeeds");

        let poisoner = history.clone();
        let outcome = std::thread::spawn(move || {
            let _guard = poisoner.records.lock().expect("lock acquired");
            panic!("poison the history lock");
        })
        .join();
        assert!(outcome.is_err());

        assert_eq!(history.len(), 2);
        assert!(!history.is_empty());
        assert!(matches!(
            history.recent(10),
            Err(HistoryError::Unavailable(_))
        ));
    }

    #[test]
    fn recent_honors_limit() {
        let history = InMemoryHistory::default();
        for sequence in 1..=4 {
            history.append(record(sequence)).expect("append succeeds");
        }
        assert_eq!(history.recent(2).expect("listing").len(), 2);
        assert_eq!(history.recent(0).expect("listing").len(), 0);
    }
}
