//! Diabetes risk assessment: form validation, the weighted scoring engine, clinical overlay,
//! guidance text, prediction history, and the HTTP surface over them.

pub mod batch;
pub mod domain;
pub mod evaluation;
pub mod guidance;
pub mod intake;
pub mod models;
pub mod repository;
pub mod router;
pub mod service;
pub mod validation;

#[cfg(test)]
mod tests;

pub use batch::{BatchAssessor, BatchImportError, BatchOutcome, BatchReport, BatchRow};
pub use domain::{
    AssessmentId, ClinicalField, ClinicalLevel, PatientForm, PatientId, PatientInputs, RiskLevel,
};
pub use evaluation::{ClinicalFindings, EngineConfig, RiskAssessment, RiskEngine};
pub use guidance::{ClinicalAnalysis, FollowUpPlan, RecommendationGroup, RiskFactorInsight};
pub use intake::{calculate_age, calculate_bmi};
pub use models::{ConfigurationError, ModelCatalog, ModelId, ModelProfile, ModelSelection};
pub use repository::{
    HistoryError, HistoryRecord, HistoryRepository, HistorySummaryView, InMemoryHistory,
};
pub use router::risk_router;
pub use service::{AssessmentReceipt, ModelView, RiskAssessmentService, RiskServiceError};
pub use validation::{plausibility_warnings, validate, PlausibilityWarning, ValidationError};
