use std::sync::Arc;

use super::common::*;

use crate::risk::domain::{AssessmentId, ClinicalField, RiskLevel};
use crate::risk::evaluation::EngineConfig;
use crate::risk::models::ModelId;
use crate::risk::repository::HistoryError;
use crate::risk::{RiskAssessmentService, RiskServiceError};

#[test]
fn assess_records_history_and_returns_receipt() {
    let (service, history) = build_service();

    let receipt = service
        .assess(reference_form().with_patient("MRN-2025-000001"))
        .expect("assessment succeeds");

    assert!(receipt.record.assessment_id.0.starts_with("pred-"));
    assert_eq!(receipt.record.assessment.risk_percentage, 70);
    assert_eq!(receipt.record.requested_model, "ensemble");
    assert_eq!(
        receipt.record.patient_id.as_ref().map(|id| id.0.as_str()),
        Some("MRN-2025-000001")
    );
    assert!(receipt.warnings.is_empty());
    assert_eq!(history.len(), 1);
}

#[test]
fn missing_required_fields_are_reported_in_form_order() {
    let (service, history) = build_service();
    let form = reference_form()
        .without(ClinicalField::Age)
        .with_value(ClinicalField::Glucose, 0.0)
        .with_text(ClinicalField::Bmi, "n/a");

    let error = service.assess(form).expect_err("validation fails");
    match error {
        RiskServiceError::Validation(error) => assert_eq!(
            error.missing,
            vec![ClinicalField::Glucose, ClinicalField::Bmi, ClinicalField::Age]
        ),
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(history.len(), 0);
}

#[test]
fn textual_values_with_units_are_accepted() {
    let (service, _) = build_service();
    let form = reference_form()
        .with_text(ClinicalField::Glucose, "148 mg/dL")
        .with_text(ClinicalField::Bmi, " 33.6");

    let receipt = service.assess(form).expect("assessment succeeds");
    assert_eq!(receipt.record.inputs.glucose, 148.0);
    assert_eq!(receipt.record.assessment.risk_percentage, 70);
}

#[test]
fn implausible_values_score_with_warnings() {
    let (service, _) = build_service();
    let form = reference_form()
        .with_value(ClinicalField::Glucose, 450.0)
        .with_value(ClinicalField::Age, 16.0);

    let receipt = service.assess(form).expect("assessment succeeds");
    let fields: Vec<_> = receipt.warnings.iter().map(|warning| warning.field).collect();
    assert_eq!(fields, vec![ClinicalField::Glucose, ClinicalField::Age]);
}

#[test]
fn blank_model_uses_the_configured_default() {
    let history = Arc::new(MemoryHistory::default());
    let config = EngineConfig {
        default_model: ModelId::Neural,
        ..EngineConfig::default()
    };
    let service = RiskAssessmentService::new(history, config);

    let receipt = service
        .assess(reference_form().with_model("  "))
        .expect("assessment succeeds");
    assert_eq!(receipt.record.requested_model, "neural");
    assert_eq!(receipt.record.assessment.model_used, "Neural Network");
    assert_eq!(receipt.record.assessment.risk_percentage, 60);
}

#[test]
fn unknown_model_is_recorded_as_requested() {
    let (service, _) = build_service();

    let receipt = service
        .assess(reference_form().with_model("quantum"))
        .expect("assessment succeeds");
    assert_eq!(receipt.record.requested_model, "quantum");
    assert_eq!(receipt.record.assessment.model_used, "Ensemble Model");
    assert_eq!(receipt.record.assessment.risk_percentage, 63);
}

#[test]
fn history_is_newest_first() {
    let (service, _) = build_service();
    let first = service.assess(reference_form()).expect("first");
    let second = service.assess(low_risk_form()).expect("second");

    let records = service.history(10).expect("history lists");
    let ids: Vec<_> = records.iter().map(|record| record.assessment_id.clone()).collect();
    assert_eq!(
        ids,
        vec![second.record.assessment_id, first.record.assessment_id]
    );
    assert_eq!(records[0].assessment.risk_level, RiskLevel::Low);
}

#[test]
fn get_reports_not_found_for_unknown_ids() {
    let (service, _) = build_service();

    let error = service
        .get(&AssessmentId("pred-999999".to_string()))
        .expect_err("lookup fails");
    assert!(matches!(
        error,
        RiskServiceError::History(HistoryError::NotFound)
    ));
}

#[test]
fn storage_failures_surface_as_history_errors() {
    let service = RiskAssessmentService::new(Arc::new(UnavailableHistory), EngineConfig::default());

    let error = service.assess(reference_form()).expect_err("append fails");
    assert!(matches!(
        error,
        RiskServiceError::History(HistoryError::Unavailable(_))
    ));
}

#[test]
fn models_list_marks_the_default() {
    let (service, _) = build_service();

    let models = service.models();
    assert_eq!(models.len(), 4);
    let defaults: Vec<_> = models
        .iter()
        .filter(|view| view.is_default)
        .map(|view| view.id)
        .collect();
    assert_eq!(defaults, vec![ModelId::Ensemble]);
    assert_eq!(models[2].profile.name, "Advanced Logistic Regression");
}
