use super::common::*;

use crate::risk::models::ModelId;

#[test]
fn high_risk_guidance_leads_with_immediate_actions() {
    let assessment = engine().evaluate(&inputs(&reference_form()), &ModelId::Ensemble.into());

    let categories: Vec<_> = assessment
        .recommendations
        .iter()
        .map(|group| group.category.as_str())
        .collect();
    assert_eq!(categories, vec!["Immediate Actions", "Weight Management"]);
    assert_eq!(assessment.follow_up.next_appointment, "2 weeks");
}

#[test]
fn elevated_blood_pressure_adds_its_own_group_last() {
    let assessment = engine().evaluate(&inputs(&hypertensive_form()), &ModelId::Ensemble.into());

    let last = assessment
        .recommendations
        .last()
        .expect("at least one group");
    assert_eq!(last.category, "Blood Pressure");
    assert_eq!(last.items.len(), 4);
}

#[test]
fn analysis_lists_findings_in_fixed_order() {
    let assessment = engine().evaluate(&inputs(&reference_form()), &ModelId::Ensemble.into());
    let analysis = &assessment.analysis;

    assert!(analysis.summary.contains("70% predicted risk"));
    assert_eq!(analysis.key_findings.len(), 3);
    assert!(analysis.key_findings[0].starts_with("Glucose level indicates diabetes"));
    assert!(analysis.key_findings[1].starts_with("BMI indicates obesity"));
    assert_eq!(
        analysis.key_findings[2],
        "Multiple criteria for metabolic syndrome present"
    );
    assert!(analysis.clinical_significance.starts_with("HIGH RISK"));
    assert_eq!(analysis.limitations.len(), 4);
}

#[test]
fn low_risk_guidance_recommends_maintenance() {
    let assessment = engine().evaluate(&inputs(&low_risk_form()), &ModelId::Ensemble.into());

    assert_eq!(assessment.recommendations[0].category, "Maintenance");
    assert_eq!(assessment.follow_up.next_appointment, "1 year");
    assert!(assessment
        .analysis
        .clinical_significance
        .starts_with("LOW RISK"));
    assert!(assessment.analysis.key_findings.is_empty());
}

#[test]
fn factor_breakdown_highlights_glucose_bmi_and_age() {
    let assessment = engine().evaluate(&inputs(&reference_form()), &ModelId::Ensemble.into());

    let breakdown: Vec<_> = assessment
        .risk_factors
        .iter()
        .map(|factor| (factor.factor.as_str(), factor.contribution, factor.status.as_str()))
        .collect();
    assert_eq!(
        breakdown,
        vec![
            ("Glucose Level", 35, "High Risk"),
            ("BMI", 18, "Obese"),
            ("Age", 15, "Moderate Risk"),
        ]
    );
}
