use serde::Serialize;

use super::super::domain::PatientInputs;
use super::super::evaluation::ClinicalFindings;

/// Textual interpretation rendered next to the score.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClinicalAnalysis {
    pub summary: String,
    pub key_findings: Vec<String>,
    pub clinical_significance: String,
    pub limitations: Vec<String>,
}

const LIMITATIONS: [&str; 4] = [
    "Prediction based on limited clinical parameters",
    "Family history and genetic factors not fully assessed",
    "Laboratory results (HbA1c, lipids) not included",
    "Clinical judgment should override algorithmic predictions",
];

/// Significance text is keyed on the reported percentage, not the overlay-adjusted one.
pub fn clinical_analysis(
    inputs: &PatientInputs,
    risk_percentage: u8,
    findings: &ClinicalFindings,
) -> ClinicalAnalysis {
    let mut key_findings = Vec::new();

    if inputs.glucose >= 126.0 {
        key_findings.push("Glucose level indicates diabetes (≥126 mg/dL)".to_string());
    } else if inputs.glucose >= 100.0 {
        key_findings.push("Glucose level indicates prediabetes (100-125 mg/dL)".to_string());
    }

    if inputs.bmi >= 30.0 {
        key_findings
            .push("BMI indicates obesity (≥30), a major diabetes risk factor".to_string());
    }

    if findings.metabolic_syndrome.present {
        key_findings.push("Multiple criteria for metabolic syndrome present".to_string());
    }

    let clinical_significance = if risk_percentage >= 70 {
        "HIGH RISK: Immediate intervention recommended. Patient should be evaluated for diabetes diagnosis and treatment."
    } else if risk_percentage >= 40 {
        "MODERATE RISK: Lifestyle interventions recommended. Regular monitoring advised."
    } else {
        "LOW RISK: Continue preventive measures. Routine screening appropriate."
    };

    ClinicalAnalysis {
        summary: format!(
            "Based on the provided clinical parameters, this patient has a {risk_percentage}% predicted risk for developing type 2 diabetes."
        ),
        key_findings,
        clinical_significance: clinical_significance.to_string(),
        limitations: LIMITATIONS.iter().map(|item| item.to_string()).collect(),
    }
}
