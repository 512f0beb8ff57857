use serde::Serialize;

use super::super::domain::{ClinicalField, PatientInputs};
use super::super::evaluation::WeightTable;

/// Weighted factor with its current status, shown in the factor breakdown panel.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskFactorInsight {
    pub factor: String,
    pub field: ClinicalField,
    pub weight: f64,
    pub description: String,
    pub recommendations: Vec<String>,
    pub contribution: u8,
    pub status: String,
}

struct FactorTemplate {
    factor: &'static str,
    field: ClinicalField,
    description: &'static str,
    recommendations: [&'static str; 2],
}

const HIGHLIGHTED_FACTORS: [FactorTemplate; 3] = [
    FactorTemplate {
        factor: "Glucose Level",
        field: ClinicalField::Glucose,
        description: "Primary indicator of diabetes risk",
        recommendations: ["Monitor blood glucose regularly", "Dietary modifications"],
    },
    FactorTemplate {
        factor: "BMI",
        field: ClinicalField::Bmi,
        description: "Body mass index correlation with diabetes",
        recommendations: ["Weight management", "Nutritional counseling"],
    },
    FactorTemplate {
        factor: "Age",
        field: ClinicalField::Age,
        description: "Age-related diabetes risk increase",
        recommendations: ["Regular screening", "Preventive care"],
    },
];

pub fn risk_factor_breakdown(
    inputs: &PatientInputs,
    weights: &WeightTable,
) -> Vec<RiskFactorInsight> {
    HIGHLIGHTED_FACTORS
        .iter()
        .map(|template| {
            let weight = weights.weight(template.field);
            RiskFactorInsight {
                factor: template.factor.to_string(),
                field: template.field,
                weight,
                description: template.description.to_string(),
                recommendations: template
                    .recommendations
                    .iter()
                    .map(|item| item.to_string())
                    .collect(),
                contribution: (weight * 100.0).round() as u8,
                status: factor_status(template.field, inputs.value(template.field)).to_string(),
            }
        })
        .collect()
}

fn factor_status(field: ClinicalField, value: f64) -> &'static str {
    match field {
        ClinicalField::Glucose if value >= 126.0 => "High Risk",
        ClinicalField::Glucose if value >= 100.0 => "Moderate Risk",
        ClinicalField::Glucose => "Normal",
        ClinicalField::Bmi if value >= 30.0 => "Obese",
        ClinicalField::Bmi if value >= 25.0 => "Overweight",
        ClinicalField::Bmi => "Normal",
        ClinicalField::Age if value >= 65.0 => "High Risk",
        ClinicalField::Age if value >= 45.0 => "Moderate Risk",
        ClinicalField::Age => "Low Risk",
        _ => "Unknown",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_labels_follow_clinical_bands() {
        assert_eq!(factor_status(ClinicalField::Glucose, 126.0), "High Risk");
        assert_eq!(factor_status(ClinicalField::Glucose, 110.0), "Moderate Risk");
        assert_eq!(factor_status(ClinicalField::Glucose, 90.0), "Normal");
        assert_eq!(factor_status(ClinicalField::Bmi, 27.0), "Overweight");
        assert_eq!(factor_status(ClinicalField::Age, 70.0), "High Risk");
        assert_eq!(factor_status(ClinicalField::Age, 30.0), "Low Risk");
        assert_eq!(factor_status(ClinicalField::Insulin, 30.0), "Unknown");
    }
}
