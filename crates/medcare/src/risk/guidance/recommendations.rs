use serde::Serialize;

use super::super::domain::{PatientInputs, RiskLevel};

/// Named category of ordered recommendation strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecommendationGroup {
    pub category: String,
    pub items: Vec<String>,
}

impl RecommendationGroup {
    fn new(category: &str, items: &[&str]) -> Self {
        Self {
            category: category.to_string(),
            items: items.iter().map(|item| item.to_string()).collect(),
        }
    }
}

/// Risk-tier group first, then parameter-specific groups in a fixed order.
pub fn recommendations(inputs: &PatientInputs, level: RiskLevel) -> Vec<RecommendationGroup> {
    let mut groups = vec![tier_group(level)];

    if inputs.bmi >= 25.0 {
        groups.push(RecommendationGroup::new(
            "Weight Management",
            &[
                "Target 5-10% weight loss if overweight",
                "Consider referral to dietitian",
                "Increase physical activity to 150 min/week",
                "Monitor progress with regular weigh-ins",
            ],
        ));
    }

    if inputs.blood_pressure >= 130.0 {
        groups.push(RecommendationGroup::new(
            "Blood Pressure",
            &[
                "Monitor blood pressure regularly",
                "Reduce sodium intake (<2300mg/day)",
                "Increase potassium-rich foods",
                "Consider antihypertensive therapy if persistently elevated",
            ],
        ));
    }

    groups
}

fn tier_group(level: RiskLevel) -> RecommendationGroup {
    match level {
        RiskLevel::High => RecommendationGroup::new(
            "Immediate Actions",
            &[
                "Schedule appointment with endocrinologist within 2 weeks",
                "Order comprehensive metabolic panel including HbA1c",
                "Begin diabetes self-monitoring education",
                "Consider pharmacological intervention",
            ],
        ),
        RiskLevel::Medium => RecommendationGroup::new(
            "Preventive Measures",
            &[
                "Implement structured lifestyle intervention program",
                "Schedule follow-up in 3-6 months",
                "Annual diabetes screening",
                "Nutritional counseling referral",
            ],
        ),
        RiskLevel::Low => RecommendationGroup::new(
            "Maintenance",
            &[
                "Continue current healthy lifestyle practices",
                "Routine diabetes screening every 3 years",
                "Maintain healthy weight and regular exercise",
                "Monitor for changes in risk factors",
            ],
        ),
    }
}
