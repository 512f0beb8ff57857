use serde::Serialize;

use super::super::domain::RiskLevel;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FollowUpPlan {
    pub next_appointment: String,
    pub monitoring: Vec<String>,
    pub interventions: Vec<String>,
    pub goals: Vec<String>,
}

impl FollowUpPlan {
    fn new(next_appointment: &str, monitoring: &[&str], interventions: &[&str], goals: &[&str]) -> Self {
        Self {
            next_appointment: next_appointment.to_string(),
            monitoring: to_owned(monitoring),
            interventions: to_owned(interventions),
            goals: to_owned(goals),
        }
    }
}

pub fn follow_up_plan(level: RiskLevel) -> FollowUpPlan {
    match level {
        RiskLevel::High => FollowUpPlan::new(
            "2 weeks",
            &[
                "Weekly glucose monitoring",
                "Monthly weight checks",
                "BP monitoring",
            ],
            &[
                "Diabetes education",
                "Medication management",
                "Intensive lifestyle counseling",
            ],
            &["HbA1c <7%", "5-10% weight loss", "BP <130/80 mmHg"],
        ),
        RiskLevel::Medium => FollowUpPlan::new(
            "3 months",
            &[
                "Quarterly glucose checks",
                "Semi-annual HbA1c",
                "Regular weight monitoring",
            ],
            &["Lifestyle modification program", "Nutritional counseling"],
            &[
                "Prevent diabetes progression",
                "7% weight loss",
                "Maintain healthy BP",
            ],
        ),
        RiskLevel::Low => FollowUpPlan::new(
            "1 year",
            &["Annual diabetes screening", "Regular health maintenance"],
            &["Continue preventive measures"],
            &[
                "Maintain current health status",
                "Prevent risk factor development",
            ],
        ),
    }
}

fn to_owned(items: &[&str]) -> Vec<String> {
    items.iter().map(|item| item.to_string()).collect()
}
