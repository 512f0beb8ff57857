use serde::Serialize;

use super::super::domain::{ClinicalLevel, RiskLevel};
use super::clinical::ClinicalFindings;

const MIN_PERCENTAGE: i64 = 5;
const MAX_PERCENTAGE: i64 = 95;
const METABOLIC_SYNDROME_BONUS: i64 = 10;
const INSULIN_RESISTANCE_BONUS: i64 = 5;

/// Percentages derived from the calibrated score and the resulting bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Classification {
    /// Clamped score percentage reported to the patient.
    pub risk_percentage: u8,
    /// Percentage after clinical bonuses, used for bucketing.
    pub adjusted_percentage: u8,
    pub risk_level: RiskLevel,
}

pub fn classify(score: f64, findings: &ClinicalFindings, clinical_overlay: bool) -> Classification {
    let base = (score * 100.0).round() as i64;
    let risk_percentage = clamp_percentage(base);

    let bonus = if clinical_overlay {
        clinical_bonus(findings)
    } else {
        0
    };
    // Bonuses land before the clamp so the adjusted value never leaves [5, 95].
    let adjusted_percentage = clamp_percentage(base + bonus);

    Classification {
        risk_percentage,
        adjusted_percentage,
        risk_level: RiskLevel::from_percentage(adjusted_percentage),
    }
}

fn clinical_bonus(findings: &ClinicalFindings) -> i64 {
    let mut bonus = 0;
    if findings.metabolic_syndrome.present {
        bonus += METABOLIC_SYNDROME_BONUS;
    }
    if findings.insulin_resistance.level == ClinicalLevel::High {
        bonus += INSULIN_RESISTANCE_BONUS;
    }
    bonus
}

fn clamp_percentage(value: i64) -> u8 {
    value.clamp(MIN_PERCENTAGE, MAX_PERCENTAGE) as u8
}
