use serde::Serialize;

use super::super::domain::{ClinicalLevel, PatientInputs};

/// Rule-based findings computed from raw, unnormalized measurements.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClinicalFindings {
    pub metabolic_syndrome: MetabolicSyndrome,
    pub insulin_resistance: InsulinResistance,
    pub cardiovascular_risk: CardiovascularRisk,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MetabolicSyndrome {
    pub present: bool,
    pub criteria_count: u8,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InsulinResistance {
    pub score: f64,
    pub level: ClinicalLevel,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CardiovascularRisk {
    pub level: ClinicalLevel,
    pub factor_count: u8,
    pub description: String,
}

pub fn analyze(inputs: &PatientInputs) -> ClinicalFindings {
    ClinicalFindings {
        metabolic_syndrome: metabolic_syndrome(inputs),
        insulin_resistance: insulin_resistance(inputs),
        cardiovascular_risk: cardiovascular_risk(inputs),
    }
}

/// Three-factor proxy: obesity, elevated glucose, elevated diastolic pressure.
pub fn metabolic_syndrome(inputs: &PatientInputs) -> MetabolicSyndrome {
    let criteria_count = count_true(&[
        inputs.bmi >= 30.0,
        inputs.glucose >= 100.0,
        inputs.blood_pressure >= 85.0,
    ]);
    let present = criteria_count >= 2;

    MetabolicSyndrome {
        present,
        criteria_count,
        description: if present {
            "Likely metabolic syndrome".to_string()
        } else {
            "Low risk for metabolic syndrome".to_string()
        },
    }
}

pub fn insulin_resistance(inputs: &PatientInputs) -> InsulinResistance {
    let score = (inputs.glucose / 100.0) * (inputs.bmi / 25.0) * (inputs.age / 40.0);
    let level = if score > 1.5 {
        ClinicalLevel::High
    } else if score > 1.0 {
        ClinicalLevel::Moderate
    } else {
        ClinicalLevel::Low
    };

    InsulinResistance {
        score,
        level,
        description: format!("Insulin resistance risk: {level}"),
    }
}

pub fn cardiovascular_risk(inputs: &PatientInputs) -> CardiovascularRisk {
    let factor_count = count_true(&[
        inputs.age >= 45.0,
        inputs.bmi >= 25.0,
        inputs.blood_pressure >= 130.0,
        inputs.glucose >= 100.0,
    ]);
    let level = if factor_count >= 3 {
        ClinicalLevel::High
    } else if factor_count >= 2 {
        ClinicalLevel::Moderate
    } else {
        ClinicalLevel::Low
    };

    CardiovascularRisk {
        level,
        factor_count,
        description: format!("Cardiovascular risk factors present: {factor_count}"),
    }
}

fn count_true(criteria: &[bool]) -> u8 {
    criteria.iter().filter(|met| **met).count() as u8
}
