use std::collections::BTreeMap;

use serde::Serialize;

use super::super::domain::{ClinicalField, PatientInputs};

/// Per-field risk contributions, each within `[0, 1]`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct NormalizedFactors(BTreeMap<ClinicalField, f64>);

impl NormalizedFactors {
    pub fn get(&self, field: ClinicalField) -> f64 {
        self.0.get(&field).copied().unwrap_or(0.0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (ClinicalField, f64)> + '_ {
        self.0.iter().map(|(field, value)| (*field, *value))
    }
}

/// Map a raw measurement onto its `[0, 1]` contribution.
///
/// Glucose, BMI, age and diastolic pressure step through clinical cut-points; the remaining
/// fields scale linearly against a ceiling.
pub fn normalize(field: ClinicalField, raw: f64) -> f64 {
    match field {
        ClinicalField::Glucose => {
            if raw < 70.0 {
                0.1
            } else if raw <= 100.0 {
                0.2
            } else if raw <= 125.0 {
                0.6
            } else {
                0.9
            }
        }
        // Underweight sits above the normal band on purpose.
        ClinicalField::Bmi => {
            if raw < 18.5 {
                0.2
            } else if raw < 25.0 {
                0.1
            } else if raw < 30.0 {
                0.5
            } else {
                0.8
            }
        }
        ClinicalField::Age => {
            if raw < 25.0 {
                0.1
            } else if raw < 45.0 {
                0.3
            } else if raw < 65.0 {
                0.6
            } else {
                0.8
            }
        }
        ClinicalField::BloodPressure => {
            if raw < 80.0 {
                0.1
            } else if raw < 90.0 {
                0.4
            } else {
                0.7
            }
        }
        ClinicalField::DiabetesPedigreeFunction => scaled(raw, 2.0),
        ClinicalField::Pregnancies => scaled(raw, 15.0),
        ClinicalField::SkinThickness => scaled(raw, 50.0),
        ClinicalField::Insulin => scaled(raw, 300.0),
    }
}

fn scaled(raw: f64, ceiling: f64) -> f64 {
    (raw / ceiling).clamp(0.0, 1.0)
}

pub fn normalize_inputs(inputs: &PatientInputs) -> NormalizedFactors {
    NormalizedFactors(
        ClinicalField::ALL
            .into_iter()
            .map(|field| (field, normalize(field, inputs.value(field))))
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bucket_changes(field: ClinicalField, below: f64, above: f64) -> bool {
        normalize(field, below) != normalize(field, above)
    }

    #[test]
    fn glucose_is_monotone_across_cut_points() {
        let fasting = normalize(ClinicalField::Glucose, 99.0);
        let prediabetic = normalize(ClinicalField::Glucose, 101.0);
        let diabetic = normalize(ClinicalField::Glucose, 126.0);
        assert!(fasting < prediabetic && prediabetic < diabetic);
        assert_eq!(normalize(ClinicalField::Glucose, 60.0), 0.1);
        assert_eq!(normalize(ClinicalField::Glucose, 125.0), 0.6);
    }

    #[test]
    fn boundary_pairs_cross_exactly_one_bucket() {
        assert!(bucket_changes(ClinicalField::Glucose, 100.0, 101.0));
        assert!(bucket_changes(ClinicalField::Bmi, 29.9, 30.0));
        assert!(bucket_changes(ClinicalField::Age, 44.0, 45.0));
        assert!(bucket_changes(ClinicalField::BloodPressure, 79.0, 80.0));

        assert_eq!(normalize(ClinicalField::Glucose, 100.0), 0.2);
        assert_eq!(normalize(ClinicalField::Glucose, 101.0), 0.6);
        assert_eq!(normalize(ClinicalField::Bmi, 29.9), 0.5);
        assert_eq!(normalize(ClinicalField::Bmi, 30.0), 0.8);
        assert_eq!(normalize(ClinicalField::Age, 44.0), 0.3);
        assert_eq!(normalize(ClinicalField::Age, 45.0), 0.6);
        assert_eq!(normalize(ClinicalField::BloodPressure, 79.0), 0.1);
        assert_eq!(normalize(ClinicalField::BloodPressure, 80.0), 0.4);
    }

    #[test]
    fn underweight_scores_above_normal_bmi() {
        assert_eq!(normalize(ClinicalField::Bmi, 17.0), 0.2);
        assert_eq!(normalize(ClinicalField::Bmi, 22.0), 0.1);
    }

    #[test]
    fn linear_fields_cap_at_one_and_floor_at_zero() {
        assert_eq!(normalize(ClinicalField::DiabetesPedigreeFunction, 1.0), 0.5);
        assert_eq!(normalize(ClinicalField::Pregnancies, 30.0), 1.0);
        assert_eq!(normalize(ClinicalField::SkinThickness, 25.0), 0.5);
        assert_eq!(normalize(ClinicalField::Insulin, 900.0), 1.0);
        assert_eq!(normalize(ClinicalField::Insulin, -40.0), 0.0);
    }

    #[test]
    fn every_factor_stays_within_unit_interval() {
        let probes = [-50.0, 0.0, 0.5, 18.5, 70.0, 126.0, 250.0, 10_000.0];
        for field in ClinicalField::ALL {
            for raw in probes {
                let value = normalize(field, raw);
                assert!(
                    (0.0..=1.0).contains(&value),
                    "{field} normalized {raw} to {value}"
                );
            }
        }
    }
}
