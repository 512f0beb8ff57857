use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Clinical measurements accepted by the engine, in weight-table order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ClinicalField {
    Glucose,
    Bmi,
    Age,
    BloodPressure,
    DiabetesPedigreeFunction,
    Pregnancies,
    SkinThickness,
    Insulin,
}

impl ClinicalField {
    pub const ALL: [Self; 8] = [
        Self::Glucose,
        Self::Bmi,
        Self::Age,
        Self::BloodPressure,
        Self::DiabetesPedigreeFunction,
        Self::Pregnancies,
        Self::SkinThickness,
        Self::Insulin,
    ];

    /// Fields that must be supplied; listed in the order missing fields are reported.
    pub const REQUIRED: [Self; 4] = [Self::Glucose, Self::BloodPressure, Self::Bmi, Self::Age];

    pub const fn wire_name(self) -> &'static str {
        match self {
            Self::Glucose => "glucose",
            Self::Bmi => "bmi",
            Self::Age => "age",
            Self::BloodPressure => "bloodPressure",
            Self::DiabetesPedigreeFunction => "diabetesPedigreeFunction",
            Self::Pregnancies => "pregnancies",
            Self::SkinThickness => "skinThickness",
            Self::Insulin => "insulin",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Glucose => "Glucose (mg/dL)",
            Self::Bmi => "BMI",
            Self::Age => "Age (years)",
            Self::BloodPressure => "Diastolic blood pressure (mmHg)",
            Self::DiabetesPedigreeFunction => "Diabetes pedigree function",
            Self::Pregnancies => "Pregnancies",
            Self::SkinThickness => "Skin thickness (mm)",
            Self::Insulin => "Insulin (mu U/ml)",
        }
    }

    pub fn is_required(self) -> bool {
        Self::REQUIRED.contains(&self)
    }
}

impl fmt::Display for ClinicalField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wire_name())
    }
}

impl FromStr for ClinicalField {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let trimmed = raw.trim();
        Self::ALL
            .into_iter()
            .find(|field| field.wire_name().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| format!("unknown clinical field '{trimmed}'"))
    }
}

/// Raw submission as it arrives from a form: loosely typed values keyed by wire name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatientForm {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selected_model: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub patient_id: Option<String>,
    #[serde(flatten)]
    pub fields: BTreeMap<String, Value>,
}

impl PatientForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_value(mut self, field: ClinicalField, value: f64) -> Self {
        self.fields
            .insert(field.wire_name().to_string(), Value::from(value));
        self
    }

    pub fn with_text(mut self, field: ClinicalField, value: impl Into<String>) -> Self {
        self.fields
            .insert(field.wire_name().to_string(), Value::String(value.into()));
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.selected_model = Some(model.into());
        self
    }

    pub fn with_patient(mut self, patient_id: impl Into<String>) -> Self {
        self.patient_id = Some(patient_id.into());
        self
    }

    pub fn without(mut self, field: ClinicalField) -> Self {
        self.fields.remove(field.wire_name());
        self
    }

    pub fn raw(&self, field: ClinicalField) -> Option<&Value> {
        self.fields.get(field.wire_name())
    }

    /// Reference patient used by demos: the first record of the Pima Indians dataset.
    pub fn sample() -> Self {
        Self::new()
            .with_value(ClinicalField::Pregnancies, 6.0)
            .with_value(ClinicalField::Glucose, 148.0)
            .with_value(ClinicalField::BloodPressure, 72.0)
            .with_value(ClinicalField::SkinThickness, 35.0)
            .with_value(ClinicalField::Insulin, 0.0)
            .with_value(ClinicalField::Bmi, 33.6)
            .with_value(ClinicalField::DiabetesPedigreeFunction, 0.627)
            .with_value(ClinicalField::Age, 50.0)
    }
}

/// Validated measurements for a single evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatientInputs {
    pub glucose: f64,
    pub bmi: f64,
    pub age: f64,
    pub blood_pressure: f64,
    pub diabetes_pedigree_function: f64,
    pub pregnancies: f64,
    pub skin_thickness: f64,
    pub insulin: f64,
}

impl PatientInputs {
    pub fn value(&self, field: ClinicalField) -> f64 {
        match field {
            ClinicalField::Glucose => self.glucose,
            ClinicalField::Bmi => self.bmi,
            ClinicalField::Age => self.age,
            ClinicalField::BloodPressure => self.blood_pressure,
            ClinicalField::DiabetesPedigreeFunction => self.diabetes_pedigree_function,
            ClinicalField::Pregnancies => self.pregnancies,
            ClinicalField::SkinThickness => self.skin_thickness,
            ClinicalField::Insulin => self.insulin,
        }
    }

    pub(crate) fn set(&mut self, field: ClinicalField, value: f64) {
        let slot = match field {
            ClinicalField::Glucose => &mut self.glucose,
            ClinicalField::Bmi => &mut self.bmi,
            ClinicalField::Age => &mut self.age,
            ClinicalField::BloodPressure => &mut self.blood_pressure,
            ClinicalField::DiabetesPedigreeFunction => &mut self.diabetes_pedigree_function,
            ClinicalField::Pregnancies => &mut self.pregnancies,
            ClinicalField::SkinThickness => &mut self.skin_thickness,
            ClinicalField::Insulin => &mut self.insulin,
        };
        *slot = value;
    }

    pub(crate) fn zeroed() -> Self {
        Self {
            glucose: 0.0,
            bmi: 0.0,
            age: 0.0,
            blood_pressure: 0.0,
            diabetes_pedigree_function: 0.0,
            pregnancies: 0.0,
            skin_thickness: 0.0,
            insulin: 0.0,
        }
    }
}

/// Discretized diabetes risk bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    pub fn from_percentage(percentage: u8) -> Self {
        if percentage >= 70 {
            Self::High
        } else if percentage >= 40 {
            Self::Medium
        } else {
            Self::Low
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Graded level reported by the insulin resistance and cardiovascular checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ClinicalLevel {
    Low,
    Moderate,
    High,
}

impl ClinicalLevel {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Moderate => "Moderate",
            Self::High => "High",
        }
    }
}

impl fmt::Display for ClinicalLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Medical record number attached to stored predictions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PatientId(pub String);

/// Identifier for a recorded assessment.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AssessmentId(pub String);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clinical_field_round_trips_through_wire_names() {
        for field in ClinicalField::ALL {
            assert_eq!(field.wire_name().parse::<ClinicalField>(), Ok(field));
        }
        assert_eq!(
            "BLOODPRESSURE".parse::<ClinicalField>(),
            Ok(ClinicalField::BloodPressure)
        );
        assert!("cholesterol".parse::<ClinicalField>().is_err());
    }

    #[test]
    fn form_deserializes_flat_mapping() {
        let form: PatientForm = serde_json::from_value(serde_json::json!({
            "glucose": 148,
            "bmi": "33.6",
            "selectedModel": "gradient",
            "patientId": "MRN-2025-000001"
        }))
        .expect("form parses");

        assert_eq!(form.selected_model.as_deref(), Some("gradient"));
        assert_eq!(form.patient_id.as_deref(), Some("MRN-2025-000001"));
        assert_eq!(form.fields.len(), 2);
        assert_eq!(
            form.raw(ClinicalField::Bmi),
            Some(&Value::String("33.6".to_string()))
        );
    }

    #[test]
    fn risk_level_buckets_on_percentage() {
        assert_eq!(RiskLevel::from_percentage(39), RiskLevel::Low);
        assert_eq!(RiskLevel::from_percentage(40), RiskLevel::Medium);
        assert_eq!(RiskLevel::from_percentage(69), RiskLevel::Medium);
        assert_eq!(RiskLevel::from_percentage(70), RiskLevel::High);
    }
}
