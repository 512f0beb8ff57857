use serde::Serialize;
use serde_json::Value;

use super::domain::{ClinicalField, PatientForm, PatientInputs};

/// Required measurements were absent, non-numeric, or zero.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("missing required fields: {}", join_fields(.missing))]
pub struct ValidationError {
    pub missing: Vec<ClinicalField>,
}

impl ValidationError {
    /// Per-field messages for form rendering.
    pub fn field_messages(&self) -> Vec<FieldMessage> {
        self.missing
            .iter()
            .map(|field| FieldMessage {
                field: *field,
                message: "This field is required".to_string(),
            })
            .collect()
    }
}

fn join_fields(fields: &[ClinicalField]) -> String {
    fields
        .iter()
        .map(|field| field.wire_name())
        .collect::<Vec<_>>()
        .join(", ")
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldMessage {
    pub field: ClinicalField,
    pub message: String,
}

/// Non-blocking notice that a value sits outside its usual clinical range.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlausibilityWarning {
    pub field: ClinicalField,
    pub value: f64,
    pub message: String,
}

/// Resolve a raw form into typed inputs.
///
/// The four required fields must be present and non-zero; every other field falls back to `0`
/// when missing or unparseable.
pub fn validate(form: &PatientForm) -> Result<PatientInputs, ValidationError> {
    let mut inputs = PatientInputs::zeroed();
    let mut missing = Vec::new();

    for field in ClinicalField::ALL {
        let value = form.raw(field).and_then(read_number);
        match value {
            Some(value) if value != 0.0 => inputs.set(field, value),
            _ if field.is_required() => missing.push(field),
            _ => inputs.set(field, 0.0),
        }
    }

    if missing.is_empty() {
        Ok(inputs)
    } else {
        missing.sort_by_key(|field| {
            ClinicalField::REQUIRED
                .iter()
                .position(|required| required == field)
        });
        Err(ValidationError { missing })
    }
}

/// Range checks mirrored from the intake form.
pub fn plausibility_warnings(inputs: &PatientInputs) -> Vec<PlausibilityWarning> {
    const RANGES: [(ClinicalField, f64, f64, &str); 3] = [
        (
            ClinicalField::Glucose,
            50.0,
            400.0,
            "Glucose level should be between 50-400 mg/dL",
        ),
        (ClinicalField::Bmi, 10.0, 70.0, "BMI should be between 10-70"),
        (
            ClinicalField::Age,
            18.0,
            120.0,
            "Age should be between 18-120 years",
        ),
    ];

    RANGES
        .iter()
        .filter_map(|(field, min, max, message)| {
            let value = inputs.value(*field);
            (value < *min || value > *max).then(|| PlausibilityWarning {
                field: *field,
                value,
                message: (*message).to_string(),
            })
        })
        .collect()
}

fn read_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(number) => number.as_f64().filter(|v| v.is_finite()),
        Value::String(text) => parse_leading_number(text),
        _ => None,
    }
}

/// Parse the numeric prefix of `text`, ignoring trailing units ("33.6 kg" -> 33.6).
pub(crate) fn parse_leading_number(text: &str) -> Option<f64> {
    let trimmed = text.trim_start();
    let bytes = trimmed.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end += 1;
    }
    let digits_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut has_digits = end > digits_start;
    if end < bytes.len() && bytes[end] == b'.' {
        let fraction_start = end + 1;
        let mut cursor = fraction_start;
        while cursor < bytes.len() && bytes[cursor].is_ascii_digit() {
            cursor += 1;
        }
        if cursor > fraction_start || has_digits {
            has_digits |= cursor > fraction_start;
            end = cursor;
        }
    }

    if !has_digits {
        return None;
    }

    let mantissa = trimmed[..end].trim_end_matches('.');
    let exponent = exponent_suffix(&trimmed[end..]);

    format!("{mantissa}{exponent}")
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
}

/// `e`/`E`, an optional sign, then at least one digit; empty when the marker dangles.
fn exponent_suffix(rest: &str) -> &str {
    let bytes = rest.as_bytes();
    if !matches!(bytes.first(), Some(b'e') | Some(b'E')) {
        return "";
    }

    let mut cursor = 1;
    if matches!(bytes.get(cursor), Some(b'+') | Some(b'-')) {
        cursor += 1;
    }
    let digits_start = cursor;
    while cursor < bytes.len() && bytes[cursor].is_ascii_digit() {
        cursor += 1;
    }

    if cursor > digits_start {
        &rest[..cursor]
    } else {
        ""
    }
}
