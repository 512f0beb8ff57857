//! Helpers used while registering a patient: age from date of birth, BMI from free-text height
//! and weight, and medical record numbers.

use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{Datelike, NaiveDate};

use super::domain::PatientId;
use super::validation::parse_leading_number;

const METERS_PER_INCH: f64 = 0.0254;
const KILOGRAMS_PER_POUND: f64 = 0.453592;

static PATIENT_SEQUENCE: AtomicU64 = AtomicU64::new(1);

impl PatientId {
    /// Issue the next record number for the year of `today`, e.g. `MRN-2025-000042`.
    pub fn issue(today: NaiveDate) -> Self {
        let sequence = PATIENT_SEQUENCE.fetch_add(1, Ordering::Relaxed) % 1_000_000;
        PatientId(format!("MRN-{}-{sequence:06}", today.year()))
    }
}

/// Completed years between `date_of_birth` and `today`; `None` for future birth dates.
pub fn calculate_age(date_of_birth: NaiveDate, today: NaiveDate) -> Option<u32> {
    if date_of_birth > today {
        return None;
    }

    let mut age = today.year() - date_of_birth.year();
    if (today.month(), today.day()) < (date_of_birth.month(), date_of_birth.day()) {
        age -= 1;
    }
    u32::try_from(age).ok()
}

/// BMI from intake strings such as `5'10"` / `175 cm` / `70` (inches) and
/// `185 lbs` / `84 kg` / `185` (pounds).
pub fn calculate_bmi(height: &str, weight: &str) -> Option<f64> {
    let height_m = parse_height_meters(height.trim())?;
    let weight_kg = parse_weight_kilograms(weight.trim())?;

    if height_m <= 0.0 || weight_kg <= 0.0 {
        return None;
    }

    Some(weight_kg / (height_m * height_m))
}

fn parse_height_meters(height: &str) -> Option<f64> {
    if height.is_empty() {
        return None;
    }

    if let Some((feet, rest)) = height.split_once('\'') {
        let feet = leading_integer(feet.trim())?;
        let inches = leading_integer(rest.trim_start())?;
        return Some((feet * 12 + inches) as f64 * METERS_PER_INCH);
    }

    if height.contains("cm") {
        return parse_leading_number(height).map(|cm| cm / 100.0);
    }

    parse_leading_number(height).map(|inches| inches * METERS_PER_INCH)
}

fn parse_weight_kilograms(weight: &str) -> Option<f64> {
    if weight.is_empty() {
        return None;
    }

    let value = parse_leading_number(weight)?;
    if weight.contains("kg") && !weight.contains("lbs") {
        Some(value)
    } else {
        Some(value * KILOGRAMS_PER_POUND)
    }
}

fn leading_integer(text: &str) -> Option<u64> {
    let digits: String = text.chars().take_while(|c| c.is_ascii_digit()).collect();
    digits.parse().ok()
}
