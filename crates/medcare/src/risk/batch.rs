//! Batch scoring of CSV exports laid out like the Pima Indians diabetes dataset.

use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Deserializer, Serialize};

use super::domain::{ClinicalField, PatientForm, RiskLevel};
use super::evaluation::{RiskAssessment, RiskEngine};
use super::models::ModelSelection;
use super::validation::validate;

#[derive(Debug)]
pub enum BatchImportError {
    Io(std::io::Error),
    Csv(csv::Error),
}

impl std::fmt::Display for BatchImportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BatchImportError::Io(err) => write!(f, "failed to read patient batch: {}", err),
            BatchImportError::Csv(err) => write!(f, "invalid patient CSV data: {}", err),
        }
    }
}

impl std::error::Error for BatchImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            BatchImportError::Io(err) => Some(err),
            BatchImportError::Csv(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for BatchImportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for BatchImportError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

/// Outcome of scoring a single CSV row.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum BatchOutcome {
    Assessed { assessment: Box<RiskAssessment> },
    Rejected { reason: String, missing: Vec<ClinicalField> },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchRow {
    /// 1-based data row number, excluding the header.
    pub row: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub observed_outcome: Option<u8>,
    pub outcome: BatchOutcome,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchReport {
    pub rows: Vec<BatchRow>,
}

impl BatchReport {
    pub fn assessed(&self) -> impl Iterator<Item = (usize, &RiskAssessment)> + '_ {
        self.rows.iter().filter_map(|row| match &row.outcome {
            BatchOutcome::Assessed { assessment } => Some((row.row, assessment.as_ref())),
            BatchOutcome::Rejected { .. } => None,
        })
    }

    pub fn rejected_count(&self) -> usize {
        self.rows
            .iter()
            .filter(|row| matches!(row.outcome, BatchOutcome::Rejected { .. }))
            .count()
    }

    pub fn level_count(&self, level: RiskLevel) -> usize {
        self.assessed()
            .filter(|(_, assessment)| assessment.risk_level == level)
            .count()
    }
}

pub struct BatchAssessor<'a> {
    engine: &'a RiskEngine,
    model: ModelSelection,
}

impl<'a> BatchAssessor<'a> {
    pub fn new(engine: &'a RiskEngine, model: ModelSelection) -> Self {
        Self { engine, model }
    }

    pub fn assess_path<P: AsRef<Path>>(&self, path: P) -> Result<BatchReport, BatchImportError> {
        let file = std::fs::File::open(path)?;
        self.assess_reader(file)
    }

    /// Rows failing validation are reported individually; only malformed CSV aborts.
    pub fn assess_reader<R: Read>(&self, reader: R) -> Result<BatchReport, BatchImportError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);
        let mut rows = Vec::new();

        for (index, record) in csv_reader.deserialize::<PatientRow>().enumerate() {
            let row = record?;
            let observed_outcome = row.outcome.as_deref().and_then(|raw| raw.parse().ok());
            let outcome = match validate(&row.into_form()) {
                Ok(inputs) => BatchOutcome::Assessed {
                    assessment: Box::new(self.engine.evaluate(&inputs, &self.model)),
                },
                Err(error) => BatchOutcome::Rejected {
                    reason: error.to_string(),
                    missing: error.missing,
                },
            };

            rows.push(BatchRow {
                row: index + 1,
                observed_outcome,
                outcome,
            });
        }

        Ok(BatchReport { rows })
    }
}

#[derive(Debug, Deserialize)]
struct PatientRow {
    #[serde(rename = "Pregnancies", default, deserialize_with = "empty_string_as_none")]
    pregnancies: Option<String>,
    #[serde(rename = "Glucose", default, deserialize_with = "empty_string_as_none")]
    glucose: Option<String>,
    #[serde(
        rename = "BloodPressure",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    blood_pressure: Option<String>,
    #[serde(
        rename = "SkinThickness",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    skin_thickness: Option<String>,
    #[serde(rename = "Insulin", default, deserialize_with = "empty_string_as_none")]
    insulin: Option<String>,
    #[serde(rename = "BMI", default, deserialize_with = "empty_string_as_none")]
    bmi: Option<String>,
    #[serde(
        rename = "DiabetesPedigreeFunction",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    diabetes_pedigree_function: Option<String>,
    #[serde(rename = "Age", default, deserialize_with = "empty_string_as_none")]
    age: Option<String>,
    #[serde(rename = "Outcome", default, deserialize_with = "empty_string_as_none")]
    outcome: Option<String>,
}

impl PatientRow {
    fn into_form(self) -> PatientForm {
        let cells = [
            (ClinicalField::Pregnancies, self.pregnancies),
            (ClinicalField::Glucose, self.glucose),
            (ClinicalField::BloodPressure, self.blood_pressure),
            (ClinicalField::SkinThickness, self.skin_thickness),
            (ClinicalField::Insulin, self.insulin),
            (ClinicalField::Bmi, self.bmi),
            (
                ClinicalField::DiabetesPedigreeFunction,
                self.diabetes_pedigree_function,
            ),
            (ClinicalField::Age, self.age),
        ];

        cells
            .into_iter()
            .fold(PatientForm::new(), |form, (field, cell)| match cell {
                Some(value) => form.with_text(field, value),
                None => form,
            })
    }
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}
