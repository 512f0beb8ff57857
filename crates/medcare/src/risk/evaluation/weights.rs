use serde::Serialize;

use super::super::domain::ClinicalField;
use super::super::models::{ModelCatalog, ModelSelection};
use super::config::EngineConfig;
use super::normalizer::NormalizedFactors;

/// Fixed contribution of each field to the aggregate score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct WeightTable {
    entries: [(ClinicalField, f64); 8],
}

impl WeightTable {
    pub const fn standard() -> Self {
        Self {
            entries: [
                (ClinicalField::Glucose, 0.35),
                (ClinicalField::Bmi, 0.18),
                (ClinicalField::Age, 0.15),
                (ClinicalField::BloodPressure, 0.12),
                (ClinicalField::DiabetesPedigreeFunction, 0.10),
                (ClinicalField::Pregnancies, 0.05),
                (ClinicalField::SkinThickness, 0.03),
                (ClinicalField::Insulin, 0.02),
            ],
        }
    }

    pub fn weight(&self, field: ClinicalField) -> f64 {
        self.entries
            .iter()
            .find(|(candidate, _)| *candidate == field)
            .map(|(_, weight)| *weight)
            .unwrap_or(0.0)
    }

    pub fn total(&self) -> f64 {
        self.entries.iter().map(|(_, weight)| weight).sum()
    }

    /// Weighted sum of the normalized factors, accumulated in table order.
    pub fn aggregate(&self, normalized: &NormalizedFactors) -> f64 {
        self.entries
            .iter()
            .fold(0.0, |score, (field, weight)| {
                score + normalized.get(*field) * weight
            })
    }
}

impl Default for WeightTable {
    fn default() -> Self {
        Self::standard()
    }
}

/// Multiplier applied to the aggregate score for the selected model.
pub(crate) fn model_multiplier(
    selection: &ModelSelection,
    catalog: &ModelCatalog,
    config: &EngineConfig,
) -> f64 {
    if !config.model_calibration {
        return 1.0;
    }

    match selection {
        ModelSelection::Catalog(id) => catalog.profile(*id).score_multiplier,
        ModelSelection::Unrecognized(_) => 1.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::risk::models::ModelId;

    #[test]
    fn weights_sum_to_one() {
        assert!((WeightTable::standard().total() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn glucose_carries_the_largest_weight() {
        let table = WeightTable::standard();
        let glucose = table.weight(ClinicalField::Glucose);
        for field in ClinicalField::ALL {
            assert!(table.weight(field) <= glucose);
        }
        assert_eq!(table.weight(ClinicalField::Insulin), 0.02);
    }

    #[test]
    fn multiplier_respects_calibration_switch() {
        let catalog = ModelCatalog::standard();
        let ensemble = ModelSelection::Catalog(ModelId::Ensemble);
        let unknown = ModelSelection::Unrecognized("svm".to_string());

        assert_eq!(
            model_multiplier(&ensemble, &catalog, &EngineConfig::default()),
            1.10
        );
        assert_eq!(
            model_multiplier(&unknown, &catalog, &EngineConfig::default()),
            1.0
        );
        assert_eq!(
            model_multiplier(&ensemble, &catalog, &EngineConfig::simplified()),
            1.0
        );
    }
}
