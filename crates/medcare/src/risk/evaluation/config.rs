use serde::{Deserialize, Serialize};

use super::super::models::ModelId;

/// Switches selecting which scoring variant the engine runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EngineConfig {
    /// Add metabolic syndrome and insulin resistance bonuses before bucketing.
    pub clinical_overlay: bool,
    /// Scale the aggregate score by the selected model's multiplier.
    pub model_calibration: bool,
    /// Model used when the caller leaves the selector blank.
    pub default_model: ModelId,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            clinical_overlay: true,
            model_calibration: true,
            default_model: ModelId::Ensemble,
        }
    }
}

impl EngineConfig {
    /// Plain weighted score with no overlay and no model calibration.
    pub fn simplified() -> Self {
        Self {
            clinical_overlay: false,
            model_calibration: false,
            ..Self::default()
        }
    }
}
