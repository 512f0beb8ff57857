mod classifier;
mod clinical;
mod config;
mod normalizer;
mod weights;

pub use classifier::{classify, Classification};
pub use clinical::{
    analyze, CardiovascularRisk, ClinicalFindings, InsulinResistance, MetabolicSyndrome,
};
pub use config::EngineConfig;
pub use normalizer::{normalize, normalize_inputs, NormalizedFactors};
pub use weights::WeightTable;

use serde::Serialize;

use super::domain::{PatientInputs, RiskLevel};
use super::guidance::{
    clinical_analysis, follow_up_plan, recommendations, risk_factor_breakdown, ClinicalAnalysis,
    FollowUpPlan, RecommendationGroup, RiskFactorInsight,
};
use super::models::{ModelCatalog, ModelProfile, ModelSelection};

/// Stateless evaluator applying the weight table, model catalog, and clinical rules.
#[derive(Debug, Clone)]
pub struct RiskEngine {
    config: EngineConfig,
    catalog: ModelCatalog,
    weights: WeightTable,
}

impl RiskEngine {
    pub fn new(config: EngineConfig) -> Self {
        Self::with_catalog(config, ModelCatalog::standard())
    }

    pub fn with_catalog(config: EngineConfig, catalog: ModelCatalog) -> Self {
        Self {
            config,
            catalog,
            weights: WeightTable::standard(),
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn catalog(&self) -> &ModelCatalog {
        &self.catalog
    }

    pub fn weights(&self) -> &WeightTable {
        &self.weights
    }

    /// Score one patient. Unrecognized models report the default profile and skip calibration.
    pub fn evaluate(&self, inputs: &PatientInputs, model: &ModelSelection) -> RiskAssessment {
        let profile = match model {
            ModelSelection::Catalog(id) => self.catalog.profile(*id),
            ModelSelection::Unrecognized(_) => self.catalog.profile(self.config.default_model),
        };

        let normalized_factors = normalize_inputs(inputs);
        let raw_score = self.weights.aggregate(&normalized_factors);
        let calibrated_score =
            raw_score * weights::model_multiplier(model, &self.catalog, &self.config);

        let calibration_applied =
            self.config.model_calibration && matches!(model, ModelSelection::Catalog(_));
        let model_warning = model.configuration_error().map(|error| {
            format!("{error}; scored without model calibration using the default model profile")
        });

        let clinical_factors = analyze(inputs);
        let classification = classify(
            calibrated_score,
            &clinical_factors,
            self.config.clinical_overlay,
        );
        let risk_level = classification.risk_level;

        RiskAssessment {
            risk_percentage: classification.risk_percentage,
            adjusted_percentage: classification.adjusted_percentage,
            risk_level,
            confidence: profile.confidence(),
            model_used: profile.name.to_string(),
            model_metrics: *profile,
            analysis: clinical_analysis(inputs, classification.risk_percentage, &clinical_factors),
            recommendations: recommendations(inputs, risk_level),
            risk_factors: risk_factor_breakdown(inputs, &self.weights),
            follow_up: follow_up_plan(risk_level),
            clinical_factors,
            normalized_factors,
            raw_score,
            calibrated_score,
            calibration_applied,
            model_warning,
        }
    }
}

impl Default for RiskEngine {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

/// Terminal artifact of one evaluation, consumed by renderers, reports, and history storage.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskAssessment {
    pub risk_percentage: u8,
    pub adjusted_percentage: u8,
    pub risk_level: RiskLevel,
    pub confidence: u8,
    pub model_used: String,
    pub model_metrics: ModelProfile,
    pub analysis: ClinicalAnalysis,
    pub recommendations: Vec<RecommendationGroup>,
    pub risk_factors: Vec<RiskFactorInsight>,
    pub follow_up: FollowUpPlan,
    pub clinical_factors: ClinicalFindings,
    pub normalized_factors: NormalizedFactors,
    pub raw_score: f64,
    pub calibrated_score: f64,
    /// False when the selected model's multiplier was not applied.
    pub calibration_applied: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model_warning: Option<String>,
}

impl RiskAssessment {
    pub fn summary(&self) -> String {
        format!(
            "{}% {} risk ({}, confidence {}%)",
            self.risk_percentage, self.risk_level, self.model_used, self.confidence
        )
    }
}
