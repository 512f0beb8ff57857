//! Narrative, recommendations, factor breakdown, and follow-up plans derived from a scored
//! assessment. Everything here is a fixed lookup keyed on the risk level and raw thresholds.

mod analysis;
mod factors;
mod follow_up;
mod recommendations;

pub use analysis::{clinical_analysis, ClinicalAnalysis};
pub use factors::{risk_factor_breakdown, RiskFactorInsight};
pub use follow_up::{follow_up_plan, FollowUpPlan};
pub use recommendations::{recommendations, RecommendationGroup};
