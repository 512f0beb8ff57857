use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Identifiers of the fixed model catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelId {
    Ensemble,
    Gradient,
    Logistic,
    Neural,
}

impl ModelId {
    pub const ALL: [Self; 4] = [Self::Ensemble, Self::Gradient, Self::Logistic, Self::Neural];

    pub const fn key(self) -> &'static str {
        match self {
            Self::Ensemble => "ensemble",
            Self::Gradient => "gradient",
            Self::Logistic => "logistic",
            Self::Neural => "neural",
        }
    }

    const fn index(self) -> usize {
        match self {
            Self::Ensemble => 0,
            Self::Gradient => 1,
            Self::Logistic => 2,
            Self::Neural => 3,
        }
    }
}

impl fmt::Display for ModelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for ModelId {
    type Err = ConfigurationError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let trimmed = raw.trim();
        Self::ALL
            .into_iter()
            .find(|id| id.key().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| ConfigurationError::UnknownModel(trimmed.to_string()))
    }
}

/// Raised when a caller names a model outside the catalog.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigurationError {
    #[error("unknown model identifier '{0}'")]
    UnknownModel(String),
}

/// Static descriptive metadata for a catalog entry. Nothing here is trained or computed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelProfile {
    pub name: &'static str,
    pub accuracy: f64,
    pub precision: f64,
    pub recall: f64,
    pub f1_score: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auc: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub specificity: Option<f64>,
    #[serde(skip)]
    pub score_multiplier: f64,
}

impl ModelProfile {
    /// Reported confidence, `accuracy × 100` rounded.
    pub fn confidence(&self) -> u8 {
        (self.accuracy * 100.0).round().clamp(0.0, 100.0) as u8
    }
}

const STANDARD_PROFILES: [ModelProfile; 4] = [
    ModelProfile {
        name: "Ensemble Model",
        accuracy: 0.86,
        precision: 0.87,
        recall: 0.73,
        f1_score: 0.79,
        auc: Some(0.905),
        specificity: Some(0.92),
        score_multiplier: 1.10,
    },
    ModelProfile {
        name: "Gradient Boosting",
        accuracy: 0.84,
        precision: 0.83,
        recall: 0.67,
        f1_score: 0.74,
        auc: Some(0.891),
        specificity: Some(0.89),
        score_multiplier: 1.05,
    },
    ModelProfile {
        name: "Advanced Logistic Regression",
        accuracy: 0.82,
        precision: 0.85,
        recall: 0.58,
        f1_score: 0.69,
        auc: Some(0.873),
        specificity: Some(0.91),
        score_multiplier: 1.00,
    },
    ModelProfile {
        name: "Neural Network",
        accuracy: 0.81,
        precision: 0.79,
        recall: 0.71,
        f1_score: 0.75,
        auc: Some(0.885),
        specificity: Some(0.86),
        score_multiplier: 0.95,
    },
];

/// Immutable table mapping each [`ModelId`] to its profile.
#[derive(Debug, Clone, Copy)]
pub struct ModelCatalog {
    profiles: &'static [ModelProfile; 4],
}

impl ModelCatalog {
    pub const fn standard() -> Self {
        Self {
            profiles: &STANDARD_PROFILES,
        }
    }

    pub fn profile(&self, id: ModelId) -> &'static ModelProfile {
        let profiles: &'static [ModelProfile; 4] = self.profiles;
        &profiles[id.index()]
    }

    pub fn entries(&self) -> impl Iterator<Item = (ModelId, &'static ModelProfile)> + '_ {
        ModelId::ALL.into_iter().map(move |id| (id, self.profile(id)))
    }
}

impl Default for ModelCatalog {
    fn default() -> Self {
        Self::standard()
    }
}

/// Model requested for an evaluation after resolving the caller's selector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModelSelection {
    Catalog(ModelId),
    Unrecognized(String),
}

impl ModelSelection {
    /// Blank selectors resolve to `default`; unknown ones are kept so the engine can fall back.
    pub fn resolve(raw: Option<&str>, default: ModelId) -> Self {
        match raw.map(str::trim).filter(|value| !value.is_empty()) {
            None => Self::Catalog(default),
            Some(value) => match value.parse::<ModelId>() {
                Ok(id) => Self::Catalog(id),
                Err(_) => Self::Unrecognized(value.to_string()),
            },
        }
    }

    pub fn configuration_error(&self) -> Option<ConfigurationError> {
        match self {
            Self::Catalog(_) => None,
            Self::Unrecognized(raw) => Some(ConfigurationError::UnknownModel(raw.clone())),
        }
    }

    pub fn requested(&self) -> &str {
        match self {
            Self::Catalog(id) => id.key(),
            Self::Unrecognized(raw) => raw,
        }
    }
}

impl From<ModelId> for ModelSelection {
    fn from(value: ModelId) -> Self {
        Self::Catalog(value)
    }
}
