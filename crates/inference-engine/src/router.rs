//! Age-banded Model Routing

use crate::engine::Regressor;
use crate::InferenceError;
use data_validator::ScaledFeatureVector;
use feature_engine::FEATURE_DIMENSION;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Oldest age served by the young-age model
pub const YOUNG_AGE_THRESHOLD: u32 = 25;

/// Which fitted model serves a request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AgeBand {
    /// Age 25 and under, polynomial pipeline
    Young,
    /// Everyone older
    Rest,
}

impl AgeBand {
    /// Band for a raw (unscaled) age
    pub fn for_age(age: u32) -> Self {
        if age <= YOUNG_AGE_THRESHOLD {
            AgeBand::Young
        } else {
            AgeBand::Rest
        }
    }

    /// Get string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            AgeBand::Young => "young",
            AgeBand::Rest => "rest",
        }
    }

    /// Static performance note shown next to the premium
    pub fn disclaimer(&self) -> &'static str {
        match self {
            AgeBand::Young => {
                "Model Performance (age ≤ 25): Accuracy ~60%, limited predictions due to smaller dataset"
            }
            AgeBand::Rest => {
                "Model Performance (age > 25): Accuracy ~95%, ~78% predictions within ±10% error"
            }
        }
    }

    /// Whether quotes from this band carry the low-accuracy warning
    pub fn is_low_confidence(&self) -> bool {
        matches!(self, AgeBand::Young)
    }
}

/// Dispatches a scaled row to the young-age or rest model
pub struct ModelRouter {
    young: Box<dyn Regressor>,
    rest: Box<dyn Regressor>,
}

impl ModelRouter {
    /// Create a router; both models must accept the full model row
    pub fn new(young: Box<dyn Regressor>, rest: Box<dyn Regressor>) -> Result<Self, InferenceError> {
        for (band, model) in [(AgeBand::Young, &young), (AgeBand::Rest, &rest)] {
            if model.n_features() != FEATURE_DIMENSION {
                return Err(InferenceError::ModelLoadError(format!(
                    "{} model expects {} columns, model row has {}",
                    band.as_str(),
                    model.n_features(),
                    FEATURE_DIMENSION
                )));
            }
        }
        info!("Model router ready (young model for age <= {})", YOUNG_AGE_THRESHOLD);
        Ok(Self { young, rest })
    }

    fn model(&self, band: AgeBand) -> &dyn Regressor {
        match band {
            AgeBand::Young => self.young.as_ref(),
            AgeBand::Rest => self.rest.as_ref(),
        }
    }

    /// Predict with the model selected by the raw age
    pub fn predict(
        &self,
        age: u32,
        features: &ScaledFeatureVector,
    ) -> Result<(AgeBand, f64), InferenceError> {
        let band = AgeBand::for_age(age);
        debug!("Routing age {} to {} model", age, band.as_str());

        let outputs = self.model(band).predict(features.as_slice())?;
        let amount = outputs.first().copied().ok_or_else(|| {
            InferenceError::InferenceFailed(format!("{} model returned no prediction", band.as_str()))
        })?;

        Ok((band, amount))
    }
}
