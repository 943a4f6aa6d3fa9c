//! Premium Prediction Pipeline
//!
//! raw input → encode/assemble → scale subset → route by age → premium

use crate::engine::{load_regressor, Regressor};
use crate::router::{AgeBand, ModelRouter};
use crate::InferenceError;
use data_validator::{MinMaxScaler, ScaledFeatureVector, Scaler, ScalerAdapter};
use feature_engine::{FeatureAssembler, FeatureVector, RawInput};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info};

/// The three fitted artifacts a predictor needs
pub struct ModelArtifacts {
    /// Model for age 25 and under
    pub young: Box<dyn Regressor>,
    /// Model for everyone older
    pub rest: Box<dyn Regressor>,
    /// Min-max scaler for the numeric subset
    pub scaler: Box<dyn Scaler>,
}

impl ModelArtifacts {
    /// Load all three artifacts from disk
    pub fn load(young: &Path, rest: &Path, scaler: &Path) -> Result<Self, InferenceError> {
        let young = load_regressor(young)?;
        let rest = load_regressor(rest)?;
        let scaler = MinMaxScaler::load(scaler)
            .map_err(|e| InferenceError::ModelLoadError(e.to_string()))?;

        Ok(Self {
            young,
            rest,
            scaler: Box::new(scaler),
        })
    }
}

/// Predicted premium for one request
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PremiumQuote {
    /// Band whose model produced the amount
    pub band: AgeBand,
    /// Unrounded model output
    pub amount: f64,
}

impl PremiumQuote {
    /// Amount rounded to one decimal place for display.
    ///
    /// Exact ties round to even, on the exact binary value of the amount.
    pub fn rounded(&self) -> f64 {
        format!("{:.1}", self.amount)
            .parse()
            .unwrap_or(self.amount)
    }

    /// Static performance note for the serving model
    pub fn disclaimer(&self) -> &'static str {
        self.band.disclaimer()
    }
}

/// End-to-end premium predictor over loaded artifacts
pub struct PremiumPredictor {
    assembler: FeatureAssembler,
    scaler: ScalerAdapter,
    router: ModelRouter,
}

impl PremiumPredictor {
    /// Create a predictor, validating the artifacts against the model row
    pub fn new(artifacts: ModelArtifacts) -> Result<Self, InferenceError> {
        let scaler = ScalerAdapter::new(artifacts.scaler)
            .map_err(|e| InferenceError::ModelLoadError(format!("scaler: {}", e)))?;
        let router = ModelRouter::new(artifacts.young, artifacts.rest)?;

        info!("Premium predictor initialized");
        Ok(Self {
            assembler: FeatureAssembler::new(),
            scaler,
            router,
        })
    }

    /// Encoded and scaled model rows for `input`
    pub fn prepare(
        &self,
        input: &RawInput,
    ) -> Result<(FeatureVector, ScaledFeatureVector), InferenceError> {
        let features = self.assembler.assemble(input);
        let scaled = self.scaler.scale(&features)?;
        for (column, value) in scaled.iter() {
            debug!("scaled {} = {}", column, value);
        }
        Ok((features, scaled))
    }

    /// Predict the premium for one request
    pub fn predict(&self, input: &RawInput) -> Result<PremiumQuote, InferenceError> {
        let start = std::time::Instant::now();

        let (_, scaled) = self.prepare(input)?;
        let (band, amount) = self.router.predict(input.age, &scaled)?;

        debug!(
            "Predicted {} with {} model in {}us",
            amount,
            band.as_str(),
            start.elapsed().as_micros()
        );
        Ok(PremiumQuote { band, amount })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rounding() {
        let quote = PremiumQuote {
            band: AgeBand::Rest,
            amount: 12345.678,
        };
        assert_eq!(quote.rounded(), 12345.7);

        let quote = PremiumQuote {
            band: AgeBand::Young,
            amount: 9876.04,
        };
        assert_eq!(quote.rounded(), 9876.0);
        assert!(quote.disclaimer().contains("age ≤ 25"));
    }

    #[test]
    fn test_rounding_ties_go_to_even() {
        let rounded = |amount| PremiumQuote {
            band: AgeBand::Rest,
            amount,
        }
        .rounded();

        assert_eq!(rounded(6100.25), 6100.2);
        assert_eq!(rounded(0.25), 0.2);
        assert_eq!(rounded(6100.75), 6100.8);
        // 0.35 is stored just below the tie
        assert_eq!(rounded(0.35), 0.3);
    }

    #[test]
    fn test_missing_artifact_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let result = ModelArtifacts::load(
            &dir.path().join("poly_model_pipeline.json"),
            &dir.path().join("reg_model_rest.json"),
            &dir.path().join("minmax_scaler.json"),
        );
        assert!(matches!(result, Err(InferenceError::ModelLoadError(_))));
    }
}
