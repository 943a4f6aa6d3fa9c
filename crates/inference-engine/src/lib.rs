//! Premium Inference Engine
//!
//! Loads the fitted regressors, routes each request to the young-age or
//! rest model by age, and runs the full encode/scale/predict pipeline.

mod engine;
mod onnx;
mod pipeline;
mod router;

pub use engine::{load_regressor, LinearRegression, PolynomialRegression, Regressor};
pub use onnx::OnnxRegressor;
pub use pipeline::{ModelArtifacts, PremiumPredictor, PremiumQuote};
pub use router::{AgeBand, ModelRouter, YOUNG_AGE_THRESHOLD};

use data_validator::ValidationError;
use thiserror::Error;

/// Errors during inference
#[derive(Debug, Error)]
pub enum InferenceError {
    #[error("Model load failed: {0}")]
    ModelLoadError(String),
    #[error("Inference failed: {0}")]
    InferenceFailed(String),
    #[error("Invalid input shape: expected {expected}, got {actual}")]
    InvalidInputShape { expected: String, actual: String },
    #[error("Scaling failed: {0}")]
    Scaling(#[from] ValidationError),
}
