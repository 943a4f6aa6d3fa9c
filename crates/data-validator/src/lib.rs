//! Data Validation and Normalization
//!
//! Provides range checking for raw form input and the fitted min-max
//! scaling applied to the numeric subset of the feature vector.

mod error;
mod normalizer;
mod validator;

pub use error::ValidationError;
pub use normalizer::{MinMaxScaler, ScaledFeatureVector, Scaler, ScalerAdapter, SCALED_COLUMNS};
pub use validator::{ValidationConfig, ValidationResult, Validator};
