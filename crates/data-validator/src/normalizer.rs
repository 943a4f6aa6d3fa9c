//! Fitted Min-Max Scaling
//!
//! The scaler was fitted on a seven-column frame whose column order differs
//! from the model input: `insurance_plan_numerical` comes last. The adapter
//! gathers columns in the scaler's order and writes each result back to its
//! own position in the model row.

use crate::error::ValidationError;
use feature_engine::{Column, FeatureVector, FEATURE_DIMENSION};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info};

/// Columns the scaler transforms, in the order it was fitted with
pub const SCALED_COLUMNS: [Column; 7] = [
    Column::Age,
    Column::NumberOfDependants,
    Column::IncomeLakhs,
    Column::MedicalScore,
    Column::EmploymentScore,
    Column::SmokingScore,
    Column::InsurancePlanNumerical,
];

/// A fitted column transform
pub trait Scaler: Send + Sync {
    /// Number of input columns the transform was fitted on
    fn n_features(&self) -> usize;

    /// Column names recorded at fit time, when the artifact carries them
    fn feature_names(&self) -> Option<&[String]> {
        None
    }

    /// Transform one row
    fn transform(&self, row: &[f64]) -> Result<Vec<f64>, ValidationError>;
}

fn default_feature_range() -> (f64, f64) {
    (0.0, 1.0)
}

/// Min-max scaler with parameters learned during training.
///
/// Columns whose fitted range is below `10 * f64::EPSILON` are treated as
/// constant and keep unit scale, matching scikit-learn.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MinMaxScaler {
    /// Per-column minimum seen during fit
    data_min: Vec<f64>,
    /// Per-column maximum seen during fit
    data_max: Vec<f64>,
    /// Target range
    #[serde(default = "default_feature_range")]
    feature_range: (f64, f64),
    /// Column names seen during fit
    #[serde(default, alias = "feature_names_in")]
    feature_names: Option<Vec<String>>,
    /// Clamp transformed values to `feature_range`
    #[serde(default)]
    clip: bool,
}

impl MinMaxScaler {
    /// Create a scaler from fitted parameters
    pub fn new(
        data_min: Vec<f64>,
        data_max: Vec<f64>,
        feature_range: (f64, f64),
    ) -> Result<Self, ValidationError> {
        let scaler = Self {
            data_min,
            data_max,
            feature_range,
            feature_names: None,
            clip: false,
        };
        scaler.check()?;
        Ok(scaler)
    }

    /// Attach the column names seen at fit time
    pub fn with_feature_names(mut self, names: Vec<String>) -> Result<Self, ValidationError> {
        if names.len() != self.data_min.len() {
            return Err(ValidationError::ShapeMismatch {
                expected: self.data_min.len(),
                actual: names.len(),
            });
        }
        self.feature_names = Some(names);
        Ok(self)
    }

    /// Clamp transformed values to the target range, as `clip=True` does
    pub fn with_clip(mut self, clip: bool) -> Self {
        self.clip = clip;
        self
    }

    /// Parse fitted parameters from JSON
    pub fn from_json_str(json: &str) -> Result<Self, ValidationError> {
        let scaler: Self = serde_json::from_str(json)
            .map_err(|e| ValidationError::InvalidFormat(format!("scaler artifact: {}", e)))?;
        scaler.check()?;
        Ok(scaler)
    }

    /// Load fitted parameters from a JSON file
    pub fn load(path: &Path) -> Result<Self, ValidationError> {
        let json = std::fs::read_to_string(path).map_err(|e| ValidationError::ArtifactLoad {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        let scaler = Self::from_json_str(&json).map_err(|e| ValidationError::ArtifactLoad {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        info!(
            "Loaded min-max scaler from {} ({} columns)",
            path.display(),
            scaler.n_features()
        );
        Ok(scaler)
    }

    fn check(&self) -> Result<(), ValidationError> {
        if self.data_min.len() != self.data_max.len() {
            return Err(ValidationError::ShapeMismatch {
                expected: self.data_min.len(),
                actual: self.data_max.len(),
            });
        }
        if let Some(names) = &self.feature_names {
            if names.len() != self.data_min.len() {
                return Err(ValidationError::ShapeMismatch {
                    expected: self.data_min.len(),
                    actual: names.len(),
                });
            }
        }
        let (low, high) = self.feature_range;
        if low.is_nan() || high.is_nan() || low >= high {
            return Err(ValidationError::InvalidFormat(format!(
                "feature_range ({}, {}) is empty",
                low, high
            )));
        }
        if let Some(value) = self
            .data_min
            .iter()
            .chain(self.data_max.iter())
            .find(|v| !v.is_finite())
        {
            return Err(ValidationError::InvalidFormat(format!(
                "fitted bound {} is not finite",
                value
            )));
        }
        Ok(())
    }

    fn column_label(&self, position: usize) -> String {
        self.feature_names
            .as_ref()
            .and_then(|names| names.get(position).cloned())
            .unwrap_or_else(|| format!("column {}", position))
    }
}

impl Scaler for MinMaxScaler {
    fn n_features(&self) -> usize {
        self.data_min.len()
    }

    fn feature_names(&self) -> Option<&[String]> {
        self.feature_names.as_deref()
    }

    fn transform(&self, row: &[f64]) -> Result<Vec<f64>, ValidationError> {
        if row.len() != self.n_features() {
            return Err(ValidationError::ShapeMismatch {
                expected: self.n_features(),
                actual: row.len(),
            });
        }

        let (low, high) = self.feature_range;
        row.iter()
            .zip(self.data_min.iter().zip(self.data_max.iter()))
            .enumerate()
            .map(|(position, (&value, (&min, &max)))| {
                if !value.is_finite() {
                    return Err(ValidationError::NonFinite {
                        column: self.column_label(position),
                        value,
                    });
                }
                // near-constant columns keep unit scale
                let range = max - min;
                let range = if range < 10.0 * f64::EPSILON { 1.0 } else { range };
                let scale = (high - low) / range;
                let scaled = value * scale + (low - min * scale);
                Ok(if self.clip { scaled.clamp(low, high) } else { scaled })
            })
            .collect()
    }
}

/// Model row after scaling
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScaledFeatureVector {
    values: [f64; FEATURE_DIMENSION],
}

impl ScaledFeatureVector {
    /// Value of a single column
    pub fn get(&self, column: Column) -> f64 {
        self.values[column.index()]
    }

    /// Row in model order
    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }

    /// Column/value pairs in model order
    pub fn iter(&self) -> impl Iterator<Item = (Column, f64)> + '_ {
        Column::ALL.into_iter().zip(self.values.iter().copied())
    }
}

/// Applies a fitted scaler to the scaled subset of a feature vector
pub struct ScalerAdapter {
    scaler: Box<dyn Scaler>,
}

impl ScalerAdapter {
    /// Wrap a fitted scaler, checking it was fitted on the scaled subset
    pub fn new(scaler: Box<dyn Scaler>) -> Result<Self, ValidationError> {
        if scaler.n_features() != SCALED_COLUMNS.len() {
            return Err(ValidationError::ShapeMismatch {
                expected: SCALED_COLUMNS.len(),
                actual: scaler.n_features(),
            });
        }

        if let Some(names) = scaler.feature_names() {
            let expected: Vec<String> = SCALED_COLUMNS
                .iter()
                .map(|column| column.name().to_string())
                .collect();
            if names != expected.as_slice() {
                return Err(ValidationError::ColumnOrderMismatch {
                    expected,
                    actual: names.to_vec(),
                });
            }
        }

        Ok(Self { scaler })
    }

    /// Scale the designated columns, passing the flags through
    pub fn scale(&self, features: &FeatureVector) -> Result<ScaledFeatureVector, ValidationError> {
        let subset: Vec<f64> = SCALED_COLUMNS
            .iter()
            .map(|column| features.get(*column))
            .collect();

        let scaled = self.scaler.transform(&subset)?;
        if scaled.len() != SCALED_COLUMNS.len() {
            return Err(ValidationError::ShapeMismatch {
                expected: SCALED_COLUMNS.len(),
                actual: scaled.len(),
            });
        }

        let mut values = [0.0; FEATURE_DIMENSION];
        values.copy_from_slice(features.as_slice());
        for (column, value) in SCALED_COLUMNS.iter().zip(scaled) {
            if !value.is_finite() {
                return Err(ValidationError::NonFinite {
                    column: column.name().to_string(),
                    value,
                });
            }
            values[column.index()] = value;
        }

        debug!("Scaled model input: {:?}", values);
        Ok(ScaledFeatureVector { values })
    }
}
