//! Fitted Regressor Artifacts

use crate::onnx::OnnxRegressor;
use crate::InferenceError;
use feature_engine::FEATURE_DIMENSION;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

/// A fitted regression estimator
pub trait Regressor: Send + Sync {
    /// Number of input columns the estimator was fitted on
    fn n_features(&self) -> usize;

    /// Predict for a single row, returning one value per output
    fn predict(&self, row: &[f64]) -> Result<Vec<f64>, InferenceError>;
}

fn check_width(expected: usize, row: &[f64]) -> Result<(), InferenceError> {
    if row.len() != expected {
        return Err(InferenceError::InvalidInputShape {
            expected: format!("[1, {}]", expected),
            actual: format!("[1, {}]", row.len()),
        });
    }
    Ok(())
}

/// Ordinary least squares model: `intercept + coefficients · row`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinearRegression {
    coefficients: Vec<f64>,
    intercept: f64,
}

impl LinearRegression {
    /// Create a model from fitted parameters
    pub fn new(coefficients: Vec<f64>, intercept: f64) -> Self {
        Self {
            coefficients,
            intercept,
        }
    }

    fn evaluate(&self, row: &[f64]) -> f64 {
        self.intercept
            + self
                .coefficients
                .iter()
                .zip(row)
                .map(|(c, x)| c * x)
                .sum::<f64>()
    }
}

impl Regressor for LinearRegression {
    fn n_features(&self) -> usize {
        self.coefficients.len()
    }

    fn predict(&self, row: &[f64]) -> Result<Vec<f64>, InferenceError> {
        check_width(self.n_features(), row)?;
        Ok(vec![self.evaluate(row)])
    }
}

/// Polynomial feature expansion followed by a linear stage.
///
/// Expansion terms follow scikit-learn's `PolynomialFeatures`: grouped by
/// degree, and within a degree every index combination in lexicographic
/// order (`[1, a, b, a², ab, b²]` for two inputs at degree 2).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "PolynomialParams")]
pub struct PolynomialRegression {
    n_input_features: usize,
    degree: u32,
    interaction_only: bool,
    include_bias: bool,
    linear: LinearRegression,
    /// Input indices multiplied together for each expanded term
    #[serde(skip_serializing)]
    terms: Vec<Vec<usize>>,
}

/// Parameter document for a polynomial pipeline
#[derive(Debug, Deserialize)]
struct PolynomialParams {
    n_input_features: usize,
    degree: u32,
    #[serde(default)]
    interaction_only: bool,
    #[serde(default = "default_include_bias")]
    include_bias: bool,
    linear: LinearRegression,
}

fn default_include_bias() -> bool {
    true
}

impl TryFrom<PolynomialParams> for PolynomialRegression {
    type Error = InferenceError;

    fn try_from(params: PolynomialParams) -> Result<Self, Self::Error> {
        Self::new(
            params.n_input_features,
            params.degree,
            params.interaction_only,
            params.include_bias,
            params.linear,
        )
    }
}

impl PolynomialRegression {
    /// Create a pipeline, checking the linear stage matches the expansion width
    pub fn new(
        n_input_features: usize,
        degree: u32,
        interaction_only: bool,
        include_bias: bool,
        linear: LinearRegression,
    ) -> Result<Self, InferenceError> {
        let terms = term_indices(n_input_features, degree, interaction_only, include_bias);
        if terms.len() != linear.n_features() {
            return Err(InferenceError::ModelLoadError(format!(
                "polynomial expansion yields {} terms but linear stage has {} coefficients",
                terms.len(),
                linear.n_features()
            )));
        }

        Ok(Self {
            n_input_features,
            degree,
            interaction_only,
            include_bias,
            linear,
            terms,
        })
    }

    /// Expanded feature row
    pub fn expand(&self, row: &[f64]) -> Result<Vec<f64>, InferenceError> {
        check_width(self.n_input_features, row)?;
        Ok(self
            .terms
            .iter()
            .map(|term| term.iter().map(|&i| row[i]).product::<f64>())
            .collect())
    }
}

fn term_indices(
    n_input_features: usize,
    degree: u32,
    interaction_only: bool,
    include_bias: bool,
) -> Vec<Vec<usize>> {
    fn combinations(
        n_input_features: usize,
        interaction_only: bool,
        remaining: usize,
        from: usize,
        combination: &mut Vec<usize>,
        terms: &mut Vec<Vec<usize>>,
    ) {
        if remaining == 0 {
            terms.push(combination.clone());
            return;
        }
        for index in from..n_input_features {
            combination.push(index);
            let next = if interaction_only { index + 1 } else { index };
            combinations(
                n_input_features,
                interaction_only,
                remaining - 1,
                next,
                combination,
                terms,
            );
            combination.pop();
        }
    }

    let start = if include_bias { 0 } else { 1 };
    let mut terms = Vec::new();
    for degree in start..=degree as usize {
        let mut combination = Vec::with_capacity(degree);
        combinations(
            n_input_features,
            interaction_only,
            degree,
            0,
            &mut combination,
            &mut terms,
        );
    }
    terms
}

impl Regressor for PolynomialRegression {
    fn n_features(&self) -> usize {
        self.n_input_features
    }

    fn predict(&self, row: &[f64]) -> Result<Vec<f64>, InferenceError> {
        let expanded = self.expand(row)?;
        self.linear.predict(&expanded)
    }
}

/// JSON artifact document
#[derive(Debug, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
enum RegressorArtifact {
    Linear(LinearRegression),
    Polynomial(PolynomialRegression),
}

/// Load a fitted regressor, choosing the format by file extension.
///
/// `.onnx` files run through tract; `.json` files hold a `linear` or
/// `polynomial` parameter document.
pub fn load_regressor(path: &Path) -> Result<Box<dyn Regressor>, InferenceError> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());

    let model: Box<dyn Regressor> = match extension.as_deref() {
        Some("onnx") => Box::new(OnnxRegressor::load(path, FEATURE_DIMENSION)?),
        Some("json") => {
            let json = std::fs::read_to_string(path).map_err(|e| {
                InferenceError::ModelLoadError(format!("{}: {}", path.display(), e))
            })?;
            parse_json_regressor(&json).map_err(|e| {
                InferenceError::ModelLoadError(format!("{}: {}", path.display(), e))
            })?
        }
        _ => {
            return Err(InferenceError::ModelLoadError(format!(
                "{}: unsupported model format",
                path.display()
            )))
        }
    };

    info!(
        "Loaded model {} ({} input columns)",
        path.display(),
        model.n_features()
    );
    Ok(model)
}

fn parse_json_regressor(json: &str) -> Result<Box<dyn Regressor>, InferenceError> {
    let artifact: RegressorArtifact = serde_json::from_str(json)
        .map_err(|e| InferenceError::ModelLoadError(e.to_string()))?;
    let model: Box<dyn Regressor> = match artifact {
        RegressorArtifact::Linear(model) => Box::new(model),
        RegressorArtifact::Polynomial(model) => Box::new(model),
    };
    Ok(model)
}
