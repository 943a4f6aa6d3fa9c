//! ONNX-exported estimators run with tract

use crate::engine::Regressor;
use crate::InferenceError;
use std::path::Path;
use tract_onnx::prelude::*;
use tracing::{debug, info};

type RunFn = Box<dyn Fn(Tensor) -> TractResult<TVec<TValue>> + Send + Sync>;

/// Regressor backed by an optimized tract plan
pub struct OnnxRegressor {
    run: RunFn,
    n_features: usize,
    model_path: String,
}

impl OnnxRegressor {
    /// Load and optimize an ONNX model taking a `[1, n_features]` f32 input
    pub fn load(path: &Path, n_features: usize) -> Result<Self, InferenceError> {
        info!("Loading ONNX model: {}", path.display());

        let plan = tract_onnx::onnx()
            .model_for_path(path)
            .and_then(|model| model.with_input_fact(0, f32::fact([1, n_features]).into()))
            .and_then(|model| model.into_optimized())
            .and_then(|model| model.into_runnable())
            .map_err(|e| InferenceError::ModelLoadError(format!("{}: {}", path.display(), e)))?;

        let run: RunFn = Box::new(move |input: Tensor| plan.run(tvec!(input.into())));

        Ok(Self {
            run,
            n_features,
            model_path: path.display().to_string(),
        })
    }
}

impl Regressor for OnnxRegressor {
    fn n_features(&self) -> usize {
        self.n_features
    }

    fn predict(&self, row: &[f64]) -> Result<Vec<f64>, InferenceError> {
        if row.len() != self.n_features {
            return Err(InferenceError::InvalidInputShape {
                expected: format!("[1, {}]", self.n_features),
                actual: format!("[1, {}]", row.len()),
            });
        }

        let start = std::time::Instant::now();
        let data: Vec<f32> = row.iter().map(|v| *v as f32).collect();
        let input = Tensor::from_shape(&[1, self.n_features], &data)
            .map_err(|e| InferenceError::InferenceFailed(e.to_string()))?;

        let outputs = (self.run)(input)
            .map_err(|e| InferenceError::InferenceFailed(format!("{}: {}", self.model_path, e)))?;
        let first = outputs.first().ok_or_else(|| {
            InferenceError::InferenceFailed(format!("{} produced no outputs", self.model_path))
        })?;

        let values: Vec<f64> = first
            .cast_to::<f32>()
            .and_then(|tensor| {
                Ok(tensor
                    .as_slice::<f32>()?
                    .iter()
                    .map(|v| f64::from(*v))
                    .collect())
            })
            .map_err(|e| InferenceError::InferenceFailed(e.to_string()))?;

        debug!(
            "ONNX inference on {} completed in {}us",
            self.model_path,
            start.elapsed().as_micros()
        );
        Ok(values)
    }
}
