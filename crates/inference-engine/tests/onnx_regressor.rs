//! ONNX export run through tract
//!
//! `fixtures/linear_regression.onnx` is a MatMul + Add graph over a
//! `[1, 15]` float input: coefficients `1, 2, ..., 15`, intercept `100`.

use data_validator::{MinMaxScaler, ScalerAdapter};
use feature_engine::{FeatureVector, FEATURE_DIMENSION};
use inference_engine::{load_regressor, AgeBand, InferenceError, LinearRegression, ModelRouter};
use std::path::PathBuf;

fn fixture() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/linear_regression.onnx")
}

#[test]
fn test_onnx_linear_model_predicts() {
    let model = load_regressor(&fixture()).unwrap();
    assert_eq!(model.n_features(), FEATURE_DIMENSION);

    assert_eq!(model.predict(&[0.0; FEATURE_DIMENSION]).unwrap(), vec![100.0]);
    // 100 + 0.5 * (1 + 2 + ... + 15)
    assert_eq!(model.predict(&[0.5; FEATURE_DIMENSION]).unwrap(), vec![160.0]);

    let mut row = [0.0; FEATURE_DIMENSION];
    row[14] = 1.0;
    assert_eq!(model.predict(&row).unwrap(), vec![115.0]);
}

#[test]
fn test_onnx_rejects_narrow_row() {
    let model = load_regressor(&fixture()).unwrap();
    let err = model.predict(&[0.5; 7]).unwrap_err();
    assert!(matches!(err, InferenceError::InvalidInputShape { .. }));
}

#[test]
fn test_onnx_model_serves_a_band() {
    let onnx = load_regressor(&fixture()).unwrap();
    let linear = LinearRegression::new(vec![0.0; FEATURE_DIMENSION], 1.0);
    let router = ModelRouter::new(Box::new(linear), onnx).unwrap();

    let identity = MinMaxScaler::new(vec![0.0; 7], vec![1.0; 7], (0.0, 1.0)).unwrap();
    let row = ScalerAdapter::new(Box::new(identity))
        .unwrap()
        .scale(&FeatureVector::default())
        .unwrap();

    assert_eq!(router.predict(40, &row).unwrap(), (AgeBand::Rest, 100.0));
    assert_eq!(router.predict(20, &row).unwrap(), (AgeBand::Young, 1.0));
}
