use criterion::{black_box, criterion_group, criterion_main, Criterion};
use data_validator::MinMaxScaler;
use feature_engine::{FeatureAssembler, RawInput, FEATURE_DIMENSION};
use inference_engine::{
    LinearRegression, ModelArtifacts, PolynomialRegression, PremiumPredictor,
};

fn applicant(age: u32) -> RawInput {
    RawInput {
        age,
        number_of_dependants: 3,
        income: 42.5,
        gender: "Female".to_string(),
        region: "Northwest".to_string(),
        marital_status: "Unmarried".to_string(),
        bmi_category: "Overweight".to_string(),
        smoking_status: "Occasional".to_string(),
        employment_status: "Self-Employed".to_string(),
        medical_history: "Diabetes & High blood pressure".to_string(),
        insurance_plan: "Silver".to_string(),
    }
}

fn predictor() -> PremiumPredictor {
    let scaler = MinMaxScaler::new(
        vec![18.0, 0.0, 1.0, 0.0, 1.0, 1.0, 1.0],
        vec![99.0, 5.0, 100.0, 7.0, 3.0, 3.0, 3.0],
        (0.0, 1.0),
    )
    .expect("scaler bounds");
    let young = PolynomialRegression::new(
        FEATURE_DIMENSION,
        2,
        false,
        true,
        LinearRegression::new(vec![0.5; 136], 100.0),
    )
    .expect("young model");
    let rest = LinearRegression::new(vec![1.5; FEATURE_DIMENSION], 200.0);

    PremiumPredictor::new(ModelArtifacts {
        young: Box::new(young),
        rest: Box::new(rest),
        scaler: Box::new(scaler),
    })
    .expect("predictor")
}

fn bench_pipeline(c: &mut Criterion) {
    let predictor = predictor();
    let assembler = FeatureAssembler::new();
    let young = applicant(22);
    let rest = applicant(47);

    c.bench_function("assemble", |b| b.iter(|| assembler.assemble(black_box(&rest))));
    c.bench_function("predict_rest", |b| {
        b.iter(|| predictor.predict(black_box(&rest)))
    });
    c.bench_function("predict_young", |b| {
        b.iter(|| predictor.predict(black_box(&young)))
    });
}

criterion_group!(benches, bench_pipeline);
criterion_main!(benches);
