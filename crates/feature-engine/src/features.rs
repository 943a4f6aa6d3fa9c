//! Feature Vector Assembly
//!
//! The fitted scaler and both regressors address the vector by position,
//! so the column order below must stay identical to the training frame.

use crate::categories::{
    encode_binary, encode_onehot, encode_score, LookupTable, OneHotGroup, BMI_CATEGORY,
    EMPLOYMENT_STATUS, INSURANCE_PLAN, MEDICAL_HISTORY, REGION, SMOKING_STATUS,
};
use crate::input::RawInput;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, warn};

/// Number of columns the models were trained with
pub const FEATURE_DIMENSION: usize = 15;

/// Model input columns, declared in training order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Column {
    Age,
    NumberOfDependants,
    IncomeLakhs,
    MedicalScore,
    InsurancePlanNumerical,
    EmploymentScore,
    SmokingScore,
    RegionNorthwest,
    RegionSoutheast,
    RegionSouthwest,
    MaritalStatusUnmarried,
    GenderMale,
    BmiCategoryObesity,
    BmiCategoryOverweight,
    BmiCategoryUnderweight,
}

impl Column {
    /// Every column in model order
    pub const ALL: [Column; FEATURE_DIMENSION] = [
        Column::Age,
        Column::NumberOfDependants,
        Column::IncomeLakhs,
        Column::MedicalScore,
        Column::InsurancePlanNumerical,
        Column::EmploymentScore,
        Column::SmokingScore,
        Column::RegionNorthwest,
        Column::RegionSoutheast,
        Column::RegionSouthwest,
        Column::MaritalStatusUnmarried,
        Column::GenderMale,
        Column::BmiCategoryObesity,
        Column::BmiCategoryOverweight,
        Column::BmiCategoryUnderweight,
    ];

    /// Position in the model input row
    pub fn index(self) -> usize {
        self as usize
    }

    /// Column name used by the training frame
    pub fn name(self) -> &'static str {
        match self {
            Column::Age => "age",
            Column::NumberOfDependants => "number_of_dependants",
            Column::IncomeLakhs => "income_lakhs",
            Column::MedicalScore => "medical_score",
            Column::InsurancePlanNumerical => "insurance_plan_numerical",
            Column::EmploymentScore => "employment_score",
            Column::SmokingScore => "smoking_score",
            Column::RegionNorthwest => "region_Northwest",
            Column::RegionSoutheast => "region_Southeast",
            Column::RegionSouthwest => "region_Southwest",
            Column::MaritalStatusUnmarried => "marital_status_Unmarried",
            Column::GenderMale => "gender_Male",
            Column::BmiCategoryObesity => "bmi_category_Obesity",
            Column::BmiCategoryOverweight => "bmi_category_Overweight",
            Column::BmiCategoryUnderweight => "bmi_category_Underweight",
        }
    }

    /// Look a column up by its training-frame name
    pub fn from_name(name: &str) -> Option<Column> {
        Column::ALL.into_iter().find(|column| column.name() == name)
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Ordered model input for one request
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector {
    values: [f64; FEATURE_DIMENSION],
}

impl Default for FeatureVector {
    fn default() -> Self {
        Self {
            values: [0.0; FEATURE_DIMENSION],
        }
    }
}

impl FeatureVector {
    /// Value of a single column
    pub fn get(&self, column: Column) -> f64 {
        self.values[column.index()]
    }

    /// Overwrite a single column
    pub fn set(&mut self, column: Column, value: f64) {
        self.values[column.index()] = value;
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

/// Builds the fixed-order feature vector from raw form input
#[derive(Debug, Default, Clone, Copy)]
pub struct FeatureAssembler;

impl FeatureAssembler {
    /// Create a new assembler
    pub fn new() -> Self {
        Self
    }

    /// Encode every field of `input`.
    ///
    /// Never fails: unknown labels fall back to 0 (score tables) or the
    /// baseline (one-hot groups).
    pub fn assemble(&self, input: &RawInput) -> FeatureVector {
        let mut features = FeatureVector::default();

        features.set(Column::Age, f64::from(input.age));
        features.set(
            Column::NumberOfDependants,
            f64::from(input.number_of_dependants),
        );
        features.set(Column::IncomeLakhs, input.income);

        features.set(
            Column::MedicalScore,
            score(&MEDICAL_HISTORY, &input.medical_history),
        );
        features.set(
            Column::InsurancePlanNumerical,
            score(&INSURANCE_PLAN, &input.insurance_plan),
        );
        features.set(
            Column::EmploymentScore,
            score(&EMPLOYMENT_STATUS, &input.employment_status),
        );
        features.set(
            Column::SmokingScore,
            score(&SMOKING_STATUS, &input.smoking_status),
        );

        onehot(&mut features, &REGION, &input.region);

        features.set(
            Column::MaritalStatusUnmarried,
            f64::from(encode_binary(&input.marital_status, "Unmarried")),
        );
        features.set(
            Column::GenderMale,
            f64::from(encode_binary(&input.gender, "Male")),
        );

        onehot(&mut features, &BMI_CATEGORY, &input.bmi_category);

        debug!("Model input in order:");
        for (column, value) in features.iter() {
            debug!("  {}: {}", column, value);
        }

        features
    }
}

fn score(table: &LookupTable, label: &str) -> f64 {
    if !table.contains(label) {
        warn!("Unrecognized {} '{}', encoding as 0", table.field, label);
    }
    encode_score(table, label) as f64
}

fn onehot(features: &mut FeatureVector, group: &OneHotGroup, value: &str) {
    if !group.contains(value) {
        warn!(
            "Unrecognized {} '{}', encoding as baseline {}",
            group.field, value, group.baseline
        );
    }
    for (name, flag) in encode_onehot(value, group) {
        // flag names are the training-frame column names
        if let Some(column) = Column::from_name(name) {
            features.set(column, f64::from(flag));
        }
    }
}
