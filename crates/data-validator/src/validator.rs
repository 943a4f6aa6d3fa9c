//! Form Input Validator

use crate::error::ValidationError;
use feature_engine::categories::{
    BMI_CATEGORY, EMPLOYMENT_STATUS, GENDERS, INSURANCE_PLAN, MARITAL_STATUSES, MEDICAL_HISTORY,
    REGION, SMOKING_STATUS,
};
use feature_engine::RawInput;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Validation configuration, matching the form's widget bounds
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationConfig {
    /// Age valid range (years)
    pub age_range: (f64, f64),
    /// Dependants valid range
    pub dependants_range: (f64, f64),
    /// Income valid range (lakhs)
    pub income_range: (f64, f64),
    /// Reject labels the form does not offer instead of encoding them as 0
    pub strict_categories: bool,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            age_range: (18.0, 99.0),
            dependants_range: (0.0, 10.0),
            income_range: (1.0, 100.0),
            strict_categories: false,
        }
    }
}

/// Result of validation
#[derive(Debug, Clone)]
pub struct ValidationResult {
    /// Whether all values are valid
    pub valid: bool,
    /// List of validation errors
    pub errors: Vec<ValidationError>,
    /// Number of fields validated
    pub fields_checked: usize,
}

impl ValidationResult {
    /// Create a valid result
    pub fn valid(fields_checked: usize) -> Self {
        Self {
            valid: true,
            errors: Vec::new(),
            fields_checked,
        }
    }

    /// Create an invalid result with errors
    pub fn invalid(errors: Vec<ValidationError>, fields_checked: usize) -> Self {
        Self {
            valid: false,
            errors,
            fields_checked,
        }
    }
}

/// Validator for raw form input
pub struct Validator {
    config: ValidationConfig,
}

impl Validator {
    /// Create a new validator with given config
    pub fn new(config: ValidationConfig) -> Self {
        Self { config }
    }

    /// Validate a single value against a range
    pub fn validate_range(
        &self,
        field: &'static str,
        value: f64,
        range: (f64, f64),
    ) -> Result<(), ValidationError> {
        // NaN is never contained
        if (range.0..=range.1).contains(&value) {
            Ok(())
        } else {
            Err(ValidationError::OutOfRange {
                field,
                value,
                min: range.0,
                max: range.1,
            })
        }
    }

    /// Validate age
    pub fn validate_age(&self, age: u32) -> Result<(), ValidationError> {
        self.validate_range("age", f64::from(age), self.config.age_range)
    }

    /// Validate number of dependants
    pub fn validate_dependants(&self, dependants: u32) -> Result<(), ValidationError> {
        self.validate_range(
            "number_of_dependants",
            f64::from(dependants),
            self.config.dependants_range,
        )
    }

    /// Validate income
    pub fn validate_income(&self, income: f64) -> Result<(), ValidationError> {
        self.validate_range("income", income, self.config.income_range)
    }

    /// Validate a categorical label against the labels the form offers
    pub fn validate_category<'a>(
        &self,
        field: &'static str,
        label: &str,
        mut offered: impl Iterator<Item = &'a str>,
    ) -> Result<(), ValidationError> {
        if offered.any(|known| known == label) {
            Ok(())
        } else {
            Err(ValidationError::UnknownCategory {
                field,
                label: label.to_string(),
            })
        }
    }

    /// Validate every field of a request, collecting all failures
    pub fn validate_input(&self, input: &RawInput) -> ValidationResult {
        let mut errors = Vec::new();
        let mut fields_checked = 3;

        errors.extend(self.validate_age(input.age).err());
        errors.extend(self.validate_dependants(input.number_of_dependants).err());
        errors.extend(self.validate_income(input.income).err());

        if self.config.strict_categories {
            let checks = [
                self.validate_category("gender", &input.gender, GENDERS.iter().copied()),
                self.validate_category("region", &input.region, REGION.labels()),
                self.validate_category(
                    "marital_status",
                    &input.marital_status,
                    MARITAL_STATUSES.iter().copied(),
                ),
                self.validate_category("bmi_category", &input.bmi_category, BMI_CATEGORY.labels()),
                self.validate_category(
                    "smoking_status",
                    &input.smoking_status,
                    SMOKING_STATUS.labels(),
                ),
                self.validate_category(
                    "employment_status",
                    &input.employment_status,
                    EMPLOYMENT_STATUS.labels(),
                ),
                self.validate_category(
                    "medical_history",
                    &input.medical_history,
                    MEDICAL_HISTORY.labels(),
                ),
                self.validate_category(
                    "insurance_plan",
                    &input.insurance_plan,
                    INSURANCE_PLAN.labels(),
                ),
            ];
            fields_checked += checks.len();
            for result in checks {
                if let Err(err) = result {
                    debug!("Rejecting input: {}", err);
                    errors.push(err);
                }
            }
        }

        if errors.is_empty() {
            ValidationResult::valid(fields_checked)
        } else {
            ValidationResult::invalid(errors, fields_checked)
        }
    }
}

impl Default for Validator {
    fn default() -> Self {
        Self::new(ValidationConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_input() -> RawInput {
        RawInput {
            age: 30,
            number_of_dependants: 2,
            income: 10.0,
            gender: "Male".to_string(),
            region: "Southeast".to_string(),
            marital_status: "Married".to_string(),
            bmi_category: "Normal".to_string(),
            smoking_status: "No Smoking".to_string(),
            employment_status: "Salaried".to_string(),
            medical_history: "No Disease".to_string(),
            insurance_plan: "Gold".to_string(),
        }
    }

    #[test]
    fn test_age_bounds() {
        let validator = Validator::default();
        assert!(validator.validate_age(18).is_ok());
        assert!(validator.validate_age(99).is_ok());
        assert!(validator.validate_age(17).is_err());
        assert!(validator.validate_age(100).is_err());
    }

    #[test]
    fn test_income_bounds() {
        let validator = Validator::default();
        assert!(validator.validate_income(1.0).is_ok());
        assert!(validator.validate_income(100.0).is_ok());
        assert!(validator.validate_income(0.5).is_err());
        assert!(validator.validate_income(f64::NAN).is_err());
    }

    #[test]
    fn test_dependants_bounds() {
        let validator = Validator::default();
        assert!(validator.validate_dependants(0).is_ok());
        assert!(validator.validate_dependants(10).is_ok());
        assert!(validator.validate_dependants(11).is_err());
    }

    #[test]
    fn test_valid_input() {
        let result = Validator::default().validate_input(&sample_input());
        assert!(result.valid);
        assert_eq!(result.fields_checked, 3);
    }

    #[test]
    fn test_collects_every_range_error() {
        let mut input = sample_input();
        input.age = 12;
        input.income = 250.0;

        let result = Validator::default().validate_input(&input);
        assert!(!result.valid);
        assert_eq!(result.errors.len(), 2);
    }

    #[test]
    fn test_unknown_category_allowed_by_default() {
        let mut input = sample_input();
        input.medical_history = "Asthma".to_string();

        assert!(Validator::default().validate_input(&input).valid);
    }

    #[test]
    fn test_strict_categories_rejects_unknown_label() {
        let validator = Validator::new(ValidationConfig {
            strict_categories: true,
            ..Default::default()
        });
        assert!(validator.validate_input(&sample_input()).valid);

        let mut input = sample_input();
        input.medical_history = "Asthma".to_string();
        input.region = "Central".to_string();

        let result = validator.validate_input(&input);
        assert!(!result.valid);
        assert_eq!(result.fields_checked, 11);
        assert!(matches!(
            result.errors[0],
            ValidationError::UnknownCategory { field: "region", .. }
        ));
        assert_eq!(result.errors.len(), 2);
    }

    #[test]
    fn test_strict_accepts_baseline_categories() {
        let validator = Validator::new(ValidationConfig {
            strict_categories: true,
            ..Default::default()
        });
        let mut input = sample_input();
        input.region = "Northeast".to_string();
        input.bmi_category = "Normal".to_string();

        assert!(validator.validate_input(&input).valid);
    }
}
