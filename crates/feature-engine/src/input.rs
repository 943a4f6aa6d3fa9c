//! Raw form input

use serde::{Deserialize, Serialize};

/// One prediction request as captured by the form.
///
/// Categorical fields hold the label exactly as offered to the user
/// (e.g. `"Self-Employed"`, `"High blood pressure"`). Labels outside the
/// offered set are accepted here and encoded to their zero/baseline value
/// by the assembler.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawInput {
    /// Age in years (18-99)
    pub age: u32,
    /// Number of dependants (0-10)
    pub number_of_dependants: u32,
    /// Annual income in lakhs (1.0-100.0)
    #[serde(alias = "income_lakhs")]
    pub income: f64,
    pub gender: String,
    pub region: String,
    pub marital_status: String,
    pub bmi_category: String,
    pub smoking_status: String,
    pub employment_status: String,
    pub medical_history: String,
    pub insurance_plan: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_form_document() {
        let json = r#"{
            "age": 30,
            "number_of_dependants": 2,
            "income": 10.0,
            "gender": "Male",
            "region": "Southeast",
            "marital_status": "Married",
            "bmi_category": "Normal",
            "smoking_status": "No Smoking",
            "employment_status": "Salaried",
            "medical_history": "No Disease",
            "insurance_plan": "Gold"
        }"#;

        let input: RawInput = serde_json::from_str(json).unwrap();
        assert_eq!(input.age, 30);
        assert_eq!(input.income, 10.0);
        assert_eq!(input.smoking_status, "No Smoking");
    }

    #[test]
    fn test_income_lakhs_alias() {
        let json = r#"{
            "age": 22, "number_of_dependants": 0, "income_lakhs": 4.5,
            "gender": "Female", "region": "Northeast", "marital_status": "Unmarried",
            "bmi_category": "Obesity", "smoking_status": "Regular",
            "employment_status": "Freelancer", "medical_history": "Thyroid",
            "insurance_plan": "Bronze"
        }"#;

        let input: RawInput = serde_json::from_str(json).unwrap();
        assert_eq!(input.income, 4.5);
    }
}
