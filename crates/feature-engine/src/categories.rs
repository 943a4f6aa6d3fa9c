//! Categorical Encoding
//!
//! Fixed lookup tables and one-hot groups that turn the form's categorical
//! selections into numbers. Every encoder here is total: a label that is not
//! in a table encodes to 0, and a value outside a one-hot group clears every
//! flag, exactly like the baseline category.

/// Ordinal score table for one categorical field
#[derive(Debug, Clone, Copy)]
pub struct LookupTable {
    /// Field the table encodes
    pub field: &'static str,
    /// Label to score pairs, in the order the form offers them
    entries: &'static [(&'static str, i64)],
}

impl LookupTable {
    /// Score for `label`, or `None` when the table does not know it
    pub fn get(&self, label: &str) -> Option<i64> {
        self.entries
            .iter()
            .find(|(known, _)| *known == label)
            .map(|(_, score)| *score)
    }

    /// Whether `label` is one of the table's labels
    pub fn contains(&self, label: &str) -> bool {
        self.get(label).is_some()
    }

    /// All labels known to the table
    pub fn labels(&self) -> impl Iterator<Item = &'static str> {
        self.entries.iter().map(|(label, _)| *label)
    }
}

/// Medical history severity score
pub const MEDICAL_HISTORY: LookupTable = LookupTable {
    field: "medical_history",
    entries: &[
        ("No Disease", 0),
        ("Thyroid", 1),
        ("High blood pressure", 2),
        ("Diabetes", 3),
        ("Heart disease", 4),
        ("Diabetes & Thyroid", 4),
        ("Diabetes & High blood pressure", 5),
        ("High blood pressure & Heart disease", 6),
        ("Diabetes & Heart disease", 7),
    ],
};

/// Insurance plan tier
pub const INSURANCE_PLAN: LookupTable = LookupTable {
    field: "insurance_plan",
    entries: &[("Bronze", 1), ("Silver", 2), ("Gold", 3)],
};

/// Employment status score
pub const EMPLOYMENT_STATUS: LookupTable = LookupTable {
    field: "employment_status",
    entries: &[("Freelancer", 1), ("Self-Employed", 2), ("Salaried", 3)],
};

/// Smoking status score
pub const SMOKING_STATUS: LookupTable = LookupTable {
    field: "smoking_status",
    entries: &[("No Smoking", 1), ("Occasional", 2), ("Regular", 3)],
};

/// One-hot group with a dropped baseline category
#[derive(Debug, Clone, Copy)]
pub struct OneHotGroup {
    /// Field the group encodes
    pub field: &'static str,
    /// Category represented by all flags cleared
    pub baseline: &'static str,
    /// Non-baseline category and the column name of its flag
    flags: &'static [(&'static str, &'static str)],
}

impl OneHotGroup {
    /// Whether `value` is the baseline or one of the flagged categories
    pub fn contains(&self, value: &str) -> bool {
        value == self.baseline || self.flags.iter().any(|(category, _)| *category == value)
    }

    /// All categories of the group, baseline included
    pub fn labels(&self) -> impl Iterator<Item = &'static str> {
        self.flags
            .iter()
            .map(|(category, _)| *category)
            .chain(std::iter::once(self.baseline))
    }

    /// Flag column names in encoding order
    pub fn flag_names(&self) -> impl Iterator<Item = &'static str> {
        self.flags.iter().map(|(_, column)| *column)
    }
}

/// Region, Northeast baseline
pub const REGION: OneHotGroup = OneHotGroup {
    field: "region",
    baseline: "Northeast",
    flags: &[
        ("Northwest", "region_Northwest"),
        ("Southeast", "region_Southeast"),
        ("Southwest", "region_Southwest"),
    ],
};

/// BMI category, Normal baseline
pub const BMI_CATEGORY: OneHotGroup = OneHotGroup {
    field: "bmi_category",
    baseline: "Normal",
    flags: &[
        ("Obesity", "bmi_category_Obesity"),
        ("Overweight", "bmi_category_Overweight"),
        ("Underweight", "bmi_category_Underweight"),
    ],
};

/// Labels offered for gender
pub const GENDERS: &[&str] = &["Male", "Female"];

/// Labels offered for marital status
pub const MARITAL_STATUSES: &[&str] = &["Unmarried", "Married"];

/// Score `label` through `table`, defaulting to 0 for unknown labels
pub fn encode_score(table: &LookupTable, label: &str) -> i64 {
    table.get(label).unwrap_or(0)
}

/// 1 iff `value` equals `matching`
pub fn encode_binary(value: &str, matching: &str) -> u8 {
    u8::from(value == matching)
}

/// One flag per non-baseline category of `group`, in the group's order
pub fn encode_onehot(value: &str, group: &OneHotGroup) -> Vec<(&'static str, u8)> {
    group
        .flags
        .iter()
        .map(|(category, column)| (*column, encode_binary(value, category)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_lookup_scores() {
        assert_eq!(encode_score(&MEDICAL_HISTORY, "No Disease"), 0);
        assert_eq!(encode_score(&MEDICAL_HISTORY, "Diabetes & Thyroid"), 4);
        assert_eq!(encode_score(&MEDICAL_HISTORY, "Heart disease"), 4);
        assert_eq!(encode_score(&MEDICAL_HISTORY, "Diabetes & Heart disease"), 7);
        assert_eq!(encode_score(&INSURANCE_PLAN, "Gold"), 3);
        assert_eq!(encode_score(&EMPLOYMENT_STATUS, "Freelancer"), 1);
        assert_eq!(encode_score(&SMOKING_STATUS, "Regular"), 3);
        assert_eq!(encode_score(&SMOKING_STATUS, "No Smoking"), 1);
    }

    #[test]
    fn test_unknown_label_scores_zero() {
        assert_eq!(encode_score(&MEDICAL_HISTORY, "Asthma"), 0);
        assert_eq!(encode_score(&INSURANCE_PLAN, ""), 0);
        // labels are case sensitive
        assert_eq!(encode_score(&INSURANCE_PLAN, "gold"), 0);
    }

    #[test]
    fn test_binary() {
        assert_eq!(encode_binary("Male", "Male"), 1);
        assert_eq!(encode_binary("Female", "Male"), 0);
        assert_eq!(encode_binary("Unmarried", "Unmarried"), 1);
        assert_eq!(encode_binary("", "Unmarried"), 0);
    }

    #[test]
    fn test_onehot_baseline_clears_all_flags() {
        let flags = encode_onehot("Northeast", &REGION);
        assert_eq!(flags.len(), 3);
        assert!(flags.iter().all(|(_, flag)| *flag == 0));

        let flags = encode_onehot("Normal", &BMI_CATEGORY);
        assert!(flags.iter().all(|(_, flag)| *flag == 0));
    }

    #[test]
    fn test_onehot_sets_matching_flag() {
        let flags = encode_onehot("Southeast", &REGION);
        assert_eq!(
            flags,
            vec![
                ("region_Northwest", 0),
                ("region_Southeast", 1),
                ("region_Southwest", 0),
            ]
        );
    }

    #[test]
    fn test_group_labels_include_baseline() {
        let labels: Vec<_> = BMI_CATEGORY.labels().collect();
        assert_eq!(labels.len(), 4);
        assert!(labels.contains(&"Normal"));
        assert!(BMI_CATEGORY.contains("Underweight"));
        assert!(!BMI_CATEGORY.contains("Athletic"));
    }

    proptest! {
        #[test]
        fn prop_encode_score_in_table_or_zero(label in ".*") {
            for table in [&MEDICAL_HISTORY, &INSURANCE_PLAN, &EMPLOYMENT_STATUS, &SMOKING_STATUS] {
                let score = encode_score(table, &label);
                prop_assert!(score == 0 || table.entries.iter().any(|(_, s)| *s == score));
            }
        }

        #[test]
        fn prop_onehot_at_most_one_flag(value in prop_oneof![
            Just("Northwest".to_string()),
            Just("Southeast".to_string()),
            Just("Northeast".to_string()),
            Just("Southwest".to_string()),
            Just("Normal".to_string()),
            Just("Obesity".to_string()),
            Just("Overweight".to_string()),
            Just("Underweight".to_string()),
            ".*",
        ]) {
            for group in [&REGION, &BMI_CATEGORY] {
                let set: u32 = encode_onehot(&value, group).iter().map(|(_, f)| u32::from(*f)).sum();
                let expected = u32::from(group.contains(&value) && value != group.baseline);
                prop_assert_eq!(set, expected);
            }
        }
    }
}
