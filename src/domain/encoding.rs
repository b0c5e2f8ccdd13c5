//! Field encoding tables.
//!
//! Each categorical field has a fixed, total mapping from its label to the
//! numeric code the classifier was trained against. The tables are versioned
//! configuration rather than scattered literals: a retrained model ships with
//! its own table set, keeping training and inference in lock-step.

use crate::domain::features::BaseFeatures;
use crate::domain::patient::PatientInput;

/// Error type for field encoding.
#[derive(Debug, thiserror::Error)]
pub enum EncodingError {
    #[error("Unknown category {label:?} for field {field}")]
    UnknownCategory { field: &'static str, label: String },
}

/// One field's label-to-code table. Exact key match only; no normalization,
/// no fuzzy matching.
#[derive(Debug, Clone, Copy)]
pub struct CodeTable {
    pub field: &'static str,
    pub entries: &'static [(&'static str, f64)],
}

impl CodeTable {
    /// Look up the code for a label.
    ///
    /// # Errors
    /// Returns `EncodingError::UnknownCategory` if the label is not a key of
    /// the table. The intake enums make this unreachable in practice, but the
    /// lookup stays checked.
    pub fn code(&self, label: &str) -> Result<f64, EncodingError> {
        self.entries
            .iter()
            .find(|(key, _)| *key == label)
            .map(|(_, code)| *code)
            .ok_or_else(|| EncodingError::UnknownCategory {
                field: self.field,
                label: label.to_string(),
            })
    }
}

/// The full table set for one encoding version.
#[derive(Debug, Clone, Copy)]
pub struct EncodingTables {
    pub sex: CodeTable,
    pub yes_no: CodeTable,
    pub high_hdl: CodeTable,
    pub exercise: CodeTable,
    pub stress: CodeTable,
    pub alcohol: CodeTable,
    pub sugar: CodeTable,
}

/// Canonical encoding, matching the tables the bundled model was trained with.
///
/// Exercise is reverse-ordered (high activity -> lowest code) and HDL is
/// inverted (answering "yes" to high HDL -> 0); both quirks come from the
/// training data and must not be changed independently of the model.
pub const ENCODING_V1: EncodingTables = EncodingTables {
    sex: CodeTable {
        field: "sex",
        entries: &[("female", 0.0), ("male", 1.0)],
    },
    yes_no: CodeTable {
        field: "yes_no",
        entries: &[("no", 0.0), ("yes", 1.0)],
    },
    high_hdl: CodeTable {
        field: "high_hdl",
        entries: &[("yes", 0.0), ("no", 1.0)],
    },
    exercise: CodeTable {
        field: "exercise_habit",
        entries: &[("high", 1.0), ("medium", 2.0), ("low", 3.0)],
    },
    stress: CodeTable {
        field: "stress_level",
        entries: &[("low", 1.0), ("medium", 2.0), ("high", 3.0)],
    },
    alcohol: CodeTable {
        field: "alcohol_consumption",
        entries: &[("low", 0.0), ("medium", 1.0), ("high", 2.0)],
    },
    sugar: CodeTable {
        field: "sugar_consumption",
        entries: &[("low", 0.0), ("medium", 1.0), ("high", 2.0)],
    },
};

fn yes_no_label(answer: bool) -> &'static str {
    if answer {
        "yes"
    } else {
        "no"
    }
}

/// Encode a patient record into the 20 base features, in the canonical
/// column order the classifier was trained on.
///
/// # Errors
/// Returns `EncodingError::UnknownCategory` if a label misses its table.
pub fn encode(
    input: &PatientInput,
    tables: &EncodingTables,
) -> Result<BaseFeatures, EncodingError> {
    Ok(BaseFeatures([
        f64::from(input.age),
        tables.sex.code(input.sex.label())?,
        input.blood_pressure,
        input.cholesterol,
        tables.exercise.code(input.exercise_habit.label())?,
        tables.yes_no.code(yes_no_label(input.smoking))?,
        tables.yes_no.code(yes_no_label(input.family_history))?,
        tables.yes_no.code(yes_no_label(input.diabetes))?,
        input.bmi,
        tables.yes_no.code(yes_no_label(input.high_blood_pressure))?,
        tables.high_hdl.code(yes_no_label(input.high_hdl))?,
        tables.yes_no.code(yes_no_label(input.high_ldl))?,
        tables.alcohol.code(input.alcohol_consumption.label())?,
        tables.stress.code(input.stress_level.label())?,
        input.sleep_hours,
        tables.sugar.code(input.sugar_consumption.label())?,
        input.triglyceride_level,
        input.fasting_blood_sugar,
        input.crp_level,
        input.homocysteine_level,
    ]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::patient::{Frequency, Sex};

    fn sample_input() -> PatientInput {
        PatientInput {
            age: 30,
            sex: Sex::Female,
            blood_pressure: 110.0,
            cholesterol: 200.0,
            exercise_habit: Frequency::High,
            smoking: false,
            family_history: false,
            diabetes: false,
            bmi: 20.0,
            high_blood_pressure: false,
            high_hdl: false,
            high_ldl: false,
            alcohol_consumption: Frequency::Low,
            stress_level: Frequency::Low,
            sleep_hours: 7.0,
            sugar_consumption: Frequency::Low,
            triglyceride_level: 250.0,
            fasting_blood_sugar: 50.0,
            crp_level: 5.1,
            homocysteine_level: 6.5,
        }
    }

    #[test]
    fn test_exercise_codes_are_reverse_ordered() {
        let table = ENCODING_V1.exercise;
        assert!((table.code("high").unwrap() - 1.0).abs() < f64::EPSILON);
        assert!((table.code("medium").unwrap() - 2.0).abs() < f64::EPSILON);
        assert!((table.code("low").unwrap() - 3.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_hdl_encoding_is_inverted() {
        let table = ENCODING_V1.high_hdl;
        assert!((table.code("yes").unwrap() - 0.0).abs() < f64::EPSILON);
        assert!((table.code("no").unwrap() - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_unknown_label_is_rejected() {
        let err = ENCODING_V1.stress.code("sometimes").expect_err("must fail");
        let EncodingError::UnknownCategory { field, label } = err;
        assert_eq!(field, "stress_level");
        assert_eq!(label, "sometimes");
    }

    #[test]
    fn test_encode_produces_canonical_order() {
        let base = encode(&sample_input(), &ENCODING_V1).expect("should encode");
        let cols = base.as_slice();

        assert_eq!(cols.len(), 20);
        assert!((cols[0] - 30.0).abs() < f64::EPSILON); // age
        assert!((cols[1] - 0.0).abs() < f64::EPSILON); // female
        assert!((cols[4] - 1.0).abs() < f64::EPSILON); // exercise high
        assert!((cols[10] - 1.0).abs() < f64::EPSILON); // high_hdl=no, inverted
        assert!((cols[13] - 1.0).abs() < f64::EPSILON); // stress low
        assert!((cols[16] - 250.0).abs() < f64::EPSILON); // triglyceride
        assert!((cols[18] - 5.1).abs() < f64::EPSILON); // crp
    }

    #[test]
    fn test_tables_are_total_over_enum_labels() {
        for freq in [Frequency::Low, Frequency::Medium, Frequency::High] {
            assert!(ENCODING_V1.exercise.code(freq.label()).is_ok());
            assert!(ENCODING_V1.stress.code(freq.label()).is_ok());
            assert!(ENCODING_V1.alcohol.code(freq.label()).is_ok());
            assert!(ENCODING_V1.sugar.code(freq.label()).is_ok());
        }
        for sex in [Sex::Female, Sex::Male] {
            assert!(ENCODING_V1.sex.code(sex.label()).is_ok());
        }
    }
}
