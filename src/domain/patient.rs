//! Patient input types for heart-disease risk prediction.
//!
//! The 20 base fields mirror the columns the classifier was trained on.

use serde::{Deserialize, Serialize};

/// Sex as collected by the intake form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sex {
    Female,
    Male,
}

impl Sex {
    /// Canonical label used by the encoding tables.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Female => "female",
            Self::Male => "male",
        }
    }
}

/// Three-level frequency answer (exercise, alcohol, stress, sugar).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    Low,
    Medium,
    High,
}

impl Frequency {
    /// Canonical label used by the encoding tables.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

/// Raw patient record supplied by the presentation layer.
///
/// Categorical fields are closed enums, so the encoding tables are total over
/// everything this struct can hold.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatientInput {
    /// Age in years (1-120)
    pub age: u32,

    pub sex: Sex,

    /// Resting blood pressure in mmHg (90-200)
    pub blood_pressure: f64,

    /// Total cholesterol in mg/dL (100-600)
    pub cholesterol: f64,

    pub exercise_habit: Frequency,

    pub smoking: bool,

    /// Heart disease in close family
    pub family_history: bool,

    pub diabetes: bool,

    /// Body mass index (10-50)
    pub bmi: f64,

    /// Diagnosed hypertension
    pub high_blood_pressure: bool,

    /// Whether HDL ("good") cholesterol is high. Encoded inverted: yes -> 0.
    pub high_hdl: bool,

    /// Whether LDL ("bad") cholesterol is high
    pub high_ldl: bool,

    pub alcohol_consumption: Frequency,

    pub stress_level: Frequency,

    /// Average sleep per night in hours (2-14)
    pub sleep_hours: f64,

    pub sugar_consumption: Frequency,

    /// Blood triglyceride in mg/dL (100-400)
    pub triglyceride_level: f64,

    /// Fasting blood sugar in mg/dL (20-100)
    pub fasting_blood_sugar: f64,

    /// C-reactive protein in mg/L (0-15, exclusive)
    pub crp_level: f64,

    /// Homocysteine in umol/L (5-20)
    pub homocysteine_level: f64,
}

impl PatientInput {
    /// Validate that all numeric fields are within expected ranges.
    ///
    /// # Errors
    /// Returns validation errors as a vector of strings.
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        if !(1..=120).contains(&self.age) {
            errors.push(format!("Age {} out of range [1, 120]", self.age));
        }
        if !(90.0..=200.0).contains(&self.blood_pressure) {
            errors.push(format!(
                "Blood pressure {} out of range [90, 200]",
                self.blood_pressure
            ));
        }
        if !(100.0..=600.0).contains(&self.cholesterol) {
            errors.push(format!(
                "Cholesterol {} out of range [100, 600]",
                self.cholesterol
            ));
        }
        if !(10.0..=50.0).contains(&self.bmi) {
            errors.push(format!("BMI {} out of range [10, 50]", self.bmi));
        }
        if !(2.0..=14.0).contains(&self.sleep_hours) {
            errors.push(format!(
                "Sleep hours {} out of range [2, 14]",
                self.sleep_hours
            ));
        }
        if !(100.0..=400.0).contains(&self.triglyceride_level) {
            errors.push(format!(
                "Triglyceride level {} out of range [100, 400]",
                self.triglyceride_level
            ));
        }
        if !(20.0..=100.0).contains(&self.fasting_blood_sugar) {
            errors.push(format!(
                "Fasting blood sugar {} out of range [20, 100]",
                self.fasting_blood_sugar
            ));
        }
        if self.crp_level <= 0.0 || self.crp_level >= 15.0 {
            errors.push(format!("CRP level {} out of range (0, 15)", self.crp_level));
        }
        if !(5.0..=20.0).contains(&self.homocysteine_level) {
            errors.push(format!(
                "Homocysteine level {} out of range [5, 20]",
                self.homocysteine_level
            ));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

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
    fn test_valid_record_passes() {
        assert!(sample_input().validate().is_ok());
    }

    #[test]
    fn test_out_of_range_fields_collected() {
        let mut input = sample_input();
        input.age = 0;
        input.blood_pressure = 80.0;
        input.crp_level = 15.0;

        let errors = input.validate().expect_err("should fail");
        assert_eq!(errors.len(), 3);
        assert!(errors[0].contains("Age"));
    }

    #[test]
    fn test_record_roundtrips_through_json() {
        let input = sample_input();
        let json = serde_json::to_string(&input).expect("serialize");
        assert!(json.contains("\"sex\":\"female\""));
        assert!(json.contains("\"exercise_habit\":\"high\""));

        let back: PatientInput = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back.sex, Sex::Female);
        assert_eq!(back.exercise_habit, Frequency::High);
        assert!((back.crp_level - 5.1).abs() < f64::EPSILON);
    }
}
