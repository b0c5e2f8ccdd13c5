//! Engineered features and the classifier input vector.
//!
//! The derived features reproduce the ratios the training pipeline appends
//! before fitting; the assembler's column order is a hard contract with the
//! trained model.

use serde::{Deserialize, Serialize};

/// Number of encoded base fields.
pub const BASE_FEATURE_COUNT: usize = 20;

/// Number of engineered features appended to the base fields.
pub const DERIVED_FEATURE_COUNT: usize = 5;

/// Total classifier input width.
pub const FEATURE_COUNT: usize = BASE_FEATURE_COUNT + DERIVED_FEATURE_COUNT;

/// Canonical column order the classifier was trained on.
///
/// Reordering silently corrupts predictions; the model adapter checks its
/// artifact against this list at load time.
pub const FEATURE_NAMES: [&str; FEATURE_COUNT] = [
    "age",
    "sex",
    "blood_pressure",
    "cholesterol",
    "exercise_habit",
    "smoking",
    "family_history",
    "diabetes",
    "bmi",
    "high_blood_pressure",
    "high_hdl",
    "high_ldl",
    "alcohol_consumption",
    "stress_level",
    "sleep_hours",
    "sugar_consumption",
    "triglyceride_level",
    "fasting_blood_sugar",
    "crp_level",
    "homocysteine_level",
    "vessel_hardness",
    "bp_crp_ratio",
    "vessel_diastolic_estimate",
    "meal_order_score",
    "cholesterol_exercise_ratio",
];

// Column offsets into the base features used by the deriver.
const COL_BLOOD_PRESSURE: usize = 2;
const COL_CHOLESTEROL: usize = 3;
const COL_EXERCISE: usize = 4;
const COL_BMI: usize = 8;
const COL_TRIGLYCERIDE: usize = 16;
const COL_CRP: usize = 18;

/// The 20 encoded base fields in canonical order.
#[derive(Debug, Clone, PartialEq)]
pub struct BaseFeatures(pub(crate) [f64; BASE_FEATURE_COUNT]);

impl BaseFeatures {
    #[must_use]
    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }
}

/// Triglyceride-derived vessel-hardness bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VesselHardness {
    /// Triglyceride below 100 mg/dL
    Normal,
    /// Triglyceride in [100, 150)
    Borderline,
    /// Triglyceride at or above 150
    Elevated,
}

impl VesselHardness {
    /// Bucket a triglyceride level.
    ///
    /// A missing measurement (NaN) yields `None`: the unknown propagates as
    /// an explicit marker and is only substituted at assembly.
    #[must_use]
    pub fn from_triglyceride(level: f64) -> Option<Self> {
        if level.is_nan() {
            None
        } else if level < 100.0 {
            Some(Self::Normal)
        } else if level < 150.0 {
            Some(Self::Borderline)
        } else {
            Some(Self::Elevated)
        }
    }

    /// Numeric code fed to the classifier.
    #[must_use]
    pub fn code(self) -> f64 {
        match self {
            Self::Normal => 0.0,
            Self::Borderline => 1.0,
            Self::Elevated => 2.0,
        }
    }
}

/// Divide, substituting 0.0 when either operand is zero or non-finite.
///
/// Operational ranges exclude zero for every denominator used here, so a
/// degenerate operand means out-of-range input. The substitution is a
/// documented lossy fallback that keeps NaN/inf out of the classifier; it is
/// logged, not surfaced as an error.
#[must_use]
pub fn guarded_ratio(numerator: f64, denominator: f64) -> f64 {
    if numerator == 0.0
        || denominator == 0.0
        || !numerator.is_finite()
        || !denominator.is_finite()
    {
        tracing::warn!(numerator, denominator, "degenerate ratio, substituting 0.0");
        return 0.0;
    }
    numerator / denominator
}

/// The engineered features, before unknown-substitution.
#[derive(Debug, Clone, PartialEq)]
pub struct DerivedFeatures {
    /// `None` when the triglyceride level was missing.
    pub vessel_hardness: Option<VesselHardness>,
    pub bp_crp_ratio: f64,
    pub vessel_diastolic_estimate: f64,
    pub meal_order_score: f64,
    pub cholesterol_exercise_ratio: f64,
}

impl DerivedFeatures {
    /// Compute the engineered features from the encoded base fields.
    #[must_use]
    pub fn derive(base: &BaseFeatures) -> Self {
        let cols = &base.0;
        Self {
            vessel_hardness: VesselHardness::from_triglyceride(cols[COL_TRIGLYCERIDE]),
            bp_crp_ratio: guarded_ratio(cols[COL_CRP], cols[COL_BLOOD_PRESSURE]),
            vessel_diastolic_estimate: guarded_ratio(
                cols[COL_BLOOD_PRESSURE],
                cols[COL_CHOLESTEROL],
            ),
            meal_order_score: guarded_ratio(cols[COL_CHOLESTEROL], cols[COL_BMI]),
            cholesterol_exercise_ratio: guarded_ratio(cols[COL_CHOLESTEROL], cols[COL_EXERCISE]),
        }
    }
}

/// Classifier input: 25 ordered dimensions, immutable once assembled.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeatureVector([f64; FEATURE_COUNT]);

impl FeatureVector {
    /// Concatenate base + derived features in the trained column order.
    ///
    /// An unknown vessel-hardness bucket is substituted with 0.0 here, so the
    /// classifier never receives NaN.
    #[must_use]
    pub fn assemble(base: &BaseFeatures, derived: &DerivedFeatures) -> Self {
        let mut values = [0.0; FEATURE_COUNT];
        values[..BASE_FEATURE_COUNT].copy_from_slice(&base.0);
        values[BASE_FEATURE_COUNT] = match derived.vessel_hardness {
            Some(bucket) => bucket.code(),
            None => {
                tracing::warn!("vessel hardness unknown, substituting 0.0");
                0.0
            }
        };
        values[BASE_FEATURE_COUNT + 1] = derived.bp_crp_ratio;
        values[BASE_FEATURE_COUNT + 2] = derived.vessel_diastolic_estimate;
        values[BASE_FEATURE_COUNT + 3] = derived.meal_order_score;
        values[BASE_FEATURE_COUNT + 4] = derived.cholesterol_exercise_ratio;
        Self(values)
    }

    #[must_use]
    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base(values: [f64; BASE_FEATURE_COUNT]) -> BaseFeatures {
        BaseFeatures(values)
    }

    fn scenario_base() -> BaseFeatures {
        // age 30, female, bp 110, chol 200, exercise high (1), no smoking,
        // no family history, no diabetes, bmi 20, no hypertension,
        // hdl not high (inverted -> 1), ldl not high, alcohol low, stress low,
        // sleep 7, sugar low, triglyceride 250, fbs 50, crp 5.1, hcy 6.5
        base([
            30.0, 0.0, 110.0, 200.0, 1.0, 0.0, 0.0, 0.0, 20.0, 0.0, 1.0, 0.0, 0.0, 1.0, 7.0,
            0.0, 250.0, 50.0, 5.1, 6.5,
        ])
    }

    #[test]
    fn test_vessel_hardness_buckets() {
        assert_eq!(
            VesselHardness::from_triglyceride(90.0),
            Some(VesselHardness::Normal)
        );
        assert_eq!(
            VesselHardness::from_triglyceride(120.0),
            Some(VesselHardness::Borderline)
        );
        assert_eq!(
            VesselHardness::from_triglyceride(150.0),
            Some(VesselHardness::Elevated)
        );
        assert_eq!(
            VesselHardness::from_triglyceride(400.0),
            Some(VesselHardness::Elevated)
        );
        assert_eq!(VesselHardness::from_triglyceride(f64::NAN), None);
    }

    #[test]
    fn test_bucket_boundaries_are_exact() {
        assert_eq!(
            VesselHardness::from_triglyceride(100.0),
            Some(VesselHardness::Borderline)
        );
        assert_eq!(
            VesselHardness::from_triglyceride(99.999),
            Some(VesselHardness::Normal)
        );
        assert_eq!(
            VesselHardness::from_triglyceride(149.999),
            Some(VesselHardness::Borderline)
        );
    }

    #[test]
    fn test_guarded_ratio_zero_denominator() {
        assert!((guarded_ratio(5.0, 0.0) - 0.0).abs() < f64::EPSILON);
        assert!((guarded_ratio(0.0, 5.0) - 0.0).abs() < f64::EPSILON);
        assert!((guarded_ratio(f64::NAN, 5.0) - 0.0).abs() < f64::EPSILON);
        assert!((guarded_ratio(5.0, f64::INFINITY) - 0.0).abs() < f64::EPSILON);
        assert!((guarded_ratio(10.0, 4.0) - 2.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_assembled_vector_layout() {
        let base = scenario_base();
        let derived = DerivedFeatures::derive(&base);
        let vector = FeatureVector::assemble(&base, &derived);

        assert_eq!(vector.len(), FEATURE_COUNT);
        assert_eq!(&vector.as_slice()[..BASE_FEATURE_COUNT], base.as_slice());
        assert_eq!(FEATURE_NAMES.len(), FEATURE_COUNT);
    }

    #[test]
    fn test_scenario_derived_slice() {
        let base = scenario_base();
        let derived = DerivedFeatures::derive(&base);
        let vector = FeatureVector::assemble(&base, &derived);
        let tail = &vector.as_slice()[BASE_FEATURE_COUNT..];

        assert!((tail[0] - 2.0).abs() < f64::EPSILON); // triglyceride 250 -> elevated
        assert!((tail[1] - 5.1 / 110.0).abs() < 1e-12);
        assert!((tail[2] - 0.55).abs() < 1e-12);
        assert!((tail[3] - 10.0).abs() < f64::EPSILON);
        assert!((tail[4] - 200.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_unknown_triglyceride_substituted_at_assembly() {
        let mut values = scenario_base().0;
        values[COL_TRIGLYCERIDE] = f64::NAN;
        let base = base(values);

        let derived = DerivedFeatures::derive(&base);
        assert_eq!(derived.vessel_hardness, None);

        let vector = FeatureVector::assemble(&base, &derived);
        assert!((vector.as_slice()[BASE_FEATURE_COUNT] - 0.0).abs() < f64::EPSILON);
    }
}
