//! Risk tiers and assessment records.
//!
//! Represents the interpreted output of the heart-disease prediction.

use serde::{Deserialize, Serialize};

/// Ordered risk tier derived from the classifier output.
///
/// Ordering is severity: `VeryLow < Low < LowMedium < Medium < High < VeryHigh`.
/// `LowMedium` is reachable from both predicted classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskTier {
    VeryLow,
    Low,
    LowMedium,
    Medium,
    High,
    VeryHigh,
}

impl RiskTier {
    /// Resolve a tier from the predicted class and the positive-class
    /// probability.
    ///
    /// Thresholds are evaluated high-to-low and are inclusive at the stated
    /// boundaries (80/60/40 for a positive prediction, 10/20 for a negative
    /// one).
    #[must_use]
    pub fn resolve(predicted_class: u8, probability_positive: f64) -> Self {
        let pct = probability_positive * 100.0;
        if predicted_class == 1 {
            if pct >= 80.0 {
                Self::VeryHigh
            } else if pct >= 60.0 {
                Self::High
            } else if pct >= 40.0 {
                Self::Medium
            } else {
                Self::LowMedium
            }
        } else if pct <= 10.0 {
            Self::VeryLow
        } else if pct <= 20.0 {
            Self::Low
        } else {
            Self::LowMedium
        }
    }

    /// Human-readable tier label.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::VeryLow => "very low",
            Self::Low => "low",
            Self::LowMedium => "low-medium",
            Self::Medium => "medium",
            Self::High => "high",
            Self::VeryHigh => "very high",
        }
    }

    /// Headline message shown with the result.
    #[must_use]
    pub fn message(self) -> &'static str {
        match self {
            Self::VeryLow => "Very low heart-disease risk",
            Self::Low => "Low heart-disease risk",
            Self::LowMedium => "Low-to-medium heart-disease risk",
            Self::Medium => "Medium heart-disease risk",
            Self::High => "High heart-disease risk",
            Self::VeryHigh => "Very high heart-disease risk",
        }
    }

    /// Fixed recommendation text for the tier.
    #[must_use]
    pub fn recommendations(self) -> &'static str {
        match self {
            Self::VeryLow => {
                "Keep up your healthy lifestyle.\n\
                 A routine check-up once a year is enough."
            }
            Self::Low => {
                "Maintain your current habits.\n\
                 Continue routine check-ups."
            }
            Self::LowMedium => {
                "Schedule a check-up with your physician.\n\
                 Review diet, exercise and sleep habits."
            }
            Self::Medium => {
                "Book a cardiology appointment soon.\n\
                 Have blood pressure and cholesterol checked regularly."
            }
            Self::High => {
                "See a cardiologist as soon as possible.\n\
                 Have a full cardiovascular work-up."
            }
            Self::VeryHigh => {
                "Seek medical attention immediately.\n\
                 Contact a cardiologist or emergency services today."
            }
        }
    }

    /// Whether the tier calls for immediate medical attention.
    #[must_use]
    pub fn is_emergency(self) -> bool {
        matches!(self, Self::VeryHigh)
    }
}

impl std::fmt::Display for RiskTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Classifier output for one feature vector.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Prediction {
    /// Binary class (0 = no disease, 1 = disease predicted)
    pub predicted_class: u8,

    /// Positive-class probability (0.0 to 1.0)
    pub probability_positive: f64,
}

impl Prediction {
    /// Create a new prediction.
    #[must_use]
    pub fn new(predicted_class: u8, probability_positive: f64) -> Self {
        Self {
            predicted_class,
            probability_positive,
        }
    }

    /// Resolve the risk tier for this prediction.
    #[must_use]
    pub fn tier(&self) -> RiskTier {
        RiskTier::resolve(self.predicted_class, self.probability_positive)
    }
}

/// Complete assessment record returned to the presentation layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Assessment {
    /// Unique identifier
    pub id: String,

    /// The classifier prediction
    pub prediction: Prediction,

    /// Risk classification
    pub tier: RiskTier,

    /// Timestamp of assessment
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl Assessment {
    /// Create a new assessment from a prediction.
    #[must_use]
    pub fn new(prediction: Prediction) -> Self {
        Self {
            id: uuid_v4(),
            tier: prediction.tier(),
            prediction,
            created_at: chrono::Utc::now(),
        }
    }

    /// Headline message for the resolved tier.
    #[must_use]
    pub fn message(&self) -> &'static str {
        self.tier.message()
    }

    /// Recommendation text for the resolved tier.
    #[must_use]
    pub fn recommendations(&self) -> &'static str {
        self.tier.recommendations()
    }
}

/// Generate a UUID v4 using a CSPRNG.
///
/// ChaCha20Rng seeded from OS entropy keeps assessment ids unpredictable on
/// all platforms.
fn uuid_v4() -> String {
    use rand::Rng;
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;

    let mut rng = ChaCha20Rng::from_entropy();
    let bytes: [u8; 16] = rng.gen();

    format!(
        "{:02x}{:02x}{:02x}{:02x}-{:02x}{:02x}-{:02x}{:02x}-{:02x}{:02x}-{:02x}{:02x}{:02x}{:02x}{:02x}{:02x}",
        bytes[0], bytes[1], bytes[2], bytes[3],
        bytes[4], bytes[5],
        (bytes[6] & 0x0f) | 0x40, bytes[7],
        (bytes[8] & 0x3f) | 0x80, bytes[9],
        bytes[10], bytes[11], bytes[12], bytes[13], bytes[14], bytes[15]
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_positive_class_tiers() {
        assert_eq!(RiskTier::resolve(1, 0.85), RiskTier::VeryHigh);
        assert_eq!(RiskTier::resolve(1, 0.65), RiskTier::High);
        assert_eq!(RiskTier::resolve(1, 0.45), RiskTier::Medium);
        assert_eq!(RiskTier::resolve(1, 0.25), RiskTier::LowMedium);
    }

    #[test]
    fn test_negative_class_tiers() {
        assert_eq!(RiskTier::resolve(0, 0.05), RiskTier::VeryLow);
        assert_eq!(RiskTier::resolve(0, 0.15), RiskTier::Low);
        assert_eq!(RiskTier::resolve(0, 0.35), RiskTier::LowMedium);
    }

    #[test]
    fn test_boundaries_are_inclusive() {
        assert_eq!(RiskTier::resolve(1, 0.80), RiskTier::VeryHigh);
        assert_eq!(RiskTier::resolve(1, 0.799), RiskTier::High);
        assert_eq!(RiskTier::resolve(1, 0.60), RiskTier::High);
        assert_eq!(RiskTier::resolve(1, 0.40), RiskTier::Medium);
        assert_eq!(RiskTier::resolve(0, 0.10), RiskTier::VeryLow);
        assert_eq!(RiskTier::resolve(0, 0.20), RiskTier::Low);
    }

    #[test]
    fn test_severity_is_monotonic_in_probability() {
        let tiers: Vec<RiskTier> = [0.25, 0.45, 0.65, 0.85]
            .iter()
            .map(|p| RiskTier::resolve(1, *p))
            .collect();
        assert!(tiers.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_only_very_high_is_emergency() {
        assert!(RiskTier::VeryHigh.is_emergency());
        assert!(!RiskTier::High.is_emergency());
        assert!(!RiskTier::VeryLow.is_emergency());
    }

    #[test]
    fn test_assessment_creation() {
        let assessment = Assessment::new(Prediction::new(1, 0.85));

        assert_eq!(assessment.tier, RiskTier::VeryHigh);
        assert_eq!(assessment.message(), "Very high heart-disease risk");
        assert!(assessment.recommendations().contains("immediately"));
    }

    #[test]
    fn test_uuid_generation() {
        let id1 = uuid_v4();
        let id2 = uuid_v4();
        assert_ne!(id1, id2);
        assert_eq!(id1.len(), 36);
    }
}
