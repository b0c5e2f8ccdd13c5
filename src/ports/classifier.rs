//! Classifier port: Trait for the pre-trained risk classifier.
//!
//! The classifier is an opaque collaborator; whatever concrete algorithm
//! scores the feature vector sits behind this boundary.

use crate::domain::{FeatureVector, Prediction};

/// Error type for classification.
///
/// Classification is deterministic given identical input, so none of these
/// are retryable.
#[derive(Debug, thiserror::Error)]
pub enum ClassifierError {
    #[error("Feature vector shape mismatch: got {got}, expected {expected}")]
    ShapeMismatch { got: usize, expected: usize },

    #[error("Classifier rejected the feature vector: {0}")]
    Rejected(String),
}

/// Trait for binary risk classification.
///
/// Implementations must be read-only per call so one loaded model can serve
/// concurrent predictions.
pub trait Classifier: Send + Sync {
    /// Predict the binary class for a feature vector.
    ///
    /// # Errors
    /// Returns `ClassifierError` if the vector cannot be scored.
    fn predict(&self, features: &FeatureVector) -> Result<u8, ClassifierError>;

    /// Class probabilities `[p0, p1]` with `p0 + p1 = 1`.
    ///
    /// # Errors
    /// Returns `ClassifierError` if the vector cannot be scored.
    fn predict_proba(&self, features: &FeatureVector) -> Result<[f64; 2], ClassifierError>;

    /// Predict class and positive-class probability in one call.
    ///
    /// # Errors
    /// Returns `ClassifierError` if the vector cannot be scored.
    fn classify(&self, features: &FeatureVector) -> Result<Prediction, ClassifierError> {
        let predicted_class = self.predict(features)?;
        let [_, probability_positive] = self.predict_proba(features)?;
        Ok(Prediction::new(predicted_class, probability_positive))
    }
}
