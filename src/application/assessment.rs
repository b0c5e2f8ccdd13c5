//! Assessment service: Orchestrates the risk-scoring pipeline.
//!
//! One synchronous call chain per request:
//! validate -> encode -> derive -> assemble -> classify -> resolve tier.
//! No state is shared mutably across requests.

use std::sync::Arc;

use crate::domain::{
    encode, Assessment, DerivedFeatures, EncodingTables, FeatureVector, PatientInput, ENCODING_V1,
};
use crate::ports::Classifier;
use crate::CardioriskError;

/// Service for running risk assessments.
///
/// The classifier is loaded once at startup and shared read-only, so one
/// service can serve concurrent requests.
pub struct AssessmentService<C>
where
    C: Classifier,
{
    classifier: Arc<C>,
    tables: EncodingTables,
}

impl<C> AssessmentService<C>
where
    C: Classifier,
{
    /// Create a service using the canonical encoding tables.
    pub fn new(classifier: Arc<C>) -> Self {
        Self::with_tables(classifier, ENCODING_V1)
    }

    /// Create a service with an explicit encoding version.
    ///
    /// The table version must match the one the classifier was trained with.
    pub fn with_tables(classifier: Arc<C>, tables: EncodingTables) -> Self {
        Self { classifier, tables }
    }

    /// Run the full pipeline for one patient record.
    ///
    /// # Errors
    /// Returns `CardioriskError::Validation` for out-of-range fields,
    /// `CardioriskError::Encoding` for an unknown categorical label, and
    /// `CardioriskError::Prediction` when the classifier rejects the vector
    /// (fatal for the request; classification is deterministic, so there is
    /// no retry).
    pub fn assess(&self, input: &PatientInput) -> Result<Assessment, CardioriskError> {
        if let Err(violations) = input.validate() {
            return Err(CardioriskError::Validation(violations.join("; ")));
        }

        tracing::debug!("Encoding base fields...");
        let base = encode(input, &self.tables)?;

        tracing::debug!("Deriving engineered features...");
        let derived = DerivedFeatures::derive(&base);
        let vector = FeatureVector::assemble(&base, &derived);

        tracing::debug!("Classifying feature vector...");
        let prediction = self.classifier.classify(&vector)?;

        let assessment = Assessment::new(prediction);
        tracing::info!(
            "Assessment complete: class={}, probability={:.2}%, tier={}",
            assessment.prediction.predicted_class,
            assessment.prediction.probability_positive * 100.0,
            assessment.tier
        );

        Ok(assessment)
    }
}
