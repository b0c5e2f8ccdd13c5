//! # cardiorisk
//!
//! Heart-disease risk assessment from clinical and lifestyle attributes.
//!
//! This crate provides:
//! - Deterministic encoding of raw patient fields into model features
//! - Engineered ratio features matching the trained pipeline
//! - Risk-tier resolution with guidance text
//!
//! ## Architecture
//!
//! The crate follows Hexagonal Architecture:
//! - `domain`: Core business types (patient record, features, assessment)
//! - `ports`: Trait definitions for external collaborators
//! - `adapters`: Concrete implementations (random-forest model, log redaction)
//! - `application`: Use cases orchestrating domain and ports

pub mod adapters;
pub mod application;
pub mod domain;
pub mod ports;

pub use domain::{Assessment, PatientInput, Prediction, RiskTier};

/// Result type for cardiorisk operations
pub type Result<T> = std::result::Result<T, CardioriskError>;

/// Main error type for cardiorisk
#[derive(Debug, thiserror::Error)]
pub enum CardioriskError {
    #[error("Invalid patient data: {0}")]
    Validation(String),

    #[error("Field encoding failed: {0}")]
    Encoding(#[from] domain::EncodingError),

    #[error("Prediction failed: {0}")]
    Prediction(#[from] ports::ClassifierError),

    #[error("Model error: {0}")]
    Model(#[from] adapters::ModelError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl CardioriskError {
    /// Whether the error was caused by the supplied record rather than the
    /// prediction machinery. Callers present the two differently: bad input
    /// is fixable by the user, an internal prediction error is not.
    #[must_use]
    pub fn is_input_error(&self) -> bool {
        matches!(self, Self::Validation(_) | Self::Encoding(_))
    }
}
