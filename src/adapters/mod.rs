//! Adapters layer: Concrete implementations of ports.
//!
//! These modules contain the actual integration with external artifacts:
//! - `forest`: random-forest model loaded from an exported JSON artifact
//! - `redact`: PII filtering for logs

pub mod forest;
pub mod redact;

pub use forest::{ModelError, RandomForest};
