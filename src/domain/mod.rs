//! Domain layer: Core business types and logic.
//!
//! Everything in this module is deterministic and side-effect-free; the
//! pipeline from raw record to risk tier is a pure computation.

mod assessment;
mod encoding;
mod features;
mod patient;

pub use assessment::{Assessment, Prediction, RiskTier};
pub use encoding::{encode, CodeTable, EncodingError, EncodingTables, ENCODING_V1};
pub use features::{
    BaseFeatures, DerivedFeatures, FeatureVector, VesselHardness, BASE_FEATURE_COUNT,
    DERIVED_FEATURE_COUNT, FEATURE_COUNT, FEATURE_NAMES,
};
pub use patient::{Frequency, PatientInput, Sex};
