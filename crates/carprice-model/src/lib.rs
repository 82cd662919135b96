#![deny(unsafe_code)]

pub mod bounds;
pub mod error;
pub mod feature;

pub use bounds::BoundsConfig;
pub use error::{InferenceError, SchemaError, SchemaMismatchError, ValidationError};
pub use feature::{CATEGORICAL_FIELDS, FEATURE_SCHEMA, FeatureField, FeatureRecord, FeatureValue};
