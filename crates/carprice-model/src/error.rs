//! Error taxonomy shared across the pipeline.
//!
//! Errors carry their context as owned strings rather than boxed sources so
//! the registry and the shared model cache can clone and replay them.

use std::path::PathBuf;

use thiserror::Error;

/// The reference dataset cannot support a feature's choice list.
///
/// Fatal only to the affected field: the registry records the error and the
/// field cannot be offered, but the rest of the schema stays usable.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    #[error("reference dataset has no column named {column}")]
    MissingColumn { column: String },
    #[error("reference dataset column {column} has no non-missing values")]
    EmptyDomain { column: String },
}

/// A single-record field value violates its bounds or categorical domain.
///
/// Detected before the inference adapter is ever invoked; the record is
/// rejected and the offending field reported.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("{field} value {value} is outside the allowed range [{min}, {max}]")]
    OutOfRange {
        field: String,
        value: String,
        min: String,
        max: String,
    },
    #[error("{field} value {value} is below the minimum of {min}")]
    BelowMinimum {
        field: String,
        value: String,
        min: String,
    },
    #[error("{field} value {value:?} is not among the known choices")]
    UnknownCategory { field: String, value: String },
    #[error("missing value for {field}")]
    MissingField { field: String },
    #[error(transparent)]
    Schema(#[from] SchemaError),
}

/// Batch input does not conform to the feature schema.
///
/// The whole batch is rejected; no partial inference is attempted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaMismatchError {
    #[error("batch input is missing required columns: {}", .missing.join(", "))]
    MissingColumns { missing: Vec<String> },
    #[error("failed to assemble aligned feature table: {message}")]
    Alignment { message: String },
}

impl SchemaMismatchError {
    /// The enumerated missing column names, if that is what failed.
    pub fn missing_columns(&self) -> &[String] {
        match self {
            Self::MissingColumns { missing } => missing,
            Self::Alignment { .. } => &[],
        }
    }
}

/// The model artifact failed to load, or the model rejected its input.
///
/// Never used for control flow; surfaced verbatim to the caller with the
/// underlying cause in the message. A malformed row in batch mode aborts the
/// entire batch through this error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InferenceError {
    #[error("failed to load model artifact {path}: {message}")]
    ArtifactLoad { path: PathBuf, message: String },
    #[error("model rejected input: {message}")]
    ModelRejected { message: String },
}
