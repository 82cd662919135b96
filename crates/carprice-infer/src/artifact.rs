//! The model artifact: a versioned JSON envelope exported by the external
//! training pipeline.
//!
//! The envelope's parameter payload belongs to the training process; nothing
//! outside this module depends on its layout. The rest of the pipeline sees
//! only the [`PriceModel`] trait. Artifacts with an unknown `kind` are
//! rejected at load time.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use polars::prelude::{AnyValue, DataFrame};
use tracing::info;

use carprice_ingest::{any_to_f64, any_to_string};
use carprice_model::{FeatureField, InferenceError};

use crate::model::PriceModel;

const ARTIFACT_KIND: &str = "carprice.regression/v1";

fn default_scale() -> f64 {
    1.0
}

#[derive(Debug, Clone, serde::Deserialize)]
struct NumericTerm {
    coef: f64,
    #[serde(default)]
    center: f64,
    #[serde(default = "default_scale")]
    scale: f64,
}

#[derive(Debug, Clone, serde::Deserialize)]
struct Envelope {
    kind: String,
    columns: Vec<String>,
    intercept: f64,
    #[serde(default)]
    numeric: BTreeMap<String, NumericTerm>,
    #[serde(default)]
    categorical: BTreeMap<String, BTreeMap<String, f64>>,
}

/// A loaded model artifact.
///
/// Expensive to deserialize; load once per process (see
/// [`crate::SharedModel`]) and share read-only afterwards.
#[derive(Debug, Clone)]
pub struct ModelArtifact {
    envelope: Envelope,
}

impl ModelArtifact {
    /// Deserializes the artifact and verifies its column contract.
    pub fn load(path: &Path) -> Result<Self, InferenceError> {
        let raw = std::fs::read_to_string(path).map_err(|e| load_error(path, e.to_string()))?;
        let envelope: Envelope =
            serde_json::from_str(&raw).map_err(|e| load_error(path, e.to_string()))?;
        if envelope.kind != ARTIFACT_KIND {
            return Err(load_error(
                path,
                format!(
                    "unknown artifact kind {:?} (expected {ARTIFACT_KIND:?})",
                    envelope.kind
                ),
            ));
        }
        let expected: Vec<&str> = FeatureField::schema_names().collect();
        if envelope.columns != expected {
            return Err(load_error(
                path,
                format!(
                    "artifact columns {:?} do not match the feature schema",
                    envelope.columns
                ),
            ));
        }
        info!(path = %path.display(), "loaded model artifact");
        Ok(Self { envelope })
    }

    fn score_row(&self, features: &DataFrame, row: usize) -> Result<f64, InferenceError> {
        let mut score = self.envelope.intercept;
        for (name, term) in &self.envelope.numeric {
            let cell = cell_at(features, name, row)?;
            let Some(value) = any_to_f64(cell) else {
                return Err(InferenceError::ModelRejected {
                    message: format!("non-numeric value in column {name} at row {row}"),
                });
            };
            score += term.coef * (value - term.center) / term.scale;
        }
        for (name, weights) in &self.envelope.categorical {
            let value = any_to_string(cell_at(features, name, row)?);
            // Categories unseen at training time contribute nothing.
            if let Some(weight) = weights.get(value.trim()) {
                score += weight;
            }
        }
        Ok(score)
    }
}

fn cell_at<'a>(
    features: &'a DataFrame,
    name: &str,
    row: usize,
) -> Result<AnyValue<'a>, InferenceError> {
    let column = features
        .column(name)
        .map_err(|_| InferenceError::ModelRejected {
            message: format!("input is missing column {name}"),
        })?;
    Ok(column.get(row).unwrap_or(AnyValue::Null))
}

fn load_error(path: &Path, message: String) -> InferenceError {
    InferenceError::ArtifactLoad {
        path: PathBuf::from(path),
        message,
    }
}

impl PriceModel for ModelArtifact {
    fn predict(&self, features: &DataFrame) -> Result<Vec<f64>, InferenceError> {
        let names: Vec<&str> = features
            .get_column_names()
            .iter()
            .map(|name| name.as_str())
            .collect();
        if names != self.envelope.columns {
            return Err(InferenceError::ModelRejected {
                message: format!(
                    "input columns {names:?} do not match the trained schema {:?}",
                    self.envelope.columns
                ),
            });
        }
        let mut predictions = Vec::with_capacity(features.height());
        for row in 0..features.height() {
            predictions.push(self.score_row(features, row)?);
        }
        Ok(predictions)
    }
}
