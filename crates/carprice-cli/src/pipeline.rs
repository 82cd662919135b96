//! Request pipeline: registry + model wiring for the two prediction paths.

use std::path::Path;

use anyhow::{Context, Result, anyhow};
use polars::prelude::DataFrame;
use tracing::info;

use carprice_infer::{PriceModel, SharedModel};
use carprice_ingest::read_csv;
use carprice_model::BoundsConfig;
use carprice_output::attach_predictions;
use carprice_schema::SchemaRegistry;
use carprice_validate::{RecordBuilder, RecordInput, align_batch, feature_frame};

/// Long-lived pipeline state: the derived schema registry and the shared
/// model handle. Both are read-only after construction.
pub struct Pipeline {
    registry: SchemaRegistry,
    model: SharedModel,
    bounds: BoundsConfig,
}

impl Pipeline {
    pub fn new(registry: SchemaRegistry, model: SharedModel) -> Self {
        Self {
            registry,
            model,
            bounds: BoundsConfig::default(),
        }
    }

    /// Loads the reference dataset and binds the model artifact path.
    ///
    /// The artifact itself is deserialized lazily, on the first prediction.
    pub fn load(data_path: &Path, model_path: &Path) -> Result<Self> {
        let reference = read_csv(data_path).context("load reference dataset")?;
        info!(
            path = %data_path.display(),
            rows = reference.height(),
            "reference dataset loaded"
        );
        Ok(Self::new(
            SchemaRegistry::from_reference(reference),
            SharedModel::new(model_path),
        ))
    }

    #[must_use]
    pub fn with_bounds(mut self, bounds: BoundsConfig) -> Self {
        self.bounds = bounds;
        self
    }

    pub fn registry(&self) -> &SchemaRegistry {
        &self.registry
    }

    /// Single-record path: validate, build, infer.
    pub fn predict_record(&self, input: &RecordInput) -> Result<f64> {
        let record = RecordBuilder::new(&self.registry)
            .with_bounds(self.bounds)
            .build(input)?;
        let frame = feature_frame(&record).context("assemble feature frame")?;
        let model = self.model.get()?;
        let predictions = model.predict(&frame)?;
        predictions
            .first()
            .copied()
            .ok_or_else(|| anyhow!("model returned no prediction for the record"))
    }
}

/// Aligns an untrusted table to the feature schema, predicts every row, and
/// appends `Predicted_Price` to the original (unreduced) table.
///
/// All-or-nothing: a schema mismatch or a row the model rejects fails the
/// whole batch; the model is never invoked on a misaligned frame.
pub fn predict_batch(model: &dyn PriceModel, original: &DataFrame) -> Result<DataFrame> {
    let aligned = align_batch(original)?;
    let predictions = model.predict(&aligned)?;
    info!(rows = predictions.len(), "batch predicted");
    Ok(attach_predictions(original, &predictions)?)
}
