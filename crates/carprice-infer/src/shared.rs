//! One-time model initialization shared across requests.

use std::path::{Path, PathBuf};
use std::sync::{Arc, OnceLock};

use carprice_model::InferenceError;

use crate::artifact::ModelArtifact;
use crate::model::PriceModel;

type Loader = Box<dyn Fn(&Path) -> Result<Arc<dyn PriceModel>, InferenceError> + Send + Sync>;

/// Lazily loads the artifact at most once per process and shares the result.
///
/// Concurrent first callers are serialized by the `OnceLock`; everyone else
/// observes the completed load (success or failure alike — retrying a
/// deterministic deserialization would not change the outcome). Constructed
/// by the host and injected into the pipeline rather than held as a process
/// global.
pub struct SharedModel {
    path: PathBuf,
    loader: Loader,
    cell: OnceLock<Result<Arc<dyn PriceModel>, InferenceError>>,
}

impl SharedModel {
    /// A shared handle that loads [`ModelArtifact`] from `path` on first use.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self::with_loader(
            path,
            Box::new(|path| {
                ModelArtifact::load(path).map(|model| Arc::new(model) as Arc<dyn PriceModel>)
            }),
        )
    }

    /// A shared handle with a custom loader; lets tests count loads or
    /// substitute stub models.
    pub fn with_loader(path: impl Into<PathBuf>, loader: Loader) -> Self {
        Self {
            path: path.into(),
            loader,
            cell: OnceLock::new(),
        }
    }

    /// The loaded model, performing the load on first call.
    pub fn get(&self) -> Result<Arc<dyn PriceModel>, InferenceError> {
        self.cell
            .get_or_init(|| (self.loader)(&self.path))
            .clone()
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl std::fmt::Debug for SharedModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SharedModel")
            .field("path", &self.path)
            .field("loaded", &self.cell.get().is_some())
            .finish()
    }
}
