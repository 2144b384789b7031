use std::path::{Path, PathBuf};
use std::sync::{Arc, OnceLock};

use tracing::warn;

use super::{LinearTendencyModel, ModelSlot};

/// Process-wide handle to the model artifacts.
///
/// The first call to [`SharedModel::slot`] loads the artifacts; the outcome,
/// success or failure, is cached and every later call returns it unchanged.
#[derive(Debug)]
pub struct SharedModel {
    dir: PathBuf,
    slot: OnceLock<ModelSlot>,
}

impl SharedModel {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            slot: OnceLock::new(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// True once a load has been attempted, whatever its outcome.
    pub fn is_resolved(&self) -> bool {
        self.slot.get().is_some()
    }

    pub fn slot(&self) -> ModelSlot {
        self.slot
            .get_or_init(|| match LinearTendencyModel::load(&self.dir) {
                Ok(model) => ModelSlot::Ready(Arc::new(model)),
                Err(err) => {
                    warn!(
                        dir = %self.dir.display(),
                        error = %err,
                        "tendency model unavailable; evaluations continue without it"
                    );
                    ModelSlot::Unavailable(err.to_string())
                }
            })
            .clone()
    }
}
