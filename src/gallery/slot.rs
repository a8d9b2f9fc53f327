//! Durable JSON slot backing the image store.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::warn;

use crate::utils::{OptimizerError, OptimizerResult};

/// A single durable key-value slot holding a JSON array of strings.
///
/// The slot lives at `<dir>/<key>.json`. Writes go through a temp file and a
/// rename so a crash mid-write never leaves a truncated slot behind.
pub struct JsonSlot {
    path: PathBuf,
}

impl JsonSlot {
    /// Opens (or prepares) the slot for `key` inside `dir`, creating the
    /// directory when it does not exist yet.
    pub fn open(dir: &Path, key: &str) -> OptimizerResult<Self> {
        fs::create_dir_all(dir)
            .map_err(|e| OptimizerError::store(format!("Cannot create data dir: {e}")))?;

        Ok(Self {
            path: dir.join(format!("{key}.json")),
        })
    }

    /// Loads the slot contents, defaulting to an empty list when the slot is
    /// absent or unparsable.
    pub fn load(&self) -> Vec<String> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(_) => return Vec::new(),
        };

        match serde_json::from_slice(&bytes) {
            Ok(list) => list,
            Err(e) => {
                warn!("Discarding unparsable slot {}: {}", self.path.display(), e);
                Vec::new()
            }
        }
    }

    /// Writes `images` to the slot.
    pub fn persist(&self, images: &[String]) -> OptimizerResult<()> {
        let payload = serde_json::to_vec(images)
            .map_err(|e| OptimizerError::store(format!("Cannot serialize slot: {e}")))?;

        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, payload)
            .map_err(|e| OptimizerError::store(format!("Cannot write slot: {e}")))?;
        fs::rename(&tmp, &self.path)
            .map_err(|e| OptimizerError::store(format!("Cannot commit slot: {e}")))?;

        Ok(())
    }
}
