//! File-based MapRepository implementation.

use std::fs;
use std::path::{Path, PathBuf};

use nav_core::AreaGridStore;

use super::{MapRepository, RepositoryError};

const STORE_FILE: &str = "map_store.bin";

/// File-backed map store.
///
/// The whole store is written as one bincode file via write-to-temp plus
/// atomic rename; a crash mid-save leaves the previous snapshot intact.
/// Single-writer discipline is assumed (there is exactly one agent process
/// mutating the store), so no locking is needed.
pub struct FileMapRepository {
    base_dir: PathBuf,
}

impl FileMapRepository {
    pub fn new(base_dir: impl AsRef<Path>) -> Result<Self, RepositoryError> {
        let base_dir = base_dir.as_ref().to_path_buf();
        fs::create_dir_all(&base_dir)?;
        Ok(Self { base_dir })
    }

    /// Default per-user data directory for the agent's map memory.
    pub fn default_dir() -> Option<PathBuf> {
        directories::ProjectDirs::from("", "", "emerald-nav")
            .map(|dirs| dirs.data_dir().to_path_buf())
    }

    fn store_path(&self) -> PathBuf {
        self.base_dir.join(STORE_FILE)
    }
}

impl MapRepository for FileMapRepository {
    fn save(&self, store: &AreaGridStore) -> Result<(), RepositoryError> {
        let path = self.store_path();
        let temp_path = path.with_extension("bin.tmp");

        let bytes = bincode::serialize(store)
            .map_err(|e| RepositoryError::Serialization(e.to_string()))?;

        fs::write(&temp_path, bytes)?;
        fs::rename(&temp_path, &path)?;

        tracing::debug!(
            areas = store.area_count(),
            warps = store.warps().len(),
            "saved map store to {}",
            path.display()
        );

        Ok(())
    }

    fn load(&self) -> Result<Option<AreaGridStore>, RepositoryError> {
        let path = self.store_path();

        if !path.exists() {
            return Ok(None);
        }

        let bytes = fs::read(&path)?;
        let store: AreaGridStore = bincode::deserialize(&bytes)
            .map_err(|e| RepositoryError::Serialization(e.to_string()))?;

        tracing::debug!(
            areas = store.area_count(),
            "loaded map store from {}",
            path.display()
        );

        Ok(Some(store))
    }
}
