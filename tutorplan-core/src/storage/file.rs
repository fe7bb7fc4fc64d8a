//! Storage backed by one file per key inside a data directory.

use std::path::{Path, PathBuf};

use super::Storage;
use crate::config::PlannerConfig;
use crate::error::{PlannerError, PlannerResult};

#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        FileStorage { dir: dir.into() }
    }

    /// Storage rooted at the configured data directory.
    pub fn from_config(config: &PlannerConfig) -> Self {
        FileStorage::new(config.data_path())
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PlannerResult<PathBuf> {
        if key.is_empty() || !key.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
            return Err(PlannerError::Storage {
                key: key.to_string(),
                message: "Keys may only contain letters, digits and underscores".into(),
            });
        }
        Ok(self.dir.join(key))
    }
}

impl Storage for FileStorage {
    fn load(&self, key: &str) -> PlannerResult<Option<String>> {
        let path = self.path_for(key)?;

        if path.exists() {
            Ok(Some(std::fs::read_to_string(&path)?))
        } else {
            Ok(None)
        }
    }

    fn save(&mut self, key: &str, value: &str) -> PlannerResult<()> {
        let path = self.path_for(key)?;
        std::fs::create_dir_all(&self.dir)?;

        // Write then rename so a crash never leaves a half-written value.
        let temp = self.dir.join(format!("{key}.tmp"));
        std::fs::write(&temp, value)?;
        std::fs::rename(&temp, &path)?;
        Ok(())
    }
}
