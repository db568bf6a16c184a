use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::error::FileResult;
use super::file_manager::FileManager;
use super::DEFAULT_BLOCK_SIZE;

/// Parameters needed to open a storage directory
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileManagerConfig {
    /// Directory holding the managed files, created on open if missing
    pub directory: PathBuf,
    /// Bytes per block, fixed for the lifetime of the manager
    #[serde(default = "default_block_size")]
    pub block_size: usize,
}

fn default_block_size() -> usize {
    DEFAULT_BLOCK_SIZE
}

impl FileManagerConfig {
    pub fn new<P: Into<PathBuf>>(directory: P, block_size: usize) -> Self {
        Self {
            directory: directory.into(),
            block_size,
        }
    }

    /// Open a file manager for this config
    pub fn open(&self) -> FileResult<FileManager> {
        FileManager::new(&self.directory, self.block_size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::file::FileError;

    #[test]
    fn test_deserialize_with_default_block_size() {
        let config: FileManagerConfig = serde_json::from_str(r#"{"directory": "data"}"#).unwrap();
        assert_eq!(config, FileManagerConfig::new("data", DEFAULT_BLOCK_SIZE));
    }

    #[test]
    fn test_open() {
        let temp_dir = tempfile::tempdir().unwrap();
        let config = FileManagerConfig::new(temp_dir.path().join("db"), 256);

        let manager = config.open().unwrap();
        assert_eq!(manager.block_size(), 256);
        assert!(manager.is_new());
    }

    #[test]
    fn test_open_rejects_zero_block_size() {
        let temp_dir = tempfile::tempdir().unwrap();
        let config = FileManagerConfig::new(temp_dir.path().join("db"), 0);

        assert!(matches!(config.open(), Err(FileError::InvalidBlockSize(0))));
        assert!(!temp_dir.path().join("db").exists());
    }
}
