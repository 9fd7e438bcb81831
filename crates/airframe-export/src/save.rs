//! Delivering exported bytes to the user.

use std::fs;
use std::path::PathBuf;

use tracing::info;

use crate::error::Result;

/// Receives one exported file per export action.
pub trait FileSaver {
    /// Save `bytes` under `file_name`, returning where they went.
    fn save(&self, file_name: &str, bytes: &[u8]) -> Result<PathBuf>;
}

/// Saves files into a directory.
///
/// Bytes are written to a hidden temp file first and renamed into place, so
/// a failed write never leaves a partial `aircraft.*` behind.
#[derive(Debug, Clone)]
pub struct DirectorySaver {
    dir: PathBuf,
}

impl DirectorySaver {
    /// Save into `dir`, which is created on first save if missing.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl FileSaver for DirectorySaver {
    fn save(&self, file_name: &str, bytes: &[u8]) -> Result<PathBuf> {
        fs::create_dir_all(&self.dir)?;
        let path = self.dir.join(file_name);
        let tmp = self.dir.join(format!(".{file_name}.part"));

        if let Err(e) = fs::write(&tmp, bytes).and_then(|()| fs::rename(&tmp, &path)) {
            let _ = fs::remove_file(&tmp);
            return Err(e.into());
        }

        info!(path = %path.display(), bytes = bytes.len(), "saved export");
        Ok(path)
    }
}
