//! Point-in-time copies of a file taken before a destructive edit.
//!
//! A [`Backup`] lives next to the original as `<original>.backup.<unix-millis>`
//! and is deleted when the guard is dropped, whether the edit succeeded or the
//! original was restored from it.

use log::{debug, warn};
use std::{
    fs,
    path::{Path, PathBuf},
    time::{SystemTime, UNIX_EPOCH},
};

use crate::error::{OxipackError, Result};

#[derive(Debug)]
pub struct Backup {
    original: PathBuf,
    path: PathBuf,
}

impl Backup {
    /// Copies `original` to a timestamped sibling file.
    pub fn create(original: &Path) -> Result<Self> {
        let millis = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis())
            .unwrap_or_default();
        let mut name = original.as_os_str().to_os_string();
        name.push(format!(".backup.{millis}"));
        let path = PathBuf::from(name);

        fs::copy(original, &path).map_err(|e| OxipackError::io(&path, e))?;
        debug!("Created backup {}", path.display());
        Ok(Self { original: original.to_path_buf(), path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Puts the backed-up bytes back in place of the original.
    pub fn restore(&self) -> Result<()> {
        fs::copy(&self.path, &self.original).map_err(|e| OxipackError::io(&self.original, e))?;
        debug!("Restored {} from backup", self.original.display());
        Ok(())
    }
}

impl Drop for Backup {
    fn drop(&mut self) {
        match fs::remove_file(&self.path) {
            Ok(()) => debug!("Removed backup {}", self.path.display()),
            Err(e) => warn!("Failed to remove backup {}: {}", self.path.display(), e),
        }
    }
}
