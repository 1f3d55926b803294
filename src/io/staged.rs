//! Output files written next to their destination and moved into place on
//! commit.
//!
//! A `StagedFile` that is dropped without being committed removes its
//! temporary file, so an aborted run leaves nothing behind.

use std::fs::{self, File};
use std::path::{Path, PathBuf};

use crate::error::AppError;

#[derive(Debug)]
pub struct StagedFile {
    tmp: PathBuf,
    dest: PathBuf,
}

impl StagedFile {
    /// Create `<dest>.tmp` (and any missing parent directories) and fill it
    /// with `write`.
    pub fn create(dest: &Path, write: impl FnOnce(File) -> Result<(), String>) -> Result<Self, AppError> {
        if let Some(parent) = dest.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .map_err(|e| AppError::write(dest, format!("cannot create output directory: {e}")))?;
        }

        let tmp = temp_path(dest);
        let file = File::create(&tmp)
            .map_err(|e| AppError::write(dest, format!("cannot create '{}': {e}", tmp.display())))?;
        let staged = Self {
            tmp,
            dest: dest.to_path_buf(),
        };
        write(file).map_err(|reason| AppError::write(dest, reason))?;
        Ok(staged)
    }

    pub fn dest(&self) -> &Path {
        &self.dest
    }

    /// Move the staged file over its destination.
    pub fn commit(self) -> Result<(), AppError> {
        fs::rename(&self.tmp, &self.dest)
            .map_err(|e| AppError::write(&self.dest, format!("cannot move output into place: {e}")))
    }
}

impl Drop for StagedFile {
    fn drop(&mut self) {
        // After a successful commit the temp file is gone and this is a no-op.
        let _ = fs::remove_file(&self.tmp);
    }
}

pub(crate) fn temp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}
