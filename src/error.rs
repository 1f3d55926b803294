use std::path::{Path, PathBuf};

use thiserror::Error;

/// Fatal run errors. Everything data-related is resolved inside the stages;
/// only the storage boundaries can abort a run.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Failed to load '{}': {reason}", .path.display())]
    Load { path: PathBuf, reason: String },

    #[error("Failed to write '{}': {reason}", .path.display())]
    Write { path: PathBuf, reason: String },
}

impl AppError {
    pub fn load(path: &Path, reason: impl Into<String>) -> Self {
        Self::Load {
            path: path.to_path_buf(),
            reason: reason.into(),
        }
    }

    pub fn write(path: &Path, reason: impl Into<String>) -> Self {
        Self::Write {
            path: path.to_path_buf(),
            reason: reason.into(),
        }
    }

    pub fn exit_code(&self) -> u8 {
        match self {
            AppError::Load { .. } => 2,
            AppError::Write { .. } => 3,
        }
    }
}
