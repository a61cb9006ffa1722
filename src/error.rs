use std::path::PathBuf;
use thiserror::Error;

/// Fatal failures of a generation run.
///
/// Per-file parse failures and per-class skips are not errors; they are
/// logged and reported through [`crate::GenerationReport`].
#[derive(Debug, Error)]
pub enum GenerateError {
    #[error("component root {} does not exist", path.display())]
    ComponentRootMissing { path: PathBuf },

    #[error("project configuration {} does not exist", path.display())]
    ProjectConfigMissing { path: PathBuf },

    #[error("project configuration {} is invalid: {reason}", path.display())]
    ProjectConfigInvalid { path: PathBuf, reason: String },

    #[error("failed to access {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl GenerateError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        GenerateError::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, GenerateError>;
