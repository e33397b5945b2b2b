use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Cause {
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// Failures while moving the study document to or from disk. Neither is
/// fatal: callers report them and keep going with the in-memory state.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Error loading data from {}: {source}", path.display())]
    Load {
        path: PathBuf,
        #[source]
        source: Cause,
    },

    #[error("Error saving data to {}: {source}", path.display())]
    Save {
        path: PathBuf,
        #[source]
        source: Cause,
    },
}

impl StoreError {
    pub(crate) fn load(path: impl Into<PathBuf>, source: impl Into<Cause>) -> Self {
        StoreError::Load {
            path: path.into(),
            source: source.into(),
        }
    }

    pub(crate) fn save(path: impl Into<PathBuf>, source: impl Into<Cause>) -> Self {
        StoreError::Save {
            path: path.into(),
            source: source.into(),
        }
    }
}
