use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum QvError {
    #[error("Quiver library not found: {0} doesn't exist or is not a directory")]
    LibraryNotFound(PathBuf),

    #[error("No library configured (use --library, QVKIT_LIBRARY or `qvkit config library_path <path>`)")]
    NoLibraryConfigured,

    #[error("Malformed metadata in {path}: {reason}")]
    MalformedMetadata { path: PathBuf, reason: String },

    #[error("Note \"{note}\" links to {uuid}, which is not in the library")]
    UnresolvedReference { uuid: String, note: String },

    #[error("Refusing to clean {0}: it is not empty and does not look like a previous export")]
    RefuseClean(PathBuf),

    #[error("Invalid search pattern: {0}")]
    InvalidPattern(#[from] regex::Error),

    #[error("Cannot write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(String),
}

impl QvError {
    pub fn malformed(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        QvError::MalformedMetadata {
            path: path.into(),
            reason: reason.to_string(),
        }
    }

    /// Wraps a destination-side IO failure with the offending path.
    pub fn write(path: impl Into<PathBuf>) -> impl FnOnce(std::io::Error) -> Self {
        let path = path.into();
        move |source| QvError::Write { path, source }
    }
}

pub type Result<T> = std::result::Result<T, QvError>;
