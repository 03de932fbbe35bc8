use std::path::PathBuf;

use thiserror::Error;

/// Errors shared by the validation and submission crates.
///
/// A filename that no handler claims is not an error here: handlers report it
/// through `FilenameMatch::Mismatch`, and content problems travel as the error
/// text of a `ValidationResult`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum GenieError {
    /// A logical name, entity, or column could not be resolved.
    #[error("{0} not found")]
    NotFound(String),

    /// The remote platform rejected access to the target.
    #[error("{0}")]
    PermissionDenied(String),

    /// The target exists but cannot receive uploads.
    #[error("{0}")]
    InvalidTarget(String),

    #[error("{0}")]
    InvalidArgument(String),

    /// A blocking platform call failed for transport or auth reasons.
    #[error("remote platform unavailable: {0}")]
    RemoteUnavailable(String),

    #[error("unknown format registry package '{name}' (available: {available})")]
    UnknownPackage { name: String, available: String },

    #[error("a submission must contain at least one file")]
    EmptySubmission,

    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {message}")]
    Parse { path: PathBuf, message: String },
}

impl GenieError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub fn parse(path: impl Into<PathBuf>, message: impl ToString) -> Self {
        Self::Parse {
            path: path.into(),
            message: message.to_string(),
        }
    }

    /// True for the guard and argument failures that abort a run before validation.
    pub fn is_argument_error(&self) -> bool {
        matches!(
            self,
            Self::PermissionDenied(_) | Self::InvalidTarget(_) | Self::InvalidArgument(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, GenieError>;
