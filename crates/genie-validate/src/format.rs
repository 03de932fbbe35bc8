//! The contract every file-type handler implements.

use std::path::Path;

use genie_model::{Result, ValidationResult};
use genie_remote::RemoteClient;

/// Outcome of a handler's filename check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilenameMatch {
    /// The handler claims the files under this file-type key.
    Matches(String),
    /// The names do not follow this handler's convention.
    Mismatch(String),
}

impl FilenameMatch {
    pub fn matches(file_type: impl Into<String>) -> Self {
        Self::Matches(file_type.into())
    }

    pub fn mismatch(reason: impl Into<String>) -> Self {
        Self::Mismatch(reason.into())
    }

    pub fn file_type(&self) -> Option<&str> {
        match self {
            Self::Matches(file_type) => Some(file_type),
            Self::Mismatch(_) => None,
        }
    }
}

/// Per-run values a handler is constructed with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatContext {
    pub center: String,
}

impl FormatContext {
    pub fn new(center: impl Into<String>) -> Self {
        Self {
            center: center.into(),
        }
    }
}

/// Inputs to a handler's content validation.
pub struct ValidationRequest<'a> {
    /// Display names, parallel to `file_paths`.
    pub filenames: Vec<&'a str>,
    /// Local staging copies, in submission order.
    pub file_paths: Vec<&'a Path>,
    pub oncotree_link: Option<&'a str>,
    /// Skip gene symbol checks.
    pub nosymbol_check: bool,
    pub project_id: Option<&'a str>,
    /// Handle for handlers that resolve reference data on the platform.
    pub client: &'a dyn RemoteClient,
}

impl<'a> ValidationRequest<'a> {
    /// Each file's display name with its staging path.
    pub fn files(&self) -> impl Iterator<Item = (&'a str, &'a Path)> + '_ {
        self.filenames
            .iter()
            .copied()
            .zip(self.file_paths.iter().copied())
    }
}

/// A pluggable validator for one file type.
///
/// Handlers are built fresh for every dispatch and must not share mutable
/// state with one another.
pub trait FileTypeFormat {
    /// Registry key of this file type (e.g. `clinical`).
    fn file_type(&self) -> &str;

    /// Check the naming convention of a submission, not its content.
    fn validate_filename(&self, filenames: &[&str]) -> FilenameMatch;

    /// Validate file content.
    ///
    /// Content problems are reported in the returned error and warning text.
    /// `Err` is reserved for failures that prevent validation from running,
    /// such as unreadable files or an unavailable platform.
    fn validate(&self, request: &ValidationRequest<'_>) -> Result<ValidationResult>;
}

/// Builds a handler instance for one run.
pub type FormatConstructor = fn(&FormatContext) -> Box<dyn FileTypeFormat>;
