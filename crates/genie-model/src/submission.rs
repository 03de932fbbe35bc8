use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{GenieError, Result};

/// One submitted file: the name it was uploaded under and its local staging copy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteFile {
    pub name: String,
    pub path: PathBuf,
    pub parent_id: Option<String>,
}

impl RemoteFile {
    pub fn new(name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            parent_id: None,
        }
    }

    /// A file whose display name is the final component of its local path.
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Self::new(name, path)
    }

    #[must_use]
    pub fn with_parent(mut self, parent_id: impl Into<String>) -> Self {
        self.parent_id = Some(parent_id.into());
        self
    }
}

/// An ordered, non-empty batch of files uploaded together by one center.
///
/// All files are assumed to share a file type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubmissionUnit {
    files: Vec<RemoteFile>,
}

impl SubmissionUnit {
    pub fn new(files: Vec<RemoteFile>) -> Result<Self> {
        if files.is_empty() {
            return Err(GenieError::EmptySubmission);
        }
        Ok(Self { files })
    }

    pub fn from_paths<I, P>(paths: I) -> Result<Self>
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        Self::new(paths.into_iter().map(RemoteFile::from_path).collect())
    }

    pub fn files(&self) -> &[RemoteFile] {
        &self.files
    }

    /// Display names in submission order.
    pub fn filenames(&self) -> Vec<&str> {
        self.files.iter().map(|file| file.name.as_str()).collect()
    }

    /// Local staging paths in submission order.
    pub fn paths(&self) -> Vec<&Path> {
        self.files.iter().map(|file| file.path.as_path()).collect()
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}
