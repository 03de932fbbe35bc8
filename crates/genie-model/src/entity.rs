use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    Project,
    Folder,
    File,
    Table,
    Link,
}

impl EntityKind {
    /// Whether objects of this kind can hold children.
    pub fn is_container(self) -> bool {
        matches!(self, Self::Project | Self::Folder)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Project => "project",
            Self::Folder => "folder",
            Self::File => "file",
            Self::Table => "table",
            Self::Link => "link",
        }
    }
}

/// An object stored on the remote platform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entity {
    pub id: String,
    pub name: String,
    pub kind: EntityKind,
    #[serde(default)]
    pub parent_id: Option<String>,
    /// Local copy of the file content, for file entities.
    #[serde(default)]
    pub path: Option<PathBuf>,
    /// External resource the entity points to (e.g. the oncotree URL).
    #[serde(default)]
    pub external_url: Option<String>,
    #[serde(default)]
    pub annotations: BTreeMap<String, Vec<String>>,
    #[serde(default)]
    pub content_sha256: Option<String>,
    #[serde(default)]
    pub created_on: Option<DateTime<Utc>>,
}

impl Entity {
    pub fn is_container(&self) -> bool {
        self.kind.is_container()
    }

    /// First value of an annotation, if present.
    pub fn annotation(&self, key: &str) -> Option<&str> {
        self.annotations
            .get(key)
            .and_then(|values| values.first())
            .map(String::as_str)
    }
}

/// An object to be stored; the platform assigns the id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewEntity {
    pub name: String,
    pub kind: EntityKind,
    pub parent_id: Option<String>,
    pub path: Option<PathBuf>,
    pub external_url: Option<String>,
    pub annotations: BTreeMap<String, Vec<String>>,
}

impl NewEntity {
    pub fn new(name: impl Into<String>, kind: EntityKind) -> Self {
        Self {
            name: name.into(),
            kind,
            parent_id: None,
            path: None,
            external_url: None,
            annotations: BTreeMap::new(),
        }
    }

    /// A file entity named after the final component of `path`.
    pub fn file(path: impl AsRef<Path>, parent_id: impl Into<String>) -> Self {
        let path = path.as_ref();
        let name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Self {
            path: Some(path.to_path_buf()),
            ..Self::new(name, EntityKind::File).with_parent(parent_id)
        }
    }

    pub fn folder(name: impl Into<String>, parent_id: impl Into<String>) -> Self {
        Self::new(name, EntityKind::Folder).with_parent(parent_id)
    }

    #[must_use]
    pub fn with_parent(mut self, parent_id: impl Into<String>) -> Self {
        self.parent_id = Some(parent_id.into());
        self
    }

    #[must_use]
    pub fn with_external_url(mut self, url: impl Into<String>) -> Self {
        self.external_url = Some(url.into());
        self
    }

    #[must_use]
    pub fn with_annotation(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.annotations
            .entry(key.into())
            .or_default()
            .push(value.into());
        self
    }
}
