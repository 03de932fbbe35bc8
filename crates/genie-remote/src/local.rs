//! JSON-backed platform store.
//!
//! # Storage Format
//!
//! A store directory holds:
//! - `store.json`: every entity, keyed by id, plus the rows of each table
//! - `blobs/`: copies of uploaded file content, named `{id}-{name}`
//!
//! Ids are allocated sequentially as `syn1`, `syn2`, ... Storing a file with
//! the name of an existing file under the same parent replaces its content
//! and keeps its id, the way the hosted platform versions files. A restricted
//! file cannot be replaced.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::debug;

use genie_model::{Entity, EntityKind, GenieError, NewEntity, TableResult};

use crate::client::{RemoteClient, RemoteError};
use crate::hash::sha256_hex;
use crate::query::TableQuery;

const DOCUMENT_FILE: &str = "store.json";
const BLOB_DIR: &str = "blobs";

#[derive(Debug, Default, Serialize, Deserialize)]
struct StoreDocument {
    #[serde(default)]
    next_id: u64,
    #[serde(default)]
    entities: BTreeMap<String, StoredEntity>,
    #[serde(default)]
    tables: BTreeMap<String, TableResult>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct StoredEntity {
    #[serde(flatten)]
    entity: Entity,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    restricted: bool,
}

impl StoreDocument {
    fn allocate_id(&mut self) -> String {
        self.next_id += 1;
        format!("syn{}", self.next_id)
    }

    fn readable(&self, id: &str) -> Result<&StoredEntity, RemoteError> {
        let stored = self
            .entities
            .get(id)
            .ok_or_else(|| RemoteError::NotFound(id.to_string()))?;
        if stored.restricted {
            return Err(RemoteError::Forbidden(id.to_string()));
        }
        Ok(stored)
    }

    /// Id of the same-name file under `parent_id`, which a new upload
    /// replaces. A restricted file cannot be replaced.
    fn existing_file(
        &self,
        name: &str,
        parent_id: Option<&str>,
    ) -> Result<Option<String>, RemoteError> {
        let Some(stored) = self.entities.values().find(|stored| {
            stored.entity.kind == EntityKind::File
                && stored.entity.name == name
                && stored.entity.parent_id.as_deref() == parent_id
        }) else {
            return Ok(None);
        };
        if stored.restricted {
            return Err(RemoteError::Forbidden(stored.entity.id.clone()));
        }
        Ok(Some(stored.entity.id.clone()))
    }
}

/// A [`RemoteClient`] over a local JSON document.
///
/// Created with [`LocalStore::in_memory`] nothing touches the disk; created
/// with [`LocalStore::open`] every mutation is written back immediately.
#[derive(Debug)]
pub struct LocalStore {
    root: Option<PathBuf>,
    document: Mutex<StoreDocument>,
}

impl LocalStore {
    pub fn in_memory() -> Self {
        Self {
            root: None,
            document: Mutex::new(StoreDocument::default()),
        }
    }

    /// Open the store rooted at `root`, creating the directory if needed.
    pub fn open(root: impl Into<PathBuf>) -> genie_model::Result<Self> {
        let root = root.into();
        fs::create_dir_all(root.join(BLOB_DIR))
            .map_err(|source| GenieError::io(root.join(BLOB_DIR), source))?;
        let document_path = root.join(DOCUMENT_FILE);
        let document = if document_path.exists() {
            let contents = fs::read_to_string(&document_path)
                .map_err(|source| GenieError::io(&document_path, source))?;
            serde_json::from_str(&contents)
                .map_err(|error| GenieError::parse(&document_path, error))?
        } else {
            StoreDocument::default()
        };
        debug!(root = %root.display(), "opened local store");
        Ok(Self {
            root: Some(root),
            document: Mutex::new(document),
        })
    }

    pub fn root(&self) -> Option<&Path> {
        self.root.as_deref()
    }

    /// Store a table entity together with its rows.
    pub fn create_table(
        &self,
        entity: NewEntity,
        table: TableResult,
    ) -> Result<Entity, RemoteError> {
        let entity = NewEntity {
            kind: EntityKind::Table,
            ..entity
        };
        let stored = self.store(entity)?;
        let mut document = self.lock()?;
        document.tables.insert(stored.id.clone(), table);
        self.persist(&document)?;
        Ok(stored)
    }

    pub fn append_rows(&self, table_id: &str, rows: Vec<Vec<String>>) -> Result<(), RemoteError> {
        let mut document = self.lock()?;
        let table = document
            .tables
            .get_mut(table_id)
            .ok_or_else(|| RemoteError::NotFound(table_id.to_string()))?;
        table.rows.extend(rows);
        self.persist(&document)
    }

    /// Deny (or restore) read access to an entity.
    pub fn set_restricted(&self, id: &str, restricted: bool) -> Result<(), RemoteError> {
        let mut document = self.lock()?;
        let stored = document
            .entities
            .get_mut(id)
            .ok_or_else(|| RemoteError::NotFound(id.to_string()))?;
        stored.restricted = restricted;
        self.persist(&document)
    }

    /// Entities directly under `parent_id`, ordered by id.
    pub fn children(&self, parent_id: &str) -> Result<Vec<Entity>, RemoteError> {
        let document = self.lock()?;
        Ok(document
            .entities
            .values()
            .filter(|stored| stored.entity.parent_id.as_deref() == Some(parent_id))
            .map(|stored| stored.entity.clone())
            .collect())
    }

    pub fn len(&self) -> Result<usize, RemoteError> {
        Ok(self.lock()?.entities.len())
    }

    pub fn is_empty(&self) -> Result<bool, RemoteError> {
        Ok(self.len()? == 0)
    }

    fn lock(&self) -> Result<MutexGuard<'_, StoreDocument>, RemoteError> {
        self.document
            .lock()
            .map_err(|_| RemoteError::Unavailable("local store lock poisoned".to_string()))
    }

    fn persist(&self, document: &StoreDocument) -> Result<(), RemoteError> {
        let Some(root) = &self.root else {
            return Ok(());
        };
        let path = root.join(DOCUMENT_FILE);
        let json = serde_json::to_string_pretty(document)
            .map_err(|error| RemoteError::Unavailable(format!("serialize store: {error}")))?;
        fs::write(&path, json).map_err(|error| {
            RemoteError::Unavailable(format!("write {}: {error}", path.display()))
        })
    }

    fn check_parent(document: &StoreDocument, parent_id: &str) -> Result<(), RemoteError> {
        let parent = document.readable(parent_id)?;
        if !parent.entity.is_container() {
            return Err(RemoteError::Rejected(format!(
                "{parent_id} is a {} and cannot hold children",
                parent.entity.kind.as_str()
            )));
        }
        Ok(())
    }

    fn upload_blob(
        &self,
        id: &str,
        name: &str,
        source: &Path,
    ) -> Result<(PathBuf, String), RemoteError> {
        let bytes = fs::read(source).map_err(|error| RemoteError::LocalFile {
            path: source.to_path_buf(),
            kind: error.kind(),
            message: error.to_string(),
        })?;
        let digest = sha256_hex(&bytes);
        let Some(root) = &self.root else {
            return Ok((source.to_path_buf(), digest));
        };
        let blob = root.join(BLOB_DIR).join(format!("{id}-{name}"));
        fs::write(&blob, &bytes).map_err(|error| {
            RemoteError::Unavailable(format!("write {}: {error}", blob.display()))
        })?;
        Ok((blob, digest))
    }
}

impl RemoteClient for LocalStore {
    fn fetch(&self, id: &str) -> Result<Entity, RemoteError> {
        let document = self.lock()?;
        Ok(document.readable(id)?.entity.clone())
    }

    fn store(&self, entity: NewEntity) -> Result<Entity, RemoteError> {
        let mut document = self.lock()?;
        if let Some(parent_id) = &entity.parent_id {
            Self::check_parent(&document, parent_id)?;
        }

        let existing = match entity.kind {
            EntityKind::File => document.existing_file(&entity.name, entity.parent_id.as_deref())?,
            _ => None,
        };
        let id = match existing {
            Some(id) => id,
            None => document.allocate_id(),
        };

        let (path, content_sha256) = if entity.kind == EntityKind::File {
            let source = entity.path.as_deref().ok_or_else(|| {
                RemoteError::Rejected(format!("file {} has no local path to upload", entity.name))
            })?;
            let (path, digest) = self.upload_blob(&id, &entity.name, source)?;
            (Some(path), Some(digest))
        } else {
            (entity.path, None)
        };

        let stored = Entity {
            id: id.clone(),
            name: entity.name,
            kind: entity.kind,
            parent_id: entity.parent_id,
            path,
            external_url: entity.external_url,
            annotations: entity.annotations,
            content_sha256,
            created_on: Some(Utc::now()),
        };
        if stored.kind == EntityKind::Table {
            document.tables.entry(id.clone()).or_default();
        }
        document.entities.insert(
            id.clone(),
            StoredEntity {
                entity: stored.clone(),
                restricted: false,
            },
        );
        self.persist(&document)?;
        debug!(id = %id, kind = stored.kind.as_str(), name = %stored.name, "stored entity");
        Ok(stored)
    }

    fn table_query(&self, query: &str) -> Result<TableResult, RemoteError> {
        let TableQuery { table_id } = TableQuery::parse(query)?;
        let document = self.lock()?;
        let stored = document.readable(&table_id)?;
        if stored.entity.kind != EntityKind::Table {
            return Err(RemoteError::Rejected(format!("{table_id} is not a table")));
        }
        Ok(document.tables.get(&table_id).cloned().unwrap_or_default())
    }
}
