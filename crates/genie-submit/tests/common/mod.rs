#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::fs;
use std::path::{Path, PathBuf};

use genie_model::{Entity, EntityKind, NewEntity, TableResult};
use genie_remote::{LocalStore, RemoteClient, RemoteError};

pub const ONCOTREE_URL: &str = "https://oncotree.info/api/tumorTypes/tree?version=oncotree_2019_12_01";

/// Records every call before passing it to the wrapped store.
pub struct CountingClient<'a> {
    inner: &'a LocalStore,
    pub stores: Cell<usize>,
    pub queries: Cell<usize>,
    pub fetched: RefCell<Vec<String>>,
}

impl<'a> CountingClient<'a> {
    pub fn new(inner: &'a LocalStore) -> Self {
        Self {
            inner,
            stores: Cell::new(0),
            queries: Cell::new(0),
            fetched: RefCell::new(Vec::new()),
        }
    }
}

impl RemoteClient for CountingClient<'_> {
    fn fetch(&self, id: &str) -> Result<Entity, RemoteError> {
        self.fetched.borrow_mut().push(id.to_string());
        self.inner.fetch(id)
    }

    fn store(&self, entity: NewEntity) -> Result<Entity, RemoteError> {
        self.stores.set(self.stores.get() + 1);
        self.inner.store(entity)
    }

    fn table_query(&self, query: &str) -> Result<TableResult, RemoteError> {
        self.queries.set(self.queries.get() + 1);
        self.inner.table_query(query)
    }
}

/// A bootstrapped project: mapping tables, one input folder per center, and
/// a file entity to use as a bad destination.
pub struct Project {
    pub store: LocalStore,
    pub project_id: String,
    pub mapping_id: String,
    pub inputs: Vec<(String, String)>,
    pub plain_file_id: String,
}

impl Project {
    pub fn input(&self, center: &str) -> &str {
        self.inputs
            .iter()
            .find(|(code, _)| code == center)
            .map(|(_, id)| id.as_str())
            .expect("center input")
    }

    pub fn register(&self, name: &str, id: &str) {
        self.store
            .append_rows(&self.mapping_id, vec![vec![name.to_string(), id.to_string()]])
            .expect("append mapping row");
    }

    /// Register an `oncotreeLink` entity pointing at `url`.
    pub fn register_oncotree_link(&self, url: &str) {
        let link = self
            .store
            .store(
                NewEntity::new("oncotree link", EntityKind::Link)
                    .with_parent(&self.project_id)
                    .with_external_url(url),
            )
            .expect("store link");
        self.register("oncotreeLink", &link.id);
    }
}

pub fn bootstrap(centers: &[&str], scratch: &Path) -> Project {
    let store = LocalStore::in_memory();
    let mapping = store
        .create_table(
            NewEntity::new("Database Synapse Id Mapping", EntityKind::Table),
            TableResult::new(vec!["Database".to_string(), "Id".to_string()], Vec::new()),
        )
        .expect("mapping table");
    let project = store
        .store(
            NewEntity::new("GENIE", EntityKind::Project).with_annotation("dbMapping", &mapping.id),
        )
        .expect("project");

    let mut inputs = Vec::new();
    for center in centers {
        let input = store
            .store(NewEntity::folder(format!("{center} input"), &project.id))
            .expect("input folder");
        inputs.push(((*center).to_string(), input.id));
    }
    let codes: Vec<&str> = inputs.iter().map(|(code, _)| code.as_str()).collect();
    let ids: Vec<&str> = inputs.iter().map(|(_, id)| id.as_str()).collect();
    let center_table = store
        .create_table(
            NewEntity::new("Center Mapping", EntityKind::Table).with_parent(&project.id),
            TableResult::from_columns(&[("center", codes.as_slice()), ("inputSynId", ids.as_slice())]),
        )
        .expect("center table");

    let readme = write(scratch, "README.txt", "not a folder");
    let plain_file = store
        .store(NewEntity::file(&readme, &project.id))
        .expect("plain file");

    let project = Project {
        store,
        project_id: project.id,
        mapping_id: mapping.id,
        inputs,
        plain_file_id: plain_file.id,
    };
    project.register("centerMapping", &center_table.id);
    project
}

pub fn write(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, contents).expect("write fixture");
    path
}
