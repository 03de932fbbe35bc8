//! Location mapping: where each logical storage name lives on the platform.
//!
//! # Table layout
//!
//! The project entity carries a `dbMapping` annotation naming the mapping
//! table. That table has `Database` and `Id` columns, one row per logical
//! name. The row named `centerMapping` points at a second table with
//! `center` and `inputSynId` columns, one row per contributing center.
//!
//! The map is read once per run and never mutated afterwards.

use tracing::{debug, info};

use genie_model::{GenieError, Result, TableResult};
use genie_remote::{RemoteClient, select_all};

pub const DB_MAPPING: &str = "dbMapping";
pub const CENTER_MAPPING: &str = "centerMapping";
pub const VALIDATION_STATUS: &str = "validationStatus";
pub const ERROR_TRACKER: &str = "errorTracker";
pub const LOGS: &str = "logs";
pub const ONCOTREE_LINK: &str = "oncotreeLink";

const DATABASE_COLUMN: &str = "Database";
const ID_COLUMN: &str = "Id";
const CENTER_COLUMN: &str = "center";
const INPUT_COLUMN: &str = "inputSynId";

/// Logical name of the processed-file folder for a file type.
pub fn folder_name(file_type: &str) -> String {
    format!("{file_type}_folder")
}

/// Logical name of the database table for a file type.
pub fn table_name(file_type: &str) -> String {
    format!("{file_type}_table")
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LocationMap {
    databases: Vec<(String, String)>,
    centers: Vec<(String, String)>,
}

fn column_pairs(
    table: &TableResult,
    key: &str,
    value: &str,
    table_id: &str,
) -> Result<Vec<(String, String)>> {
    let missing = |column: &str| GenieError::NotFound(format!("column '{column}' in table {table_id}"));
    let keys = table.column(key).ok_or_else(|| missing(key))?;
    let values = table.column(value).ok_or_else(|| missing(value))?;
    Ok(keys
        .into_iter()
        .zip(values)
        .filter(|(key, _)| !key.is_empty())
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .collect())
}

impl LocationMap {
    /// Build the map from an already fetched mapping table and center table.
    pub fn from_tables(mapping: &TableResult, centers: &TableResult) -> Result<Self> {
        Ok(Self {
            databases: column_pairs(mapping, DATABASE_COLUMN, ID_COLUMN, DB_MAPPING)?,
            centers: column_pairs(centers, CENTER_COLUMN, INPUT_COLUMN, CENTER_MAPPING)?,
        })
    }

    /// Read the mapping tables of `project_id`.
    pub fn load(client: &dyn RemoteClient, project_id: &str) -> Result<Self> {
        let project = client.fetch(project_id)?;
        let mapping_id = project.annotation(DB_MAPPING).ok_or_else(|| {
            GenieError::NotFound(format!("'{DB_MAPPING}' annotation on project {project_id}"))
        })?;
        debug!(project_id, mapping_id, "reading location mapping");

        let mapping = client.table_query(&select_all(mapping_id))?;
        let databases = column_pairs(&mapping, DATABASE_COLUMN, ID_COLUMN, mapping_id)?;
        let mut map = Self {
            databases,
            centers: Vec::new(),
        };

        let center_table_id = map.resolve(CENTER_MAPPING)?.to_string();
        let centers = client.table_query(&select_all(&center_table_id))?;
        map.centers = column_pairs(&centers, CENTER_COLUMN, INPUT_COLUMN, &center_table_id)?;

        info!(
            databases = map.databases.len(),
            centers = map.centers.len(),
            "location mapping loaded"
        );
        Ok(map)
    }

    /// Remote id registered for a logical name.
    pub fn resolve(&self, name: &str) -> Result<&str> {
        self.databases
            .iter()
            .find(|(database, _)| database == name)
            .map(|(_, id)| id.as_str())
            .ok_or_else(|| GenieError::NotFound(format!("location '{name}'")))
    }

    /// Input container of a center.
    pub fn resolve_center_input(&self, center: &str) -> Result<&str> {
        self.centers
            .iter()
            .find(|(code, _)| code == center)
            .map(|(_, id)| id.as_str())
            .ok_or_else(|| GenieError::NotFound(format!("input folder for center '{center}'")))
    }

    /// Center codes in table order.
    pub fn centers(&self) -> Vec<String> {
        self.centers.iter().map(|(code, _)| code.clone()).collect()
    }

    pub fn databases(&self) -> impl Iterator<Item = (&str, &str)> {
        self.databases
            .iter()
            .map(|(name, id)| (name.as_str(), id.as_str()))
    }
}

/// The oncotree link for a run.
///
/// An explicit override wins. Otherwise the external URL of the entity
/// registered as `oncotreeLink` is used, if the project has one.
pub fn resolve_oncotree_link(
    client: &dyn RemoteClient,
    map: &LocationMap,
    override_link: Option<&str>,
) -> Result<Option<String>> {
    if let Some(link) = override_link {
        debug!(link, "using oncotree link override");
        return Ok(Some(link.to_string()));
    }
    let Ok(entity_id) = map.resolve(ONCOTREE_LINK) else {
        debug!("no oncotree link registered");
        return Ok(None);
    };
    let entity = client.fetch(entity_id)?;
    debug!(entity_id, link = ?entity.external_url, "resolved oncotree link");
    Ok(entity.external_url)
}
