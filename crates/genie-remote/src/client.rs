use std::io;
use std::path::PathBuf;

use genie_model::{Entity, GenieError, NewEntity, TableResult};
use thiserror::Error;

/// Failures reported by a remote platform call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RemoteError {
    #[error("entity {0} does not exist")]
    NotFound(String),

    /// The caller lacks access to the entity.
    #[error("access to {0} was denied")]
    Forbidden(String),

    /// The platform refused to store the object as given.
    #[error("rejected: {0}")]
    Rejected(String),

    /// The local copy of a file to upload could not be read.
    #[error("cannot read {}: {message}", path.display())]
    LocalFile {
        path: PathBuf,
        kind: io::ErrorKind,
        message: String,
    },

    #[error("unsupported table query: {0}")]
    UnsupportedQuery(String),

    /// Transport or authentication failure.
    #[error("{0}")]
    Unavailable(String),
}

impl From<RemoteError> for GenieError {
    fn from(error: RemoteError) -> Self {
        match error {
            RemoteError::NotFound(id) => GenieError::NotFound(format!("entity {id}")),
            RemoteError::Forbidden(id) => {
                GenieError::PermissionDenied(format!("access to {id} was denied"))
            }
            RemoteError::Rejected(message) => GenieError::InvalidTarget(message),
            RemoteError::LocalFile {
                path,
                kind,
                message,
            } => GenieError::io(path, io::Error::new(kind, message)),
            RemoteError::UnsupportedQuery(query) => {
                GenieError::InvalidArgument(format!("unsupported table query: {query}"))
            }
            RemoteError::Unavailable(message) => GenieError::RemoteUnavailable(message),
        }
    }
}

/// Blocking access to the remote storage and table platform.
pub trait RemoteClient {
    /// Fetch the entity with the given id.
    fn fetch(&self, id: &str) -> Result<Entity, RemoteError>;

    /// Store a new entity and return it with its assigned id.
    fn store(&self, entity: NewEntity) -> Result<Entity, RemoteError>;

    /// Run a table query and return all matching rows.
    fn table_query(&self, query: &str) -> Result<TableResult, RemoteError>;
}

impl<C: RemoteClient + ?Sized> RemoteClient for &C {
    fn fetch(&self, id: &str) -> Result<Entity, RemoteError> {
        (**self).fetch(id)
    }

    fn store(&self, entity: NewEntity) -> Result<Entity, RemoteError> {
        (**self).store(entity)
    }

    fn table_query(&self, query: &str) -> Result<TableResult, RemoteError> {
        (**self).table_query(query)
    }
}
