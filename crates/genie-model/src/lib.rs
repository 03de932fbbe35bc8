pub mod entity;
pub mod error;
pub mod submission;
pub mod table;
pub mod validation;

pub use entity::{Entity, EntityKind, NewEntity};
pub use error::{GenieError, Result};
pub use submission::{RemoteFile, SubmissionUnit};
pub use table::TableResult;
pub use validation::ValidationResult;
