//! Submission side of a validation run.
//!
//! - [`resolver`]: logical storage names to remote ids, from the project's
//!   location mapping table
//! - [`guard`]: preconditions checked before anything is uploaded
//! - [`upload`]: storing validated files under their destination
//! - [`run`]: [`perform_validate`], the whole pipeline for one center

pub mod guard;
pub mod resolver;
pub mod run;
pub mod upload;

pub use guard::{PARENT_ERROR, check_center_input, check_parent_permission_container};
pub use resolver::{LocationMap, resolve_oncotree_link};
pub use run::{RunSummary, ValidateArgs, perform_validate};
pub use upload::upload_to_synapse;
