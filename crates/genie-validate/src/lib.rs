//! Validation dispatch for center file submissions.
//!
//! File types are provided by [`FormatPackage`]s. A [`FormatRegistry`] is
//! built once per run from an ordered list of package names; the
//! [`GenieValidationHelper`] probes every registered handler's filename rule
//! to find the file type of a submission, runs that handler's content
//! validation, and renders the outcome with [`collect_errors_and_warnings`].

pub mod dispatch;
pub mod format;
pub mod registry;
pub mod report;

pub use dispatch::{FILENAME_ERROR, GenieValidationHelper, ValidationOutcome};
pub use format::{
    FileTypeFormat, FilenameMatch, FormatConstructor, FormatContext, ValidationRequest,
};
pub use registry::{
    FormatEntry, FormatPackage, FormatRegistry, LoadPolicy, PackageCatalog, collect_format_types,
};
pub use report::{ERRORS_BANNER, VALIDATED_BANNER, WARNINGS_BANNER, collect_errors_and_warnings};
