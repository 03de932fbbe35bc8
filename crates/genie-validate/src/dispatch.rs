//! Routing a submission to the handler for its file type.

use tracing::{debug, info, info_span};

use genie_model::{GenieError, Result, SubmissionUnit};
use genie_remote::RemoteClient;

use crate::format::{FilenameMatch, FormatContext, ValidationRequest};
use crate::registry::FormatRegistry;
use crate::report::collect_errors_and_warnings;

/// Shown when no registered handler claims the submitted filenames.
pub const FILENAME_ERROR: &str = "Your filename is incorrect! Please change your filename \
     before you run the validator or specify a file type override if running locally";

/// Validity and rendered report of one submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationOutcome {
    pub valid: bool,
    pub message: String,
}

/// Validates one center's submission against the registered file types.
pub struct GenieValidationHelper<'a> {
    client: &'a dyn RemoteClient,
    project_id: Option<String>,
    center: String,
    unit: SubmissionUnit,
    registry: FormatRegistry,
    file_type: Option<String>,
}

impl<'a> GenieValidationHelper<'a> {
    pub fn new(
        client: &'a dyn RemoteClient,
        project_id: Option<String>,
        center: impl Into<String>,
        unit: SubmissionUnit,
        registry: FormatRegistry,
    ) -> Self {
        Self {
            client,
            project_id,
            center: center.into(),
            unit,
            registry,
            file_type: None,
        }
    }

    /// Pin the file type instead of probing filenames.
    #[must_use]
    pub fn with_file_type(mut self, file_type: Option<String>) -> Self {
        self.file_type = file_type;
        self
    }

    /// The resolved file type, once determined or pinned.
    pub fn file_type(&self) -> Option<&str> {
        self.file_type.as_deref()
    }

    pub fn center(&self) -> &str {
        &self.center
    }

    pub fn submission(&self) -> &SubmissionUnit {
        &self.unit
    }

    /// Find the first registered handler, in registry order, that claims the
    /// submitted filenames.
    ///
    /// Files that would individually match different handlers are not
    /// separated: the earliest claim wins.
    pub fn determine_filetype(&mut self) -> Option<String> {
        let filenames = self.unit.filenames();
        let context = FormatContext::new(&self.center);
        let claimed = self.registry.iter().find_map(|entry| {
            let handler = entry.instantiate(&context);
            match handler.validate_filename(&filenames) {
                FilenameMatch::Matches(file_type) => Some(file_type),
                FilenameMatch::Mismatch(reason) => {
                    debug!(file_type = %entry.file_type, %reason, "filename not claimed");
                    None
                }
            }
        });
        if let Some(file_type) = &claimed {
            debug!(%file_type, "filenames claimed");
        }
        self.file_type.clone_from(&claimed);
        claimed
    }

    /// Determine the file type if needed, run its handler, and render the report.
    ///
    /// An unclaimed submission is reported as invalid, not as an error. `Err`
    /// means validation could not run at all.
    pub fn validate_single_file(
        &mut self,
        oncotree_link: Option<&str>,
        nosymbol_check: bool,
    ) -> Result<ValidationOutcome> {
        let span = info_span!("validate_single_file", center = %self.center);
        let _guard = span.enter();

        let file_type = match self.file_type.clone() {
            Some(file_type) => Some(file_type),
            None => self.determine_filetype(),
        };
        let Some(file_type) = file_type else {
            info!(files = ?self.unit.filenames(), "no file type claims the submission");
            return Ok(ValidationOutcome {
                valid: false,
                message: collect_errors_and_warnings(FILENAME_ERROR, ""),
            });
        };

        let entry = self.registry.get(&file_type).ok_or_else(|| {
            GenieError::InvalidArgument(format!(
                "no handler registered for file type '{file_type}' (registered: {})",
                self.registry.file_types().join(", ")
            ))
        })?;
        let handler = entry.instantiate(&FormatContext::new(&self.center));
        let request = ValidationRequest {
            filenames: self.unit.filenames(),
            file_paths: self.unit.paths(),
            oncotree_link,
            nosymbol_check,
            project_id: self.project_id.as_deref(),
            client: self.client,
        };
        let (valid, errors, warnings) = handler.validate(&request)?.into_parts();
        info!(%file_type, valid, "validation finished");

        Ok(ValidationOutcome {
            valid,
            message: collect_errors_and_warnings(&errors, &warnings),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::FileTypeFormat;
    use genie_model::ValidationResult;
    use genie_remote::LocalStore;

    struct Never;

    impl FileTypeFormat for Never {
        fn file_type(&self) -> &str {
            "never"
        }

        fn validate_filename(&self, _filenames: &[&str]) -> FilenameMatch {
            FilenameMatch::mismatch("never matches")
        }

        fn validate(&self, _request: &ValidationRequest<'_>) -> Result<ValidationResult> {
            Ok(ValidationResult::new("should not run\n", ""))
        }
    }

    fn never(_: &FormatContext) -> Box<dyn FileTypeFormat> {
        Box::new(Never)
    }

    #[test]
    fn pinned_unknown_file_type_is_an_argument_error() {
        let store = LocalStore::in_memory();
        let mut registry = FormatRegistry::new();
        registry.register("test", "never", never);
        let unit = SubmissionUnit::from_paths(["data_clinical_supp_SAGE.txt"]).expect("unit");
        let mut helper = GenieValidationHelper::new(&store, None, "SAGE", unit, registry)
            .with_file_type(Some("maf".to_string()));

        let err = helper.validate_single_file(None, false).unwrap_err();
        assert!(err.is_argument_error());
        assert!(err.to_string().contains("'maf'"));
    }

    #[test]
    fn unclaimed_files_leave_file_type_unset() {
        let store = LocalStore::in_memory();
        let mut registry = FormatRegistry::new();
        registry.register("test", "never", never);
        let unit = SubmissionUnit::from_paths(["wrong.txt"]).expect("unit");
        let mut helper = GenieValidationHelper::new(&store, None, "SAGE", unit, registry);

        assert_eq!(helper.determine_filetype(), None);
        assert_eq!(helper.file_type(), None);
    }
}
