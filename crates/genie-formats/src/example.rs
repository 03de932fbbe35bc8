use std::fs;

use genie_model::{GenieError, Result, ValidationResult};
use genie_validate::{FileTypeFormat, FilenameMatch, FormatContext, ValidationRequest};

const FILE_TYPE: &str = "example";

/// The file type seeded into every center folder by project bootstrap.
///
/// Files are named `TEST-<CENTER>...txt` and hold a single word.
#[derive(Debug, Clone)]
pub struct ExampleFormat {
    center: String,
}

impl ExampleFormat {
    pub fn new(center: impl Into<String>) -> Self {
        Self {
            center: center.into(),
        }
    }

    pub fn construct(context: &FormatContext) -> Box<dyn FileTypeFormat> {
        Box::new(Self::new(&context.center))
    }
}

impl FileTypeFormat for ExampleFormat {
    fn file_type(&self) -> &str {
        FILE_TYPE
    }

    fn validate_filename(&self, filenames: &[&str]) -> FilenameMatch {
        let prefix = format!("TEST-{}", self.center);
        let claimed = filenames
            .iter()
            .all(|name| name.starts_with(&prefix) && name.ends_with(".txt"));
        if claimed {
            FilenameMatch::matches(FILE_TYPE)
        } else {
            FilenameMatch::mismatch(format!("filenames must look like {prefix}*.txt"))
        }
    }

    fn validate(&self, request: &ValidationRequest<'_>) -> Result<ValidationResult> {
        let mut result = ValidationResult::valid();
        for (name, path) in request.files() {
            let content = fs::read_to_string(path).map_err(|source| GenieError::io(path, source))?;
            match content.trim() {
                "VALID" => {}
                "ERROR" => result.push_error(format!("{name}: file content is ERROR.")),
                other => result.push_warning(format!(
                    "{name}: unrecognized content '{other}', expected VALID or ERROR."
                )),
            }
        }
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn claims_center_test_files() {
        let format = ExampleFormat::new("AAA");
        assert_eq!(
            format.validate_filename(&["TEST-AAAx1y2.txt", "TEST-AAA9.txt"]),
            FilenameMatch::matches("example")
        );
        assert!(matches!(
            format.validate_filename(&["TEST-BBB1.txt"]),
            FilenameMatch::Mismatch(_)
        ));
        assert!(matches!(
            format.validate_filename(&["TEST-AAA1.csv"]),
            FilenameMatch::Mismatch(_)
        ));
    }
}
