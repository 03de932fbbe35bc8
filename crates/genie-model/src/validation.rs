use serde::{Deserialize, Serialize};

/// Outcome of a handler's content validation.
///
/// Validity is derived from the error text: a result is valid exactly when no
/// error text was produced. Warnings never affect validity.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationResult {
    errors: String,
    warnings: String,
}

impl ValidationResult {
    pub fn new(errors: impl Into<String>, warnings: impl Into<String>) -> Self {
        Self {
            errors: errors.into(),
            warnings: warnings.into(),
        }
    }

    /// A result with neither errors nor warnings.
    pub fn valid() -> Self {
        Self::default()
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn errors(&self) -> &str {
        &self.errors
    }

    pub fn warnings(&self) -> &str {
        &self.warnings
    }

    /// Append one error line, newline-terminated.
    pub fn push_error(&mut self, line: impl AsRef<str>) {
        push_line(&mut self.errors, line.as_ref());
    }

    /// Append one warning line, newline-terminated.
    pub fn push_warning(&mut self, line: impl AsRef<str>) {
        push_line(&mut self.warnings, line.as_ref());
    }

    pub fn merge(&mut self, other: ValidationResult) {
        self.errors.push_str(&other.errors);
        self.warnings.push_str(&other.warnings);
    }

    pub fn into_parts(self) -> (bool, String, String) {
        (self.is_valid(), self.errors, self.warnings)
    }
}

fn push_line(buffer: &mut String, line: &str) {
    buffer.push_str(line);
    if !line.ends_with('\n') {
        buffer.push('\n');
    }
}
