//! Clinical supplementary files.
//!
//! A center submits either one combined file, `data_clinical_supp_<CENTER>.txt`,
//! or a sample/patient pair:
//! `data_clinical_supp_sample_<CENTER>.txt` and
//! `data_clinical_supp_patient_<CENTER>.txt`.

use std::collections::{BTreeMap, BTreeSet};

use genie_model::{Result, ValidationResult};
use genie_validate::{FileTypeFormat, FilenameMatch, FormatContext, ValidationRequest};

use crate::tabular::{TabularFile, read_tsv};

const FILE_TYPE: &str = "clinical";

const SAMPLE_ID: &str = "SAMPLE_ID";
const PATIENT_ID: &str = "PATIENT_ID";
const ONCOTREE_CODE: &str = "ONCOTREE_CODE";

#[derive(Debug, Clone)]
pub struct ClinicalFormat {
    center: String,
}

impl ClinicalFormat {
    pub fn new(center: impl Into<String>) -> Self {
        Self {
            center: center.into(),
        }
    }

    pub fn construct(context: &FormatContext) -> Box<dyn FileTypeFormat> {
        Box::new(Self::new(&context.center))
    }

    fn combined_name(&self) -> String {
        format!("data_clinical_supp_{}.txt", self.center)
    }

    fn split_names(&self) -> BTreeSet<String> {
        BTreeSet::from([
            format!("data_clinical_supp_sample_{}.txt", self.center),
            format!("data_clinical_supp_patient_{}.txt", self.center),
        ])
    }
}

/// Identifier columns a file must carry, judged by its name.
fn required_columns(name: &str) -> &'static [&'static str] {
    if name.contains("_sample_") {
        &[SAMPLE_ID]
    } else if name.contains("_patient_") {
        &[PATIENT_ID]
    } else {
        &[SAMPLE_ID, PATIENT_ID]
    }
}

fn check_table(table: &TabularFile, oncotree_link: Option<&str>, result: &mut ValidationResult) {
    let name = &table.name;
    if table.headers.is_empty() {
        result.push_error(format!("{name}: file is empty."));
        return;
    }

    for column in required_columns(name) {
        if !table.has_column(column) {
            result.push_error(format!("{name}: must have {column} column."));
        }
    }

    let ragged = table.ragged_lines();
    if !ragged.is_empty() {
        let lines: Vec<String> = ragged.iter().map(ToString::to_string).collect();
        result.push_error(format!(
            "{name}: rows must have {} values to match the header. Check lines: {}.",
            table.headers.len(),
            lines.join(", ")
        ));
    }

    if let Some(index) = table.column_index(PATIENT_ID) {
        let missing = table.column(index).filter(|(_, value)| value.is_empty()).count();
        if missing > 0 {
            result.push_error(format!(
                "{name}: {PATIENT_ID} has {missing} empty value(s)."
            ));
        }
    }

    if let Some(index) = table.column_index(SAMPLE_ID) {
        let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
        for (_, value) in table.column(index).filter(|(_, value)| !value.is_empty()) {
            *counts.entry(value).or_default() += 1;
        }
        let duplicated: Vec<&str> = counts
            .into_iter()
            .filter(|(_, count)| *count > 1)
            .map(|(value, _)| value)
            .collect();
        if !duplicated.is_empty() {
            result.push_error(format!(
                "{name}: {SAMPLE_ID} values must be unique. Duplicated: {}.",
                duplicated.join(", ")
            ));
        }
    }

    if oncotree_link.is_none() && table.has_column(ONCOTREE_CODE) {
        result.push_warning(format!(
            "{name}: {ONCOTREE_CODE} values were not checked because no oncotree link is available."
        ));
    }
}

impl FileTypeFormat for ClinicalFormat {
    fn file_type(&self) -> &str {
        FILE_TYPE
    }

    fn validate_filename(&self, filenames: &[&str]) -> FilenameMatch {
        let combined = self.combined_name();
        let split = self.split_names();
        let submitted: BTreeSet<String> = filenames.iter().map(|name| (*name).to_string()).collect();
        let claimed = match filenames {
            [single] => *single == combined,
            [_, _] => submitted == split,
            _ => false,
        };
        if claimed {
            FilenameMatch::matches(FILE_TYPE)
        } else {
            let split: Vec<String> = split.into_iter().collect();
            FilenameMatch::mismatch(format!(
                "clinical files must be named {combined} or {}",
                split.join(" and ")
            ))
        }
    }

    fn validate(&self, request: &ValidationRequest<'_>) -> Result<ValidationResult> {
        let mut result = ValidationResult::valid();
        for (name, path) in request.files() {
            match read_tsv(path) {
                Ok(mut table) => {
                    table.name = name.to_string();
                    check_table(&table, request.oncotree_link, &mut result);
                }
                Err(genie_model::GenieError::Parse { message, .. }) => result.push_error(
                    format!("{name}: could not be read as tab-delimited text: {message}"),
                ),
                Err(error) => return Err(error),
            }
        }
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn claims_combined_or_split_files() {
        let format = ClinicalFormat::new("SAGE");
        assert_eq!(
            format.validate_filename(&["data_clinical_supp_SAGE.txt"]),
            FilenameMatch::matches("clinical")
        );
        assert_eq!(
            format.validate_filename(&[
                "data_clinical_supp_patient_SAGE.txt",
                "data_clinical_supp_sample_SAGE.txt",
            ]),
            FilenameMatch::matches("clinical")
        );
    }

    #[test]
    fn rejects_other_names() {
        let format = ClinicalFormat::new("SAGE");
        for names in [
            vec!["wrong.txt"],
            vec!["data_clinical_supp_GOLD.txt"],
            vec!["data_clinical_supp_sample_SAGE.txt"],
            vec![
                "data_clinical_supp_sample_SAGE.txt",
                "data_clinical_supp_sample_SAGE.txt",
            ],
        ] {
            assert!(matches!(
                format.validate_filename(&names),
                FilenameMatch::Mismatch(_)
            ));
        }
    }

    #[test]
    fn required_columns_follow_file_name() {
        assert_eq!(
            required_columns("data_clinical_supp_sample_SAGE.txt"),
            &[SAMPLE_ID]
        );
        assert_eq!(
            required_columns("data_clinical_supp_patient_SAGE.txt"),
            &[PATIENT_ID]
        );
        assert_eq!(
            required_columns("data_clinical_supp_SAGE.txt"),
            &[SAMPLE_ID, PATIENT_ID]
        );
    }
}
