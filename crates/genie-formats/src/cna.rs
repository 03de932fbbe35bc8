//! Copy-number (CNA) matrix files: `data_CNA_<CENTER>.txt`.
//!
//! One row per gene, keyed by `Hugo_Symbol`, one column per sample.

use std::collections::BTreeMap;

use genie_model::{GenieError, Result, ValidationResult};
use genie_validate::{FileTypeFormat, FilenameMatch, FormatContext, ValidationRequest};

use crate::tabular::{TabularFile, read_tsv};

const FILE_TYPE: &str = "cna";
const HUGO_SYMBOL: &str = "Hugo_Symbol";

/// Values accepted in sample columns besides numbers.
const MISSING_VALUES: &[&str] = &["", "NA", "nan", "NaN"];

#[derive(Debug, Clone)]
pub struct CnaFormat {
    center: String,
}

impl CnaFormat {
    pub fn new(center: impl Into<String>) -> Self {
        Self {
            center: center.into(),
        }
    }

    pub fn construct(context: &FormatContext) -> Box<dyn FileTypeFormat> {
        Box::new(Self::new(&context.center))
    }
}

fn check_symbols(table: &TabularFile, result: &mut ValidationResult) {
    let name = &table.name;
    if !table
        .headers
        .first()
        .is_some_and(|first| first == HUGO_SYMBOL)
    {
        result.push_error(format!("{name}: first column header must be {HUGO_SYMBOL}."));
        return;
    }

    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    let mut empty = 0usize;
    for (_, symbol) in table.column(0) {
        if symbol.is_empty() {
            empty += 1;
        } else {
            *counts.entry(symbol).or_default() += 1;
        }
    }
    if empty > 0 {
        result.push_error(format!("{name}: {HUGO_SYMBOL} has {empty} empty value(s)."));
    }
    let duplicated: Vec<&str> = counts
        .into_iter()
        .filter(|(_, count)| *count > 1)
        .map(|(symbol, _)| symbol)
        .collect();
    if !duplicated.is_empty() {
        result.push_error(format!(
            "{name}: {HUGO_SYMBOL} values must be unique. Duplicated: {}.",
            duplicated.join(", ")
        ));
    }
}

fn check_values(table: &TabularFile, result: &mut ValidationResult) {
    let name = &table.name;
    if table.headers.len() < 2 {
        result.push_warning(format!("{name}: no sample columns found."));
        return;
    }
    let non_numeric = table
        .rows
        .iter()
        .flat_map(|(_, row)| row.iter().skip(1))
        .filter(|value| !MISSING_VALUES.contains(&value.as_str()) && value.parse::<f64>().is_err())
        .count();
    if non_numeric > 0 {
        result.push_error(format!(
            "{name}: sample columns must contain numeric values; found {non_numeric} non-numeric value(s)."
        ));
    }
}

impl FileTypeFormat for CnaFormat {
    fn file_type(&self) -> &str {
        FILE_TYPE
    }

    fn validate_filename(&self, filenames: &[&str]) -> FilenameMatch {
        let expected = format!("data_CNA_{}.txt", self.center);
        match filenames {
            [single] if *single == expected => FilenameMatch::matches(FILE_TYPE),
            _ => FilenameMatch::mismatch(format!("CNA submissions must be one file named {expected}")),
        }
    }

    fn validate(&self, request: &ValidationRequest<'_>) -> Result<ValidationResult> {
        let mut result = ValidationResult::valid();
        for (name, path) in request.files() {
            let mut table = match read_tsv(path) {
                Ok(table) => table,
                Err(GenieError::Parse { message, .. }) => {
                    result.push_error(format!(
                        "{name}: could not be read as tab-delimited text: {message}"
                    ));
                    continue;
                }
                Err(error) => return Err(error),
            };
            table.name = name.to_string();
            if table.headers.is_empty() {
                result.push_error(format!("{}: file is empty.", table.name));
                continue;
            }
            if !request.nosymbol_check {
                check_symbols(&table, &mut result);
            }
            check_values(&table, &mut result);
        }
        Ok(result)
    }
}
