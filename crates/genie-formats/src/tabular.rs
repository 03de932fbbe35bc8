use std::fs::File;
use std::path::Path;

use csv::ReaderBuilder;
use tracing::debug;

use genie_model::{GenieError, Result};

/// A tab-delimited file with its header split off.
#[derive(Debug, Clone)]
pub(crate) struct TabularFile {
    pub name: String,
    pub headers: Vec<String>,
    /// Data rows as read, with their 1-based line numbers. Widths may differ
    /// from the header.
    pub rows: Vec<(usize, Vec<String>)>,
}

impl TabularFile {
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers
            .iter()
            .position(|header| header.eq_ignore_ascii_case(name))
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column_index(name).is_some()
    }

    /// Values of one column; short rows yield empty strings.
    pub fn column(&self, index: usize) -> impl Iterator<Item = (usize, &str)> {
        self.rows.iter().map(move |(line, row)| {
            (*line, row.get(index).map(String::as_str).unwrap_or(""))
        })
    }

    /// Line numbers of rows whose width differs from the header.
    pub fn ragged_lines(&self) -> Vec<usize> {
        self.rows
            .iter()
            .filter(|(_, row)| row.len() != self.headers.len())
            .map(|(line, _)| *line)
            .collect()
    }
}

pub(crate) fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

fn normalize_cell(raw: &str) -> String {
    raw.trim().trim_matches('\u{feff}').to_string()
}

/// Read a tab-delimited file. Lines starting with `#` and blank lines are skipped.
pub(crate) fn read_tsv(path: &Path) -> Result<TabularFile> {
    let file = File::open(path).map_err(|source| GenieError::io(path, source))?;
    let mut reader = ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(false)
        .flexible(true)
        .comment(Some(b'#'))
        .from_reader(file);

    let mut records = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|error| GenieError::parse(path, error))?;
        let line = record
            .position()
            .map(|position| position.line() as usize)
            .unwrap_or(records.len() + 1);
        let row: Vec<String> = record.iter().map(normalize_cell).collect();
        if row.iter().all(String::is_empty) {
            continue;
        }
        records.push((line, row));
    }

    let mut records = records.into_iter();
    let headers = records.next().map(|(_, header)| header).unwrap_or_default();
    let table = TabularFile {
        name: display_name(path),
        headers,
        rows: records.collect(),
    };
    debug!(
        file = %table.name,
        columns = table.headers.len(),
        rows = table.rows.len(),
        "read tab-delimited file"
    );
    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_header_rows_and_line_numbers() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("data_clinical_supp_SAGE.txt");
        std::fs::write(
            &path,
            "#comment line\nSAMPLE_ID\tPATIENT_ID\nS1\tP1\n\nS2\tP2\textra\n",
        )
        .expect("write");

        let table = read_tsv(&path).expect("read");
        assert_eq!(table.name, "data_clinical_supp_SAGE.txt");
        assert_eq!(table.headers, vec!["SAMPLE_ID", "PATIENT_ID"]);
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.ragged_lines().len(), 1);
        assert_eq!(table.column_index("patient_id"), Some(1));
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = read_tsv(Path::new("does/not/exist.txt")).unwrap_err();
        assert!(matches!(err, GenieError::Io { .. }));
    }
}
