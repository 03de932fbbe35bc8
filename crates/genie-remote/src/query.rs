use crate::client::RemoteError;

/// The only query shape the pipeline issues: every row of one table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableQuery {
    pub table_id: String,
}

impl TableQuery {
    /// Parse `select * from <id>`, keywords case-insensitive, optional trailing `;`.
    pub fn parse(query: &str) -> Result<Self, RemoteError> {
        let unsupported = || RemoteError::UnsupportedQuery(query.to_string());
        let trimmed = query.trim().trim_end_matches(';');
        let tokens: Vec<&str> = trimmed.split_whitespace().collect();
        match tokens.as_slice() {
            [select, "*", from, table_id]
                if select.eq_ignore_ascii_case("select") && from.eq_ignore_ascii_case("from") =>
            {
                Ok(Self {
                    table_id: (*table_id).to_string(),
                })
            }
            _ => Err(unsupported()),
        }
    }
}

/// The query string selecting all rows of `table_id`.
pub fn select_all(table_id: &str) -> String {
    format!("select * from {table_id}")
}
