use serde_json::Value;
use tracing::debug;
use crate::domain::{error::WriterError, models::Document};

/// Pairs a row with the header positionally. `line` is the CSV line the row
/// came from and is only used for the error.
pub fn map_row(header: &[String], row: Vec<String>, line: u64) -> Result<Document, WriterError> {
    if header.len() != row.len() {
        debug!("Row on line {} has {} fields, header has {}", line, row.len(), header.len());
        return Err(WriterError::MalformedRow {
            line,
            expected: header.len(),
            found: row.len(),
        });
    }

    Ok(header
        .iter()
        .cloned()
        .zip(row.into_iter().map(Value::String))
        .collect())
}
