use std::fs::File;
use std::io::Read;
use std::path::Path;

use async_trait::async_trait;
use csv::{ReaderBuilder, StringRecord};
use tracing::{debug, error};
use crate::domain::{error::WriterError, ports::RowSource};

/// Reads a CSV with a header line. Rows are handed out as-is; a row whose
/// length differs from the header is left for the row mapper to reject.
pub struct CsvRowSource {
    reader: csv::Reader<Box<dyn Read + Send>>,
    header: Vec<String>,
    record: StringRecord,
    rows_read: u64,
}

impl CsvRowSource {
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, WriterError> {
        let path = path.as_ref();
        debug!("Opening CSV file {}", path.display());
        let file = File::open(path).map_err(|e| {
            error!("Failed to open CSV file {}: {}", path.display(), e);
            e
        })?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read + Send + 'static>(reader: R) -> Result<Self, WriterError> {
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(Box::new(reader) as Box<dyn Read + Send>);

        let header: Vec<String> = reader
            .headers()
            .map_err(|e| {
                error!("Failed to read CSV headers: {}", e);
                WriterError::parse(e.to_string())
            })?
            .iter()
            .map(String::from)
            .collect();

        debug!("Found {} columns in CSV", header.len());
        debug!("CSV headers: {:?}", header);

        Ok(Self {
            reader,
            header,
            record: StringRecord::new(),
            rows_read: 0,
        })
    }
}

#[async_trait]
impl RowSource for CsvRowSource {
    fn header(&self) -> &[String] {
        &self.header
    }

    async fn next_row(&mut self) -> Result<Option<Vec<String>>, WriterError> {
        let more = self.reader.read_record(&mut self.record).map_err(|e| {
            error!("Failed to read CSV record at row {}: {}", self.rows_read + 1, e);
            WriterError::parse(e.to_string())
        })?;

        if !more {
            debug!("CSV exhausted after {} rows", self.rows_read);
            return Ok(None);
        }

        self.rows_read += 1;
        if self.rows_read % 1000 == 0 {
            debug!("Read {} CSV rows", self.rows_read);
        }
        Ok(Some(self.record.iter().map(String::from).collect()))
    }
}
