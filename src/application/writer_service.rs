use std::sync::Arc;
use tracing::{debug, error};
use crate::application::{
    batch::BatchAccumulator,
    outcome::OutcomeAggregator,
    row_mapper::map_row,
    submission::submit,
};
use crate::domain::{
    error::WriterError,
    models::{CollectionInfo, LoadOptions, LoadReport},
    ports::{IndexClient, RowSource},
};

/// Streams CSV rows into the index in bulk batches.
///
/// One load at a time per client; batches are submitted sequentially and the
/// next batch is not accumulated until the previous request has returned.
pub struct BulkWriter {
    client: Arc<dyn IndexClient>,
}

impl BulkWriter {
    pub fn new(client: Arc<dyn IndexClient>) -> Self {
        Self { client }
    }

    /// Loads every row of `source`. Returns `false` if any batch reported
    /// item errors or a row lacked the identifier column.
    pub async fn load_file<S>(
        &self,
        source: &mut S,
        options: &LoadOptions,
        id_column: Option<&str>,
    ) -> Result<bool, WriterError>
    where
        S: RowSource + ?Sized,
    {
        Ok(self.load_file_report(source, options, id_column).await?.is_success())
    }

    /// Same as [`BulkWriter::load_file`] but keeps the counts and rejected items.
    ///
    /// Malformed rows and transport failures abort the load with `Err`. A row
    /// without the identifier column stops the load with an `Aborted` outcome;
    /// the rows buffered before it are not submitted. Item rejections are
    /// logged and the remaining batches are still sent.
    pub async fn load_file_report<S>(
        &self,
        source: &mut S,
        options: &LoadOptions,
        id_column: Option<&str>,
    ) -> Result<LoadReport, WriterError>
    where
        S: RowSource + ?Sized,
    {
        let id_column = id_column.filter(|column| !column.is_empty());
        let header = source.header().to_vec();
        let bulk_size = options.bulk_size().get() as u64;
        debug!(
            "Loading into {}/{} with bulk size {}, id column {:?}, header {:?}",
            options.index(),
            options.doc_type(),
            bulk_size,
            id_column,
            header
        );

        let mut accumulator = BatchAccumulator::new(options.bulk_size());
        let mut outcome = OutcomeAggregator::new();
        let mut rows = 0u64;
        let mut sequence = 1u64;

        while let Some(row) = source.next_row().await? {
            rows += 1;
            // header is line 1
            let line = rows + 1;
            let document = map_row(&header, row, line)?;

            if let Err(e) = accumulator.add_document(document, options, id_column, line) {
                return match e {
                    WriterError::MissingIdentifier { column, line } => {
                        error!("CSV error: Missing id column {} on line {}", column, line);
                        Ok(outcome.abort(column, line, rows))
                    }
                    other => Err(other),
                };
            }

            if rows % bulk_size == 0 {
                let batch = accumulator.take();
                let result = submit(self.client.as_ref(), &batch, options, sequence).await?;
                outcome.record_submission(result);
                sequence += 1;
            }
        }

        if !accumulator.is_empty() {
            let batch = accumulator.take();
            let result = submit(self.client.as_ref(), &batch, options, sequence).await?;
            outcome.record_submission(result);
        }

        let report = outcome.finish(rows);
        debug!(
            "Loaded {} rows into {}/{} in {} batches, {} rejected",
            report.rows_read,
            options.index(),
            options.doc_type(),
            report.batches_submitted,
            report.rejections.len()
        );
        Ok(report)
    }

    pub async fn list_indices(&self) -> Result<Vec<CollectionInfo>, WriterError> {
        let indices = self.client.list_indices().await?;
        debug!("Found {} indices", indices.len());
        Ok(indices.into_iter().map(|id| CollectionInfo { id }).collect())
    }

    pub async fn list_index_mappings(&self, index: &str) -> Result<Vec<CollectionInfo>, WriterError> {
        let mappings = self.client.list_mappings(index).await?;
        debug!("Found {} mappings in index {}", mappings.len(), index);
        Ok(mappings.into_iter().map(|id| CollectionInfo { id }).collect())
    }
}
