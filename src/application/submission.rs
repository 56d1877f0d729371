use std::time::Instant;

use tracing::{error, info};
use crate::application::error_reporter;
use crate::domain::{
    error::WriterError,
    models::{Batch, ItemRejection, LoadOptions},
    ports::IndexClient,
};

/// What one bulk request left behind for the outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionResult {
    pub errors: bool,
    /// Backend-reported processing time in milliseconds.
    pub took: u64,
    pub rejections: Vec<ItemRejection>,
}

/// Sends `batch` as one bulk request. No retry: transport failures propagate,
/// item rejections are logged and returned.
pub async fn submit(
    client: &dyn IndexClient,
    batch: &Batch,
    options: &LoadOptions,
    sequence: u64,
) -> Result<SubmissionResult, WriterError> {
    info!(
        batch = sequence,
        documents = batch.len(),
        "Write {} batch {} to {} start",
        options.doc_type(),
        sequence,
        options.index()
    );

    let started = Instant::now();
    let response = client.bulk(batch).await?;
    let elapsed_ms = started.elapsed().as_millis();

    info!(
        batch = sequence,
        took = response.took,
        "Write {} batch {} to {} took {} ms",
        options.doc_type(),
        sequence,
        options.index(),
        elapsed_ms
    );

    let rejections = if response.errors {
        response
            .items
            .iter()
            .filter_map(error_reporter::describe)
            .inspect(|rejection| error!("{}", rejection))
            .collect()
    } else {
        Vec::new()
    };

    Ok(SubmissionResult {
        errors: response.errors,
        took: response.took,
        rejections,
    })
}
