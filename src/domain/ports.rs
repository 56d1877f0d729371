use async_trait::async_trait;
use crate::domain::{
    error::WriterError,
    models::{Batch, BulkResponse},
};

/// Connected index backend.
#[async_trait]
pub trait IndexClient: Send + Sync {
    /// One network call per batch. A failed call is a `Transport` error;
    /// per-document failures come back inside the response.
    async fn bulk(&self, batch: &Batch) -> Result<BulkResponse, WriterError>;

    async fn list_indices(&self) -> Result<Vec<String>, WriterError>;

    async fn list_mappings(&self, index: &str) -> Result<Vec<String>, WriterError>;
}

/// Header once, then rows until exhausted.
#[async_trait]
pub trait RowSource: Send {
    fn header(&self) -> &[String];

    async fn next_row(&mut self) -> Result<Option<Vec<String>>, WriterError>;
}
