use std::num::NonZeroUsize;

use serde_json::Value;
use tracing::debug;
use crate::domain::{
    error::WriterError,
    models::{Batch, BulkAction, Document, IndexDirective, LoadOptions},
};

/// Buffers mapped rows into the next bulk request.
pub struct BatchAccumulator {
    batch: Batch,
    capacity: usize,
}

impl BatchAccumulator {
    pub fn new(bulk_size: NonZeroUsize) -> Self {
        Self {
            batch: Batch::with_capacity(bulk_size.get()),
            capacity: bulk_size.get(),
        }
    }

    /// Appends a document. With an identifier column the document is indexed
    /// under that column's value; a row without the column is an error and
    /// nothing is appended.
    pub fn add_document(
        &mut self,
        document: Document,
        options: &LoadOptions,
        id_column: Option<&str>,
        line: u64,
    ) -> Result<(), WriterError> {
        let id = match id_column {
            Some(column) => match document.get(column) {
                Some(value) => Some(identifier(value)),
                None => {
                    return Err(WriterError::MissingIdentifier {
                        column: column.to_string(),
                        line,
                    })
                }
            },
            None => None,
        };

        self.batch.push(BulkAction {
            directive: IndexDirective {
                index: options.index().to_string(),
                doc_type: options.doc_type().to_string(),
                id,
            },
            document,
        });
        Ok(())
    }

    /// Hands over the buffered batch and starts an empty one.
    pub fn take(&mut self) -> Batch {
        debug!("Resetting batch accumulator after {} documents", self.batch.len());
        std::mem::replace(&mut self.batch, Batch::with_capacity(self.capacity))
    }

    pub fn len(&self) -> usize {
        self.batch.len()
    }

    pub fn is_empty(&self) -> bool {
        self.batch.is_empty()
    }
}

fn identifier(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
