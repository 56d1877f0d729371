use std::num::NonZeroUsize;

use serde::{Deserialize, Serialize};

use crate::domain::error::WriterError;

/// Number of rows sent per bulk request when the caller does not choose one.
pub const DEFAULT_BULK_SIZE: NonZeroUsize = match NonZeroUsize::new(500) {
    Some(size) => size,
    None => unreachable!(),
};

/// A mapped CSV row: field name to field value, in header order.
pub type Document = serde_json::Map<String, serde_json::Value>;

/// Where a load writes to and how many rows go into each bulk request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadOptions {
    index: String,
    doc_type: String,
    bulk_size: NonZeroUsize,
}

impl LoadOptions {
    pub fn new(index: impl Into<String>, doc_type: impl Into<String>) -> Self {
        Self {
            index: index.into(),
            doc_type: doc_type.into(),
            bulk_size: DEFAULT_BULK_SIZE,
        }
    }

    pub fn with_bulk_size(mut self, bulk_size: NonZeroUsize) -> Self {
        self.bulk_size = bulk_size;
        self
    }

    pub fn index(&self) -> &str {
        &self.index
    }

    pub fn doc_type(&self) -> &str {
        &self.doc_type
    }

    pub fn bulk_size(&self) -> NonZeroUsize {
        self.bulk_size
    }
}

/// Metadata line preceding a document in a bulk request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IndexDirective {
    #[serde(rename = "_index")]
    pub index: String,
    #[serde(rename = "_type")]
    pub doc_type: String,
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

#[derive(Serialize)]
struct DirectiveLine<'a> {
    index: &'a IndexDirective,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BulkAction {
    pub directive: IndexDirective,
    pub document: Document,
}

/// Ordered (directive, document) pairs sent as one bulk request.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Batch {
    actions: Vec<BulkAction>,
}

impl Batch {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            actions: Vec::with_capacity(capacity),
        }
    }

    pub fn push(&mut self, action: BulkAction) {
        self.actions.push(action);
    }

    pub fn actions(&self) -> &[BulkAction] {
        &self.actions
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// Renders the batch as a newline-delimited bulk body, newline terminated.
    pub fn to_ndjson(&self) -> Result<String, WriterError> {
        let mut body = String::new();
        for action in &self.actions {
            let directive = DirectiveLine { index: &action.directive };
            body.push_str(&serde_json::to_string(&directive).map_err(|e| WriterError::parse(e.to_string()))?);
            body.push('\n');
            body.push_str(&serde_json::to_string(&action.document).map_err(|e| WriterError::parse(e.to_string()))?);
            body.push('\n');
        }
        Ok(body)
    }
}

/// Structured cause attached to a rejected item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorCause {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

/// The backend reports item errors either as an object or as a bare string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ItemError {
    Structured(ErrorCause),
    Raw(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemResult {
    pub operation: String,
    pub id: String,
    pub status: u16,
    pub error: Option<ItemError>,
}

/// Decoded bulk response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BulkResponse {
    pub took: u64,
    pub errors: bool,
    pub items: Vec<ItemResult>,
}

/// A document the backend refused, with its rendered diagnostic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemRejection {
    pub id: String,
    pub status: u16,
    pub detail: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    /// Every row was submitted; `success` is false if any batch reported errors.
    Completed { success: bool },
    /// The load stopped at a row without the identifier column.
    Aborted { column: String, line: u64 },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadReport {
    pub outcome: LoadOutcome,
    pub rows_read: u64,
    pub batches_submitted: u64,
    pub rejections: Vec<ItemRejection>,
}

impl LoadReport {
    pub fn is_success(&self) -> bool {
        matches!(self.outcome, LoadOutcome::Completed { success: true })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionInfo {
    pub id: String,
}
