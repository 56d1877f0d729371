use std::collections::{BTreeMap, HashMap};
use std::sync::{Mutex, MutexGuard};
use std::time::Instant;

use async_trait::async_trait;
use tracing::{debug, warn};
use uuid::Uuid;
use crate::domain::{
    error::WriterError,
    models::{Batch, BulkResponse, Document, ErrorCause, ItemError, ItemResult},
    ports::IndexClient,
};

/// type name -> document id -> document
type IndexDocuments = BTreeMap<String, BTreeMap<String, Document>>;

#[derive(Default)]
struct State {
    indices: BTreeMap<String, IndexDocuments>,
    rejected_types: HashMap<String, ItemError>,
    fail_transport: Option<String>,
    bulk_calls: usize,
}

/// Index backend kept in process memory.
///
/// Documents indexed under an explicit id replace the previous version;
/// documents without one get a fresh surrogate id. Whole types can be set to
/// reject every document, and the transport can be set to fail.
#[derive(Default)]
pub struct InMemoryIndex {
    state: Mutex<State>,
}

impl InMemoryIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every document sent to `doc_type` comes back with a 400 and this error.
    pub fn reject_type(&self, doc_type: impl Into<String>, error: ItemError) -> Result<(), WriterError> {
        self.lock()?.rejected_types.insert(doc_type.into(), error);
        Ok(())
    }

    /// Every following bulk call fails as a whole with `message`.
    pub fn fail_transport(&self, message: impl Into<String>) -> Result<(), WriterError> {
        self.lock()?.fail_transport = Some(message.into());
        Ok(())
    }

    pub fn bulk_calls(&self) -> Result<usize, WriterError> {
        Ok(self.lock()?.bulk_calls)
    }

    pub fn document_count(&self, index: &str, doc_type: &str) -> Result<usize, WriterError> {
        Ok(self
            .lock()?
            .indices
            .get(index)
            .and_then(|types| types.get(doc_type))
            .map_or(0, BTreeMap::len))
    }

    pub fn document(&self, index: &str, doc_type: &str, id: &str) -> Result<Option<Document>, WriterError> {
        Ok(self
            .lock()?
            .indices
            .get(index)
            .and_then(|types| types.get(doc_type))
            .and_then(|docs| docs.get(id))
            .cloned())
    }

    fn lock(&self) -> Result<MutexGuard<'_, State>, WriterError> {
        self.state
            .lock()
            .map_err(|_| WriterError::transport("in-memory index state is poisoned"))
    }
}

fn invalid_index(index: &str) -> ItemError {
    ItemError::Structured(ErrorCause {
        kind: Some("invalid_index_name_exception".into()),
        reason: Some(format!("Invalid index name [{}], must not be empty", index)),
    })
}

#[async_trait]
impl IndexClient for InMemoryIndex {
    async fn bulk(&self, batch: &Batch) -> Result<BulkResponse, WriterError> {
        let started = Instant::now();
        let mut state = self.lock()?;
        state.bulk_calls += 1;

        if let Some(message) = &state.fail_transport {
            warn!("In-memory bulk call {} failing: {}", state.bulk_calls, message);
            return Err(WriterError::transport(message.clone()));
        }

        let mut items = Vec::with_capacity(batch.len());
        for action in batch.actions() {
            let directive = &action.directive;
            let id = directive
                .id
                .clone()
                .unwrap_or_else(|| Uuid::new_v4().to_string());

            let rejection = if directive.index.is_empty() {
                Some(invalid_index(&directive.index))
            } else {
                state.rejected_types.get(&directive.doc_type).cloned()
            };

            let (status, error) = match rejection {
                Some(error) => (400, Some(error)),
                None => {
                    let replaced = state
                        .indices
                        .entry(directive.index.clone())
                        .or_default()
                        .entry(directive.doc_type.clone())
                        .or_default()
                        .insert(id.clone(), action.document.clone());
                    (if replaced.is_some() { 200 } else { 201 }, None)
                }
            };

            items.push(ItemResult {
                operation: "index".into(),
                id,
                status,
                error,
            });
        }

        let errors = items.iter().any(|item| item.status >= 400);
        debug!("In-memory bulk call {} indexed {} items, errors: {}", state.bulk_calls, items.len(), errors);

        Ok(BulkResponse {
            took: u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX),
            errors,
            items,
        })
    }

    async fn list_indices(&self) -> Result<Vec<String>, WriterError> {
        Ok(self.lock()?.indices.keys().cloned().collect())
    }

    async fn list_mappings(&self, index: &str) -> Result<Vec<String>, WriterError> {
        self.lock()?
            .indices
            .get(index)
            .map(|types| types.keys().cloned().collect())
            .ok_or_else(|| WriterError::transport(format!("index_not_found_exception: no such index [{}]", index)))
    }
}
