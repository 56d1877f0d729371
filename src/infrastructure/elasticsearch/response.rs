//! Wire shapes of the bulk, stats and mapping responses. Decoded here and
//! converted to domain types before leaving the module.

use std::collections::BTreeMap;

use serde::Deserialize;
use serde_json::Value;
use crate::domain::{
    error::WriterError,
    models::{BulkResponse, ItemError, ItemResult},
};

#[derive(Debug, Deserialize)]
struct RawBulkResponse {
    #[serde(default)]
    took: u64,
    errors: bool,
    #[serde(default)]
    items: Vec<BTreeMap<String, RawBulkItem>>,
}

#[derive(Debug, Deserialize)]
struct RawBulkItem {
    #[serde(rename = "_id", default)]
    id: Option<String>,
    status: u16,
    #[serde(default)]
    error: Option<ItemError>,
}

pub(crate) fn decode_bulk(body: &[u8]) -> Result<BulkResponse, WriterError> {
    let raw: RawBulkResponse = serde_json::from_slice(body)
        .map_err(|e| WriterError::parse(format!("invalid bulk response: {}", e)))?;

    let items = raw
        .items
        .into_iter()
        .filter_map(|entry| entry.into_iter().next())
        .map(|(operation, item)| ItemResult {
            operation,
            id: item.id.unwrap_or_default(),
            status: item.status,
            error: item.error,
        })
        .collect();

    Ok(BulkResponse {
        took: raw.took,
        errors: raw.errors,
        items,
    })
}

#[derive(Debug, Deserialize)]
struct RawStats {
    #[serde(default)]
    indices: BTreeMap<String, Value>,
}

pub(crate) fn decode_index_names(body: &[u8]) -> Result<Vec<String>, WriterError> {
    let raw: RawStats = serde_json::from_slice(body)
        .map_err(|e| WriterError::parse(format!("invalid stats response: {}", e)))?;
    Ok(raw.indices.into_keys().collect())
}

#[derive(Debug, Deserialize)]
struct RawIndexMapping {
    #[serde(default)]
    mappings: serde_json::Map<String, Value>,
}

pub(crate) fn decode_mapping_names(body: &[u8], index: &str) -> Result<Vec<String>, WriterError> {
    let mut raw: BTreeMap<String, RawIndexMapping> = serde_json::from_slice(body)
        .map_err(|e| WriterError::parse(format!("invalid mapping response: {}", e)))?;
    Ok(raw
        .remove(index)
        .map(|mapping| mapping.mappings.into_iter().map(|(name, _)| name).collect())
        .unwrap_or_default())
}
