use async_trait::async_trait;
use reqwest::{header::CONTENT_TYPE, Client, Response};
use tracing::{debug, error, info};
use crate::domain::{
    error::WriterError,
    models::{Batch, BulkResponse},
    ports::IndexClient,
};
use super::response::{decode_bulk, decode_index_names, decode_mapping_names};

/// Elasticsearch over its REST API.
pub struct ElasticsearchClient {
    client: Client,
    base_url: String,
}

impl ElasticsearchClient {
    /// `host` may omit the scheme (`localhost:9200`); plain http is assumed.
    pub fn new(host: &str) -> Self {
        let base_url = normalize_host(host);
        info!("Using Elasticsearch at {}", base_url);
        Self {
            client: Client::new(),
            base_url,
        }
    }

    async fn read_success(&self, response: Response, what: &str) -> Result<Vec<u8>, WriterError> {
        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|e| WriterError::transport(format!("{} response unreadable: {}", what, e)))?;

        if !status.is_success() {
            let body = String::from_utf8_lossy(&body);
            error!("{} request failed with status {}: {}", what, status, body);
            return Err(WriterError::transport(format!(
                "{} failed with status {}: {}",
                what, status, body
            )));
        }
        Ok(body.to_vec())
    }
}

fn normalize_host(host: &str) -> String {
    let host = host.trim().trim_end_matches('/');
    if host.starts_with("http://") || host.starts_with("https://") {
        host.to_string()
    } else {
        format!("http://{}", host)
    }
}

#[async_trait]
impl IndexClient for ElasticsearchClient {
    async fn bulk(&self, batch: &Batch) -> Result<BulkResponse, WriterError> {
        let url = format!("{}/_bulk", self.base_url);
        let body = batch.to_ndjson()?;
        debug!("Sending {} bytes of bulk body to {}", body.len(), url);

        let response = self
            .client
            .post(&url)
            .header(CONTENT_TYPE, "application/x-ndjson")
            .body(body)
            .send()
            .await
            .map_err(|e| WriterError::transport(e.to_string()))?;

        let body = self.read_success(response, "Bulk").await?;
        decode_bulk(&body)
    }

    async fn list_indices(&self) -> Result<Vec<String>, WriterError> {
        let url = format!("{}/_stats/indices", self.base_url);
        debug!("Fetching index stats from {}", url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| WriterError::transport(e.to_string()))?;

        let body = self.read_success(response, "Index stats").await?;
        decode_index_names(&body)
    }

    async fn list_mappings(&self, index: &str) -> Result<Vec<String>, WriterError> {
        let url = format!("{}/{}/_mapping", self.base_url, index);
        debug!("Fetching mappings from {}", url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| WriterError::transport(e.to_string()))?;

        let body = self.read_success(response, "Mapping").await?;
        decode_mapping_names(&body, index)
    }
}
