use std::sync::Arc;
use tracing::{info, error, debug, warn};
use crate::{
    application::writer_service::BulkWriter,
    config::{Action, TableConfig, WriterConfig},
    domain::{error::WriterError, models::{CollectionInfo, LoadReport}, ports::IndexClient},
    infrastructure::{elasticsearch::ElasticsearchClient, parsers::csv_source::CsvRowSource},
};

pub struct WriterApp {
    writer: BulkWriter,
    config: WriterConfig,
}

impl WriterApp {
    pub fn new(config: WriterConfig) -> Self {
        debug!("Initializing writer against {}", config.elastic.host);
        let client = Arc::new(ElasticsearchClient::new(&config.elastic.host));
        Self::with_client(config, client)
    }

    pub fn with_client(config: WriterConfig, client: Arc<dyn IndexClient>) -> Self {
        Self {
            writer: BulkWriter::new(client),
            config,
        }
    }

    /// Runs the configured action. Listing actions return their JSON output.
    pub async fn run(&self) -> Result<Option<String>, WriterError> {
        match self.config.action {
            Action::Run => {
                self.write_tables().await?;
                Ok(None)
            }
            Action::ListIndices => {
                let indices = self.writer.list_indices().await?;
                to_json(&indices).map(Some)
            }
            Action::ListMappings => {
                let index = self
                    .config
                    .index
                    .as_deref()
                    .ok_or_else(|| WriterError::config("list_mappings requires `index`"))?;
                let mappings = self.writer.list_index_mappings(index).await?;
                to_json(&mappings).map(Some)
            }
        }
    }

    async fn write_tables(&self) -> Result<(), WriterError> {
        if self.config.tables.is_empty() {
            warn!("No tables configured, nothing to write");
            return Ok(());
        }

        let mut failed = Vec::new();
        for (i, table) in self.config.tables.iter().enumerate() {
            info!("Writing table {} of {}: {}", i + 1, self.config.tables.len(), table.file.display());
            match self.write_table(table).await {
                Ok(report) if report.is_success() => info!(
                    "Table {} written to {}/{}: {} rows in {} batches",
                    table.file.display(),
                    table.index,
                    table.doc_type,
                    report.rows_read,
                    report.batches_submitted
                ),
                Ok(report) => {
                    error!(
                        "Table {} was not fully written: {} rows read, {} documents rejected",
                        table.file.display(),
                        report.rows_read,
                        report.rejections.len()
                    );
                    failed.push(table.file.display().to_string());
                }
                Err(e) => {
                    error!("Failed to write table {}: {}", table.file.display(), e);
                    return Err(e);
                }
            }
        }

        if failed.is_empty() {
            Ok(())
        } else {
            Err(WriterError::LoadFailed(failed.join(", ")))
        }
    }

    async fn write_table(&self, table: &TableConfig) -> Result<LoadReport, WriterError> {
        let options = table.load_options()?;
        let mut source = CsvRowSource::from_path(&table.file)?;
        self.writer
            .load_file_report(&mut source, &options, table.id.as_deref())
            .await
    }
}

fn to_json(items: &[CollectionInfo]) -> Result<String, WriterError> {
    serde_json::to_string_pretty(items).map_err(|e| WriterError::parse(e.to_string()))
}
