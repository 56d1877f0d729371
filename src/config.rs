use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::{debug, info};
use crate::domain::{
    error::WriterError,
    models::{LoadOptions, DEFAULT_BULK_SIZE},
};

pub const CONFIG_PATH_ENV: &str = "WRITER_CONFIG";
pub const HOST_ENV: &str = "ES_HOST";
pub const DEFAULT_CONFIG_PATH: &str = "config.yml";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    #[default]
    Run,
    ListIndices,
    ListMappings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ElasticConfig {
    pub host: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TableConfig {
    pub file: PathBuf,
    pub index: String,
    #[serde(rename = "type")]
    pub doc_type: String,
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub bulk_size: Option<usize>,
}

impl TableConfig {
    pub fn load_options(&self) -> Result<LoadOptions, WriterError> {
        let bulk_size = match self.bulk_size {
            None => DEFAULT_BULK_SIZE,
            Some(size) => NonZeroUsize::new(size).ok_or_else(|| {
                WriterError::config(format!("bulk_size for {} must be positive", self.file.display()))
            })?,
        };
        Ok(LoadOptions::new(&self.index, &self.doc_type).with_bulk_size(bulk_size))
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct WriterConfig {
    pub elastic: ElasticConfig,
    #[serde(default)]
    pub action: Action,
    /// Index whose mappings `list_mappings` reports.
    #[serde(default)]
    pub index: Option<String>,
    #[serde(default)]
    pub tables: Vec<TableConfig>,
}

impl WriterConfig {
    /// Config path from the first CLI argument, then `WRITER_CONFIG`, then `config.yml`.
    pub fn resolve_path(arg: Option<String>) -> PathBuf {
        arg.or_else(|| std::env::var(CONFIG_PATH_ENV).ok())
            .unwrap_or_else(|| DEFAULT_CONFIG_PATH.to_string())
            .into()
    }

    /// Reads the file, applies `ES_HOST`, and resolves table paths relative to the file.
    pub fn load(path: &Path) -> Result<Self, WriterError> {
        info!("Loading configuration from {}", path.display());
        let raw = std::fs::read_to_string(path)
            .map_err(|e| WriterError::config(format!("cannot read {}: {}", path.display(), e)))?;
        let mut config = Self::from_yaml(&raw)?;

        if let Ok(host) = std::env::var(HOST_ENV) {
            info!("Elasticsearch host overridden by {}", HOST_ENV);
            config.elastic.host = host;
        }

        if let Some(base) = path.parent() {
            for table in &mut config.tables {
                if table.file.is_relative() {
                    table.file = base.join(&table.file);
                }
            }
        }
        Ok(config)
    }

    pub fn from_yaml(raw: &str) -> Result<Self, WriterError> {
        let config: Self = serde_yaml::from_str(raw).map_err(|e| WriterError::config(e.to_string()))?;
        config.validate()?;
        debug!("Parsed configuration: {:?}", config);
        Ok(config)
    }

    fn validate(&self) -> Result<(), WriterError> {
        if self.action == Action::ListMappings && self.index.is_none() {
            return Err(WriterError::config("list_mappings requires `index`"));
        }
        for table in &self.tables {
            table.load_options()?;
        }
        Ok(())
    }
}
