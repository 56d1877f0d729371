pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod writer_app;

pub use application::writer_service::BulkWriter;
pub use domain::error::WriterError;
pub use domain::models::{LoadOptions, LoadOutcome, LoadReport, DEFAULT_BULK_SIZE};
