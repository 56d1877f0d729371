pub mod batch;
pub mod error_reporter;
pub mod outcome;
pub mod row_mapper;
pub mod submission;
pub mod writer_service;
