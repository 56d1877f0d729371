pub mod elasticsearch;
pub mod memory;
pub mod parsers;
