mod client;
mod response;

pub use client::ElasticsearchClient;
