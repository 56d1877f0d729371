mod index;

pub use index::InMemoryIndex;
