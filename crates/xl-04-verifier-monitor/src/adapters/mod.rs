//! # Adapters Layer

mod block_source;

pub use block_source::{InMemoryBlockSource, BLOCK_SOURCE_MEMORY_PACKAGE};
