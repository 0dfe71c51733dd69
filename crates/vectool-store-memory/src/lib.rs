//! # vectool-store-memory
//!
//! Process-local reference backend implementing `VectorStore`.
//! Used by default for local development and throughout the test suites.
//! Nothing is persisted across restarts.

mod ids;
mod scoring;
pub mod store;
mod store_impl;

pub use ids::generate_id;
pub use store::{MemoryStore, MemoryStoreOptions};
