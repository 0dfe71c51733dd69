//! # vectool-store
//!
//! Port definitions for backing stores.
//! Adapter crates (e.g. `vectool-store-memory`) implement [`VectorStore`].

pub mod context;
pub mod error;
pub mod store;

pub use context::CallContext;
pub use error::StoreError;
pub use store::VectorStore;
