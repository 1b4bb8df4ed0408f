//! campus-hub/crates/storage-adapters/src/lib.rs
//!
//! Implementations of the `CollectionStore` port. Each adapter persists one
//! JSON array per storage slot and replaces it wholesale on save; nothing
//! here knows which entity a slot holds.

#[cfg(feature = "store-json")]
mod json_file;
#[cfg(feature = "store-memory")]
mod memory;

#[cfg(feature = "store-json")]
pub use json_file::JsonFileStore;
#[cfg(feature = "store-memory")]
pub use memory::MemoryStore;
