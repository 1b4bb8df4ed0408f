//! campus-hub/crates/domains/src/lib.rs
//!
//! The central domain logic and interface definitions for Campus-Hub.

pub mod error;
pub mod models;
pub mod query;
pub mod traits;
pub mod validate;
pub mod workflow;

// Re-exporting for easier access in other crates
pub use error::*;
pub use models::*;
pub use query::*;
pub use traits::*;
pub use validate::*;
pub use workflow::*;
