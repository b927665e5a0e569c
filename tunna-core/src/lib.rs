//! Core types and read-only lookup indices for the tunna disposal service.

/// Prefix search over the address index producing suggestions.
pub mod autocomplete;
/// The fully built, immutable catalog combining all indices.
pub mod catalog;
/// Sorted street-to-address index with area lookup.
pub mod index;
/// Domain data structures shared by the loader and the service.
pub mod model;
/// Area-to-schedule index partitioned by waste stream.
pub mod schedule;
/// High-level service facade used by clients.
pub mod service;

pub use catalog::*;
pub use index::*;
pub use model::*;
pub use schedule::*;
pub use service::*;
