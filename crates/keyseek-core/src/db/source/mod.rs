//! Module: source
//! Responsibility: reference `QuerySource` adapters.
//! Does not own: the paging algorithm; adapters only order, filter, limit
//! and execute what they are handed.

mod memory;
#[cfg(feature = "sql")]
pub mod sql;

#[cfg(test)]
mod tests;

pub use memory::{MemoryQuery, MemorySource};
