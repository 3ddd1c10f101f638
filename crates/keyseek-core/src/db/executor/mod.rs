//! Module: executor
//! Responsibility: one page fetch, end to end, against a query source.
//! Does not own: cursor wire format, predicate shape, or query execution.
//! Boundary: the only caller of `QuerySource::execute`.

mod page;
mod request;

#[cfg(test)]
mod tests;

pub use page::{fetch_page, fetch_page_with_policy};
pub use request::{PageRequest, RequestKind};
