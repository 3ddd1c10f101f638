//! Keyseek: keyset ("seek") pagination over ordered relational results.
//!
//! ## Crate layout
//! - `core`: values, sort specs, cursor codec, seek predicates, the paging
//!   engine, reference query sources, and observability.
//! - `error`: the public error taxonomy.
//!
//! The top-level `fetch_page` functions are the core engine with errors
//! mapped into [`Error`].

pub use keyseek_core as core;

pub mod error;

pub use error::{Error, ErrorKind, ErrorOrigin};
pub use keyseek_core::{
    config::PagingPolicy,
    db::{self, Page, PageRequest, QuerySource, SortSpec},
};

use keyseek_core::db::{SortColumn, TieBreaker};

//
// Consts
//

/// Workspace version re-export for downstream tooling/tests.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build a sort spec, appending tie-breakers not already present.
pub fn build_sort_spec(
    columns: impl IntoIterator<Item = SortColumn>,
    tie_breakers: impl IntoIterator<Item = TieBreaker>,
) -> Result<SortSpec, Error> {
    keyseek_core::db::build_sort_spec(columns, tie_breakers).map_err(Error::from)
}

/// Fetch one page under the default policy.
pub fn fetch_page<S: QuerySource>(
    source: &S,
    query: S::Query,
    spec: &SortSpec,
    page_size: u32,
    request: PageRequest,
) -> Result<Page<S::Row>, Error> {
    keyseek_core::db::fetch_page(source, query, spec, page_size, request).map_err(Error::from)
}

/// Fetch one page under an explicit policy.
pub fn fetch_page_with_policy<S: QuerySource>(
    source: &S,
    query: S::Query,
    spec: &SortSpec,
    page_size: u32,
    request: PageRequest,
    policy: &PagingPolicy,
) -> Result<Page<S::Row>, Error> {
    keyseek_core::db::fetch_page_with_policy(source, query, spec, page_size, request, policy)
        .map_err(Error::from)
}

///
/// Prelude
/// using _ brings traits into scope and avoids name conflicts
///

pub mod prelude {
    pub use crate::{
        Error, ErrorKind, PagingPolicy,
        core::{
            db::{QuerySource as _, SortKeyRow as _, source::MemorySource},
            prelude::*,
        },
        fetch_page,
    };
}

///
/// TESTS
///
