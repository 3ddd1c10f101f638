//! Core runtime for keyseek: keyset ("seek") pagination over ordered query
//! results, plus the ergonomics exported via the `prelude`.
#![warn(unreachable_pub)]

// public exports are one module level down
pub mod config;
pub mod db;
pub mod error;
pub mod obs;
pub mod serialize;
pub mod types;
pub mod value;

///
/// Prelude
///
/// Prelude contains only paging vocabulary.
/// No errors, sources, or serializers are re-exported here.
///

pub mod prelude {
    pub use crate::{
        db::{
            Cursor, Marker, NullPlacement, Page, PageRequest, SortColumn, SortDirection, SortSpec,
            TieBreaker,
        },
        types::Timestamp,
        value::{MarkerValue, ValueKind},
    };
}
