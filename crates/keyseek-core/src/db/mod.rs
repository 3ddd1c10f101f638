//! Paging engine: sort specifications, cursors, seek predicates, and the
//! page fetch that ties them to an external query source.

pub mod codec;
pub mod cursor;
pub mod direction;
pub mod executor;
pub mod order;
pub mod predicate;
pub mod query;
pub mod response;
pub mod source;

// re-exports
pub use cursor::{Cursor, CursorError, Marker, decode_marker, encode_marker};
pub use direction::{NullPlacement, ScanDirection, SortDirection};
pub use executor::{PageRequest, RequestKind, fetch_page, fetch_page_with_policy};
pub use order::{SortColumn, SortSpec, SortSpecError, TieBreaker, build_sort_spec};
pub use predicate::{Predicate, build_seek_predicate};
pub use query::{QuerySource, SortKeyRow};
pub use response::Page;
