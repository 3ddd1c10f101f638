//! Module: response
//! Responsibility: the immutable page snapshot handed back to callers.
//! Does not own: fetching rows or encoding cursors.
//! Boundary: pages are built once by the executor and never mutated.

mod paged;


pub use paged::Page;
