//! Module: predicate
//! Responsibility: storage-agnostic row filters and seek predicate construction.
//! Does not own: lowering predicates into a concrete query language.
//! Boundary: query sources receive a finished `Predicate` and conjoin it.

mod ast;
mod eval;
mod seek;


pub use ast::{CompareOp, ComparePredicate, Predicate};
pub use eval::eval;
pub use seek::build_seek_predicate;
