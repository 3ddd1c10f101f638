//! Module: query
//! Responsibility: the collaborator boundary between the paging engine and
//! whatever actually stores and queries rows.
//! Does not own: SQL rendering or in-memory evaluation (see `db::source`).
//! Boundary: the engine issues exactly one `execute` per fetch.

use crate::{
    db::{
        cursor::Marker,
        order::{SortColumn, SortSpec},
        predicate::Predicate,
    },
    error::DataSourceError,
    value::MarkerValue,
};
use std::collections::{BTreeMap, HashMap};

///
/// QuerySource
///
/// External query layer. Each `apply_*` call returns the refined query; the
/// engine never inspects a query, it only threads it through.
///

pub trait QuerySource {
    type Query;
    type Row: SortKeyRow;

    /// Replace any existing ordering with `columns`, most significant first.
    fn apply_order(&self, query: Self::Query, columns: &[SortColumn]) -> Self::Query;

    /// Conjoin `predicate` with the query's existing filters.
    fn apply_filter(&self, query: Self::Query, predicate: Predicate) -> Self::Query;

    fn apply_limit(&self, query: Self::Query, limit: usize) -> Self::Query;

    /// Run the query and return rows in the order it was asked for.
    fn execute(&self, query: Self::Query) -> Result<Vec<Self::Row>, DataSourceError>;
}

///
/// SortKeyRow
///
/// A result row that can report the value it holds in a named column.
/// `None` means the row does not expose that column at all; a SQL null is
/// `Some(MarkerValue::Null)`.
///

pub trait SortKeyRow {
    fn value(&self, column: &str) -> Option<MarkerValue>;
}

impl<R: SortKeyRow + ?Sized> SortKeyRow for &R {
    fn value(&self, column: &str) -> Option<MarkerValue> {
        (**self).value(column)
    }
}

impl SortKeyRow for BTreeMap<String, MarkerValue> {
    fn value(&self, column: &str) -> Option<MarkerValue> {
        self.get(column).cloned()
    }
}

impl<S: std::hash::BuildHasher> SortKeyRow for HashMap<String, MarkerValue, S> {
    fn value(&self, column: &str) -> Option<MarkerValue> {
        self.get(column).cloned()
    }
}

/// Project a row onto `spec`, yielding its marker.
pub fn project_marker<R: SortKeyRow + ?Sized>(
    row: &R,
    spec: &SortSpec,
) -> Result<Marker, DataSourceError> {
    let mut values = Vec::with_capacity(spec.len());

    for column in spec.columns() {
        let value = row.value(column.name()).ok_or_else(|| {
            DataSourceError::projection(format!(
                "row does not expose sort column '{}'",
                column.name()
            ))
        })?;

        if !value.fits(column.kind()) {
            return Err(DataSourceError::projection(format!(
                "sort column '{}' holds {}, declared {}",
                column.name(),
                value.label(),
                column.kind()
            )));
        }

        values.push(value);
    }

    Ok(Marker::new(values))
}
