use crate::{
    db::{
        order::{SortColumn, compare_keys},
        predicate::{Predicate, eval},
        query::{QuerySource, SortKeyRow},
    },
    error::DataSourceError,
    value::MarkerValue,
};

///
/// MemoryQuery
///
/// Query shape understood by [`MemorySource`]: a filter, an ordering and an
/// optional row limit.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct MemoryQuery {
    filter: Predicate,
    order: Vec<SortColumn>,
    limit: Option<usize>,
}

impl MemoryQuery {
    /// Unfiltered, unordered, unlimited query.
    #[must_use]
    pub const fn all() -> Self {
        Self {
            filter: Predicate::True,
            order: Vec::new(),
            limit: None,
        }
    }

    /// Query restricted by a caller filter; paging conjoins onto it.
    #[must_use]
    pub const fn filtered(filter: Predicate) -> Self {
        Self {
            filter,
            order: Vec::new(),
            limit: None,
        }
    }

    #[must_use]
    pub const fn filter(&self) -> &Predicate {
        &self.filter
    }

    #[must_use]
    pub fn order(&self) -> &[SortColumn] {
        &self.order
    }

    #[must_use]
    pub const fn limit(&self) -> Option<usize> {
        self.limit
    }
}

impl Default for MemoryQuery {
    fn default() -> Self {
        Self::all()
    }
}

///
/// MemorySource
///
/// In-memory relation. Filters with SQL three-valued semantics and sorts
/// with each column's null placement, so it behaves like a relational
/// engine for paging purposes.
///

#[derive(Clone, Debug, Default)]
pub struct MemorySource<R> {
    rows: Vec<R>,
}

impl<R> MemorySource<R> {
    #[must_use]
    pub const fn new(rows: Vec<R>) -> Self {
        Self { rows }
    }

    #[must_use]
    pub fn rows(&self) -> &[R] {
        &self.rows
    }

    pub fn push(&mut self, row: R) {
        self.rows.push(row);
    }
}

impl<R> FromIterator<R> for MemorySource<R> {
    fn from_iter<I: IntoIterator<Item = R>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<R: SortKeyRow + Clone> QuerySource for MemorySource<R> {
    type Query = MemoryQuery;
    type Row = R;

    fn apply_order(&self, mut query: MemoryQuery, columns: &[SortColumn]) -> MemoryQuery {
        query.order = columns.to_vec();
        query
    }

    fn apply_filter(&self, mut query: MemoryQuery, predicate: Predicate) -> MemoryQuery {
        query.filter = query.filter.conjoin(predicate);
        query
    }

    fn apply_limit(&self, mut query: MemoryQuery, limit: usize) -> MemoryQuery {
        query.limit = Some(limit);
        query
    }

    fn execute(&self, query: MemoryQuery) -> Result<Vec<R>, DataSourceError> {
        let mut keyed: Vec<(Vec<MarkerValue>, &R)> = self
            .rows
            .iter()
            .filter(|row| eval(*row, &query.filter))
            .map(|row| (sort_key(row, &query.order), row))
            .collect();

        // Stable sort keeps insertion order for rows the ordering ties.
        keyed.sort_by(|(left, _), (right, _)| compare_keys(&query.order, left, right));

        let limit = query.limit.unwrap_or(keyed.len());

        Ok(keyed
            .into_iter()
            .take(limit)
            .map(|(_, row)| row.clone())
            .collect())
    }
}

fn sort_key<R: SortKeyRow>(row: &R, order: &[SortColumn]) -> Vec<MarkerValue> {
    order
        .iter()
        .map(|column| row.value(column.name()).unwrap_or(MarkerValue::Null))
        .collect()
}
