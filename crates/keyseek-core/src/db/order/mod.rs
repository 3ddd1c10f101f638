//! Module: order
//! Responsibility: compound sort specifications and their total row ordering.
//! Does not own: marker encoding, predicate construction, or query execution.
//! Boundary: every page fetch in a session shares one immutable `SortSpec`.

#[cfg(test)]
mod tests;

use crate::{
    db::direction::{NullPlacement, SortDirection},
    value::{MarkerValue, ValueKind, canonical_cmp},
};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use thiserror::Error as ThisError;

///
/// SortSpecError
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum SortSpecError {
    #[error("sort specification must contain at least one column")]
    Empty,

    #[error("sort specification requires at least one tie-breaker column")]
    MissingTieBreaker,

    #[error("sort column name must be non-empty (position {position})")]
    EmptyColumnName { position: usize },

    #[error("sort column '{name}' appears more than once")]
    DuplicateColumn { name: String },

    #[error("tie-breaker '{name}' is declared as {expected} but the sort column is {found}")]
    TieBreakerKindMismatch {
        name: String,
        expected: ValueKind,
        found: ValueKind,
    },
}

///
/// SortColumn
///
/// One (column, direction, null placement) triple. The column reference is
/// an opaque name resolved by the query source; `kind` is the declared
/// semantic type that cursor values are validated against.
///

#[derive(Clone, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub struct SortColumn {
    name: String,
    kind: ValueKind,
    direction: SortDirection,
    nulls: NullPlacement,
}

impl SortColumn {
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        kind: ValueKind,
        direction: SortDirection,
        nulls: NullPlacement,
    ) -> Self {
        Self {
            name: name.into(),
            kind,
            direction,
            nulls,
        }
    }

    /// Ascending column with the default null placement.
    #[must_use]
    pub fn asc(name: impl Into<String>, kind: ValueKind) -> Self {
        let direction = SortDirection::Asc;

        Self::new(name, kind, direction, NullPlacement::default_for(direction))
    }

    /// Descending column with the default null placement.
    #[must_use]
    pub fn desc(name: impl Into<String>, kind: ValueKind) -> Self {
        let direction = SortDirection::Desc;

        Self::new(name, kind, direction, NullPlacement::default_for(direction))
    }

    #[must_use]
    pub const fn nulls_first(mut self) -> Self {
        self.nulls = NullPlacement::First;
        self
    }

    #[must_use]
    pub const fn nulls_last(mut self) -> Self {
        self.nulls = NullPlacement::Last;
        self
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub const fn kind(&self) -> ValueKind {
        self.kind
    }

    #[must_use]
    pub const fn direction(&self) -> SortDirection {
        self.direction
    }

    #[must_use]
    pub const fn nulls(&self) -> NullPlacement {
        self.nulls
    }

    /// Same column with direction and null placement both flipped, so the
    /// resulting order is the exact mirror of this one.
    #[must_use]
    pub fn reversed(&self) -> Self {
        Self {
            name: self.name.clone(),
            kind: self.kind,
            direction: self.direction.reversed(),
            nulls: self.nulls.reversed(),
        }
    }

    /// Compare two values of this column under its direction and null placement.
    #[must_use]
    pub fn compare(&self, left: &MarkerValue, right: &MarkerValue) -> Ordering {
        // Null placement is positional and never flipped by direction.
        let null_first = match self.nulls {
            NullPlacement::First => Ordering::Less,
            NullPlacement::Last => Ordering::Greater,
        };

        match (left.is_null(), right.is_null()) {
            (true, true) => Ordering::Equal,
            (true, false) => null_first,
            (false, true) => null_first.reverse(),
            (false, false) => {
                let ordering = canonical_cmp(left, right);

                match self.direction {
                    SortDirection::Asc => ordering,
                    SortDirection::Desc => ordering.reverse(),
                }
            }
        }
    }
}

///
/// TieBreaker
///
/// A column the caller guarantees is unique and non-null per row
/// (typically the primary key). Not verified at runtime.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TieBreaker {
    name: String,
    kind: ValueKind,
}

impl TieBreaker {
    #[must_use]
    pub fn new(name: impl Into<String>, kind: ValueKind) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }
}

///
/// SortSpec
///
/// Ordered, non-empty sequence of distinct sort columns whose composition is
/// unique per row. Immutable after construction.
///

#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct SortSpec {
    columns: Vec<SortColumn>,
}

impl SortSpec {
    /// Build a spec from caller columns, appending any tie-breaker column not
    /// already present (ascending, default null placement).
    pub fn new(
        columns: impl IntoIterator<Item = SortColumn>,
        tie_breakers: impl IntoIterator<Item = TieBreaker>,
    ) -> Result<Self, SortSpecError> {
        let mut columns: Vec<SortColumn> = columns.into_iter().collect();
        if columns.is_empty() {
            return Err(SortSpecError::Empty);
        }

        for (position, column) in columns.iter().enumerate() {
            if column.name.is_empty() {
                return Err(SortSpecError::EmptyColumnName { position });
            }
            if columns[..position].iter().any(|prior| prior.name == column.name) {
                return Err(SortSpecError::DuplicateColumn {
                    name: column.name.clone(),
                });
            }
        }

        let mut saw_tie_breaker = false;
        for tie_breaker in tie_breakers {
            saw_tie_breaker = true;
            if tie_breaker.name.is_empty() {
                return Err(SortSpecError::EmptyColumnName {
                    position: columns.len(),
                });
            }

            match columns.iter().find(|column| column.name == tie_breaker.name) {
                Some(existing) if existing.kind != tie_breaker.kind => {
                    return Err(SortSpecError::TieBreakerKindMismatch {
                        name: tie_breaker.name,
                        expected: tie_breaker.kind,
                        found: existing.kind,
                    });
                }
                Some(_) => {}
                None => columns.push(SortColumn::asc(tie_breaker.name, tie_breaker.kind)),
            }
        }

        if !saw_tie_breaker {
            return Err(SortSpecError::MissingTieBreaker);
        }

        Ok(Self { columns })
    }

    #[must_use]
    pub fn columns(&self) -> &[SortColumn] {
        &self.columns
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.columns.len()
    }

    /// Always false; kept for API symmetry with `len`.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Declared kinds by position, as cursor decoding expects them.
    #[must_use]
    pub fn kinds(&self) -> Vec<ValueKind> {
        self.columns.iter().map(SortColumn::kind).collect()
    }

    /// Mirror of this spec: every direction and null placement flipped.
    #[must_use]
    pub fn reversed(&self) -> Self {
        Self {
            columns: self.columns.iter().map(SortColumn::reversed).collect(),
        }
    }

    /// Compare two sort-key tuples lexicographically under this spec.
    #[must_use]
    pub fn compare(&self, left: &[MarkerValue], right: &[MarkerValue]) -> Ordering {
        compare_keys(&self.columns, left, right)
    }
}

/// Free-function form of [`SortSpec::new`].
pub fn build_sort_spec(
    columns: impl IntoIterator<Item = SortColumn>,
    tie_breakers: impl IntoIterator<Item = TieBreaker>,
) -> Result<SortSpec, SortSpecError> {
    SortSpec::new(columns, tie_breakers)
}

/// Lexicographic comparison of two key tuples over an explicit column list.
#[must_use]
pub fn compare_keys(
    columns: &[SortColumn],
    left: &[MarkerValue],
    right: &[MarkerValue],
) -> Ordering {
    for ((column, left), right) in columns.iter().zip(left).zip(right) {
        let ordering = column.compare(left, right);

        if ordering != Ordering::Equal {
            return ordering;
        }
    }

    Ordering::Equal
}
