mod compare;


use crate::types::Timestamp;
use derive_more::Display;
use serde::{Deserialize, Serialize};

// re-exports
pub use compare::{canonical_cmp, strict_order_cmp};

///
/// ValueKind
///
/// Declared semantic type of one sort column. `Null` is a value, not a kind:
/// any column may hold it at a given row.
///

#[derive(
    Clone, Copy, Debug, Deserialize, Display, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize,
)]
pub enum ValueKind {
    Bool,
    Int,
    Text,
    Timestamp,
}

///
/// MarkerValue
///
/// One component of a marker: the value a row holds in one sort column.
/// The variant doubles as the wire type tag.
///

#[derive(Clone, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub enum MarkerValue {
    Null,
    Bool(bool),
    Int(i64),
    Text(String),
    Timestamp(Timestamp),
}

impl MarkerValue {
    /// Declared kind of this value, or `None` for `Null`.
    #[must_use]
    pub const fn kind(&self) -> Option<ValueKind> {
        match self {
            Self::Null => None,
            Self::Bool(_) => Some(ValueKind::Bool),
            Self::Int(_) => Some(ValueKind::Int),
            Self::Text(_) => Some(ValueKind::Text),
            Self::Timestamp(_) => Some(ValueKind::Timestamp),
        }
    }

    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// True when this value may sit in a column of `kind`.
    #[must_use]
    pub fn fits(&self, kind: ValueKind) -> bool {
        self.kind().is_none_or(|own| own == kind)
    }

    /// Stable human-readable label for diagnostics.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Null => "Null",
            Self::Bool(_) => "Bool",
            Self::Int(_) => "Int",
            Self::Text(_) => "Text",
            Self::Timestamp(_) => "Timestamp",
        }
    }

    // Rank used to keep mixed-variant comparisons total and deterministic.
    pub(crate) const fn canonical_rank(&self) -> u8 {
        match self {
            Self::Null => 0,
            Self::Bool(_) => 1,
            Self::Int(_) => 2,
            Self::Text(_) => 3,
            Self::Timestamp(_) => 4,
        }
    }
}

impl From<bool> for MarkerValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for MarkerValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<i32> for MarkerValue {
    fn from(value: i32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<&str> for MarkerValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for MarkerValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<Timestamp> for MarkerValue {
    fn from(value: Timestamp) -> Self {
        Self::Timestamp(value)
    }
}

impl<T: Into<Self>> From<Option<T>> for MarkerValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}
