use derive_more::Display;
use serde::{Deserialize, Serialize};

///
/// SortDirection
///
/// Declared ordering of one sort column.
///

#[derive(Clone, Copy, Debug, Default, Deserialize, Display, Eq, Hash, PartialEq, Serialize)]
pub enum SortDirection {
    #[default]
    #[display("ASC")]
    Asc,
    #[display("DESC")]
    Desc,
}

impl SortDirection {
    #[must_use]
    pub const fn reversed(self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }
}

///
/// NullPlacement
///
/// Where nulls sit relative to every non-null value, independent of
/// direction: `First` means null sorts before all non-null values.
///

#[derive(Clone, Copy, Debug, Deserialize, Display, Eq, Hash, PartialEq, Serialize)]
pub enum NullPlacement {
    #[display("NULLS FIRST")]
    First,
    #[display("NULLS LAST")]
    Last,
}

impl NullPlacement {
    /// Relational default: nulls behave as larger than any value, so they
    /// trail ascending scans and lead descending ones.
    #[must_use]
    pub const fn default_for(direction: SortDirection) -> Self {
        match direction {
            SortDirection::Asc => Self::Last,
            SortDirection::Desc => Self::First,
        }
    }

    #[must_use]
    pub const fn reversed(self) -> Self {
        match self {
            Self::First => Self::Last,
            Self::Last => Self::First,
        }
    }
}

///
/// ScanDirection
///
/// Whether a fetch reads rows after (`Forward`) or before (`Backward`) a
/// marker, measured in the sort spec's declared order.
///

#[derive(Clone, Copy, Debug, Default, Deserialize, Display, Eq, Hash, PartialEq, Serialize)]
pub enum ScanDirection {
    #[default]
    Forward,
    Backward,
}

impl ScanDirection {
    #[must_use]
    pub const fn is_backward(self) -> bool {
        matches!(self, Self::Backward)
    }
}
