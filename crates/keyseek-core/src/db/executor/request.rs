use crate::db::{
    cursor::{Cursor, CursorError},
    direction::ScanDirection,
};
use derive_more::Display;
use std::{fmt, str::FromStr};

const FIRST_BOOKMARK: &str = "first";
const LAST_BOOKMARK: &str = "last";
const AFTER_PREFIX: char = '>';
const BEFORE_PREFIX: char = '<';

///
/// PageRequest
///
/// Which page to fetch: either end of the ordering, or the rows strictly
/// after / before a previously issued cursor.
///

#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub enum PageRequest {
    First,
    Last,
    After(Cursor),
    Before(Cursor),
}

impl PageRequest {
    #[must_use]
    pub const fn kind(&self) -> RequestKind {
        match self {
            Self::First => RequestKind::First,
            Self::Last => RequestKind::Last,
            Self::After(_) => RequestKind::After,
            Self::Before(_) => RequestKind::Before,
        }
    }

    /// Scan direction relative to the declared order.
    #[must_use]
    pub const fn scan(&self) -> ScanDirection {
        match self {
            Self::First | Self::After(_) => ScanDirection::Forward,
            Self::Last | Self::Before(_) => ScanDirection::Backward,
        }
    }

    #[must_use]
    pub const fn cursor(&self) -> Option<&Cursor> {
        match self {
            Self::First | Self::Last => None,
            Self::After(cursor) | Self::Before(cursor) => Some(cursor),
        }
    }

    /// Render as a single opaque bookmark string carrying both the
    /// direction and the cursor.
    #[must_use]
    pub fn to_bookmark(&self) -> String {
        match self {
            Self::First => FIRST_BOOKMARK.to_string(),
            Self::Last => LAST_BOOKMARK.to_string(),
            Self::After(cursor) => format!("{AFTER_PREFIX}{cursor}"),
            Self::Before(cursor) => format!("{BEFORE_PREFIX}{cursor}"),
        }
    }

    /// Parse a bookmark produced by [`Self::to_bookmark`].
    ///
    /// Only the framing is checked here; the embedded cursor is validated
    /// when the request is fetched against a sort spec.
    pub fn parse_bookmark(bookmark: &str) -> Result<Self, CursorError> {
        let bookmark = bookmark.trim();

        match bookmark {
            FIRST_BOOKMARK => return Ok(Self::First),
            LAST_BOOKMARK => return Ok(Self::Last),
            "" => return Err(CursorError::bookmark("bookmark is empty")),
            _ => {}
        }

        let (wrap, rest): (fn(Cursor) -> Self, &str) =
            if let Some(rest) = bookmark.strip_prefix(AFTER_PREFIX) {
                (Self::After, rest)
            } else if let Some(rest) = bookmark.strip_prefix(BEFORE_PREFIX) {
                (Self::Before, rest)
            } else {
                return Err(CursorError::bookmark(format!(
                    "unrecognised bookmark prefix in '{bookmark}'"
                )));
            };

        if rest.is_empty() {
            return Err(CursorError::bookmark("bookmark is missing its cursor"));
        }

        Ok(wrap(Cursor::from(rest)))
    }
}

impl fmt::Display for PageRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_bookmark())
    }
}

impl FromStr for PageRequest {
    type Err = CursorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_bookmark(s)
    }
}

///
/// RequestKind
///
/// Cursor-free shape of a `PageRequest`, used for metrics.
///

#[derive(Clone, Copy, Debug, Display, Eq, Hash, PartialEq)]
pub enum RequestKind {
    #[display("first")]
    First,
    #[display("last")]
    Last,
    #[display("after")]
    After,
    #[display("before")]
    Before,
}
