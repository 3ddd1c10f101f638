use derive_more::Display;
use keyseek_core::{
    config::ConfigError,
    db::{CursorError, SortSpecError},
    error::PageError,
};
use serde::{Deserialize, Serialize};
use thiserror::Error as ThisError;

///
/// Error
/// Public error type with a stable kind + origin taxonomy.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize, ThisError)]
#[error("{message}")]
pub struct Error {
    pub kind: ErrorKind,
    pub origin: ErrorOrigin,
    pub message: String,
}

impl Error {
    pub fn new(kind: ErrorKind, origin: ErrorOrigin, message: impl Into<String>) -> Self {
        Self {
            kind,
            origin,
            message: message.into(),
        }
    }

    /// True when the caller should drop its cursor and restart pagination.
    #[must_use]
    pub const fn is_recoverable_by_reset(&self) -> bool {
        self.kind.is_recoverable_by_reset()
    }
}

impl From<PageError> for Error {
    fn from(err: PageError) -> Self {
        let message = err.to_string();

        match err {
            PageError::InvalidSortSpec(_) => {
                Self::new(ErrorKind::InvalidSortSpec, ErrorOrigin::Order, message)
            }
            PageError::MalformedCursor(_) => {
                Self::new(ErrorKind::MalformedCursor, ErrorOrigin::Cursor, message)
            }
            PageError::DataSource(_) => {
                Self::new(ErrorKind::DataSource, ErrorOrigin::Source, message)
            }
            PageError::InvalidPageSize { .. } => {
                Self::new(ErrorKind::InvalidPageSize, ErrorOrigin::Executor, message)
            }
            PageError::Internal { .. } => {
                Self::new(ErrorKind::Internal, ErrorOrigin::Executor, message)
            }
        }
    }
}

impl From<SortSpecError> for Error {
    fn from(err: SortSpecError) -> Self {
        PageError::from(err).into()
    }
}

impl From<CursorError> for Error {
    fn from(err: CursorError) -> Self {
        PageError::from(err).into()
    }
}

impl From<ConfigError> for Error {
    fn from(err: ConfigError) -> Self {
        Self::new(ErrorKind::InvalidConfig, ErrorOrigin::Config, err.to_string())
    }
}

///
/// ErrorKind
/// Public error taxonomy. UIs branch on this to choose between resetting
/// pagination and retrying.
///

#[derive(Clone, Copy, Debug, Deserialize, Display, Eq, Hash, PartialEq, Serialize)]
pub enum ErrorKind {
    InvalidSortSpec,

    /// Cursor or bookmark is unusable; restart from the first page.
    MalformedCursor,

    InvalidPageSize,

    /// The query layer failed; the same request may be retried.
    DataSource,

    InvalidConfig,

    /// The caller cannot remediate this.
    Internal,
}

impl ErrorKind {
    #[must_use]
    pub const fn is_recoverable_by_reset(self) -> bool {
        matches!(self, Self::MalformedCursor)
    }
}

///
/// ErrorOrigin
///

#[derive(Clone, Copy, Debug, Deserialize, Display, Eq, Hash, PartialEq, Serialize)]
pub enum ErrorOrigin {
    Config,
    Cursor,
    Executor,
    Order,
    Source,
}

///
/// TESTS
///
