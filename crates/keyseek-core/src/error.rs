use crate::db::{cursor::CursorError, order::SortSpecError};
use derive_more::Display;
use std::error::Error as StdError;
use thiserror::Error as ThisError;

/// Boxed error raised by a query-source collaborator.
pub type BoxedSourceError = Box<dyn StdError + Send + Sync + 'static>;

///
/// PageError
///
/// Every way a single page fetch can fail. A fetch either succeeds with a
/// complete page or returns exactly one of these; partial pages never escape.
///

#[derive(Debug, ThisError)]
pub enum PageError {
    #[error("invalid sort specification: {0}")]
    InvalidSortSpec(#[from] SortSpecError),

    /// Caller-supplied cursor or bookmark is unusable for this sort spec.
    /// Recovery is to restart pagination, not to retry.
    #[error("malformed cursor: {0}")]
    MalformedCursor(#[source] CursorError),

    #[error(transparent)]
    DataSource(#[from] DataSourceError),

    #[error("page size {requested} is outside 1..={max}")]
    InvalidPageSize { requested: u32, max: u32 },

    #[error("internal paging error: {message}")]
    Internal { message: String },
}

impl PageError {
    pub(crate) fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    #[must_use]
    pub const fn is_malformed_cursor(&self) -> bool {
        matches!(self, Self::MalformedCursor(_))
    }

    #[must_use]
    pub const fn is_data_source(&self) -> bool {
        matches!(self, Self::DataSource(_))
    }
}

impl From<CursorError> for PageError {
    fn from(err: CursorError) -> Self {
        if err.is_malformed_input() {
            Self::MalformedCursor(err)
        } else {
            Self::internal(err.to_string())
        }
    }
}

///
/// FetchStage
///
/// Where inside a fetch the collaborator failed. Either way no page was
/// produced.
///

#[derive(Clone, Copy, Debug, Display, Eq, Hash, PartialEq)]
pub enum FetchStage {
    /// Running the ordered, filtered, limited query.
    #[display("execute")]
    Execute,

    /// Reading sort-key values back out of a returned row.
    #[display("projection")]
    Projection,
}

///
/// DataSourceError
///
/// Failure reported by the external query collaborator. The original error
/// is carried unchanged and reachable through `source()`.
///

#[derive(Debug, ThisError)]
#[error("data source failed during {stage}: {message}")]
pub struct DataSourceError {
    stage: FetchStage,
    message: String,
    #[source]
    source: Option<BoxedSourceError>,
}

impl DataSourceError {
    /// Wrap a collaborator error raised while executing the query.
    pub fn execute(source: impl Into<BoxedSourceError>) -> Self {
        let source = source.into();

        Self {
            stage: FetchStage::Execute,
            message: source.to_string(),
            source: Some(source),
        }
    }

    /// Execution failure with no underlying error value.
    pub fn execute_message(message: impl Into<String>) -> Self {
        Self {
            stage: FetchStage::Execute,
            message: message.into(),
            source: None,
        }
    }

    /// A returned row did not expose one of its sort-key columns.
    pub fn projection(message: impl Into<String>) -> Self {
        Self {
            stage: FetchStage::Projection,
            message: message.into(),
            source: None,
        }
    }

    #[must_use]
    pub const fn stage(&self) -> FetchStage {
        self.stage
    }

    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Borrow the collaborator's original error, if one was supplied.
    #[must_use]
    pub fn inner(&self) -> Option<&(dyn StdError + Send + Sync + 'static)> {
        self.source.as_deref()
    }

    /// Take the collaborator's original error back out.
    #[must_use]
    pub fn into_inner(self) -> Option<BoxedSourceError> {
        self.source
    }
}

///
/// TESTS
///
