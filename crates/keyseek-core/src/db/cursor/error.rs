use crate::{db::codec::CursorDecodeError, value::ValueKind};
use thiserror::Error as ThisError;

///
/// CursorError
///
/// Cursor token and marker payload validation failures. Every variant except
/// `Encode` means the caller-supplied cursor must be discarded.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum CursorError {
    /// Cursor text could not be decoded into payload bytes.
    #[error("invalid cursor token: {0}")]
    Token(#[from] CursorDecodeError),

    /// Payload bytes did not decode into a marker.
    #[error("invalid cursor payload: {reason}")]
    Payload { reason: String },

    /// Payload carries a wire version this build does not understand.
    #[error("unsupported cursor version: {version}")]
    UnsupportedVersion { version: u8 },

    /// Marker width does not match the active sort specification.
    #[error("cursor arity mismatch: expected {expected}, found {found}")]
    ArityMismatch { expected: usize, found: usize },

    /// Marker value type does not match the declared column kind.
    #[error("cursor value at position {position} is {found}, expected {expected}")]
    TypeMismatch {
        position: usize,
        expected: ValueKind,
        found: &'static str,
    },

    /// Bookmark text is not one of the recognised request forms.
    #[error("invalid bookmark: {reason}")]
    Bookmark { reason: String },

    /// Marker could not be serialized.
    #[error("failed to encode cursor: {reason}")]
    Encode { reason: String },
}

impl CursorError {
    pub(crate) fn payload(reason: impl Into<String>) -> Self {
        Self::Payload {
            reason: reason.into(),
        }
    }

    pub(crate) fn bookmark(reason: impl Into<String>) -> Self {
        Self::Bookmark {
            reason: reason.into(),
        }
    }

    /// True when the failure came from a caller-supplied cursor rather than
    /// from encoding one.
    #[must_use]
    pub const fn is_malformed_input(&self) -> bool {
        !matches!(self, Self::Encode { .. })
    }
}
