//! Module: cursor
//! Responsibility: marker tuples and their opaque cursor text form.
//! Does not own: which row a marker is taken from, or what a marker means
//! to a query (see `predicate::seek`).
//! Boundary: cursors are produced here and only ever echoed back by callers.

mod error;
mod wire;


use crate::{
    config::DEFAULT_MAX_CURSOR_LEN,
    db::codec::cursor::{decode_cursor, encode_cursor},
    serialize::{deserialize_bounded, serialize},
    value::{MarkerValue, ValueKind},
};
use derive_more::Display;
use serde::{Deserialize, Serialize};
use wire::{MarkerTokenVersion, MarkerWire};

pub use error::CursorError;

///
/// Marker
///
/// One row's sort-key projection, positionally aligned with a `SortSpec`.
///

#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Marker {
    values: Vec<MarkerValue>,
}

impl Marker {
    #[must_use]
    pub const fn new(values: Vec<MarkerValue>) -> Self {
        Self { values }
    }

    #[must_use]
    pub fn values(&self) -> &[MarkerValue] {
        &self.values
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    #[must_use]
    pub fn into_values(self) -> Vec<MarkerValue> {
        self.values
    }

    /// Serialize into an opaque cursor.
    pub fn encode(&self) -> Result<Cursor, CursorError> {
        encode_marker(self)
    }
}

impl<V: Into<MarkerValue>> FromIterator<V> for Marker {
    fn from_iter<I: IntoIterator<Item = V>>(iter: I) -> Self {
        Self::new(iter.into_iter().map(Into::into).collect())
    }
}

///
/// Cursor
///
/// Opaque, URL-safe encoding of one marker. Callers store and echo it back;
/// no ordering between cursor strings is implied.
///

#[derive(Clone, Debug, Deserialize, Display, Eq, Hash, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Cursor(String);

impl Cursor {
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn into_string(self) -> String {
        self.0
    }
}

impl From<String> for Cursor {
    fn from(token: String) -> Self {
        Self(token)
    }
}

impl From<&str> for Cursor {
    fn from(token: &str) -> Self {
        Self(token.to_string())
    }
}

impl AsRef<str> for Cursor {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Encode a marker into an opaque cursor.
pub fn encode_marker(marker: &Marker) -> Result<Cursor, CursorError> {
    let wire = MarkerWire {
        version: MarkerTokenVersion::CURRENT.encode(),
        values: marker.values.clone(),
    };
    let bytes = serialize(&wire).map_err(|err| CursorError::Encode {
        reason: err.to_string(),
    })?;

    Ok(Cursor(encode_cursor(&bytes)))
}

/// Decode a cursor and validate it against the expected column kinds.
///
/// Fails when the text is not a valid token, the payload is not a marker, or
/// the marker's arity or per-position types disagree with `expected`.
pub fn decode_marker(cursor: &Cursor, expected: &[ValueKind]) -> Result<Marker, CursorError> {
    decode_marker_with_limit(cursor, expected, DEFAULT_MAX_CURSOR_LEN)
}

/// [`decode_marker`] with an explicit maximum token length (hex chars).
pub fn decode_marker_with_limit(
    cursor: &Cursor,
    expected: &[ValueKind],
    max_len: usize,
) -> Result<Marker, CursorError> {
    let bytes = decode_cursor(cursor.as_str(), max_len)?;
    let wire: MarkerWire = deserialize_bounded(&bytes, max_len / 2)
        .map_err(|err| CursorError::payload(err.to_string()))?;

    // Decode the protocol version first so compatibility stays centralized.
    MarkerTokenVersion::decode(wire.version).ok_or(CursorError::UnsupportedVersion {
        version: wire.version,
    })?;

    validate_marker_shape(&wire.values, expected)?;

    Ok(Marker::new(wire.values))
}

// Arity and per-position kind check against the active spec.
fn validate_marker_shape(
    values: &[MarkerValue],
    expected: &[ValueKind],
) -> Result<(), CursorError> {
    if values.len() != expected.len() {
        return Err(CursorError::ArityMismatch {
            expected: expected.len(),
            found: values.len(),
        });
    }

    for (position, (value, kind)) in values.iter().zip(expected).enumerate() {
        if !value.fits(*kind) {
            return Err(CursorError::TypeMismatch {
                position,
                expected: *kind,
                found: value.label(),
            });
        }
    }

    Ok(())
}
