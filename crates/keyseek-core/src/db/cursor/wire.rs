use crate::value::MarkerValue;
use serde::{Deserialize, Serialize};

///
/// MarkerTokenVersion
///
/// Wire-level marker version owned by the cursor protocol boundary.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(super) enum MarkerTokenVersion {
    V1,
}

impl MarkerTokenVersion {
    const V1_TAG: u8 = 1;

    pub(super) const CURRENT: Self = Self::V1;

    pub(super) const fn decode(raw: u8) -> Option<Self> {
        match raw {
            Self::V1_TAG => Some(Self::V1),
            _ => None,
        }
    }

    pub(super) const fn encode(self) -> u8 {
        match self {
            Self::V1 => Self::V1_TAG,
        }
    }
}

///
/// MarkerWire
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub(super) struct MarkerWire {
    pub(super) version: u8,
    pub(super) values: Vec<MarkerValue>,
}
