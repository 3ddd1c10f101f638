use crate::value::MarkerValue;
use std::cmp::Ordering;

/// Total canonical comparator.
///
/// Ordering rules:
/// 1. Canonical variant rank (`Null` lowest)
/// 2. Variant-specific comparison for same-ranked values
///
/// Null placement is not applied here; sort-order surfaces layer it on top.
#[must_use]
pub fn canonical_cmp(left: &MarkerValue, right: &MarkerValue) -> Ordering {
    let rank = left.canonical_rank().cmp(&right.canonical_rank());
    if rank != Ordering::Equal {
        return rank;
    }

    strict_order_cmp(left, right).unwrap_or(Ordering::Equal)
}

/// Strict comparator for identical non-null variants.
///
/// Returns `None` for mismatched variants or when either side is `Null`.
#[must_use]
pub fn strict_order_cmp(left: &MarkerValue, right: &MarkerValue) -> Option<Ordering> {
    match (left, right) {
        (MarkerValue::Bool(a), MarkerValue::Bool(b)) => Some(a.cmp(b)),
        (MarkerValue::Int(a), MarkerValue::Int(b)) => Some(a.cmp(b)),
        (MarkerValue::Text(a), MarkerValue::Text(b)) => Some(a.cmp(b)),
        (MarkerValue::Timestamp(a), MarkerValue::Timestamp(b)) => Some(a.cmp(b)),
        _ => None,
    }
}
