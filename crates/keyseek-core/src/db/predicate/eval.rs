use crate::{
    db::{
        predicate::{ComparePredicate, CompareOp, Predicate},
        query::SortKeyRow,
    },
    value::{MarkerValue, strict_order_cmp},
};
use std::cmp::Ordering;

///
/// Evaluate a predicate against a single row.
///
/// Evaluation follows SQL three-valued logic: any comparison touching a null
/// (or a column the row does not expose) is unknown, and only rows whose
/// predicate is definitely true are kept.
///
#[must_use]
pub fn eval<R: SortKeyRow + ?Sized>(row: &R, predicate: &Predicate) -> bool {
    eval_tristate(row, predicate) == Some(true)
}

// Kleene evaluation; `None` is SQL's UNKNOWN.
fn eval_tristate<R: SortKeyRow + ?Sized>(row: &R, predicate: &Predicate) -> Option<bool> {
    match predicate {
        Predicate::True => Some(true),
        Predicate::False => Some(false),

        Predicate::And(children) => {
            let mut unknown = false;
            for child in children {
                match eval_tristate(row, child) {
                    Some(false) => return Some(false),
                    None => unknown = true,
                    Some(true) => {}
                }
            }

            if unknown { None } else { Some(true) }
        }
        Predicate::Or(children) => {
            let mut unknown = false;
            for child in children {
                match eval_tristate(row, child) {
                    Some(true) => return Some(true),
                    None => unknown = true,
                    Some(false) => {}
                }
            }

            if unknown { None } else { Some(false) }
        }
        Predicate::Not(inner) => eval_tristate(row, inner).map(|value| !value),

        Predicate::Compare(cmp) => eval_compare(row, cmp),

        Predicate::IsNull { column } => Some(value_or_null(row, column).is_null()),
        Predicate::IsNotNull { column } => Some(!value_or_null(row, column).is_null()),
    }
}

fn value_or_null<R: SortKeyRow + ?Sized>(row: &R, column: &str) -> MarkerValue {
    row.value(column).unwrap_or(MarkerValue::Null)
}

fn eval_compare<R: SortKeyRow + ?Sized>(row: &R, cmp: &ComparePredicate) -> Option<bool> {
    let ComparePredicate { column, op, value } = cmp;
    let actual = value_or_null(row, column);

    // Null on either side, or mismatched variants, is unknown.
    let ordering = strict_order_cmp(&actual, value)?;

    Some(match op {
        CompareOp::Eq => ordering == Ordering::Equal,
        CompareOp::Ne => ordering != Ordering::Equal,
        CompareOp::Lt => ordering == Ordering::Less,
        CompareOp::Lte => ordering != Ordering::Greater,
        CompareOp::Gt => ordering == Ordering::Greater,
        CompareOp::Gte => ordering != Ordering::Less,
    })
}
