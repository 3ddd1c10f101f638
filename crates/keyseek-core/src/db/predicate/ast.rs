use crate::value::MarkerValue;
use derive_more::Display;
use std::ops::{BitAnd, BitOr};

///
/// Predicate AST
///
/// Pure, storage-agnostic row filter. Query sources lower it to their own
/// filter language (SQL text, in-memory evaluation, ...).
///

///
/// CompareOp
///

#[derive(Clone, Copy, Debug, Display, Eq, Hash, PartialEq)]
pub enum CompareOp {
    #[display("=")]
    Eq,
    #[display("<>")]
    Ne,
    #[display("<")]
    Lt,
    #[display("<=")]
    Lte,
    #[display(">")]
    Gt,
    #[display(">=")]
    Gte,
}

///
/// ComparePredicate
///

#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct ComparePredicate {
    pub column: String,
    pub op: CompareOp,
    pub value: MarkerValue,
}

impl ComparePredicate {
    #[must_use]
    pub fn new(column: impl Into<String>, op: CompareOp, value: impl Into<MarkerValue>) -> Self {
        Self {
            column: column.into(),
            op,
            value: value.into(),
        }
    }
}

///
/// Predicate
///

#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub enum Predicate {
    True,
    False,
    And(Vec<Self>),
    Or(Vec<Self>),
    Not(Box<Self>),
    Compare(ComparePredicate),
    IsNull { column: String },
    IsNotNull { column: String },
}

impl Predicate {
    #[must_use]
    pub const fn and(preds: Vec<Self>) -> Self {
        Self::And(preds)
    }

    #[must_use]
    pub const fn or(preds: Vec<Self>) -> Self {
        Self::Or(preds)
    }

    #[must_use]
    pub fn not(pred: Self) -> Self {
        Self::Not(Box::new(pred))
    }

    #[must_use]
    pub fn eq(column: impl Into<String>, value: impl Into<MarkerValue>) -> Self {
        Self::Compare(ComparePredicate::new(column, CompareOp::Eq, value))
    }

    #[must_use]
    pub fn ne(column: impl Into<String>, value: impl Into<MarkerValue>) -> Self {
        Self::Compare(ComparePredicate::new(column, CompareOp::Ne, value))
    }

    #[must_use]
    pub fn lt(column: impl Into<String>, value: impl Into<MarkerValue>) -> Self {
        Self::Compare(ComparePredicate::new(column, CompareOp::Lt, value))
    }

    #[must_use]
    pub fn lte(column: impl Into<String>, value: impl Into<MarkerValue>) -> Self {
        Self::Compare(ComparePredicate::new(column, CompareOp::Lte, value))
    }

    #[must_use]
    pub fn gt(column: impl Into<String>, value: impl Into<MarkerValue>) -> Self {
        Self::Compare(ComparePredicate::new(column, CompareOp::Gt, value))
    }

    #[must_use]
    pub fn gte(column: impl Into<String>, value: impl Into<MarkerValue>) -> Self {
        Self::Compare(ComparePredicate::new(column, CompareOp::Gte, value))
    }

    #[must_use]
    pub fn is_null(column: impl Into<String>) -> Self {
        Self::IsNull {
            column: column.into(),
        }
    }

    #[must_use]
    pub fn is_not_null(column: impl Into<String>) -> Self {
        Self::IsNotNull {
            column: column.into(),
        }
    }

    /// Conjoin `other` onto this predicate, flattening nested `And` and
    /// dropping `True` operands.
    #[must_use]
    pub fn conjoin(self, other: Self) -> Self {
        match (self, other) {
            (Self::True, pred) | (pred, Self::True) => pred,
            (Self::And(mut left), Self::And(right)) => {
                left.extend(right);
                Self::And(left)
            }
            (Self::And(mut left), pred) => {
                left.push(pred);
                Self::And(left)
            }
            (pred, Self::And(mut right)) => {
                right.insert(0, pred);
                Self::And(right)
            }
            (left, right) => Self::And(vec![left, right]),
        }
    }
}

impl BitAnd for Predicate {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self::Output {
        Self::And(vec![self, rhs])
    }
}

impl BitAnd for &Predicate {
    type Output = Predicate;

    fn bitand(self, rhs: Self) -> Self::Output {
        Predicate::And(vec![self.clone(), rhs.clone()])
    }
}

impl BitOr for Predicate {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self::Output {
        Self::Or(vec![self, rhs])
    }
}

impl BitOr for &Predicate {
    type Output = Predicate;

    fn bitor(self, rhs: Self) -> Self::Output {
        Predicate::Or(vec![self.clone(), rhs.clone()])
    }
}
