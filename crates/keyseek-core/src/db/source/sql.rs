//! SQL rendering for sort orders and seek predicates, plus a `QuerySource`
//! that delegates execution to a host driver.
//!
//! Placeholders use the positional `$n` form; equal values share one
//! placeholder so a seek predicate binds each marker value once.

use crate::{
    db::{
        order::SortColumn,
        predicate::{ComparePredicate, Predicate},
        query::{QuerySource, SortKeyRow},
    },
    error::{BoxedSourceError, DataSourceError},
    value::MarkerValue,
};
use std::fmt::Write as _;

///
/// SqlFragment
///
/// Rendered SQL text with its bound parameters in placeholder order.
///

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct SqlFragment {
    pub sql: String,
    pub params: Vec<MarkerValue>,
}

/// Quote an identifier, doubling embedded quotes.
#[must_use]
pub fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

/// Render an `ORDER BY` body (without the keywords).
#[must_use]
pub fn render_order(columns: &[SortColumn]) -> String {
    columns
        .iter()
        .map(|column| {
            format!(
                "{} {} {}",
                quote_ident(column.name()),
                column.direction(),
                column.nulls()
            )
        })
        .collect::<Vec<_>>()
        .join(", ")
}

/// Render a predicate as a standalone boolean expression.
#[must_use]
pub fn render_predicate(predicate: &Predicate) -> SqlFragment {
    let mut params = Vec::new();
    let sql = render_with_params(predicate, &mut params);

    SqlFragment { sql, params }
}

/// Render a predicate, appending to an existing parameter list.
pub fn render_with_params(predicate: &Predicate, params: &mut Vec<MarkerValue>) -> String {
    render_node(predicate, params, false)
}

fn render_node(predicate: &Predicate, params: &mut Vec<MarkerValue>, nested: bool) -> String {
    match predicate {
        Predicate::True => "TRUE".to_string(),
        Predicate::False => "FALSE".to_string(),
        Predicate::And(children) => render_junction(children, "AND", "TRUE", params, nested),
        Predicate::Or(children) => render_junction(children, "OR", "FALSE", params, nested),
        Predicate::Not(inner) => format!("NOT ({})", render_node(inner, params, false)),
        Predicate::Compare(ComparePredicate { column, op, value }) => {
            let slot = bind(params, value);
            format!("{} {op} ${slot}", quote_ident(column))
        }
        Predicate::IsNull { column } => format!("{} IS NULL", quote_ident(column)),
        Predicate::IsNotNull { column } => format!("{} IS NOT NULL", quote_ident(column)),
    }
}

fn render_junction(
    children: &[Predicate],
    keyword: &str,
    empty: &str,
    params: &mut Vec<MarkerValue>,
    nested: bool,
) -> String {
    match children {
        [] => empty.to_string(),
        [only] => render_node(only, params, nested),
        _ => {
            let body = children
                .iter()
                .map(|child| render_node(child, params, true))
                .collect::<Vec<_>>()
                .join(&format!(" {keyword} "));

            if nested { format!("({body})") } else { body }
        }
    }
}

// 1-based placeholder index, reusing an existing slot for an equal value.
fn bind(params: &mut Vec<MarkerValue>, value: &MarkerValue) -> usize {
    if let Some(index) = params.iter().position(|bound| bound == value) {
        return index + 1;
    }

    params.push(value.clone());
    params.len()
}

///
/// SqlStatement
///
/// A caller's base `SELECT` plus the paging refinements. The base is wrapped
/// as a derived table so its own clauses stay untouched. Values the base
/// binds as `$1..$n` come first in the parameter list; paging placeholders
/// number on from there.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SqlStatement {
    base: String,
    base_params: Vec<MarkerValue>,
    filter: Predicate,
    order: Vec<SortColumn>,
    limit: Option<usize>,
}

impl SqlStatement {
    #[must_use]
    pub fn new(base: impl Into<String>) -> Self {
        Self {
            base: base.into(),
            base_params: Vec::new(),
            filter: Predicate::True,
            order: Vec::new(),
            limit: None,
        }
    }

    /// Base `SELECT` whose `$1..$n` placeholders bind `params` in order.
    #[must_use]
    pub fn with_params(base: impl Into<String>, params: Vec<MarkerValue>) -> Self {
        Self {
            base_params: params,
            ..Self::new(base)
        }
    }

    /// Base `SELECT` narrowed by a caller filter, rendered with bound values
    /// and AND-ed with any seek predicate.
    #[must_use]
    pub fn filtered(base: impl Into<String>, filter: Predicate) -> Self {
        Self::new(base).and_filter(filter)
    }

    /// AND another caller filter onto the statement.
    #[must_use]
    pub fn and_filter(mut self, filter: Predicate) -> Self {
        self.filter = self.filter.conjoin(filter);
        self
    }

    #[must_use]
    pub fn base(&self) -> &str {
        &self.base
    }

    #[must_use]
    pub fn base_params(&self) -> &[MarkerValue] {
        &self.base_params
    }

    #[must_use]
    pub const fn filter(&self) -> &Predicate {
        &self.filter
    }

    /// Render the full statement.
    #[must_use]
    pub fn render(&self) -> SqlFragment {
        let mut params = self.base_params.clone();
        let mut sql = format!("SELECT * FROM ({}) AS page_source", self.base);

        if self.filter != Predicate::True {
            let condition = render_with_params(&self.filter, &mut params);
            let _ = write!(sql, " WHERE {condition}");
        }
        if !self.order.is_empty() {
            let _ = write!(sql, " ORDER BY {}", render_order(&self.order));
        }
        if let Some(limit) = self.limit {
            let _ = write!(sql, " LIMIT {limit}");
        }

        SqlFragment { sql, params }
    }
}

///
/// SqlExecutor
///
/// Host database driver: runs rendered SQL and decodes rows.
///

pub trait SqlExecutor {
    type Row: SortKeyRow;

    fn query(&self, sql: &str, params: &[MarkerValue]) -> Result<Vec<Self::Row>, BoxedSourceError>;
}

///
/// SqlSource
///

#[derive(Clone, Debug)]
pub struct SqlSource<E> {
    executor: E,
}

impl<E: SqlExecutor> SqlSource<E> {
    #[must_use]
    pub const fn new(executor: E) -> Self {
        Self { executor }
    }

    #[must_use]
    pub const fn executor(&self) -> &E {
        &self.executor
    }
}

impl<E: SqlExecutor> QuerySource for SqlSource<E> {
    type Query = SqlStatement;
    type Row = E::Row;

    fn apply_order(&self, mut query: SqlStatement, columns: &[SortColumn]) -> SqlStatement {
        query.order = columns.to_vec();
        query
    }

    fn apply_filter(&self, query: SqlStatement, predicate: Predicate) -> SqlStatement {
        query.and_filter(predicate)
    }

    fn apply_limit(&self, mut query: SqlStatement, limit: usize) -> SqlStatement {
        query.limit = Some(limit);
        query
    }

    fn execute(&self, query: SqlStatement) -> Result<Vec<E::Row>, DataSourceError> {
        let SqlFragment { sql, params } = query.render();

        self.executor
            .query(&sql, &params)
            .map_err(DataSourceError::execute)
    }
}
