use crate::{
    db::{
        order::SortColumn,
        predicate::Predicate,
        query::QuerySource,
        source::{MemoryQuery, MemorySource},
    },
    value::{MarkerValue, ValueKind},
};
use std::collections::BTreeMap;

type Row = BTreeMap<String, MarkerValue>;

fn row(id: i64, score: Option<i64>) -> Row {
    BTreeMap::from([
        ("id".to_string(), MarkerValue::Int(id)),
        ("score".to_string(), MarkerValue::from(score)),
    ])
}

fn ids(rows: &[Row]) -> Vec<i64> {
    rows.iter()
        .map(|row| match row.get("id") {
            Some(MarkerValue::Int(id)) => *id,
            other => panic!("unexpected id {other:?}"),
        })
        .collect()
}

fn relation() -> MemorySource<Row> {
    MemorySource::new(vec![
        row(1, Some(10)),
        row(2, None),
        row(3, Some(5)),
        row(4, Some(10)),
    ])
}

#[test]
fn memory_source_orders_with_null_placement() {
    let source = relation();
    let order = [
        SortColumn::asc("score", ValueKind::Int).nulls_first(),
        SortColumn::asc("id", ValueKind::Int),
    ];

    let query = source.apply_order(MemoryQuery::all(), &order);
    let rows = source.execute(query).expect("memory execute");

    assert_eq!(ids(&rows), vec![2, 3, 1, 4]);
}

#[test]
fn memory_source_filter_drops_null_comparisons() {
    let source = relation();
    let query = source.apply_filter(MemoryQuery::all(), Predicate::gt("score", 6i64));
    let query = source.apply_order(query, &[SortColumn::asc("id", ValueKind::Int)]);

    let rows = source.execute(query).expect("memory execute");

    assert_eq!(ids(&rows), vec![1, 4]);
}

#[test]
fn memory_source_conjoins_with_caller_filter_and_limits() {
    let source = relation();
    let base = MemoryQuery::filtered(Predicate::is_not_null("score"));

    let query = source.apply_filter(base, Predicate::gte("id", 2i64));
    let query = source.apply_order(query, &[SortColumn::desc("id", ValueKind::Int)]);
    let query = source.apply_limit(query, 1);

    assert_eq!(
        query.filter(),
        &Predicate::And(vec![
            Predicate::is_not_null("score"),
            Predicate::gte("id", 2i64),
        ])
    );
    let rows = source.execute(query).expect("memory execute");
    assert_eq!(ids(&rows), vec![4]);
}

#[cfg(feature = "sql")]
mod sql {
    use crate::{
        db::{
            cursor::Marker,
            direction::ScanDirection,
            order::{SortColumn, SortSpec, TieBreaker},
            predicate::{Predicate, build_seek_predicate},
            query::QuerySource,
            source::sql::{
                SqlExecutor, SqlSource, SqlStatement, quote_ident, render_order,
                render_predicate,
            },
        },
        error::{BoxedSourceError, FetchStage},
        value::{MarkerValue, ValueKind},
    };
    use std::{cell::RefCell, collections::BTreeMap, io};

    fn spec() -> SortSpec {
        SortSpec::new(
            [SortColumn::asc("score", ValueKind::Int).nulls_first()],
            [TieBreaker::new("id", ValueKind::Int)],
        )
        .expect("valid spec")
    }

    #[test]
    fn identifiers_are_quoted() {
        assert_eq!(quote_ident("score"), "\"score\"");
        assert_eq!(quote_ident("we\"ird"), "\"we\"\"ird\"");
    }

    #[test]
    fn order_renders_direction_and_nulls() {
        assert_eq!(
            render_order(spec().columns()),
            "\"score\" ASC NULLS FIRST, \"id\" ASC NULLS LAST"
        );
        assert_eq!(
            render_order(spec().reversed().columns()),
            "\"score\" DESC NULLS LAST, \"id\" DESC NULLS FIRST"
        );
    }

    #[test]
    fn seek_predicate_renders_as_disjunctive_prefix() {
        let marker: Marker = [10i64, 7].into_iter().collect();
        let predicate =
            build_seek_predicate(&spec(), &marker, ScanDirection::Forward).expect("seek");

        let fragment = render_predicate(&predicate);

        assert_eq!(
            fragment.sql,
            "\"score\" > $1 OR (\"score\" = $1 AND (\"id\" > $2 OR \"id\" IS NULL))"
        );
        assert_eq!(fragment.params, vec![MarkerValue::Int(10), MarkerValue::Int(7)]);
    }

    #[test]
    fn empty_junctions_render_as_constants() {
        assert_eq!(render_predicate(&Predicate::And(Vec::new())).sql, "TRUE");
        assert_eq!(render_predicate(&Predicate::Or(Vec::new())).sql, "FALSE");
        assert_eq!(
            render_predicate(&Predicate::not(Predicate::is_null("a"))).sql,
            "NOT (\"a\" IS NULL)"
        );
    }

    #[derive(Default)]
    struct RecordingExecutor {
        seen: RefCell<Vec<(String, Vec<MarkerValue>)>>,
        fail: bool,
    }

    impl SqlExecutor for RecordingExecutor {
        type Row = BTreeMap<String, MarkerValue>;

        fn query(
            &self,
            sql: &str,
            params: &[MarkerValue],
        ) -> Result<Vec<Self::Row>, BoxedSourceError> {
            self.seen.borrow_mut().push((sql.to_string(), params.to_vec()));
            if self.fail {
                return Err(Box::new(io::Error::other("connection reset")));
            }

            Ok(Vec::new())
        }
    }

    #[test]
    fn sql_source_composes_statement_around_base() {
        let source = SqlSource::new(RecordingExecutor::default());
        let base = SqlStatement::new("SELECT id, score FROM players");

        let query = source.apply_order(base, spec().columns());
        let query = source.apply_filter(query, Predicate::gt("id", 3i64));
        let query = source.apply_limit(query, 11);
        source.execute(query).expect("execute");

        let seen = source.executor().seen.borrow();
        assert_eq!(
            seen[0].0,
            "SELECT * FROM (SELECT id, score FROM players) AS page_source \
             WHERE \"id\" > $1 \
             ORDER BY \"score\" ASC NULLS FIRST, \"id\" ASC NULLS LAST LIMIT 11"
        );
        assert_eq!(seen[0].1, vec![MarkerValue::Int(3)]);
    }

    #[test]
    fn seek_placeholders_number_after_base_params() {
        let source = SqlSource::new(RecordingExecutor::default());
        let base = SqlStatement::with_params(
            "SELECT * FROM players WHERE tenant = $1",
            vec![MarkerValue::from("acme")],
        );

        let query = source.apply_filter(base, Predicate::gt("id", 7i64));
        source.execute(query).expect("execute");

        let seen = source.executor().seen.borrow();
        assert_eq!(
            seen[0].0,
            "SELECT * FROM (SELECT * FROM players WHERE tenant = $1) AS page_source \
             WHERE \"id\" > $2"
        );
        assert_eq!(
            seen[0].1,
            vec![MarkerValue::from("acme"), MarkerValue::Int(7)]
        );
    }

    #[test]
    fn caller_filter_binds_ahead_of_seek_predicate() {
        let source = SqlSource::new(RecordingExecutor::default());
        let base = SqlStatement::filtered(
            "SELECT * FROM players",
            Predicate::eq("tenant", "acme") & Predicate::is_not_null("score"),
        );
        assert!(base.base_params().is_empty());

        let marker: Marker = [10i64, 7].into_iter().collect();
        let seek = build_seek_predicate(&spec(), &marker, ScanDirection::Forward).expect("seek");
        let query = source.apply_filter(base, seek);
        source.execute(query).expect("execute");

        let seen = source.executor().seen.borrow();
        assert_eq!(
            seen[0].0,
            "SELECT * FROM (SELECT * FROM players) AS page_source \
             WHERE \"tenant\" = $1 AND \"score\" IS NOT NULL \
             AND (\"score\" > $2 OR (\"score\" = $2 AND (\"id\" > $3 OR \"id\" IS NULL)))"
        );
        assert_eq!(
            seen[0].1,
            vec![
                MarkerValue::from("acme"),
                MarkerValue::Int(10),
                MarkerValue::Int(7)
            ]
        );
    }

    #[test]
    fn sql_source_wraps_driver_errors() {
        let source = SqlSource::new(RecordingExecutor {
            fail: true,
            ..RecordingExecutor::default()
        });

        let err = source
            .execute(SqlStatement::new("SELECT 1"))
            .expect_err("driver failure should surface");

        assert_eq!(err.stage(), FetchStage::Execute);
        assert_eq!(err.message(), "connection reset");
        assert!(err.inner().is_some_and(|inner| inner.is::<io::Error>()));
    }
}
