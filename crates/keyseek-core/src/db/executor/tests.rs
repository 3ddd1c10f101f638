use crate::{
    config::PagingPolicy,
    db::{
        cursor::{Cursor, CursorError, Marker},
        executor::{PageRequest, RequestKind, fetch_page, fetch_page_with_policy},
        order::{SortColumn, SortSpec, TieBreaker},
        predicate::Predicate,
        query::QuerySource,
        source::{MemoryQuery, MemorySource},
    },
    error::{DataSourceError, FetchStage, PageError},
    obs::{MetricsEvent, MetricsSink, with_metrics_sink},
    value::{MarkerValue, ValueKind},
};
use std::{cell::RefCell, collections::BTreeMap};

type Row = BTreeMap<String, MarkerValue>;

fn row(id: i64, score: i64) -> Row {
    BTreeMap::from([
        ("id".to_string(), MarkerValue::Int(id)),
        ("score".to_string(), MarkerValue::Int(score)),
    ])
}

fn spec() -> SortSpec {
    SortSpec::new(
        [SortColumn::asc("score", ValueKind::Int)],
        [TieBreaker::new("id", ValueKind::Int)],
    )
    .expect("valid spec")
}

fn cursor(score: i64, id: i64) -> Cursor {
    let marker: Marker = [score, id].into_iter().collect();

    marker.encode().expect("marker should encode")
}

///
/// RecordingSource
/// Wraps a memory source and records every boundary call in order.
///

struct RecordingSource {
    inner: MemorySource<Row>,
    calls: RefCell<Vec<String>>,
    fail: bool,
}

impl RecordingSource {
    fn new(rows: Vec<Row>) -> Self {
        Self {
            inner: MemorySource::new(rows),
            calls: RefCell::new(Vec::new()),
            fail: false,
        }
    }

    fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }
}

impl QuerySource for RecordingSource {
    type Query = MemoryQuery;
    type Row = Row;

    fn apply_order(&self, query: MemoryQuery, columns: &[SortColumn]) -> MemoryQuery {
        let rendered: Vec<String> = columns
            .iter()
            .map(|c| format!("{} {}", c.name(), c.direction()))
            .collect();
        self.calls
            .borrow_mut()
            .push(format!("order {}", rendered.join(", ")));

        self.inner.apply_order(query, columns)
    }

    fn apply_filter(&self, query: MemoryQuery, predicate: Predicate) -> MemoryQuery {
        self.calls.borrow_mut().push("filter".to_string());

        self.inner.apply_filter(query, predicate)
    }

    fn apply_limit(&self, query: MemoryQuery, limit: usize) -> MemoryQuery {
        self.calls.borrow_mut().push(format!("limit {limit}"));

        self.inner.apply_limit(query, limit)
    }

    fn execute(&self, query: MemoryQuery) -> Result<Vec<Row>, DataSourceError> {
        self.calls.borrow_mut().push("execute".to_string());
        if self.fail {
            return Err(DataSourceError::execute_message("database unavailable"));
        }

        self.inner.execute(query)
    }
}

#[derive(Default)]
struct CollectingSink {
    events: RefCell<Vec<MetricsEvent>>,
}

impl MetricsSink for CollectingSink {
    fn record(&self, event: MetricsEvent) {
        self.events.borrow_mut().push(event);
    }
}

#[test]
fn first_page_orders_limits_and_skips_filter() {
    let source = RecordingSource::new(vec![row(1, 10), row(2, 10), row(3, 5)]);

    let page = fetch_page(&source, MemoryQuery::all(), &spec(), 2, PageRequest::First)
        .expect("first page");

    assert_eq!(
        source.calls(),
        vec!["order score ASC, id ASC", "limit 3", "execute"]
    );
    assert_eq!(page.items(), &[row(3, 5), row(1, 10)]);
    assert!(page.has_next());
    assert!(!page.has_previous());
}

#[test]
fn before_request_scans_reversed_and_restores_order() {
    let source = RecordingSource::new(vec![row(1, 10), row(2, 10), row(3, 5), row(4, 20)]);

    let page = fetch_page(
        &source,
        MemoryQuery::all(),
        &spec(),
        2,
        PageRequest::Before(cursor(20, 4)),
    )
    .expect("before page");

    assert_eq!(
        source.calls(),
        vec!["order score DESC, id DESC", "filter", "limit 3", "execute"]
    );
    assert_eq!(page.items(), &[row(1, 10), row(2, 10)]);
    assert!(page.has_next());
    assert!(page.has_previous());
    assert_eq!(page.next_cursor(), Some(&cursor(10, 2)));
    assert_eq!(page.previous_cursor(), Some(&cursor(10, 1)));
}

#[test]
fn last_page_reports_previous_from_overfetch() {
    let source = RecordingSource::new(vec![row(1, 10), row(2, 10), row(3, 5)]);

    let page = fetch_page(&source, MemoryQuery::all(), &spec(), 2, PageRequest::Last)
        .expect("last page");

    assert_eq!(page.items(), &[row(1, 10), row(2, 10)]);
    assert!(!page.has_next());
    assert!(page.has_previous());
    assert!(page.further());
}

#[test]
fn malformed_cursor_fails_before_any_query_work() {
    let source = RecordingSource::new(vec![row(1, 10)]);

    let err = fetch_page(
        &source,
        MemoryQuery::all(),
        &spec(),
        2,
        PageRequest::After(Cursor::from("not-a-cursor")),
    )
    .expect_err("garbage cursor must fail");

    assert!(err.is_malformed_cursor());
    assert!(source.calls().is_empty());
}

#[test]
fn cursor_for_other_spec_shape_is_rejected() {
    let source = RecordingSource::new(vec![row(1, 10)]);
    let foreign: Marker = [MarkerValue::from("ada")].into_iter().collect();
    let foreign = foreign.encode().expect("marker should encode");

    let err = fetch_page(
        &source,
        MemoryQuery::all(),
        &spec(),
        2,
        PageRequest::Before(foreign),
    )
    .expect_err("foreign cursor must fail");

    assert!(matches!(
        err,
        PageError::MalformedCursor(CursorError::ArityMismatch {
            expected: 2,
            found: 1
        })
    ));
    assert!(source.calls().is_empty());
}

#[test]
fn page_size_is_validated_against_policy() {
    let source = RecordingSource::new(vec![row(1, 10)]);
    let policy = PagingPolicy {
        max_page_size: 5,
        ..PagingPolicy::default()
    };

    for requested in [0, 6] {
        let err = fetch_page_with_policy(
            &source,
            MemoryQuery::all(),
            &spec(),
            requested,
            PageRequest::First,
            &policy,
        )
        .expect_err("page size out of range");

        assert!(matches!(
            err,
            PageError::InvalidPageSize { requested: r, max: 5 } if r == requested
        ));
    }
    assert!(source.calls().is_empty());
}

#[test]
fn data_source_failure_propagates_unchanged() {
    let mut source = RecordingSource::new(vec![row(1, 10)]);
    source.fail = true;

    let err = fetch_page(&source, MemoryQuery::all(), &spec(), 2, PageRequest::First)
        .expect_err("source failure must surface");

    let inner = match err {
        PageError::DataSource(inner) => inner,
        other => panic!("expected data source error, got {other:?}"),
    };
    assert_eq!(inner.stage(), FetchStage::Execute);
    assert_eq!(inner.message(), "database unavailable");
}

#[test]
fn rows_missing_sort_columns_fail_projection() {
    let mut partial = BTreeMap::new();
    partial.insert("id".to_string(), MarkerValue::Int(1));
    let source = RecordingSource::new(vec![partial]);

    let err = fetch_page(&source, MemoryQuery::all(), &spec(), 2, PageRequest::First)
        .expect_err("projection must fail");

    assert!(matches!(
        err,
        PageError::DataSource(ref inner) if inner.stage() == FetchStage::Projection
    ));
}

#[test]
fn fetch_outcomes_are_reported_to_the_sink() {
    let source = RecordingSource::new(vec![row(1, 10), row(2, 10), row(3, 5)]);
    let sink = CollectingSink::default();

    with_metrics_sink(&sink, || {
        fetch_page(&source, MemoryQuery::all(), &spec(), 2, PageRequest::First)
            .expect("first page");
        fetch_page(
            &source,
            MemoryQuery::all(),
            &spec(),
            2,
            PageRequest::After(Cursor::from("zz")),
        )
        .expect_err("bad cursor");
    });

    assert_eq!(
        sink.events.into_inner(),
        vec![
            MetricsEvent::PageFetch {
                request: RequestKind::First,
                rows_returned: 2,
                has_more: true,
            },
            MetricsEvent::CursorRejected {
                request: RequestKind::After,
            },
        ]
    );
}

#[test]
fn bookmarks_round_trip_and_reject_garbage() {
    let after = PageRequest::After(cursor(10, 1));

    assert_eq!(PageRequest::parse_bookmark("first"), Ok(PageRequest::First));
    assert_eq!(PageRequest::parse_bookmark("last"), Ok(PageRequest::Last));
    assert_eq!(after.to_bookmark().parse::<PageRequest>(), Ok(after.clone()));
    assert_eq!(after.to_string(), after.to_bookmark());

    for garbage in ["", ">", "<", "middle", "?abc"] {
        assert!(matches!(
            PageRequest::parse_bookmark(garbage),
            Err(CursorError::Bookmark { .. })
        ));
    }
}
