use crate::{
    config::PagingPolicy,
    db::{
        cursor::{Cursor, Marker, decode_marker_with_limit},
        direction::ScanDirection,
        executor::{PageRequest, RequestKind},
        order::SortSpec,
        predicate::build_seek_predicate,
        query::{QuerySource, SortKeyRow, project_marker},
        response::Page,
    },
    error::PageError,
    obs::sink::{MetricsEvent, record},
};

/// Fetch one page under the default [`PagingPolicy`].
pub fn fetch_page<S: QuerySource>(
    source: &S,
    query: S::Query,
    spec: &SortSpec,
    page_size: u32,
    request: PageRequest,
) -> Result<Page<S::Row>, PageError> {
    fetch_page_with_policy(
        source,
        query,
        spec,
        page_size,
        request,
        &PagingPolicy::default(),
    )
}

/// Fetch one page of `query` ordered by `spec`.
///
/// Issues exactly one query. Cursor and page-size validation happen before
/// the query is refined, so a bad request never reaches the source.
pub fn fetch_page_with_policy<S: QuerySource>(
    source: &S,
    query: S::Query,
    spec: &SortSpec,
    page_size: u32,
    request: PageRequest,
    policy: &PagingPolicy,
) -> Result<Page<S::Row>, PageError> {
    let kind = request.kind();
    let result = execute_fetch(source, query, spec, page_size, request, policy);

    match &result {
        Ok(page) => record(MetricsEvent::PageFetch {
            request: kind,
            rows_returned: u64::try_from(page.len()).unwrap_or(u64::MAX),
            has_more: page.further(),
        }),
        Err(PageError::MalformedCursor(_)) => {
            record(MetricsEvent::CursorRejected { request: kind });
        }
        Err(PageError::DataSource(_)) => {
            record(MetricsEvent::DataSourceFailed { request: kind });
        }
        Err(_) => {}
    }

    result
}

fn execute_fetch<S: QuerySource>(
    source: &S,
    query: S::Query,
    spec: &SortSpec,
    page_size: u32,
    request: PageRequest,
    policy: &PagingPolicy,
) -> Result<Page<S::Row>, PageError> {
    let page_len = validate_page_size(page_size, policy)?;

    // Init: decode the cursor before touching the query.
    let marker = match request.cursor() {
        Some(cursor) => Some(decode_marker_with_limit(
            cursor,
            &spec.kinds(),
            policy.max_cursor_len,
        )?),
        None => None,
    };
    let scan = request.scan();

    // OrderApplied
    let mut query = match scan {
        ScanDirection::Forward => source.apply_order(query, spec.columns()),
        ScanDirection::Backward => source.apply_order(query, spec.reversed().columns()),
    };

    // FilterApplied | NoFilter
    if let Some(marker) = &marker {
        let predicate = build_seek_predicate(spec, marker, scan)?;
        query = source.apply_filter(query, predicate);
    }

    // Executed: one extra row answers "is there more?".
    query = source.apply_limit(query, page_len.saturating_add(1));
    let mut rows = source.execute(query)?;

    let has_more = rows.len() > page_len;
    rows.truncate(page_len);
    if scan.is_backward() {
        rows.reverse();
    }

    // Assembled
    let cursors = rows
        .iter()
        .map(|row| stamp_row(row, spec))
        .collect::<Result<Vec<_>, _>>()?;
    let (has_next, has_previous) = navigation_flags(request.kind(), has_more);

    Ok(Page::new(rows, cursors, has_next, has_previous, request))
}

fn validate_page_size(page_size: u32, policy: &PagingPolicy) -> Result<usize, PageError> {
    let invalid = || PageError::InvalidPageSize {
        requested: page_size,
        max: policy.max_page_size,
    };

    if page_size == 0 || page_size > policy.max_page_size {
        return Err(invalid());
    }

    usize::try_from(page_size).map_err(|_| invalid())
}

fn stamp_row<R: SortKeyRow>(row: &R, spec: &SortSpec) -> Result<Cursor, PageError> {
    let marker: Marker = project_marker(row, spec)?;

    Ok(marker.encode()?)
}

// (has_next, has_previous). A supplied cursor proves rows exist on the side
// it came from; the over-fetch answers the scan side.
const fn navigation_flags(kind: RequestKind, has_more: bool) -> (bool, bool) {
    match kind {
        RequestKind::First => (has_more, false),
        RequestKind::After => (has_more, true),
        RequestKind::Last => (false, has_more),
        RequestKind::Before => (true, has_more),
    }
}
