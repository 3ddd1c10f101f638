use crate::{db::executor::RequestKind, types::Timestamp};
use serde::{Deserialize, Serialize};
use std::cell::RefCell;

///
/// EventState
/// Ephemeral, in-memory paging counters for the current thread.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct EventState {
    pub fetches: FetchCounters,
    pub since_ms: u64,
}

impl Default for EventState {
    fn default() -> Self {
        Self {
            fetches: FetchCounters::default(),
            since_ms: now_millis(),
        }
    }
}

///
/// FetchCounters
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct FetchCounters {
    // Completed fetches by request kind
    pub fetch_calls: u64,
    pub first_calls: u64,
    pub last_calls: u64,
    pub after_calls: u64,
    pub before_calls: u64,

    // Rows handed back to callers
    pub rows_returned: u64,
    pub pages_with_more: u64,

    // Failures
    pub cursor_rejections: u64,
    pub source_failures: u64,
}

impl FetchCounters {
    pub(crate) const fn record_fetch(
        &mut self,
        request: RequestKind,
        rows_returned: u64,
        has_more: bool,
    ) {
        self.fetch_calls = self.fetch_calls.saturating_add(1);
        match request {
            RequestKind::First => self.first_calls = self.first_calls.saturating_add(1),
            RequestKind::Last => self.last_calls = self.last_calls.saturating_add(1),
            RequestKind::After => self.after_calls = self.after_calls.saturating_add(1),
            RequestKind::Before => self.before_calls = self.before_calls.saturating_add(1),
        }

        self.rows_returned = self.rows_returned.saturating_add(rows_returned);
        if has_more {
            self.pages_with_more = self.pages_with_more.saturating_add(1);
        }
    }
}

thread_local! {
    static EVENT_STATE: RefCell<EventState> = RefCell::new(EventState::default());
}

fn now_millis() -> u64 {
    u64::try_from(Timestamp::now().as_millis()).unwrap_or_default()
}

/// Borrow metrics immutably.
pub(crate) fn with_state<R>(f: impl FnOnce(&EventState) -> R) -> R {
    EVENT_STATE.with(|m| f(&m.borrow()))
}

/// Borrow metrics mutably.
pub(crate) fn with_state_mut<R>(f: impl FnOnce(&mut EventState) -> R) -> R {
    EVENT_STATE.with(|m| f(&mut m.borrow_mut()))
}

/// Reset all counters and restart the window.
pub(crate) fn reset_all() {
    with_state_mut(|m| *m = EventState::default());
}

///
/// EventReport
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct EventReport {
    /// Counters accumulated since `since_ms`, absent when the requested
    /// window starts after the current one.
    pub counters: Option<EventState>,
}

/// Build a report; counters are omitted when `window_start_ms` is later than
/// the start of the current window.
pub(crate) fn report_window_start(window_start_ms: Option<u64>) -> EventReport {
    let snapshot = with_state(Clone::clone);

    if let Some(requested) = window_start_ms
        && requested > snapshot.since_ms
    {
        return EventReport::default();
    }

    EventReport {
        counters: Some(snapshot),
    }
}
