//! Observability: runtime paging counters and the sink abstraction that
//! feeds them.
//!
//! The engine never prints or logs; every signal is a `MetricsEvent`.

pub(crate) mod metrics;
pub(crate) mod sink;

// re-exports
pub use metrics::{EventReport, EventState, FetchCounters};
pub use sink::{MetricsEvent, MetricsSink, metrics_report, metrics_reset_all, with_metrics_sink};
