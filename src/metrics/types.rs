use std::collections::{BTreeMap, BTreeSet};

/// Read-only view of the raw samples accumulated over one flush interval.
///
/// Keys are opaque metric names, unique within their category. The intake
/// side owns accumulation; a snapshot is immutable for the duration of one
/// flush. Sorted maps make the summarizer's output order deterministic.
#[derive(Debug, Default, Clone)]
pub struct MetricSnapshot {
    /// Counter name to accumulated total since the last flush.
    pub counters: BTreeMap<String, f64>,
    /// Timer name to observed durations, in arrival order.
    pub timers: BTreeMap<String, Vec<f64>>,
    /// Gauge name to values recorded during the interval.
    pub gauges: BTreeMap<String, Vec<f64>>,
    /// Set name to distinct member values observed during the interval.
    pub sets: BTreeMap<String, BTreeSet<String>>,
    /// Percentile thresholds requested for timer summaries. When empty, the
    /// exporter falls back to its configured thresholds.
    pub pct_thresholds: Vec<f64>,
}

/// Output of one summarization pass.
///
/// `values` holds fully-qualified output keys paired with finite values, in a
/// committed order: counters, timers, gauges, sets, each sorted by metric
/// name.
#[derive(Debug, Clone, PartialEq)]
pub struct StatsSummary {
    pub values: Vec<(String, f64)>,
    /// Number of distinct metric names that contributed at least one output.
    pub num_stats: u64,
}
