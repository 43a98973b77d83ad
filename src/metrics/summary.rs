use crate::config::PositiveU64;

use super::types::{MetricSnapshot, StatsSummary};

/// Summarizes one snapshot into fully-qualified output keys and values.
///
/// Pure function of its inputs: identical snapshots yield identical output
/// vectors. Counters report a per-second rate and the raw total. Timers are
/// summarized via truncated-distribution statistics for each threshold plus
/// overall moments; a timer with no observations contributes nothing. Gauges
/// report extrema and moments, with an empty gauge treated as a single zero
/// sample for everything except `count`. Sets report cardinality.
///
/// Percentile ranks round half away from zero and clamp to `[1, n]`, so a
/// single observation satisfies every threshold. Threshold labels keep the
/// literal decimal representation of the configured value (`upper_99.5`).
#[must_use]
pub fn summarize(
    snapshot: &MetricSnapshot,
    thresholds: &[f64],
    flush_interval_ms: PositiveU64,
) -> StatsSummary {
    let mut values: Vec<(String, f64)> = Vec::new();
    let mut num_stats: u64 = 0;

    let interval_seconds = flush_interval_ms.get() as f64 / 1000.0;
    for (key, total) in &snapshot.counters {
        values.push((
            format!("stats.counters.{key}.per_second"),
            total / interval_seconds,
        ));
        values.push((format!("stats.counters.{key}.total"), *total));
        num_stats = num_stats.saturating_add(1);
    }

    for (key, observations) in &snapshot.timers {
        if append_timer_stats(&mut values, key, observations, thresholds) {
            num_stats = num_stats.saturating_add(1);
        }
    }

    for (key, observations) in &snapshot.gauges {
        append_gauge_stats(&mut values, key, observations);
        num_stats = num_stats.saturating_add(1);
    }

    for (key, members) in &snapshot.sets {
        values.push((format!("stats.sets.{key}.count"), members.len() as f64));
        num_stats = num_stats.saturating_add(1);
    }

    StatsSummary { values, num_stats }
}

/// Returns false without emitting anything when the timer has no
/// observations.
fn append_timer_stats(
    values: &mut Vec<(String, f64)>,
    key: &str,
    observations: &[f64],
    thresholds: &[f64],
) -> bool {
    if observations.is_empty() {
        return false;
    }

    let mut sorted = observations.to_vec();
    sorted.sort_by(f64::total_cmp);
    let count = sorted.len();
    let lower = sorted.first().copied().unwrap_or(0.0);
    let upper = sorted.last().copied().unwrap_or(0.0);

    let mut cumulative: Vec<f64> = Vec::with_capacity(count);
    let mut running = 0.0;
    for value in &sorted {
        running += value;
        cumulative.push(running);
    }
    let sum = running;

    for threshold in thresholds {
        let rank = percentile_rank(*threshold, count);
        let index = rank.saturating_sub(1);
        let upper_at_pct = sorted.get(index).copied().unwrap_or(upper);
        let sum_at_pct = cumulative.get(index).copied().unwrap_or(sum);
        let mean_at_pct = sum_at_pct / rank as f64;

        values.push((format!("stats.timers.{key}.mean_{threshold}"), mean_at_pct));
        values.push((format!("stats.timers.{key}.upper_{threshold}"), upper_at_pct));
        values.push((format!("stats.timers.{key}.sum_{threshold}"), sum_at_pct));
    }

    let mean = sum / count as f64;
    let variance = sorted
        .iter()
        .map(|value| (value - mean) * (value - mean))
        .sum::<f64>()
        / count as f64;

    values.push((format!("stats.timers.{key}.std"), variance.sqrt()));
    values.push((format!("stats.timers.{key}.upper"), upper));
    values.push((format!("stats.timers.{key}.lower"), lower));
    values.push((format!("stats.timers.{key}.count"), count as f64));
    values.push((format!("stats.timers.{key}.sum"), sum));
    values.push((format!("stats.timers.{key}.mean"), mean));
    true
}

fn append_gauge_stats(values: &mut Vec<(String, f64)>, key: &str, observations: &[f64]) {
    let real_count = observations.len();
    let mut sorted = observations.to_vec();
    sorted.sort_by(f64::total_cmp);
    if sorted.is_empty() {
        sorted.push(0.0);
    }

    let lower = sorted.first().copied().unwrap_or(0.0);
    let upper = sorted.last().copied().unwrap_or(0.0);
    let mean = sorted.iter().sum::<f64>() / sorted.len() as f64;
    let variance = sorted
        .iter()
        .map(|value| (value - mean) * (value - mean))
        .sum::<f64>()
        / sorted.len() as f64;

    values.push((format!("stats.gauges.{key}.lower"), lower));
    values.push((format!("stats.gauges.{key}.upper"), upper));
    values.push((format!("stats.gauges.{key}.mean"), mean));
    values.push((format!("stats.gauges.{key}.count"), real_count as f64));
    values.push((format!("stats.gauges.{key}.stddev"), variance.sqrt()));
}

/// One-based rank of the observation closing the `threshold` percentile,
/// rounded half away from zero and clamped to `[1, count]`.
fn percentile_rank(threshold: f64, count: usize) -> usize {
    let rank = (threshold / 100.0 * count as f64).round();
    (rank as usize).clamp(1, count)
}
