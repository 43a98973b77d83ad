use std::collections::BTreeSet;

use crate::config::PositiveU64;

use super::*;

const EPSILON: f64 = 1e-9;

fn interval_ms(value: u64) -> Result<PositiveU64, String> {
    PositiveU64::new(value).ok_or_else(|| "interval must be positive".to_owned())
}

fn lookup(summary: &StatsSummary, key: &str) -> Result<f64, String> {
    summary
        .values
        .iter()
        .find(|(name, _)| name.as_str() == key)
        .map(|(_, value)| *value)
        .ok_or_else(|| format!("Missing output key: {key}"))
}

fn expect_close(summary: &StatsSummary, key: &str, expected: f64) -> Result<(), String> {
    let actual = lookup(summary, key)?;
    if (actual - expected).abs() > EPSILON {
        return Err(format!("{key}: expected {expected}, got {actual}"));
    }
    Ok(())
}

#[test]
fn counters_report_rate_and_total() -> Result<(), String> {
    let mut snapshot = MetricSnapshot::default();
    snapshot.counters.insert("requests".to_owned(), 100.0);
    snapshot.counters.insert("zero".to_owned(), 0.0);

    let summary = summarize(&snapshot, &[90.0], interval_ms(10_000)?);

    expect_close(&summary, "stats.counters.requests.per_second", 10.0)?;
    expect_close(&summary, "stats.counters.requests.total", 100.0)?;
    expect_close(&summary, "stats.counters.zero.per_second", 0.0)?;
    expect_close(&summary, "stats.counters.zero.total", 0.0)?;
    if summary.num_stats != 2 {
        return Err(format!("Expected num_stats 2, got {}", summary.num_stats));
    }
    Ok(())
}

#[test]
fn counter_rate_uses_fractional_interval_seconds() -> Result<(), String> {
    let mut snapshot = MetricSnapshot::default();
    snapshot.counters.insert("hits".to_owned(), 3.0);

    let summary = summarize(&snapshot, &[], interval_ms(1_500)?);

    expect_close(&summary, "stats.counters.hits.per_second", 2.0)
}

#[test]
fn timer_summary_matches_known_distribution() -> Result<(), String> {
    let mut snapshot = MetricSnapshot::default();
    snapshot
        .timers
        .insert("latency".to_owned(), vec![5.0, 1.0, 3.0]);

    let summary = summarize(&snapshot, &[100.0], interval_ms(10_000)?);

    expect_close(&summary, "stats.timers.latency.count", 3.0)?;
    expect_close(&summary, "stats.timers.latency.lower", 1.0)?;
    expect_close(&summary, "stats.timers.latency.upper", 5.0)?;
    expect_close(&summary, "stats.timers.latency.sum", 9.0)?;
    expect_close(&summary, "stats.timers.latency.mean", 3.0)?;
    expect_close(&summary, "stats.timers.latency.upper_100", 5.0)?;
    expect_close(&summary, "stats.timers.latency.sum_100", 9.0)?;
    expect_close(&summary, "stats.timers.latency.mean_100", 3.0)?;
    expect_close(&summary, "stats.timers.latency.std", (8.0_f64 / 3.0).sqrt())?;
    if summary.num_stats != 1 {
        return Err(format!("Expected num_stats 1, got {}", summary.num_stats));
    }
    Ok(())
}

#[test]
fn timer_single_observation_degenerates_to_the_sample() -> Result<(), String> {
    let mut snapshot = MetricSnapshot::default();
    snapshot.timers.insert("single".to_owned(), vec![7.0]);

    let summary = summarize(&snapshot, &[10.0, 50.0, 99.9], interval_ms(10_000)?);

    for key in [
        "stats.timers.single.mean_10",
        "stats.timers.single.upper_10",
        "stats.timers.single.sum_10",
        "stats.timers.single.mean_50",
        "stats.timers.single.upper_50",
        "stats.timers.single.sum_50",
        "stats.timers.single.mean_99.9",
        "stats.timers.single.upper_99.9",
        "stats.timers.single.sum_99.9",
        "stats.timers.single.upper",
        "stats.timers.single.lower",
        "stats.timers.single.sum",
        "stats.timers.single.mean",
    ] {
        expect_close(&summary, key, 7.0)?;
    }
    expect_close(&summary, "stats.timers.single.std", 0.0)?;
    expect_close(&summary, "stats.timers.single.count", 1.0)
}

#[test]
fn timer_with_no_observations_is_skipped() -> Result<(), String> {
    let mut snapshot = MetricSnapshot::default();
    snapshot.timers.insert("idle".to_owned(), vec![]);

    let summary = summarize(&snapshot, &[90.0], interval_ms(10_000)?);

    if summary
        .values
        .iter()
        .any(|(name, _)| name.starts_with("stats.timers.idle."))
    {
        return Err("Empty timer must not emit any lines".to_owned());
    }
    if summary.num_stats != 0 {
        return Err(format!("Expected num_stats 0, got {}", summary.num_stats));
    }
    Ok(())
}

#[test]
fn timer_percentile_rank_selects_expected_observation() -> Result<(), String> {
    let mut snapshot = MetricSnapshot::default();
    let observations: Vec<f64> = (1..=10).map(f64::from).collect();
    snapshot.timers.insert("spread".to_owned(), observations);

    let summary = summarize(&snapshot, &[90.0], interval_ms(10_000)?);

    expect_close(&summary, "stats.timers.spread.upper_90", 9.0)?;
    expect_close(&summary, "stats.timers.spread.sum_90", 45.0)?;
    expect_close(&summary, "stats.timers.spread.mean_90", 5.0)
}

#[test]
fn timer_percentile_rank_clamps_to_first_observation() -> Result<(), String> {
    let mut snapshot = MetricSnapshot::default();
    snapshot
        .timers
        .insert("latency".to_owned(), vec![5.0, 1.0, 3.0]);

    let summary = summarize(&snapshot, &[10.0], interval_ms(10_000)?);

    expect_close(&summary, "stats.timers.latency.upper_10", 1.0)?;
    expect_close(&summary, "stats.timers.latency.sum_10", 1.0)?;
    expect_close(&summary, "stats.timers.latency.mean_10", 1.0)
}

#[test]
fn timer_threshold_label_keeps_decimal_point() -> Result<(), String> {
    let mut snapshot = MetricSnapshot::default();
    snapshot.timers.insert("t".to_owned(), vec![4.0, 2.0]);

    let summary = summarize(&snapshot, &[99.5], interval_ms(10_000)?);

    expect_close(&summary, "stats.timers.t.mean_99.5", 3.0)?;
    expect_close(&summary, "stats.timers.t.upper_99.5", 4.0)?;
    expect_close(&summary, "stats.timers.t.sum_99.5", 6.0)
}

#[test]
fn timer_input_order_is_irrelevant() -> Result<(), String> {
    let mut first = MetricSnapshot::default();
    first.timers.insert("t".to_owned(), vec![9.0, 1.0, 5.0]);
    let mut second = MetricSnapshot::default();
    second.timers.insert("t".to_owned(), vec![1.0, 5.0, 9.0]);

    let left = summarize(&first, &[90.0], interval_ms(10_000)?);
    let right = summarize(&second, &[90.0], interval_ms(10_000)?);

    if left != right {
        return Err("Summaries must not depend on observation order".to_owned());
    }
    Ok(())
}

#[test]
fn gauge_summary_reports_extrema_and_moments() -> Result<(), String> {
    let mut snapshot = MetricSnapshot::default();
    snapshot.gauges.insert("load".to_owned(), vec![3.0, 1.0, 2.0]);

    let summary = summarize(&snapshot, &[90.0], interval_ms(10_000)?);

    expect_close(&summary, "stats.gauges.load.lower", 1.0)?;
    expect_close(&summary, "stats.gauges.load.upper", 3.0)?;
    expect_close(&summary, "stats.gauges.load.mean", 2.0)?;
    expect_close(&summary, "stats.gauges.load.count", 3.0)?;
    expect_close(&summary, "stats.gauges.load.stddev", (2.0_f64 / 3.0).sqrt())?;
    if summary.num_stats != 1 {
        return Err(format!("Expected num_stats 1, got {}", summary.num_stats));
    }
    Ok(())
}

#[test]
fn empty_gauge_reports_zeros_but_true_count() -> Result<(), String> {
    let mut snapshot = MetricSnapshot::default();
    snapshot.gauges.insert("idle".to_owned(), vec![]);

    let summary = summarize(&snapshot, &[90.0], interval_ms(10_000)?);

    expect_close(&summary, "stats.gauges.idle.lower", 0.0)?;
    expect_close(&summary, "stats.gauges.idle.upper", 0.0)?;
    expect_close(&summary, "stats.gauges.idle.mean", 0.0)?;
    expect_close(&summary, "stats.gauges.idle.stddev", 0.0)?;
    expect_close(&summary, "stats.gauges.idle.count", 0.0)?;
    if summary.num_stats != 1 {
        return Err("Empty gauge must still count toward num_stats".to_owned());
    }
    Ok(())
}

#[test]
fn set_summary_reports_cardinality() -> Result<(), String> {
    let mut snapshot = MetricSnapshot::default();
    let members: BTreeSet<String> = ["a", "b", "a", "c"]
        .iter()
        .map(|member| (*member).to_owned())
        .collect();
    snapshot.sets.insert("users".to_owned(), members);
    snapshot.sets.insert("empty".to_owned(), BTreeSet::new());

    let summary = summarize(&snapshot, &[90.0], interval_ms(10_000)?);

    expect_close(&summary, "stats.sets.users.count", 3.0)?;
    expect_close(&summary, "stats.sets.empty.count", 0.0)?;
    if summary.num_stats != 2 {
        return Err(format!("Expected num_stats 2, got {}", summary.num_stats));
    }
    Ok(())
}

#[test]
fn num_stats_counts_contributing_names_only() -> Result<(), String> {
    let mut snapshot = MetricSnapshot::default();
    snapshot.counters.insert("c".to_owned(), 1.0);
    snapshot.timers.insert("t".to_owned(), vec![1.0]);
    snapshot.timers.insert("t_empty".to_owned(), vec![]);
    snapshot.gauges.insert("g".to_owned(), vec![]);
    snapshot.sets.insert("s".to_owned(), BTreeSet::new());

    let summary = summarize(&snapshot, &[90.0], interval_ms(10_000)?);

    if summary.num_stats != 4 {
        return Err(format!("Expected num_stats 4, got {}", summary.num_stats));
    }
    Ok(())
}

#[test]
fn summarize_is_idempotent() -> Result<(), String> {
    let mut snapshot = MetricSnapshot::default();
    snapshot.counters.insert("c".to_owned(), 42.0);
    snapshot.timers.insert("t".to_owned(), vec![2.0, 8.0, 4.0]);
    snapshot.gauges.insert("g".to_owned(), vec![1.5]);

    let first = summarize(&snapshot, &[50.0, 90.0], interval_ms(10_000)?);
    let second = summarize(&snapshot, &[50.0, 90.0], interval_ms(10_000)?);

    if first != second {
        return Err("Identical snapshots must summarize identically".to_owned());
    }
    Ok(())
}

#[test]
fn output_order_is_categories_then_sorted_names() -> Result<(), String> {
    let mut snapshot = MetricSnapshot::default();
    snapshot.counters.insert("b".to_owned(), 1.0);
    snapshot.counters.insert("a".to_owned(), 1.0);
    snapshot.timers.insert("t".to_owned(), vec![1.0]);
    snapshot.gauges.insert("g".to_owned(), vec![1.0]);
    snapshot.sets.insert("s".to_owned(), BTreeSet::new());

    let summary = summarize(&snapshot, &[90.0], interval_ms(10_000)?);

    let keys: Vec<&str> = summary
        .values
        .iter()
        .map(|(name, _)| name.as_str())
        .collect();
    let expected_head = [
        "stats.counters.a.per_second",
        "stats.counters.a.total",
        "stats.counters.b.per_second",
        "stats.counters.b.total",
    ];
    if keys.get(..expected_head.len()) != Some(expected_head.as_slice()) {
        return Err(format!("Unexpected leading keys: {:?}", keys));
    }
    let last = keys.last().copied().unwrap_or_default();
    if last != "stats.sets.s.count" {
        return Err(format!("Expected sets last, got {last}"));
    }
    Ok(())
}
