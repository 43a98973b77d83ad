//! Graphite export: connection lifecycle, health stamps, status reporting.
mod health;
mod send;


pub use health::ExporterHealth;

use std::time::Instant;

use crate::config::GraphiteConfig;
use crate::encode::{encode_lines, write_stat_line};
use crate::error::AppResult;
use crate::metrics::{MetricSnapshot, summarize};

/// Source name reported through the status callback.
pub const BACKEND_NAME: &str = "graphite";

const NUM_STATS_KEY: &str = "statsd.numStats";
const CALCULATION_TIME_KEY: &str = "stats.statsd.graphiteStats.calculationtime";
const LAST_EXCEPTION_KEY: &str = "stats.statsd.graphiteStats.last_exception";
const LAST_FLUSH_KEY: &str = "stats.statsd.graphiteStats.last_flush";

/// What happened to one flush's network send.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use]
pub enum FlushOutcome {
    /// Payload was written to the collector.
    Sent,
    /// No destination host is configured; nothing was transmitted.
    Skipped,
    /// Connect or write failed; recorded in `last_exception` and swallowed.
    Failed,
}

/// Periodically invoked output stage: summarizes a snapshot, encodes it, and
/// ships it to the configured collector over one TCP connection per flush.
///
/// Health stamps live on the instance, seeded from the startup time, and are
/// advisory only. A failed send never propagates to the caller as an error;
/// the flush computation that already happened is unaffected.
#[derive(Debug)]
pub struct GraphiteExporter {
    config: GraphiteConfig,
    health: ExporterHealth,
}

impl GraphiteExporter {
    #[must_use]
    pub const fn new(config: GraphiteConfig, startup_time: u64) -> Self {
        Self {
            config,
            health: ExporterHealth::new(startup_time),
        }
    }

    /// Runs one flush cycle: summarize, encode, append the self-observability
    /// lines, send.
    ///
    /// # Errors
    ///
    /// Returns an error only when payload encoding fails, which indicates a
    /// bug upstream. Transport failures are reported through the returned
    /// [`FlushOutcome`] and the health stamps, never as an error.
    pub async fn flush(&mut self, ts: u64, snapshot: &MetricSnapshot) -> AppResult<FlushOutcome> {
        let payload = self.build_payload(ts, snapshot)?;
        Ok(self.send(&payload).await)
    }

    /// Summarizes and encodes one snapshot, appending `statsd.numStats`, the
    /// computation duration in milliseconds, and the two health stamps as of
    /// before this send. All appended lines carry the flush `ts` like the
    /// rest of the batch.
    fn build_payload(&self, ts: u64, snapshot: &MetricSnapshot) -> AppResult<String> {
        let started = Instant::now();

        let thresholds = if snapshot.pct_thresholds.is_empty() {
            self.config.percentile_thresholds.as_slice()
        } else {
            snapshot.pct_thresholds.as_slice()
        };
        let summary = summarize(snapshot, thresholds, self.config.flush_interval_ms);

        let mut payload = encode_lines(&summary.values, ts)?;
        write_stat_line(&mut payload, NUM_STATS_KEY, summary.num_stats as f64, ts)?;
        let calculation_ms = started.elapsed().as_secs_f64() * 1000.0;
        write_stat_line(&mut payload, CALCULATION_TIME_KEY, calculation_ms, ts)?;
        write_stat_line(
            &mut payload,
            LAST_EXCEPTION_KEY,
            self.health.last_exception as f64,
            ts,
        )?;
        write_stat_line(
            &mut payload,
            LAST_FLUSH_KEY,
            self.health.last_flush as f64,
            ts,
        )?;
        Ok(payload)
    }

    /// Ships an encoded payload to the configured collector.
    ///
    /// With no host configured this is a deliberate no-op: zero network I/O,
    /// reported as [`FlushOutcome::Skipped`]. Transport failures update
    /// `last_exception`, are logged only when `debug` is set, and are
    /// swallowed so one failed flush cannot take down the process or block
    /// the next flush.
    pub async fn send(&mut self, payload: &str) -> FlushOutcome {
        let Some(host) = self.config.host.as_deref() else {
            return FlushOutcome::Skipped;
        };
        let addr = format!("{}:{}", host, self.config.port);

        match send::send_payload(&addr, payload.as_bytes(), self.config.send_timeout_ms).await {
            Ok(()) => {
                self.health.last_flush = unix_now();
                FlushOutcome::Sent
            }
            Err(err) => {
                if self.config.debug {
                    tracing::warn!("Failed to flush stats to {}: {}", addr, err);
                }
                self.health.last_exception = unix_now();
                FlushOutcome::Failed
            }
        }
    }

    /// Non-blocking copy of the advisory health stamps.
    #[must_use]
    pub const fn health(&self) -> ExporterHealth {
        self.health
    }

    #[must_use]
    pub const fn config(&self) -> &GraphiteConfig {
        &self.config
    }

    /// Reports each exposed health field to the status-query collaborator.
    pub fn status<F>(&self, mut write: F)
    where
        F: FnMut(&'static str, &'static str, u64),
    {
        write(BACKEND_NAME, "last_flush", self.health.last_flush);
        write(BACKEND_NAME, "last_exception", self.health.last_exception);
    }
}

fn unix_now() -> u64 {
    u64::try_from(chrono::Utc::now().timestamp()).unwrap_or(0)
}
