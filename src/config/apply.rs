use crate::error::{AppError, AppResult, ConfigError};

use super::types::{
    ConfigFile, DEFAULT_FLUSH_INTERVAL_MS, DEFAULT_PERCENTILE_THRESHOLDS, DEFAULT_PORT,
    DEFAULT_SEND_TIMEOUT_MS, GraphiteConfig, PositiveU64,
};

/// Resolves a raw config file into a validated exporter configuration,
/// filling in defaults for unset options.
///
/// # Errors
///
/// Returns an error when an interval or timeout is zero, or when a percentile
/// threshold is missing, non-finite, or outside `(0, 100]`.
pub fn resolve_config(file: ConfigFile) -> AppResult<GraphiteConfig> {
    let flush_interval_ms =
        PositiveU64::new(file.flush_interval_ms.unwrap_or(DEFAULT_FLUSH_INTERVAL_MS))
            .ok_or_else(|| AppError::config(ConfigError::FlushIntervalZero))?;
    let send_timeout_ms = PositiveU64::new(file.send_timeout_ms.unwrap_or(DEFAULT_SEND_TIMEOUT_MS))
        .ok_or_else(|| AppError::config(ConfigError::SendTimeoutZero))?;
    let percentile_thresholds = file
        .percentile_thresholds
        .unwrap_or_else(|| DEFAULT_PERCENTILE_THRESHOLDS.to_vec());
    validate_thresholds(&percentile_thresholds)?;

    Ok(GraphiteConfig {
        host: file.host,
        port: file.port.unwrap_or(DEFAULT_PORT),
        flush_interval_ms,
        debug: file.debug.unwrap_or(false),
        percentile_thresholds,
        send_timeout_ms,
    })
}

fn validate_thresholds(thresholds: &[f64]) -> AppResult<()> {
    if thresholds.is_empty() {
        return Err(AppError::config(ConfigError::ThresholdsEmpty));
    }
    for threshold in thresholds {
        if !threshold.is_finite() {
            return Err(AppError::config(ConfigError::ThresholdNotFinite));
        }
        if *threshold <= 0.0 || *threshold > 100.0 {
            return Err(AppError::config(ConfigError::ThresholdOutOfRange {
                value: *threshold,
            }));
        }
    }
    Ok(())
}
