use std::num::NonZeroU64;

use serde::Deserialize;

pub(crate) const DEFAULT_PORT: u16 = 2003;
pub(crate) const DEFAULT_FLUSH_INTERVAL_MS: u64 = 10_000;
pub(crate) const DEFAULT_SEND_TIMEOUT_MS: u64 = 10_000;
pub(crate) const DEFAULT_PERCENTILE_THRESHOLDS: [f64; 1] = [90.0];

/// Raw on-disk configuration, before defaults and validation are applied.
#[derive(Debug, Default, Deserialize)]
pub struct ConfigFile {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub flush_interval_ms: Option<u64>,
    pub debug: Option<bool>,
    pub percentile_thresholds: Option<Vec<f64>>,
    pub send_timeout_ms: Option<u64>,
}

/// Validated exporter configuration.
///
/// `host == None` means export is disabled: flushes still compute and encode,
/// but nothing is transmitted.
#[derive(Debug, Clone)]
pub struct GraphiteConfig {
    pub host: Option<String>,
    pub port: u16,
    pub flush_interval_ms: PositiveU64,
    pub debug: bool,
    pub percentile_thresholds: Vec<f64>,
    pub send_timeout_ms: PositiveU64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PositiveU64(NonZeroU64);

impl PositiveU64 {
    #[must_use]
    pub const fn new(value: u64) -> Option<Self> {
        match NonZeroU64::new(value) {
            Some(value) => Some(Self(value)),
            None => None,
        }
    }

    #[must_use]
    pub const fn get(self) -> u64 {
        self.0.get()
    }
}

impl From<PositiveU64> for u64 {
    fn from(value: PositiveU64) -> Self {
        value.get()
    }
}
