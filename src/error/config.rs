use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config '{path}': {source}")]
    ReadConfig {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse TOML config '{path}': {source}")]
    ParseToml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("Failed to parse JSON config '{path}': {source}")]
    ParseJson {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("Unsupported config extension '{ext}'. Use .toml or .json.")]
    UnsupportedExtension { ext: String },
    #[error("Config file must have .toml or .json extension.")]
    MissingExtension,
    #[error("Config 'flush_interval_ms' must be >= 1.")]
    FlushIntervalZero,
    #[error("Config 'send_timeout_ms' must be >= 1.")]
    SendTimeoutZero,
    #[error("Percentile threshold {value} is out of range. Use values in (0, 100].")]
    ThresholdOutOfRange { value: f64 },
    #[error("Percentile threshold must be a finite number.")]
    ThresholdNotFinite,
    #[error("Config must list at least one percentile threshold.")]
    ThresholdsEmpty,
}
