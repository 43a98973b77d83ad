use thiserror::Error;

use super::{ConfigError, EncodeError, ExporterError};

#[derive(Debug, Error)]
pub enum AppError {
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
    #[error("JSON error: {source}")]
    Json {
        #[from]
        source: serde_json::Error,
    },
    #[error("TOML error: {source}")]
    Toml {
        #[from]
        source: toml::de::Error,
    },
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("Encoding error: {0}")]
    Encode(#[from] EncodeError),
    #[error("Exporter error: {0}")]
    Exporter(#[from] ExporterError),
}

pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    pub fn config<E>(error: E) -> Self
    where
        E: Into<ConfigError>,
    {
        error.into().into()
    }

    pub fn encode<E>(error: E) -> Self
    where
        E: Into<EncodeError>,
    {
        error.into().into()
    }

    pub fn exporter<E>(error: E) -> Self
    where
        E: Into<ExporterError>,
    {
        error.into().into()
    }
}
