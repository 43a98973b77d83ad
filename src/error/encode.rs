use thiserror::Error;

#[derive(Debug, Error)]
pub enum EncodeError {
    #[error("Failed to append line: {source}")]
    WriteLine {
        #[source]
        source: std::fmt::Error,
    },
    #[error("Refusing to encode non-finite value {value} for '{key}'.")]
    NonFiniteValue { key: String, value: f64 },
}
