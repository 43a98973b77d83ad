use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExporterError {
    #[error("Connection error to {addr}: {source}")]
    Connection {
        addr: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Write error to {addr}: {source}")]
    Write {
        addr: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Send to {addr} timed out after {after_ms}ms.")]
    Timeout { addr: String, after_ms: u64 },
}
