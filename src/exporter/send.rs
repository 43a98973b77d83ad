use std::time::Duration;

use tokio::io::AsyncWriteExt;
use tokio::net::TcpStream;

use crate::config::PositiveU64;
use crate::error::{AppError, AppResult, ExporterError};

/// Opens one connection, writes the full payload, and shuts the stream down.
/// The whole sequence is bounded by `timeout_ms`; the connection is closed on
/// every exit path, success or not.
pub(super) async fn send_payload(
    addr: &str,
    payload: &[u8],
    timeout_ms: PositiveU64,
) -> AppResult<()> {
    let send = async {
        let mut stream = TcpStream::connect(addr).await.map_err(|err| {
            AppError::exporter(ExporterError::Connection {
                addr: addr.to_owned(),
                source: err,
            })
        })?;
        stream.write_all(payload).await.map_err(|err| {
            AppError::exporter(ExporterError::Write {
                addr: addr.to_owned(),
                source: err,
            })
        })?;
        stream.shutdown().await.map_err(|err| {
            AppError::exporter(ExporterError::Write {
                addr: addr.to_owned(),
                source: err,
            })
        })?;
        Ok(())
    };

    match tokio::time::timeout(Duration::from_millis(timeout_ms.get()), send).await {
        Ok(result) => result,
        Err(_elapsed) => Err(AppError::exporter(ExporterError::Timeout {
            addr: addr.to_owned(),
            after_ms: timeout_ms.get(),
        })),
    }
}
