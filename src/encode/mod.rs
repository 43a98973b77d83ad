//! Graphite plaintext line-protocol rendering.
//!
//! One metric per line: `<dotted.key> <value> <unix_ts>\n`. Values are
//! rendered with Rust's shortest-roundtrip float formatting, so integral
//! values print without a decimal point.
use std::fmt::Write as _;

use crate::error::{AppError, AppResult, EncodeError};


/// Renders a batch of summarized values into the wire text, one line per
/// entry, preserving the given order.
///
/// # Errors
///
/// Returns an error when a value is non-finite or a line fails to append.
pub fn encode_lines(values: &[(String, f64)], ts: u64) -> AppResult<String> {
    let mut output = String::new();
    for (key, value) in values {
        write_stat_line(&mut output, key, *value, ts)?;
    }
    Ok(output)
}

/// Appends one `<key> <value> <ts>` line to the payload under construction.
///
/// Non-finite values are rejected here so that NaN or infinity can never
/// reach the wire, whatever the upstream computation did.
///
/// # Errors
///
/// Returns an error when the value is non-finite or the append fails.
pub fn write_stat_line(output: &mut String, key: &str, value: f64, ts: u64) -> AppResult<()> {
    if !value.is_finite() {
        return Err(AppError::encode(EncodeError::NonFiniteValue {
            key: key.to_owned(),
            value,
        }));
    }
    writeln!(output, "{} {} {}", key, value, ts)
        .map_err(|err| AppError::encode(EncodeError::WriteLine { source: err }))
}
