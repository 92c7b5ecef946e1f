//! Error types for the Intrinsic framework.
//!
//! The valuation engine itself never fails: malformed numbers are normalized
//! to safe defaults. Errors only arise at the edges, when parameters,
//! controls or snapshots are parsed and validated.

use thiserror::Error;

/// The main error type for Intrinsic operations.
#[derive(Debug, Error)]
pub enum IntrinsicError {
    /// A valuation parameter is out of range or inconsistent.
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// A control value (discount rate, growth discount) is unusable.
    #[error("Invalid control: {0}")]
    InvalidControl(String),

    /// The valuation mode string did not match a known mode.
    #[error("Unknown valuation mode: {0}")]
    UnknownMode(String),

    /// The sort key string did not match a known key.
    #[error("Unknown sort key: {0}")]
    UnknownSortKey(String),

    /// A ticker was requested that is not present in the snapshot.
    #[error("Ticker not found: {0}")]
    TickerNotFound(String),

    /// A snapshot could not be read or parsed.
    #[error("Snapshot error: {0}")]
    Snapshot(String),

    /// Error parsing a TOML parameter file.
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// I/O failure while reading inputs.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// A specialized Result type for Intrinsic operations.
///
/// This is a convenience type that uses [`IntrinsicError`] as the error type.
pub type Result<T> = std::result::Result<T, IntrinsicError>;
