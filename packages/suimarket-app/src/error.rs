//! Error types for the marketplace front-end.

use std::fmt;

/// Application error type. Every failure is terminal for the attempt that
/// produced it — nothing in this crate retries automatically.
#[derive(Debug, Clone)]
pub enum Error {
    /// Configuration error (missing or empty identifier).
    Config(String),
    /// Pre-flight rejection of user input; no network call was made.
    Validation(String),
    /// Gateway read failed at the transport or JSON-RPC level.
    Gateway(String),
    /// Gateway responded, but the payload did not match the expected shape.
    Decode(String),
    /// The wallet reported that the signed call failed or was rejected.
    /// Carries the wallet's message verbatim.
    Execution(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Config(msg) => write!(f, "config error: {msg}"),
            Error::Validation(msg) => write!(f, "{msg}"),
            Error::Gateway(msg) => write!(f, "gateway error: {msg}"),
            Error::Decode(msg) => write!(f, "decode error: {msg}"),
            Error::Execution(msg) => write!(f, "execution failed: {msg}"),
        }
    }
}

impl std::error::Error for Error {}

impl From<suimarket_types::AmountError> for Error {
    fn from(e: suimarket_types::AmountError) -> Self {
        Error::Validation(e.to_string())
    }
}
