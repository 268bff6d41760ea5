//! Opaque on-chain identifiers.
//!
//! Object ids and addresses are treated as opaque hex strings: the gateway
//! hands them out and the contract takes them back unmodified. The only
//! operations this side of the wire needs are equality (case-insensitive for
//! addresses) and shortened display.

use serde::{Deserialize, Serialize};

/// Identifier of an on-chain object (NFT, listing, marketplace singleton).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ObjectId(String);

impl ObjectId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Shortened `0x1234..cdef` form for logs and labels.
    pub fn short(&self) -> String {
        shorten(&self.0, 8, 6)
    }
}

impl std::fmt::Display for ObjectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ObjectId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Account address. Hex casing differs between wallets and indexers, so
/// identity checks must go through [`SuiAddress::matches`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SuiAddress(String);

impl SuiAddress {
    pub fn new(addr: impl Into<String>) -> Self {
        Self(addr.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Case-insensitive identity check.
    pub fn matches(&self, other: &SuiAddress) -> bool {
        self.0.eq_ignore_ascii_case(&other.0)
    }

    /// Shortened `0x1234..cdef` form for logs and labels.
    pub fn short(&self) -> String {
        shorten(&self.0, 10, 8)
    }
}

impl std::fmt::Display for SuiAddress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SuiAddress {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

fn shorten(s: &str, head: usize, tail: usize) -> String {
    if s.len() <= head + tail + 2 {
        s.to_string()
    } else {
        format!("{}..{}", &s[..head], &s[s.len() - tail..])
    }
}
