// src/core/error.rs

use std::path::PathBuf;
use thiserror::Error;

/// The only error that aborts a scan: the raw target could not be turned into
/// a `Target`. Every other failure is reported as a finding.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid target '{raw}': {reason}")]
pub struct InvalidTargetError {
    pub raw: String,
    pub reason: String,
}

impl InvalidTargetError {
    pub fn new(raw: &str, reason: impl Into<String>) -> Self {
        Self {
            raw: raw.to_string(),
            reason: reason.into(),
        }
    }
}

/// Errors raised while loading a `ScanConfig` from disk.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("could not read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("could not parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Failure classes of the TLS probe. Each maps to exactly one finding.
#[derive(Error, Debug)]
pub enum TlsProbeError {
    /// The host name could not be resolved to an address.
    #[error("could not resolve hostname {host}: {reason}")]
    Resolve { host: String, reason: String },

    /// The TLS layer rejected the handshake (untrusted chain, name mismatch, protocol alert...).
    #[error("SSL/TLS error: {0}")]
    Handshake(String),

    /// Anything else: refused connections, timeouts, unreadable certificates.
    #[error("{0}")]
    Other(String),
}
