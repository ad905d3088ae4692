// src/lib.rs

//! Probe engine that checks a web origin for transport, header and TLS
//! certificate misconfigurations and reports severity-scored findings.

pub mod core;
pub mod logging;

pub use crate::core::config::ScanConfig;
pub use crate::core::error::InvalidTargetError;
pub use crate::core::models::{Finding, ScanProfile, Severity, Target};
pub use crate::core::scanner::{perform_scan, scan_target};
