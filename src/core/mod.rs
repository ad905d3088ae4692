// src/core/mod.rs

/// Shared data types: `Finding`, `Severity`, `Target`, `ScanProfile`.
pub mod models;

pub mod error;

/// Explicit per-scan settings, including the header policy table.
pub mod config;

/// Static finding texts and remediation advice, keyed by `FindingCode`.
pub mod knowledge_base;

/// Turns raw user input into a `Target`.
pub mod target;

/// The probes and the orchestrator that runs them per profile.
pub mod scanner;

pub mod summary;
