// src/core/scanner/mod.rs

pub mod headers_scanner;
pub mod scheme_scanner;
pub mod ssl_scanner;

use tracing::{info, warn};

use crate::core::config::ScanConfig;
use crate::core::error::InvalidTargetError;
use crate::core::models::{Finding, ProbeKind, ScanProfile, Target};
use crate::core::target::resolve;
use self::headers_scanner::run_headers_scan;
use self::scheme_scanner::run_scheme_scan;
use self::ssl_scanner::run_ssl_scan;

/// Resolves `raw` and runs the probes selected by `profile`.
///
/// Fails only when the target cannot be resolved, before any network
/// activity. Otherwise always returns the findings of every selected probe.
pub async fn perform_scan(
    raw: &str,
    profile: ScanProfile,
    config: &ScanConfig,
) -> Result<Vec<Finding>, InvalidTargetError> {
    let target = resolve(raw)?;
    Ok(scan_target(&target, profile, config).await)
}

/// Runs the probes for `profile` one after another, in table order, and
/// concatenates their findings. Each probe's own order is kept.
pub async fn scan_target(target: &Target, profile: ScanProfile, config: &ScanConfig) -> Vec<Finding> {
    info!(url = %target.url, %profile, "Starting scan.");
    let mut findings = Vec::new();
    for probe in profile.probes() {
        let result = run_probe(*probe, target, config).await;
        info!(%probe, findings = result.len(), "Probe finished.");
        findings.extend(result);
    }
    info!(findings = findings.len(), "Scan finished.");
    findings
}

async fn run_probe(probe: ProbeKind, target: &Target, config: &ScanConfig) -> Vec<Finding> {
    match probe {
        ProbeKind::Scheme => run_scheme_scan(target),
        ProbeKind::Headers => run_headers_scan(target, config).await,
        ProbeKind::Tls => run_ssl_scan(target, config).await,
    }
}

/// Lifecycle of one scan run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanState {
    NotStarted,
    Running,
    Completed(Vec<Finding>),
    Failed(InvalidTargetError),
}

/// A single scan request and where it is in its lifecycle.
#[derive(Debug)]
pub struct ScanRun {
    raw_target: String,
    profile: ScanProfile,
    state: ScanState,
}

impl ScanRun {
    pub fn new(raw_target: impl Into<String>, profile: ScanProfile) -> Self {
        Self {
            raw_target: raw_target.into(),
            profile,
            state: ScanState::NotStarted,
        }
    }

    pub fn state(&self) -> &ScanState {
        &self.state
    }

    pub fn profile(&self) -> ScanProfile {
        self.profile
    }

    /// Runs the scan once and returns the final state. Calling it again on a
    /// finished run returns the recorded outcome without scanning.
    pub async fn execute(&mut self, config: &ScanConfig) -> &ScanState {
        if !matches!(self.state, ScanState::NotStarted) {
            return &self.state;
        }

        let target = match resolve(&self.raw_target) {
            Ok(target) => target,
            Err(e) => {
                warn!(error = %e, "Scan failed: target could not be resolved.");
                self.state = ScanState::Failed(e);
                return &self.state;
            }
        };

        self.state = ScanState::Running;
        let findings = scan_target(&target, self.profile, config).await;
        self.state = ScanState::Completed(findings);
        &self.state
    }
}
