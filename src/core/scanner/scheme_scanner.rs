// src/core/scanner/scheme_scanner.rs

use tracing::debug;

use crate::core::knowledge_base::{FindingCode, finding};
use crate::core::models::{ProbeResult, Target};

/// Checks whether the target uses encrypted transport. No I/O; always
/// returns exactly one finding.
pub fn run_scheme_scan(target: &Target) -> ProbeResult {
    if target.is_https() {
        debug!(host = %target.host, "Target uses HTTPS.");
        vec![finding(FindingCode::SchemeHttpsEnabled)]
    } else {
        debug!(host = %target.host, "Target does not use HTTPS, adding High finding.");
        vec![
            finding(FindingCode::SchemeHttpsMissing).with_description(format!(
                "The site {} is not using HTTPS protocol. All data transmitted is unencrypted and vulnerable to interception.",
                target.url
            )),
        ]
    }
}
