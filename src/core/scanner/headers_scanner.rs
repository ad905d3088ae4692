// src/core/scanner/headers_scanner.rs

use tracing::{debug, error, info, warn};
use crate::core::config::{HeaderRule, ScanConfig};
use crate::core::knowledge_base::{FindingCode, finding};
use crate::core::models::{Finding, ProbeResult, Target};
use reqwest::header::{HeaderMap, HeaderName, SERVER, SET_COOKIE};
use reqwest::redirect::Policy;

/// Joins every value of a repeated header into one string, comma separated.
/// Non-UTF-8 bytes are replaced rather than dropped. `None` when absent.
fn joined_header(headers: &HeaderMap, name: HeaderName) -> Option<String> {
    if !headers.contains_key(&name) {
        return None;
    }
    let joined = headers
        .get_all(&name)
        .iter()
        .map(|value| String::from_utf8_lossy(value.as_bytes()).into_owned())
        .collect::<Vec<_>>()
        .join(", ");
    Some(joined)
}

/// Runs the header probe: one GET request, then the policy table, the
/// `Server` disclosure check and the cookie flag checks.
///
/// Never fails. Connection problems become a single `high` finding and any
/// other error a single `medium` one.
pub async fn run_headers_scan(target: &Target, config: &ScanConfig) -> ProbeResult {
    info!(url = %target.url, "Starting headers scan.");

    let client = match reqwest::Client::builder()
        .user_agent(config.user_agent.as_str())
        .timeout(config.timeout())
        .redirect(Policy::limited(config.max_redirects))
        .build()
    {
        Ok(c) => c,
        Err(e) => {
            error!(error = %e, "Failed to build HTTP client for headers scan.");
            return vec![probe_error(&e.to_string())];
        }
    };

    match client.get(&target.url).send().await {
        Ok(response) => {
            info!(status = %response.status(), final_url = %response.url(), "Received HTTP response for headers scan.");
            let findings = analyze_headers(response.headers(), &config.header_policy);
            info!(findings = %findings.len(), "Headers scan finished.");
            findings
        }
        Err(e) if e.is_builder() => {
            error!(url = %target.url, error = %e, "Could not build request for headers scan.");
            vec![probe_error(&e.to_string())]
        }
        Err(e) => {
            warn!(url = %target.url, error = %e, "HTTP request failed for headers scan.");
            vec![finding(FindingCode::HeadersRequestFailed).with_description(format!(
                "Failed to connect to {}: {}",
                target.url, e
            ))]
        }
    }
}

fn probe_error(message: &str) -> Finding {
    finding(FindingCode::HeadersProbeError)
        .with_description(format!("An error occurred: {}", message))
}

/// Evaluates response headers against the policy table and the fixed
/// disclosure and cookie checks. Output order: policy table order, then
/// `Server`, then `Secure`, then `HttpOnly`.
pub fn analyze_headers(headers: &HeaderMap, policy: &[HeaderRule]) -> Vec<Finding> {
    debug!("Analyzing collected header data.");
    let mut analyses = Vec::new();

    for rule in policy {
        if headers.contains_key(rule.header.as_str()) {
            debug!(header_name = %rule.header, "Header present.");
            analyses.push(Finding::info(
                format!("{} header present", rule.header),
                format!("The {} security header is configured.", rule.header),
            ));
        } else {
            debug!(header_name = %rule.header, severity = %rule.severity, "Header missing.");
            analyses.push(rule.missing_finding());
        }
    }

    if let Some(server) = joined_header(headers, SERVER).filter(|s| !s.trim().is_empty()) {
        debug!(server = %server, "Server header discloses software, adding Low finding.");
        analyses.push(finding(FindingCode::HeadersServerDisclosure).with_description(format!(
            "The Server header reveals: {}. This can help attackers identify vulnerabilities.",
            server
        )));
    }

    if let Some(cookies) = joined_header(headers, SET_COOKIE).filter(|c| !c.is_empty()) {
        if !cookies.contains("Secure") {
            debug!("Cookie set without Secure flag, adding Medium finding.");
            analyses.push(finding(FindingCode::HeadersCookieNoSecure));
        }
        if !cookies.contains("HttpOnly") {
            debug!("Cookie set without HttpOnly flag, adding Medium finding.");
            analyses.push(finding(FindingCode::HeadersCookieNoHttpOnly));
        }
    }

    analyses
}
