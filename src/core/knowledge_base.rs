//! A static, read-only database of the findings the probes can report,
//! with the human-readable explanation and remediation text for each.
//! Probes look entries up by `FindingCode` and only add the dynamic parts
//! (header values, day counts, protocol names) themselves.

use crate::core::models::{Finding, Severity};
use strum::{Display, EnumIter};

/// Machine-readable identifier for every static finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumIter)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum FindingCode {
    SchemeHttpsMissing,
    SchemeHttpsEnabled,
    HeadersHstsMissing,
    HeadersXContentTypeOptionsMissing,
    HeadersXFrameOptionsMissing,
    HeadersCspMissing,
    HeadersXXssProtectionMissing,
    HeadersServerDisclosure,
    HeadersCookieNoSecure,
    HeadersCookieNoHttpOnly,
    HeadersRequestFailed,
    HeadersProbeError,
    SslExpired,
    SslExpiringSoon,
    SslValid,
    SslProtocolOutdated,
    SslHandshakeFailed,
    SslResolveFailed,
    SslProbeError,
}

/// The full text of a finding.
pub struct FindingDetail {
    pub code: FindingCode,
    pub title: &'static str,
    pub severity: Severity,
    /// Default description. Probes replace it when they have concrete context.
    pub description: &'static str,
    pub recommendation: Option<&'static str>,
}

impl FindingDetail {
    pub fn to_finding(&self) -> Finding {
        Finding::new(self.severity, self.title, self.description, self.recommendation)
    }
}

static FINDINGS: &[FindingDetail] = &[
    // --- Transport ---
    FindingDetail {
        code: FindingCode::SchemeHttpsMissing,
        title: "Site not using HTTPS",
        severity: Severity::High,
        description: "The site is not using HTTPS protocol. All data transmitted is unencrypted and vulnerable to interception.",
        recommendation: Some("Implement HTTPS using a valid SSL/TLS certificate. Consider using Let's Encrypt for free certificates."),
    },
    FindingDetail {
        code: FindingCode::SchemeHttpsEnabled,
        title: "HTTPS enabled",
        severity: Severity::Info,
        description: "The site is using HTTPS protocol.",
        recommendation: None,
    },

    // --- HTTP Headers ---
    FindingDetail {
        code: FindingCode::HeadersHstsMissing,
        title: "Missing HSTS header",
        severity: Severity::Medium,
        description: "The Strict-Transport-Security header is not set. This header forces browsers to use HTTPS.",
        recommendation: Some("Add the header: Strict-Transport-Security: max-age=31536000; includeSubDomains"),
    },
    FindingDetail {
        code: FindingCode::HeadersXContentTypeOptionsMissing,
        title: "Missing X-Content-Type-Options header",
        severity: Severity::Low,
        description: "This header prevents MIME-sniffing attacks.",
        recommendation: Some("Add the header: X-Content-Type-Options: nosniff"),
    },
    FindingDetail {
        code: FindingCode::HeadersXFrameOptionsMissing,
        title: "Missing X-Frame-Options header",
        severity: Severity::Medium,
        description: "This header prevents clickjacking attacks by controlling if the site can be framed.",
        recommendation: Some("Add the header: X-Frame-Options: DENY or SAMEORIGIN"),
    },
    FindingDetail {
        code: FindingCode::HeadersCspMissing,
        title: "Missing Content-Security-Policy header",
        severity: Severity::Medium,
        description: "CSP helps prevent XSS and other code injection attacks.",
        recommendation: Some("Implement a Content-Security-Policy appropriate for your site"),
    },
    FindingDetail {
        code: FindingCode::HeadersXXssProtectionMissing,
        title: "Missing X-XSS-Protection header",
        severity: Severity::Low,
        description: "This header enables the browser's XSS filter.",
        recommendation: Some("Add the header: X-XSS-Protection: 1; mode=block"),
    },
    FindingDetail {
        code: FindingCode::HeadersServerDisclosure,
        title: "Server information disclosure",
        severity: Severity::Low,
        description: "The Server header reveals software details. This can help attackers identify vulnerabilities.",
        recommendation: Some("Remove or minimize the Server header information."),
    },
    FindingDetail {
        code: FindingCode::HeadersCookieNoSecure,
        title: "Cookie without Secure flag",
        severity: Severity::Medium,
        description: "Cookies are set without the Secure flag, allowing transmission over HTTP.",
        recommendation: Some("Add the Secure flag to all cookies: Set-Cookie: name=value; Secure"),
    },
    FindingDetail {
        code: FindingCode::HeadersCookieNoHttpOnly,
        title: "Cookie without HttpOnly flag",
        severity: Severity::Medium,
        description: "Cookies are accessible via JavaScript, increasing XSS risk.",
        recommendation: Some("Add the HttpOnly flag: Set-Cookie: name=value; HttpOnly"),
    },
    FindingDetail {
        code: FindingCode::HeadersRequestFailed,
        title: "Unable to connect to target",
        severity: Severity::High,
        description: "Failed to connect to the target.",
        recommendation: Some("Verify the URL is correct and the server is accessible."),
    },
    FindingDetail {
        code: FindingCode::HeadersProbeError,
        title: "Error during header scan",
        severity: Severity::Medium,
        description: "An error occurred during the header scan.",
        recommendation: Some("Check the target URL and try again."),
    },

    // --- SSL/TLS ---
    FindingDetail {
        code: FindingCode::SslExpired,
        title: "SSL certificate expired",
        severity: Severity::Critical,
        description: "The SSL certificate has expired.",
        recommendation: Some("Renew the SSL certificate immediately."),
    },
    FindingDetail {
        code: FindingCode::SslExpiringSoon,
        title: "SSL certificate expiring soon",
        severity: Severity::Medium,
        description: "The SSL certificate will expire soon.",
        recommendation: Some("Renew the SSL certificate before it expires."),
    },
    FindingDetail {
        code: FindingCode::SslValid,
        title: "Valid SSL certificate",
        severity: Severity::Info,
        description: "The SSL certificate is valid.",
        recommendation: None,
    },
    FindingDetail {
        code: FindingCode::SslProtocolOutdated,
        title: "Outdated SSL/TLS protocol",
        severity: Severity::High,
        description: "The server negotiated a protocol version with known vulnerabilities.",
        recommendation: Some("Disable old protocols and use TLS 1.2 or higher."),
    },
    FindingDetail {
        code: FindingCode::SslHandshakeFailed,
        title: "SSL/TLS error",
        severity: Severity::Critical,
        description: "The TLS handshake with the server failed.",
        recommendation: Some("Check the SSL certificate configuration."),
    },
    FindingDetail {
        code: FindingCode::SslResolveFailed,
        title: "Unable to resolve hostname",
        severity: Severity::High,
        description: "Could not resolve the target hostname.",
        recommendation: Some("Verify the domain name is correct and DNS is configured."),
    },
    FindingDetail {
        code: FindingCode::SslProbeError,
        title: "Error during SSL scan",
        severity: Severity::Medium,
        description: "An error occurred during the SSL scan.",
        recommendation: Some("Check the target URL and try again."),
    },
];

/// Retrieves the detail for a finding code.
///
/// Every `FindingCode` variant has exactly one entry in the table; the
/// `every_code_has_a_detail` test guards that.
pub fn get_finding_detail(code: FindingCode) -> &'static FindingDetail {
    FINDINGS
        .iter()
        .find(|f| f.code == code)
        .unwrap_or(&FALLBACK)
}

/// Builds a finding straight from the knowledge base.
pub fn finding(code: FindingCode) -> Finding {
    get_finding_detail(code).to_finding()
}

static FALLBACK: FindingDetail = FindingDetail {
    code: FindingCode::HeadersProbeError,
    title: "Unknown finding",
    severity: Severity::Medium,
    description: "No knowledge base entry exists for this finding.",
    recommendation: None,
};

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn every_code_has_a_detail() {
        for code in FindingCode::iter() {
            let count = FINDINGS.iter().filter(|f| f.code == code).count();
            assert_eq!(count, 1, "{code} must appear exactly once");
        }
    }

    #[test]
    fn informational_entries_have_no_recommendation() {
        for detail in FINDINGS.iter().filter(|f| f.severity == Severity::Info) {
            assert!(detail.recommendation.is_none(), "{}", detail.code);
        }
    }

    #[test]
    fn codes_render_screaming_snake_case() {
        assert_eq!(FindingCode::SslExpiringSoon.to_string(), "SSL_EXPIRING_SOON");
        assert_eq!(FindingCode::HeadersCspMissing.to_string(), "HEADERS_CSP_MISSING");
    }
}
