// src/core/target.rs

use crate::core::error::InvalidTargetError;
use crate::core::models::{Scheme, Target};
use tracing::debug;
use url::Url;

/// Adds `https://` unless the input already names `http://` or `https://`.
fn normalize(raw: &str) -> String {
    let lower = raw.to_ascii_lowercase();
    if lower.starts_with("http://") || lower.starts_with("https://") {
        raw.to_string()
    } else {
        format!("https://{}", raw)
    }
}

/// Returns the scheme of inputs like `ftp://host`, which would otherwise be
/// prefixed with `https://` and parsed with the scheme as host.
fn foreign_scheme(raw: &str) -> Option<&str> {
    let (scheme, _) = raw.split_once("://")?;
    let looks_like_scheme = !scheme.is_empty()
        && scheme.chars().all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'));
    let is_http = scheme.eq_ignore_ascii_case("http") || scheme.eq_ignore_ascii_case("https");
    (looks_like_scheme && !is_http).then_some(scheme)
}

/// Parses a raw URL-like string into a `Target`.
///
/// Missing schemes default to `https`; missing ports default to the scheme's
/// well-known port. Fails when no host can be extracted.
pub fn resolve(raw: &str) -> Result<Target, InvalidTargetError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(InvalidTargetError::new(raw, "target is empty"));
    }

    if let Some(scheme) = foreign_scheme(trimmed) {
        return Err(InvalidTargetError::new(raw, format!("unsupported scheme '{}'", scheme)));
    }

    let normalized = normalize(trimmed);
    let url = Url::parse(&normalized).map_err(|e| InvalidTargetError::new(raw, e.to_string()))?;

    let scheme = match url.scheme() {
        "https" => Scheme::Https,
        "http" => Scheme::Http,
        other => {
            return Err(InvalidTargetError::new(raw, format!("unsupported scheme '{}'", other)));
        }
    };

    let host = match url.host_str() {
        Some(h) if !h.is_empty() => h.trim_start_matches('[').trim_end_matches(']').to_string(),
        _ => return Err(InvalidTargetError::new(raw, "no host in target")),
    };

    let port = url.port().unwrap_or_else(|| scheme.default_port());
    if port == 0 {
        return Err(InvalidTargetError::new(raw, "port must be in 1..=65535"));
    }

    let target = Target {
        scheme,
        host,
        port,
        path: url.path().to_string(),
        url: url.to_string(),
    };
    debug!(raw, url = %target.url, "Resolved target.");
    Ok(target)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_host_defaults_to_https() {
        let target = resolve("example.com").unwrap();
        assert_eq!(target.scheme, Scheme::Https);
        assert_eq!(target.host, "example.com");
        assert_eq!(target.port, 443);
        assert_eq!(target.path, "/");
    }

    #[test]
    fn explicit_http_keeps_scheme_and_port() {
        let target = resolve("http://insecure.test").unwrap();
        assert_eq!(target.scheme, Scheme::Http);
        assert_eq!(target.port, 80);
    }

    #[test]
    fn explicit_port_and_path_are_kept() {
        let target = resolve("  https://example.com:8443/login?next=1  ").unwrap();
        assert_eq!(target.port, 8443);
        assert_eq!(target.path, "/login");
        assert_eq!(target.url, "https://example.com:8443/login?next=1");
    }

    #[test]
    fn resolving_is_idempotent() {
        for raw in ["example.com", "http://insecure.test/a", "https://Example.COM:8443"] {
            let once = resolve(raw).unwrap();
            let twice = resolve(&once.url).unwrap();
            assert_eq!(once, twice);
        }
    }

    #[test]
    fn ipv6_host_is_unbracketed() {
        let target = resolve("https://[::1]:8443").unwrap();
        assert_eq!(target.host, "::1");
        assert_eq!(target.port, 8443);
    }

    #[test]
    fn empty_and_whitespace_are_rejected() {
        for raw in ["", "   ", "\t\n"] {
            let err = resolve(raw).unwrap_err();
            assert_eq!(err.raw, raw);
        }
    }

    #[test]
    fn unparseable_input_is_rejected() {
        assert!(resolve("https://").is_err());
        assert!(resolve("http://exa mple.com").is_err());
        assert!(resolve("https://example.com:0").is_err());
    }

    #[test]
    fn foreign_scheme_is_rejected() {
        let err = resolve("ftp://files.example.com").unwrap_err();
        assert!(err.reason.contains("unsupported scheme"));
    }
}
