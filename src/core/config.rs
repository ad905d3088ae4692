// src/core/config.rs

use crate::core::error::ConfigError;
use crate::core::knowledge_base::{FindingCode, get_finding_detail};
use crate::core::models::{Finding, Severity};
use crate::logging::project_directory;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info};

const CONFIG_FILE: &str = "config.json";

/// One entry of the header policy table: the header to look for and the
/// finding to report when it is absent.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct HeaderRule {
    pub header: String,
    pub severity: Severity,
    pub title: String,
    pub description: String,
    pub recommendation: Option<String>,
}

impl HeaderRule {
    fn from_code(header: &str, code: FindingCode) -> Self {
        let detail = get_finding_detail(code);
        Self {
            header: header.to_string(),
            severity: detail.severity,
            title: detail.title.to_string(),
            description: detail.description.to_string(),
            recommendation: detail.recommendation.map(str::to_string),
        }
    }

    pub fn missing_finding(&self) -> Finding {
        Finding {
            severity: self.severity,
            title: self.title.clone(),
            description: self.description.clone(),
            recommendation: self.recommendation.clone(),
        }
    }
}

/// The default five-entry policy table. Evaluation and output follow this order.
pub fn default_header_policy() -> Vec<HeaderRule> {
    vec![
        HeaderRule::from_code("Strict-Transport-Security", FindingCode::HeadersHstsMissing),
        HeaderRule::from_code("X-Content-Type-Options", FindingCode::HeadersXContentTypeOptionsMissing),
        HeaderRule::from_code("X-Frame-Options", FindingCode::HeadersXFrameOptionsMissing),
        HeaderRule::from_code("Content-Security-Policy", FindingCode::HeadersCspMissing),
        HeaderRule::from_code("X-XSS-Protection", FindingCode::HeadersXXssProtectionMissing),
    ]
}

/// Settings for a single scan. Built explicitly and handed to the
/// orchestrator; two scans may run concurrently with different configs.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ScanConfig {
    /// Per network operation, in seconds.
    pub timeout_secs: u64,
    pub max_redirects: usize,
    pub user_agent: String,
    /// Certificates expiring in fewer days than this are flagged.
    pub expiry_warning_days: i64,
    pub deprecated_protocols: Vec<String>,
    pub header_policy: Vec<HeaderRule>,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 10,
            max_redirects: 10,
            user_agent: format!("SecureCheck/{}", env!("CARGO_PKG_VERSION")),
            expiry_warning_days: 30,
            deprecated_protocols: ["TLSv1", "TLSv1.1", "SSLv2", "SSLv3"]
                .into_iter()
                .map(String::from)
                .collect(),
            header_policy: default_header_policy(),
        }
    }
}

impl ScanConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn is_deprecated_protocol(&self, version: &str) -> bool {
        self.deprecated_protocols.iter().any(|p| p == version)
    }

    /// Reads a JSON config file. Missing fields take their default values.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        debug!(path = %path.display(), "Reading scan config.");
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Loads `config.json` from the platform config directory, or the
    /// defaults when no such file exists.
    pub fn load() -> Result<Self, ConfigError> {
        match default_config_path() {
            Some(path) if path.exists() => {
                info!(path = %path.display(), "Loading scan config from config directory.");
                Self::from_file(&path)
            }
            _ => {
                debug!("No config file found, using defaults.");
                Ok(Self::default())
            }
        }
    }
}

fn default_config_path() -> Option<PathBuf> {
    project_directory().map(|dirs| dirs.config_dir().join(CONFIG_FILE))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_policy_matches_table_order_and_severities() {
        let policy = default_header_policy();
        let headers: Vec<&str> = policy.iter().map(|r| r.header.as_str()).collect();
        assert_eq!(
            headers,
            [
                "Strict-Transport-Security",
                "X-Content-Type-Options",
                "X-Frame-Options",
                "Content-Security-Policy",
                "X-XSS-Protection",
            ]
        );
        let severities: Vec<Severity> = policy.iter().map(|r| r.severity).collect();
        assert_eq!(
            severities,
            [Severity::Medium, Severity::Low, Severity::Medium, Severity::Medium, Severity::Low]
        );
    }

    #[test]
    fn partial_file_keeps_defaults() {
        let path = std::env::temp_dir().join(format!("securecheck-config-{}.json", std::process::id()));
        std::fs::write(&path, r#"{ "timeout_secs": 3, "expiry_warning_days": 14 }"#).unwrap();

        let config = ScanConfig::from_file(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(config.timeout(), Duration::from_secs(3));
        assert_eq!(config.expiry_warning_days, 14);
        assert_eq!(config.max_redirects, 10);
        assert_eq!(config.header_policy.len(), 5);
    }

    #[test]
    fn custom_policy_replaces_default_table() {
        let json = r#"{ "header_policy": [
            { "header": "Permissions-Policy", "severity": "low",
              "title": "Missing Permissions-Policy header",
              "description": "Controls browser features.", "recommendation": null }
        ] }"#;
        let config: ScanConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.header_policy.len(), 1);
        assert_eq!(config.header_policy[0].severity, Severity::Low);
    }

    #[test]
    fn unreadable_file_is_an_io_error() {
        let err = ScanConfig::from_file(Path::new("/definitely/not/here.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn config_path_lives_in_the_shared_project_directory() {
        if let (Some(path), Some(dirs)) = (default_config_path(), project_directory()) {
            assert!(path.starts_with(dirs.config_dir()));
            assert!(path.ends_with(CONFIG_FILE));
        }
    }

    #[test]
    fn deprecated_protocol_lookup() {
        let config = ScanConfig::default();
        assert!(config.is_deprecated_protocol("TLSv1.1"));
        assert!(config.is_deprecated_protocol("SSLv3"));
        assert!(!config.is_deprecated_protocol("TLSv1.2"));
        assert!(!config.is_deprecated_protocol("TLSv1.3"));
    }
}
