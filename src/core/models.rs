// src/core/models.rs

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

// --- Core Data Models ---

/// The severity level of a finding, ordered from most to least severe.
///
/// Serialized in lowercase (`"critical"`, `"high"`, ...) to match the
/// external interface consumed by the persistence layer.
#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash, Display,
    EnumString, EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Severity {
    Critical,
    High,
    Medium,
    Low,
    Info,
}

/// A single reported observation produced by a probe.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Finding {
    pub severity: Severity,
    pub title: String,
    pub description: String,
    pub recommendation: Option<String>,
}

impl Finding {
    pub fn new(
        severity: Severity,
        title: impl Into<String>,
        description: impl Into<String>,
        recommendation: Option<&str>,
    ) -> Self {
        Self {
            severity,
            title: title.into(),
            description: description.into(),
            recommendation: recommendation.map(str::to_string),
        }
    }

    /// An informational finding carries no remediation text.
    pub fn info(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self::new(Severity::Info, title, description, None)
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}

/// The ordered findings of one probe invocation. Order is insertion order.
pub type ProbeResult = Vec<Finding>;

// --- Target Models ---

/// The transport scheme of a resolved target.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Scheme {
    Http,
    Https,
}

impl Scheme {
    pub fn default_port(self) -> u16 {
        match self {
            Scheme::Http => 80,
            Scheme::Https => 443,
        }
    }
}

/// A normalized, immutable representation of the URL under test.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Target {
    pub scheme: Scheme,
    pub host: String,
    pub port: u16,
    pub path: String,
    /// The normalized URL the header probe requests.
    pub url: String,
}

impl Target {
    pub fn is_https(&self) -> bool {
        self.scheme == Scheme::Https
    }
}

// --- Scan Profile Models ---

/// A single check category.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Display)]
#[strum(serialize_all = "lowercase")]
pub enum ProbeKind {
    Scheme,
    Headers,
    Tls,
}

/// A named subset of probes to execute.
#[derive(
    Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash, Display, EnumString,
    EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ScanProfile {
    #[default]
    Basic,
    Headers,
    Ssl,
    Full,
}

impl ScanProfile {
    /// The fixed profile-to-probe table. Probes run in the order listed.
    pub fn probes(self) -> &'static [ProbeKind] {
        match self {
            ScanProfile::Basic => &[ProbeKind::Scheme],
            ScanProfile::Headers => &[ProbeKind::Headers],
            ScanProfile::Ssl => &[ProbeKind::Tls],
            ScanProfile::Full => &[ProbeKind::Scheme, ProbeKind::Headers, ProbeKind::Tls],
        }
    }
}
