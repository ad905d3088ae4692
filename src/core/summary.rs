// src/core/summary.rs

use crate::core::models::{Finding, Severity};
use serde::Serialize;
use strum::Display;

/// Overall risk bucket derived from the score.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
    Critical,
}

#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
pub struct SeverityBreakdown {
    pub critical: usize,
    pub high: usize,
    pub medium: usize,
    pub low: usize,
    pub info: usize,
}

/// A derived view over one scan's findings.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ScanSummary {
    pub total: usize,
    pub severity_breakdown: SeverityBreakdown,
    /// 0..=100, lower is worse.
    pub score: u8,
    pub risk_level: RiskLevel,
}

impl ScanSummary {
    pub fn from_findings(findings: &[Finding]) -> Self {
        let mut counts = SeverityBreakdown::default();
        for finding in findings {
            match finding.severity {
                Severity::Critical => counts.critical += 1,
                Severity::High => counts.high += 1,
                Severity::Medium => counts.medium += 1,
                Severity::Low => counts.low += 1,
                Severity::Info => counts.info += 1,
            }
        }

        let weight = counts.critical * 10 + counts.high * 5 + counts.medium * 2 + counts.low;
        let score = 100usize.saturating_sub(weight) as u8;

        Self {
            total: findings.len(),
            severity_breakdown: counts,
            score,
            risk_level: risk_level(score),
        }
    }
}

fn risk_level(score: u8) -> RiskLevel {
    match score {
        80..=u8::MAX => RiskLevel::Low,
        60..=79 => RiskLevel::Medium,
        40..=59 => RiskLevel::High,
        _ => RiskLevel::Critical,
    }
}
