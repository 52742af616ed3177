use serde::{Deserialize, Serialize};
use std::fmt;

/// Normalized vulnerability severity.
///
/// Ordered from most to least severe so that severity-keyed collections
/// iterate in a stable, meaningful order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Severity {
    Critical,
    High,
    Medium,
    Low,
    Negligible,
    Unknown,
}

impl Severity {
    /// Maps a raw severity string onto a known severity.
    ///
    /// Matching is case-insensitive. Anything unrecognized, including the
    /// empty string, becomes [`Severity::Unknown`].
    pub fn normalize(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "critical" => Severity::Critical,
            "high" => Severity::High,
            "medium" => Severity::Medium,
            "low" => Severity::Low,
            "negligible" => Severity::Negligible,
            _ => Severity::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Critical => "Critical",
            Severity::High => "High",
            Severity::Medium => "Medium",
            Severity::Low => "Low",
            Severity::Negligible => "Negligible",
            Severity::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Action a tenant-configured exception applies to a finding
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ExceptionAction {
    Ignore,
    AlertOnly,
    #[serde(other)]
    Other,
}

/// A tenant-configured exception policy
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VulnerabilityException {
    #[serde(default)]
    pub policy_name: String,
    #[serde(default)]
    pub actions: Vec<ExceptionAction>,
    /// Vulnerability names (e.g. CVE ids) the policy targets
    #[serde(default)]
    pub vulnerabilities: Vec<String>,
}

impl VulnerabilityException {
    pub fn new(policy_name: impl Into<String>, actions: Vec<ExceptionAction>) -> Self {
        Self {
            policy_name: policy_name.into(),
            actions,
            vulnerabilities: Vec::new(),
        }
    }
}

/// Version in which a vulnerability is fixed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FixInfo {
    pub version: String,
}

/// A single vulnerability finding as produced by the CVE scanner
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VulnerabilityRecord {
    pub name: String,
    #[serde(default)]
    pub package_name: String,
    #[serde(default)]
    pub package_version: String,
    /// Severity as reported by the scanner; see [`VulnerabilityRecord::severity`]
    #[serde(rename = "severity", default)]
    pub raw_severity: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub link: String,
    #[serde(default)]
    pub fixes: Vec<FixInfo>,
    #[serde(default)]
    pub is_rce: bool,
    /// `None` when no relevancy data was available for the image
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_relevant: Option<bool>,
    #[serde(default)]
    pub exceptions_applied: Vec<VulnerabilityException>,
}

impl VulnerabilityRecord {
    pub fn new(name: impl Into<String>, severity: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            raw_severity: severity.into(),
            ..Self::default()
        }
    }

    pub fn severity(&self) -> Severity {
        Severity::normalize(&self.raw_severity)
    }

    /// True iff the first applied exception's first action is `ignore`
    pub fn is_ignored(&self) -> bool {
        self.exceptions_applied
            .first()
            .and_then(|exception| exception.actions.first())
            .is_some_and(|action| *action == ExceptionAction::Ignore)
    }

    pub fn fix_count(&self) -> usize {
        self.fixes
            .iter()
            .filter(|fix| !fix.version.is_empty() && fix.version != "None")
            .count()
    }

    pub fn has_fix(&self) -> bool {
        self.fix_count() > 0
    }

    /// True only when relevancy was explicitly established
    pub fn is_relevant(&self) -> bool {
        self.is_relevant == Some(true)
    }

    pub fn to_short(&self) -> ShortVulnerability {
        ShortVulnerability {
            name: self.name.clone(),
        }
    }
}

/// Reduced form of a finding carried in the scan summary
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShortVulnerability {
    pub name: String,
}
