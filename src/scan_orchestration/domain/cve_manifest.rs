use super::VulnerabilityRecord;
use serde::{Deserialize, Serialize};

/// Result of matching an SBOM against a vulnerability database.
///
/// A cached manifest is only trusted when it was produced by the currently
/// running SBOM creator, scanner and database versions.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CveManifest {
    pub image_id: String,
    pub creator_version: String,
    pub scanner_version: String,
    pub database_version: String,
    #[serde(default)]
    pub content: Option<Vec<VulnerabilityRecord>>,
}

impl CveManifest {
    pub fn new(
        image_id: impl Into<String>,
        creator_version: impl Into<String>,
        scanner_version: impl Into<String>,
        database_version: impl Into<String>,
        vulnerabilities: Vec<VulnerabilityRecord>,
    ) -> Self {
        Self {
            image_id: image_id.into(),
            creator_version: creator_version.into(),
            scanner_version: scanner_version.into(),
            database_version: database_version.into(),
            content: Some(vulnerabilities),
        }
    }

    pub fn is_present(&self) -> bool {
        self.content.is_some()
    }

    pub fn matches_versions(
        &self,
        creator_version: &str,
        scanner_version: &str,
        database_version: &str,
    ) -> bool {
        self.creator_version == creator_version
            && self.scanner_version == scanner_version
            && self.database_version == database_version
    }

    /// Findings of the manifest, empty when absent
    pub fn vulnerabilities(&self) -> &[VulnerabilityRecord] {
        self.content.as_deref().unwrap_or_default()
    }
}
