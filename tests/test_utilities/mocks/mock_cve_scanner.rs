use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use vuln_relay::prelude::*;

use super::mock_sbom_creator::CREATOR_VERSION;

pub const SCANNER_VERSION: &str = "grype-0.74.0";
pub const DATABASE_VERSION: &str = "db-2024-01-15";

/// Mock CveScanner returning a fixed finding list
///
/// Records the image id of every scanned SBOM and the number of exceptions
/// passed along with it. Scanning a workload SBOM only yields the findings
/// named in `relevant_findings`; merging marks the findings that also occur in the
/// relevant manifest as relevant.
#[derive(Default, Clone)]
pub struct MockCveScanner {
    pub findings: Vec<VulnerabilityRecord>,
    pub relevant_findings: Vec<String>,
    pub scans: Arc<Mutex<Vec<(String, usize)>>>,
    pub merges: Arc<Mutex<usize>>,
}

impl MockCveScanner {
    pub fn new(findings: Vec<VulnerabilityRecord>) -> Self {
        Self {
            findings,
            ..Self::default()
        }
    }

    /// Names of the findings present in the workload-specific SBOM scan
    pub fn with_relevant_findings(mut self, names: &[&str]) -> Self {
        self.relevant_findings = names.iter().map(|name| name.to_string()).collect();
        self
    }

    pub fn scan_count(&self) -> usize {
        self.scans.lock().unwrap().len()
    }

    pub fn scanned(&self) -> Vec<(String, usize)> {
        self.scans.lock().unwrap().clone()
    }

    pub fn merge_count(&self) -> usize {
        *self.merges.lock().unwrap()
    }
}

#[async_trait]
impl CveScanner for MockCveScanner {
    async fn scan_sbom(
        &self,
        _context: &ScanContext,
        sbom: &Sbom,
        exceptions: &[VulnerabilityException],
    ) -> Result<CveManifest> {
        self.scans
            .lock()
            .unwrap()
            .push((sbom.image_id.clone(), exceptions.len()));

        // workload SBOMs are keyed by instance id
        let findings = if sbom.image_id.starts_with("wlid://") {
            self.findings
                .iter()
                .filter(|finding| self.relevant_findings.contains(&finding.name))
                .cloned()
                .collect()
        } else {
            self.findings.clone()
        };
        Ok(CveManifest::new(
            sbom.image_id.clone(),
            CREATOR_VERSION,
            SCANNER_VERSION,
            DATABASE_VERSION,
            findings,
        ))
    }

    async fn create_relevant_cve(
        &self,
        _context: &ScanContext,
        mut base: CveManifest,
        relevant: CveManifest,
    ) -> Result<CveManifest> {
        *self.merges.lock().unwrap() += 1;
        let relevant_names: Vec<&str> = relevant
            .vulnerabilities()
            .iter()
            .map(|finding| finding.name.as_str())
            .collect();
        if let Some(findings) = base.content.as_mut() {
            for finding in findings.iter_mut() {
                finding.is_relevant = Some(relevant_names.contains(&finding.name.as_str()));
            }
        }
        Ok(base)
    }

    fn version(&self) -> String {
        SCANNER_VERSION.to_string()
    }

    fn database_version(&self) -> String {
        DATABASE_VERSION.to_string()
    }

    async fn ready(&self) -> bool {
        true
    }
}
