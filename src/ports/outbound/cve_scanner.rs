use crate::scan_orchestration::domain::{CveManifest, Sbom, ScanContext, VulnerabilityException};
use crate::shared::Result;
use async_trait::async_trait;

/// CveScanner port for matching SBOMs against a vulnerability database
#[async_trait]
pub trait CveScanner: Send + Sync {
    /// Scans an SBOM, applying the tenant's exceptions to the findings
    async fn scan_sbom(
        &self,
        context: &ScanContext,
        sbom: &Sbom,
        exceptions: &[VulnerabilityException],
    ) -> Result<CveManifest>;

    /// Merges a base manifest with the manifest of the workload-specific SBOM,
    /// flagging which findings are relevant at runtime
    async fn create_relevant_cve(
        &self,
        context: &ScanContext,
        base: CveManifest,
        relevant: CveManifest,
    ) -> Result<CveManifest>;

    fn version(&self) -> String;

    fn database_version(&self) -> String;

    /// Whether the scanner has a database loaded and can accept work
    async fn ready(&self) -> bool;
}
