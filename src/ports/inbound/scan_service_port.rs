use crate::scan_orchestration::domain::{ScanCommand, ScanContext};
use crate::shared::Result;
use async_trait::async_trait;

/// ScanServicePort - Inbound port for the scan flows
///
/// This port is what an inbound transport (HTTP handler, queue consumer)
/// drives. Each command is first validated, which yields the
/// [`ScanContext`] the matching flow is then run with.
#[async_trait]
pub trait ScanServicePort: Send + Sync {
    /// Validates a command for the SBOM flow
    ///
    /// # Errors
    /// Returns an error if the image hash is missing
    async fn validate_generate_sbom(&self, command: ScanCommand) -> Result<ScanContext>;

    /// Produces and caches the SBOM of an image
    async fn generate_sbom(&self, context: &ScanContext) -> Result<()>;

    /// Validates a command for the CVE flow and reports it as accepted
    ///
    /// # Errors
    /// Returns an error if the instance id or the image hash is missing
    async fn validate_scan_cve(&self, command: ScanCommand) -> Result<ScanContext>;

    /// Produces the CVE manifest of a workload and submits it to the platform
    async fn scan_cve(&self, context: &ScanContext) -> Result<()>;

    /// Whether the service can accept scans
    async fn ready(&self) -> bool;
}
