use crate::scan_orchestration::domain::{Sbom, ScanContext};
use crate::shared::Result;
use async_trait::async_trait;

/// SbomRepository port for the SBOM cache
///
/// A read returns `Ok` with an absent SBOM when the store is healthy but
/// holds nothing for the key, and `Err` when the store itself could not be
/// reached. Callers treat both kinds of failure as non-fatal.
#[async_trait]
pub trait SbomRepository: Send + Sync {
    /// Fetches the base SBOM of an image
    async fn get_sbom(
        &self,
        context: &ScanContext,
        image_id: &str,
        creator_version: &str,
    ) -> Result<Sbom>;

    /// Fetches the workload-specific SBOM recorded for a running instance
    async fn get_relevant_sbom(
        &self,
        context: &ScanContext,
        instance_id: &str,
        creator_version: &str,
    ) -> Result<Sbom>;

    async fn store_sbom(&self, context: &ScanContext, sbom: &Sbom) -> Result<()>;
}
