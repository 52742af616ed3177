use crate::scan_orchestration::domain::{CveManifest, ScanContext};
use crate::shared::Result;
use async_trait::async_trait;

/// CveRepository port for the CVE manifest cache
///
/// Same contract as [`SbomRepository`](super::SbomRepository): `Ok` with an
/// absent manifest for a miss, `Err` when the store is unreachable.
#[async_trait]
pub trait CveRepository: Send + Sync {
    async fn get_cve(
        &self,
        context: &ScanContext,
        image_id: &str,
        creator_version: &str,
        scanner_version: &str,
        database_version: &str,
    ) -> Result<CveManifest>;

    async fn store_cve(&self, context: &ScanContext, manifest: &CveManifest) -> Result<()>;
}
