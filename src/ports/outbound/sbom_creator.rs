use crate::scan_orchestration::domain::{Sbom, ScanContext};
use crate::shared::Result;
use async_trait::async_trait;

/// SbomCreator port for producing an SBOM from an image
///
/// Implementations wrap an external SBOM generator. Errors are fatal to the
/// flow that requested the SBOM.
#[async_trait]
pub trait SbomCreator: Send + Sync {
    /// Creates the SBOM of an image
    ///
    /// # Arguments
    /// * `context` - Scan the SBOM is created for
    /// * `image_id` - Identifier of the image to inspect
    async fn create_sbom(&self, context: &ScanContext, image_id: &str) -> Result<Sbom>;

    /// Version of the generator, part of every cache key
    fn version(&self) -> String;
}
