use crate::scan_orchestration::domain::{
    CveManifest, ScanContext, ScanStatus, VulnerabilityException,
};
use crate::shared::Result;
use async_trait::async_trait;

/// Platform port for the remote platform the results are shipped to
#[async_trait]
pub trait Platform: Send + Sync {
    /// Notifies the platform of a lifecycle transition
    async fn send_status(&self, context: &ScanContext, status: ScanStatus) -> Result<()>;

    /// Fetches the tenant's vulnerability exception policies
    async fn get_exceptions(&self, context: &ScanContext) -> Result<Vec<VulnerabilityException>>;

    /// Hands a finished manifest over for delivery
    ///
    /// Returns once delivery has been scheduled. Failures of individual
    /// deliveries are not reported through the return value.
    async fn submit_manifest(
        &self,
        context: &ScanContext,
        manifest: &CveManifest,
        has_relevancy: bool,
    ) -> Result<()>;
}
