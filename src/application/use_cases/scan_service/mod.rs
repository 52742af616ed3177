use crate::application::status_reporter::StatusReporter;
use crate::ports::inbound::ScanServicePort;
use crate::ports::outbound::{CveRepository, CveScanner, Platform, SbomCreator, SbomRepository};
use crate::scan_orchestration::domain::{CveManifest, Sbom, ScanCommand, ScanContext, ScanStatus};
use crate::scan_orchestration::services::{CacheGate, CacheLookup};
use crate::shared::{Result, ScanError};
use async_trait::async_trait;

/// ScanService - Orchestrates the SBOM and CVE flows
///
/// The service owns no state besides its collaborators; everything a flow
/// needs travels in the [`ScanContext`] produced by validation.
///
/// # Type Parameters
/// * `SC` - SbomCreator implementation
/// * `SR` - SbomRepository implementation
/// * `CS` - CveScanner implementation
/// * `CR` - CveRepository implementation
/// * `P` - Platform implementation
pub struct ScanService<SC, SR, CS, CR, P> {
    sbom_creator: SC,
    sbom_repository: SR,
    cve_scanner: CS,
    cve_repository: CR,
    platform: P,
}

impl<SC, SR, CS, CR, P> ScanService<SC, SR, CS, CR, P>
where
    SC: SbomCreator,
    SR: SbomRepository,
    CS: CveScanner,
    CR: CveRepository,
    P: Platform,
{
    /// Creates a new ScanService with injected dependencies
    pub fn new(
        sbom_creator: SC,
        sbom_repository: SR,
        cve_scanner: CS,
        cve_repository: CR,
        platform: P,
    ) -> Self {
        Self {
            sbom_creator,
            sbom_repository,
            cve_scanner,
            cve_repository,
            platform,
        }
    }

    fn cache_gate(&self) -> CacheGate<'_, SR, CR> {
        CacheGate::new(&self.sbom_repository, &self.cve_repository)
    }

    fn status(&self) -> StatusReporter<'_, P> {
        StatusReporter::new(&self.platform)
    }

    async fn lookup_cached_cve(
        &self,
        gate: &mut CacheGate<'_, SR, CR>,
        context: &ScanContext,
    ) -> CacheLookup<CveManifest> {
        gate.lookup_cve(
            context,
            context.image_id(),
            &self.sbom_creator.version(),
            &self.cve_scanner.version(),
            &self.cve_scanner.database_version(),
        )
        .await
    }

    /// Fetches the tenant's exceptions and matches `sbom` against the database
    async fn scan_with_exceptions(&self, context: &ScanContext, sbom: &Sbom) -> Result<CveManifest> {
        let exceptions = self.platform.get_exceptions(context).await?;
        tracing::debug!(
            scan_id = context.scan_id(),
            exceptions = exceptions.len(),
            "scanning SBOM"
        );
        self.cve_scanner.scan_sbom(context, sbom, &exceptions).await
    }

    /// Reports success, caches the manifest and hands it to the platform
    async fn finish(
        &self,
        gate: &mut CacheGate<'_, SR, CR>,
        context: &ScanContext,
        manifest: &CveManifest,
        has_relevancy: bool,
    ) -> Result<()> {
        let status = self.status();
        status.report(context, ScanStatus::Success).await;
        gate.persist_cve(context, manifest).await;
        self.platform
            .submit_manifest(context, manifest, has_relevancy)
            .await?;
        status.report(context, ScanStatus::Done).await;
        tracing::info!(
            scan_id = context.scan_id(),
            image_id = context.image_id(),
            vulnerabilities = manifest.vulnerabilities().len(),
            has_relevancy,
            "CVE manifest submitted"
        );
        Ok(())
    }

    /// Merges relevancy data into `manifest` when a workload SBOM is cached.
    ///
    /// Returns the manifest to submit and whether relevancy data was applied.
    async fn apply_relevancy(
        &self,
        gate: &mut CacheGate<'_, SR, CR>,
        context: &ScanContext,
        manifest: CveManifest,
    ) -> Result<(CveManifest, bool)> {
        let relevant_sbom = match gate
            .lookup_relevant_sbom(context, context.instance_id(), &self.sbom_creator.version())
            .await
        {
            CacheLookup::Hit(sbom) => sbom,
            CacheLookup::Miss | CacheLookup::Unavailable => return Ok((manifest, false)),
        };

        let relevant = self
            .cve_scanner
            .scan_sbom(context, &relevant_sbom, &[])
            .await?;
        let merged = self
            .cve_scanner
            .create_relevant_cve(context, manifest, relevant)
            .await?;
        Ok((merged, true))
    }
}

#[async_trait]
impl<SC, SR, CS, CR, P> ScanServicePort for ScanService<SC, SR, CS, CR, P>
where
    SC: SbomCreator,
    SR: SbomRepository,
    CS: CveScanner,
    CR: CveRepository,
    P: Platform,
{
    async fn validate_generate_sbom(&self, command: ScanCommand) -> Result<ScanContext> {
        let context = ScanContext::new(command);
        if context.image_id().is_empty() {
            return Err(ScanError::MissingField { field: "imageID" }.into());
        }
        Ok(context)
    }

    async fn generate_sbom(&self, context: &ScanContext) -> Result<()> {
        let mut gate = self.cache_gate();
        let creator_version = self.sbom_creator.version();

        let cached = gate
            .lookup_sbom(context, context.image_id(), &creator_version)
            .await;
        if cached.is_hit() {
            tracing::warn!(
                scan_id = context.scan_id(),
                image_id = context.image_id(),
                "SBOM already generated"
            );
            return Ok(());
        }

        let sbom = self
            .sbom_creator
            .create_sbom(context, context.image_id())
            .await?;

        if gate.sbom_store_ok() {
            gate.persist_sbom(context, &sbom).await;
            tracing::info!(
                scan_id = context.scan_id(),
                image_id = context.image_id(),
                "SBOM generated"
            );
            return Ok(());
        }

        // no SBOM cache to hand over to the CVE flow: scan right away
        let manifest = match self.lookup_cached_cve(&mut gate, context).await {
            CacheLookup::Hit(manifest) => manifest,
            CacheLookup::Miss | CacheLookup::Unavailable => {
                self.scan_with_exceptions(context, &sbom).await?
            }
        };
        self.finish(&mut gate, context, &manifest, false).await
    }

    async fn validate_scan_cve(&self, command: ScanCommand) -> Result<ScanContext> {
        let context = ScanContext::new(command);
        if context.instance_id().is_empty() {
            return Err(ScanError::MissingField {
                field: "instanceID",
            }
            .into());
        }
        if context.image_id().is_empty() {
            return Err(ScanError::MissingField { field: "imageID" }.into());
        }
        self.status().report(&context, ScanStatus::Accepted).await;
        Ok(context)
    }

    async fn scan_cve(&self, context: &ScanContext) -> Result<()> {
        self.status().report(context, ScanStatus::Started).await;
        let mut gate = self.cache_gate();

        let manifest = match self.lookup_cached_cve(&mut gate, context).await {
            CacheLookup::Hit(manifest) => {
                tracing::debug!(scan_id = context.scan_id(), "using cached CVE manifest");
                manifest
            }
            CacheLookup::Miss | CacheLookup::Unavailable => {
                let creator_version = self.sbom_creator.version();
                let sbom = match gate
                    .lookup_sbom(context, context.image_id(), &creator_version)
                    .await
                {
                    CacheLookup::Hit(sbom) => sbom,
                    CacheLookup::Miss => {
                        tracing::error!(
                            scan_id = context.scan_id(),
                            image_id = context.image_id(),
                            creator_version = %creator_version,
                            "missing SBOM"
                        );
                        return Err(ScanError::MissingSbom {
                            image_id: context.image_id().to_string(),
                            creator_version,
                        }
                        .into());
                    }
                    CacheLookup::Unavailable => {
                        self.sbom_creator
                            .create_sbom(context, context.image_id())
                            .await?
                    }
                };
                self.scan_with_exceptions(context, &sbom).await?
            }
        };

        let (manifest, has_relevancy) = self.apply_relevancy(&mut gate, context, manifest).await?;
        self.finish(&mut gate, context, &manifest, has_relevancy).await
    }

    async fn ready(&self) -> bool {
        self.cve_scanner.ready().await
    }
}
