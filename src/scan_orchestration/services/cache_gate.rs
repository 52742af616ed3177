use crate::ports::outbound::{CveRepository, SbomRepository};
use crate::scan_orchestration::domain::{CveManifest, Sbom, ScanContext};

/// Outcome of a cache lookup
#[derive(Debug, Clone, PartialEq)]
pub enum CacheLookup<T> {
    /// Trusted artifact
    Hit(T),
    /// Store healthy, artifact absent or stale
    Miss,
    /// Store returned an error
    Unavailable,
}

impl<T> CacheLookup<T> {
    pub fn is_hit(&self) -> bool {
        matches!(self, CacheLookup::Hit(_))
    }

    pub fn into_hit(self) -> Option<T> {
        match self {
            CacheLookup::Hit(value) => Some(value),
            _ => None,
        }
    }
}

/// Request-scoped view over the SBOM and CVE stores.
///
/// Each store is considered healthy until one of its operations fails; from
/// then on, writes to it are skipped for the rest of the flow. Lookups never
/// fail and persists never propagate store errors.
pub struct CacheGate<'a, SR, CR>
where
    SR: SbomRepository,
    CR: CveRepository,
{
    sbom_repository: &'a SR,
    cve_repository: &'a CR,
    sbom_store_ok: bool,
    cve_store_ok: bool,
}

impl<'a, SR, CR> CacheGate<'a, SR, CR>
where
    SR: SbomRepository,
    CR: CveRepository,
{
    pub fn new(sbom_repository: &'a SR, cve_repository: &'a CR) -> Self {
        Self {
            sbom_repository,
            cve_repository,
            sbom_store_ok: true,
            cve_store_ok: true,
        }
    }

    pub fn sbom_store_ok(&self) -> bool {
        self.sbom_store_ok
    }

    pub fn cve_store_ok(&self) -> bool {
        self.cve_store_ok
    }

    pub async fn lookup_sbom(
        &mut self,
        context: &ScanContext,
        image_id: &str,
        creator_version: &str,
    ) -> CacheLookup<Sbom> {
        match self
            .sbom_repository
            .get_sbom(context, image_id, creator_version)
            .await
        {
            Ok(sbom) if sbom.is_present() => CacheLookup::Hit(sbom),
            Ok(_) => CacheLookup::Miss,
            Err(e) => {
                tracing::warn!(
                    scan_id = context.scan_id(),
                    image_id,
                    error = %e,
                    "SBOM store unavailable"
                );
                self.sbom_store_ok = false;
                CacheLookup::Unavailable
            }
        }
    }

    /// Looks up the workload-specific SBOM.
    ///
    /// Returns `Unavailable` without touching the store once the SBOM store
    /// has failed in this flow.
    pub async fn lookup_relevant_sbom(
        &mut self,
        context: &ScanContext,
        instance_id: &str,
        creator_version: &str,
    ) -> CacheLookup<Sbom> {
        if !self.sbom_store_ok {
            return CacheLookup::Unavailable;
        }
        match self
            .sbom_repository
            .get_relevant_sbom(context, instance_id, creator_version)
            .await
        {
            Ok(sbom) if sbom.is_present() => CacheLookup::Hit(sbom),
            Ok(_) => CacheLookup::Miss,
            Err(e) => {
                tracing::warn!(
                    scan_id = context.scan_id(),
                    wlid = instance_id,
                    error = %e,
                    "relevant SBOM lookup failed"
                );
                self.sbom_store_ok = false;
                CacheLookup::Unavailable
            }
        }
    }

    /// Looks up a CVE manifest; a manifest produced by other tool versions
    /// counts as a miss.
    pub async fn lookup_cve(
        &mut self,
        context: &ScanContext,
        image_id: &str,
        creator_version: &str,
        scanner_version: &str,
        database_version: &str,
    ) -> CacheLookup<CveManifest> {
        match self
            .cve_repository
            .get_cve(
                context,
                image_id,
                creator_version,
                scanner_version,
                database_version,
            )
            .await
        {
            Ok(manifest)
                if manifest.is_present()
                    && manifest.matches_versions(
                        creator_version,
                        scanner_version,
                        database_version,
                    ) =>
            {
                CacheLookup::Hit(manifest)
            }
            Ok(_) => CacheLookup::Miss,
            Err(e) => {
                tracing::warn!(
                    scan_id = context.scan_id(),
                    image_id,
                    error = %e,
                    "CVE store unavailable"
                );
                self.cve_store_ok = false;
                CacheLookup::Unavailable
            }
        }
    }

    pub async fn persist_sbom(&mut self, context: &ScanContext, sbom: &Sbom) {
        if !self.sbom_store_ok {
            return;
        }
        if let Err(e) = self.sbom_repository.store_sbom(context, sbom).await {
            tracing::warn!(
                scan_id = context.scan_id(),
                image_id = %sbom.image_id,
                error = %e,
                "failed to store SBOM"
            );
            self.sbom_store_ok = false;
        }
    }

    pub async fn persist_cve(&mut self, context: &ScanContext, manifest: &CveManifest) {
        if !self.cve_store_ok {
            return;
        }
        if let Err(e) = self.cve_repository.store_cve(context, manifest).await {
            tracing::warn!(
                scan_id = context.scan_id(),
                image_id = %manifest.image_id,
                error = %e,
                "failed to store CVE manifest"
            );
            self.cve_store_ok = false;
        }
    }
}
