use crate::ports::outbound::{CveRepository, SbomRepository};
use crate::scan_orchestration::domain::{CveManifest, Sbom, ScanContext};
use crate::shared::Result;
use async_trait::async_trait;
use dashmap::DashMap;
use std::sync::Arc;

/// Cache key for SBOMs: image id (or instance id) plus creator version
#[derive(Debug, Clone, Hash, Eq, PartialEq)]
struct SbomKey {
    id: String,
    creator_version: String,
}

impl SbomKey {
    fn new(id: &str, creator_version: &str) -> Self {
        Self {
            id: id.to_string(),
            creator_version: creator_version.to_string(),
        }
    }
}

/// Cache key for CVE manifests
#[derive(Debug, Clone, Hash, Eq, PartialEq)]
struct CveKey {
    image_id: String,
    creator_version: String,
    scanner_version: String,
    database_version: String,
}

/// MemoryStorage keeps SBOMs and CVE manifests in process memory.
///
/// Clones share the same maps, so one storage can be handed to the scan
/// service both as SBOM and as CVE repository. Lookups of unknown keys
/// return the artifact with `content == None` rather than an error.
#[derive(Clone, Default)]
pub struct MemoryStorage {
    sboms: Arc<DashMap<SbomKey, Sbom>>,
    relevant_sboms: Arc<DashMap<SbomKey, Sbom>>,
    manifests: Arc<DashMap<CveKey, CveManifest>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the workload-specific SBOM of `instance_id`.
    ///
    /// Relevant SBOMs are produced by the runtime agent, not by this crate.
    pub fn insert_relevant_sbom(&self, instance_id: &str, sbom: Sbom) {
        let key = SbomKey::new(instance_id, &sbom.creator_version);
        self.relevant_sboms.insert(key, sbom);
    }

    pub fn sbom_count(&self) -> usize {
        self.sboms.len()
    }

    pub fn manifest_count(&self) -> usize {
        self.manifests.len()
    }
}

#[async_trait]
impl SbomRepository for MemoryStorage {
    async fn get_sbom(
        &self,
        _context: &ScanContext,
        image_id: &str,
        creator_version: &str,
    ) -> Result<Sbom> {
        let key = SbomKey::new(image_id, creator_version);
        Ok(self
            .sboms
            .get(&key)
            .map(|entry| entry.clone())
            .unwrap_or_else(|| Sbom::absent(image_id, creator_version)))
    }

    async fn get_relevant_sbom(
        &self,
        _context: &ScanContext,
        instance_id: &str,
        creator_version: &str,
    ) -> Result<Sbom> {
        let key = SbomKey::new(instance_id, creator_version);
        Ok(self
            .relevant_sboms
            .get(&key)
            .map(|entry| entry.clone())
            .unwrap_or_else(|| Sbom::absent(instance_id, creator_version)))
    }

    async fn store_sbom(&self, _context: &ScanContext, sbom: &Sbom) -> Result<()> {
        let key = SbomKey::new(&sbom.image_id, &sbom.creator_version);
        self.sboms.insert(key, sbom.clone());
        Ok(())
    }
}

#[async_trait]
impl CveRepository for MemoryStorage {
    async fn get_cve(
        &self,
        _context: &ScanContext,
        image_id: &str,
        creator_version: &str,
        scanner_version: &str,
        database_version: &str,
    ) -> Result<CveManifest> {
        let key = CveKey {
            image_id: image_id.to_string(),
            creator_version: creator_version.to_string(),
            scanner_version: scanner_version.to_string(),
            database_version: database_version.to_string(),
        };
        Ok(self
            .manifests
            .get(&key)
            .map(|entry| entry.clone())
            .unwrap_or_else(|| CveManifest {
                image_id: image_id.to_string(),
                creator_version: creator_version.to_string(),
                scanner_version: scanner_version.to_string(),
                database_version: database_version.to_string(),
                content: None,
            }))
    }

    async fn store_cve(&self, _context: &ScanContext, manifest: &CveManifest) -> Result<()> {
        let key = CveKey {
            image_id: manifest.image_id.clone(),
            creator_version: manifest.creator_version.clone(),
            scanner_version: manifest.scanner_version.clone(),
            database_version: manifest.database_version.clone(),
        };
        self.manifests.insert(key, manifest.clone());
        Ok(())
    }
}
