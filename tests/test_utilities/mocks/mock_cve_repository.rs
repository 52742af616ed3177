use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use vuln_relay::prelude::*;

/// Mock CveRepository with a configurable cache state
#[derive(Default, Clone)]
pub struct MockCveRepository {
    pub cached: Option<CveManifest>,
    pub unavailable: bool,
    pub stored: Arc<Mutex<Vec<CveManifest>>>,
}

impl MockCveRepository {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn unavailable() -> Self {
        Self {
            unavailable: true,
            ..Self::default()
        }
    }

    pub fn with_manifest(mut self, manifest: CveManifest) -> Self {
        self.cached = Some(manifest);
        self
    }

    pub fn stored_count(&self) -> usize {
        self.stored.lock().unwrap().len()
    }
}

#[async_trait]
impl CveRepository for MockCveRepository {
    async fn get_cve(
        &self,
        _context: &ScanContext,
        image_id: &str,
        creator_version: &str,
        _scanner_version: &str,
        _database_version: &str,
    ) -> Result<CveManifest> {
        if self.unavailable {
            anyhow::bail!("Mock CVE storage unavailable");
        }
        Ok(self.cached.clone().unwrap_or_else(|| CveManifest {
            image_id: image_id.to_string(),
            creator_version: creator_version.to_string(),
            ..CveManifest::default()
        }))
    }

    async fn store_cve(&self, _context: &ScanContext, manifest: &CveManifest) -> Result<()> {
        if self.unavailable {
            anyhow::bail!("Mock CVE storage unavailable");
        }
        self.stored.lock().unwrap().push(manifest.clone());
        Ok(())
    }
}
