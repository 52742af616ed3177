use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use vuln_relay::prelude::*;

/// Mock SbomRepository with a configurable cache state
#[derive(Default, Clone)]
pub struct MockSbomRepository {
    pub cached: Option<Sbom>,
    pub relevant: Option<Sbom>,
    pub unavailable: bool,
    pub stored: Arc<Mutex<Vec<Sbom>>>,
}

impl MockSbomRepository {
    /// Healthy store holding nothing
    pub fn empty() -> Self {
        Self::default()
    }

    /// Store returning an error for every operation
    pub fn unavailable() -> Self {
        Self {
            unavailable: true,
            ..Self::default()
        }
    }

    pub fn with_sbom(mut self, sbom: Sbom) -> Self {
        self.cached = Some(sbom);
        self
    }

    pub fn with_relevant_sbom(mut self, sbom: Sbom) -> Self {
        self.relevant = Some(sbom);
        self
    }

    pub fn stored_count(&self) -> usize {
        self.stored.lock().unwrap().len()
    }
}

#[async_trait]
impl SbomRepository for MockSbomRepository {
    async fn get_sbom(
        &self,
        _context: &ScanContext,
        image_id: &str,
        creator_version: &str,
    ) -> Result<Sbom> {
        if self.unavailable {
            anyhow::bail!("Mock SBOM storage unavailable");
        }
        Ok(self
            .cached
            .clone()
            .unwrap_or_else(|| Sbom::absent(image_id, creator_version)))
    }

    async fn get_relevant_sbom(
        &self,
        _context: &ScanContext,
        instance_id: &str,
        creator_version: &str,
    ) -> Result<Sbom> {
        if self.unavailable {
            anyhow::bail!("Mock SBOM storage unavailable");
        }
        Ok(self
            .relevant
            .clone()
            .unwrap_or_else(|| Sbom::absent(instance_id, creator_version)))
    }

    async fn store_sbom(&self, _context: &ScanContext, sbom: &Sbom) -> Result<()> {
        if self.unavailable {
            anyhow::bail!("Mock SBOM storage unavailable");
        }
        self.stored.lock().unwrap().push(sbom.clone());
        Ok(())
    }
}
