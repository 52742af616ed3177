use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use vuln_relay::prelude::*;

pub const CREATOR_VERSION: &str = "syft-0.101.1";

/// Mock SbomCreator that counts invocations
#[derive(Default, Clone)]
pub struct MockSbomCreator {
    pub calls: Arc<AtomicUsize>,
    pub should_fail: bool,
}

impl MockSbomCreator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_failure() -> Self {
        Self {
            should_fail: true,
            ..Self::default()
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SbomCreator for MockSbomCreator {
    async fn create_sbom(&self, _context: &ScanContext, image_id: &str) -> Result<Sbom> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.should_fail {
            anyhow::bail!("Mock SBOM creator failure");
        }
        Ok(Sbom::new(
            image_id,
            CREATOR_VERSION,
            serde_json::json!({"artifacts": [{"name": "openssl", "version": "3.0.2"}]}),
        ))
    }

    fn version(&self) -> String {
        CREATOR_VERSION.to_string()
    }
}
