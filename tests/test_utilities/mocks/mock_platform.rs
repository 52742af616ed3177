use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use vuln_relay::prelude::*;

/// Mock Platform that captures statuses and submissions
#[derive(Default, Clone)]
pub struct MockPlatform {
    pub exceptions: Vec<VulnerabilityException>,
    pub fail_status: bool,
    pub fail_submit: bool,
    pub statuses: Arc<Mutex<Vec<ScanStatus>>>,
    pub submissions: Arc<Mutex<Vec<(CveManifest, bool)>>>,
}

impl MockPlatform {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_exceptions(mut self, exceptions: Vec<VulnerabilityException>) -> Self {
        self.exceptions = exceptions;
        self
    }

    pub fn with_failing_status(mut self) -> Self {
        self.fail_status = true;
        self
    }

    pub fn with_failing_submit(mut self) -> Self {
        self.fail_submit = true;
        self
    }

    pub fn get_statuses(&self) -> Vec<ScanStatus> {
        self.statuses.lock().unwrap().clone()
    }

    pub fn get_submissions(&self) -> Vec<(CveManifest, bool)> {
        self.submissions.lock().unwrap().clone()
    }
}

#[async_trait]
impl Platform for MockPlatform {
    async fn send_status(&self, _context: &ScanContext, status: ScanStatus) -> Result<()> {
        self.statuses.lock().unwrap().push(status);
        if self.fail_status {
            anyhow::bail!("Mock status endpoint failure");
        }
        Ok(())
    }

    async fn get_exceptions(&self, _context: &ScanContext) -> Result<Vec<VulnerabilityException>> {
        Ok(self.exceptions.clone())
    }

    async fn submit_manifest(
        &self,
        _context: &ScanContext,
        manifest: &CveManifest,
        has_relevancy: bool,
    ) -> Result<()> {
        if self.fail_submit {
            anyhow::bail!("Mock submission failure");
        }
        self.submissions
            .lock()
            .unwrap()
            .push((manifest.clone(), has_relevancy));
        Ok(())
    }
}
