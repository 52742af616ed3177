use super::report_sender::{build_client, HttpReportSender};
use crate::application::dispatch::{ChunkDispatcher, DeliveryHandle};
use crate::config::{PlatformConfig, ServiceConfig};
use crate::ports::outbound::{Platform, ReportSender};
use crate::scan_orchestration::domain::designators::ATTRIBUTE_CLUSTER;
use crate::scan_orchestration::domain::{
    CveManifest, Designators, ScanContext, ScanResultReport, ScanStatus, VulnerabilityException,
};
use crate::scan_orchestration::services::{DeliveryLimits, Summarizer, VulnerabilityChunker};
use crate::shared::Result;
use anyhow::Context;
use async_trait::async_trait;
use serde::Serialize;
use std::sync::Arc;

const SCAN_STATUS_PATH: &str = "k8s/v2/scanStatus";
const EXCEPTIONS_PATH: &str = "api/v1/armoVulnerabilityExceptions";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct StatusEvent<'a> {
    scan_id: &'a str,
    wlid: &'a str,
    image_id: &'a str,
    job_ids: &'a [String],
    status: ScanStatus,
    timestamp: i64,
}

/// HttpPlatform adapter for the remote vulnerability platform
///
/// Status events and exception policies are exchanged directly over HTTP.
/// Manifests are summarized, split to the configured body size and handed to
/// a [`ChunkDispatcher`]; submission returns as soon as delivery has started
/// and delivery errors are only logged.
pub struct HttpPlatform<S: ReportSender = HttpReportSender> {
    client: reqwest::Client,
    config: PlatformConfig,
    limits: DeliveryLimits,
    dispatcher: ChunkDispatcher<S>,
}

impl HttpPlatform<HttpReportSender> {
    /// Creates a platform delivering reports through [`HttpReportSender`]
    pub fn new(config: &ServiceConfig) -> Result<Self> {
        let client = build_client(config.delivery.request_timeout())?;
        let sender =
            HttpReportSender::with_client(client.clone(), config.platform.event_receiver_url.clone());
        Ok(Self::with_sender(config, client, Arc::new(sender)))
    }
}

impl<S: ReportSender> HttpPlatform<S> {
    /// Creates a platform delivering reports through `sender`
    pub fn with_sender(config: &ServiceConfig, client: reqwest::Client, sender: Arc<S>) -> Self {
        let limits = config.delivery.limits();
        Self {
            client,
            config: config.platform.clone(),
            limits,
            dispatcher: ChunkDispatcher::new(sender, limits),
        }
    }

    fn designators(&self, context: &ScanContext) -> Designators {
        let command = context.command();
        let mut designators = Designators::for_workload(
            &command.instance_id,
            &self.config.tenant_id,
            &command.container_name,
        );
        if designators.attribute(ATTRIBUTE_CLUSTER).is_empty() && !self.config.cluster_name.is_empty()
        {
            designators
                .attributes
                .insert(ATTRIBUTE_CLUSTER.to_string(), self.config.cluster_name.clone());
        }
        designators
    }

    /// Summarizes `manifest` and starts delivering it in size-bounded reports
    pub fn deliver(
        &self,
        context: &ScanContext,
        manifest: &CveManifest,
        has_relevancy: bool,
    ) -> DeliveryHandle {
        let vulnerabilities = manifest.vulnerabilities().to_vec();
        let designators = self.designators(context);
        let summary = Summarizer::summarize(context, &designators, &vulnerabilities, has_relevancy);
        let total = vulnerabilities.len();
        let report = ScanResultReport::with_summary(summary);
        let chunker = VulnerabilityChunker::for_reports(&self.limits, &report);
        let chunks = futures::stream::iter(chunker.chunks(vulnerabilities));

        self.dispatcher.dispatch(report, total, chunks)
    }

    fn url(base: &str, path: &str, tenant_id: &str) -> String {
        format!(
            "{}/{}?customerGUID={}",
            base.trim_end_matches('/'),
            path,
            urlencoding::encode(tenant_id)
        )
    }
}

#[async_trait]
impl<S: ReportSender> Platform for HttpPlatform<S> {
    async fn send_status(&self, context: &ScanContext, status: ScanStatus) -> Result<()> {
        let command = context.command();
        let event = StatusEvent {
            scan_id: context.scan_id(),
            wlid: &command.instance_id,
            image_id: &command.image_hash,
            job_ids: &command.session.job_ids,
            status,
            timestamp: context.timestamp(),
        };
        let url = Self::url(
            &self.config.event_receiver_url,
            SCAN_STATUS_PATH,
            &self.config.tenant_id,
        );

        let response = self.client.post(&url).json(&event).send().await?;
        if !response.status().is_success() {
            anyhow::bail!(
                "event receiver returned status code {} for status {}",
                response.status(),
                status
            );
        }
        Ok(())
    }

    async fn get_exceptions(&self, context: &ScanContext) -> Result<Vec<VulnerabilityException>> {
        let url = Self::url(&self.config.api_url, EXCEPTIONS_PATH, &self.config.tenant_id);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .with_context(|| format!("failed to fetch vulnerability exceptions from {}", url))?;

        if !response.status().is_success() {
            anyhow::bail!(
                "exceptions API returned status code {} for scan {}",
                response.status(),
                context.scan_id()
            );
        }

        let exceptions: Vec<VulnerabilityException> = response
            .json()
            .await
            .context("failed to parse vulnerability exceptions")?;
        Ok(exceptions)
    }

    async fn submit_manifest(
        &self,
        context: &ScanContext,
        manifest: &CveManifest,
        has_relevancy: bool,
    ) -> Result<()> {
        let mut handle = self.deliver(context, manifest, has_relevancy);
        let scan_id = context.scan_id().to_string();
        tokio::spawn(async move {
            while let Some(error) = handle.next_error().await {
                tracing::error!(scan_id = %scan_id, error = %error, "report delivery error");
            }
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scan_orchestration::domain::{ScanCommand, VulnerabilityRecord};
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingSender {
        reports: Mutex<Vec<ScanResultReport>>,
    }

    #[async_trait]
    impl ReportSender for RecordingSender {
        async fn send_report(&self, report: &ScanResultReport) -> Result<()> {
            self.reports.lock().unwrap().push(report.clone());
            Ok(())
        }
    }

    fn config(max_body_size: usize) -> ServiceConfig {
        let mut config = ServiceConfig::default();
        config.platform.event_receiver_url = "https://report.example.com".to_string();
        config.platform.api_url = "https://api.example.com".to_string();
        config.platform.tenant_id = "tenant-1".to_string();
        config.platform.cluster_name = "fallback".to_string();
        config.delivery.max_body_size = max_body_size;
        config
    }

    fn context(instance_id: &str) -> ScanContext {
        ScanContext::with_identity(
            ScanCommand::new("sha256:abc", instance_id).with_container_name("web"),
            "scan-1",
            1_700_000_000,
        )
    }

    #[test]
    fn test_url_encodes_tenant() {
        assert_eq!(
            HttpPlatform::<RecordingSender>::url("https://api.example.com/", EXCEPTIONS_PATH, "a b"),
            "https://api.example.com/api/v1/armoVulnerabilityExceptions?customerGUID=a%20b"
        );
    }

    #[test]
    fn test_designators_fall_back_to_configured_cluster() {
        let sender = Arc::new(RecordingSender::default());
        let platform = HttpPlatform::with_sender(&config(30_000), reqwest::Client::new(), sender);

        let parsed = platform.designators(&context("wlid://cluster-prod/namespace-a/pod-b"));
        assert_eq!(parsed.attribute(ATTRIBUTE_CLUSTER), "prod");
        assert_eq!(parsed.tenant_id(), "tenant-1");

        let fallback = platform.designators(&context("pod-b"));
        assert_eq!(fallback.attribute(ATTRIBUTE_CLUSTER), "fallback");
    }

    #[tokio::test]
    async fn test_deliver_splits_manifest_into_reports() {
        let sender = Arc::new(RecordingSender::default());
        let platform =
            HttpPlatform::with_sender(&config(1_500), reqwest::Client::new(), Arc::clone(&sender));
        let vulnerabilities: Vec<_> = (0..40)
            .map(|i| VulnerabilityRecord::new(format!("CVE-2024-{:04}", i), "Medium"))
            .collect();
        let manifest = CveManifest::new("sha256:abc", "c", "s", "d", vulnerabilities);

        let handle = platform.deliver(
            &context("wlid://cluster-prod/namespace-a/pod-b"),
            &manifest,
            false,
        );
        assert!(handle.collect().await.is_empty());

        let reports = sender.reports.lock().unwrap();
        let delivered: usize = reports.iter().map(|r| r.vulnerabilities.len()).sum();
        assert_eq!(delivered, 40);
        assert!(reports.len() > 1);
        assert_eq!(reports.iter().filter(|r| r.pagination.is_last_report).count(), 1);
        let summary = reports
            .iter()
            .find_map(|r| r.summary.as_ref())
            .expect("summary report");
        assert_eq!(summary.total_count, 40);
        assert_eq!(summary.tenant_id, "tenant-1");
    }
}
