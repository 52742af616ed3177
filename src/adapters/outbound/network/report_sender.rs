use crate::ports::outbound::ReportSender;
use crate::scan_orchestration::domain::ScanResultReport;
use crate::shared::Result;
use anyhow::Context;
use async_trait::async_trait;
use std::time::Duration;

const CONTAINER_SCAN_PATH: &str = "k8s/v2/containerScan";

/// HttpReportSender posts scan result reports to the event receiver
///
/// Each report goes to
/// `{event_receiver_url}/k8s/v2/containerScan?customerGUID=<tenant>` as a
/// JSON body. Any non-2xx answer is an error; there is no retry.
pub struct HttpReportSender {
    client: reqwest::Client,
    event_receiver_url: String,
}

impl HttpReportSender {
    /// Creates a sender with its own HTTP client
    pub fn new(event_receiver_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = build_client(timeout)?;
        Ok(Self::with_client(client, event_receiver_url))
    }

    /// Creates a sender reusing an existing HTTP client
    pub fn with_client(client: reqwest::Client, event_receiver_url: impl Into<String>) -> Self {
        Self {
            client,
            event_receiver_url: event_receiver_url.into(),
        }
    }

    fn report_url(&self, tenant_id: &str) -> String {
        format!(
            "{}/{}?customerGUID={}",
            self.event_receiver_url.trim_end_matches('/'),
            CONTAINER_SCAN_PATH,
            urlencoding::encode(tenant_id)
        )
    }
}

/// Builds the HTTP client shared by the platform adapters
pub fn build_client(timeout: Duration) -> Result<reqwest::Client> {
    let version = env!("CARGO_PKG_VERSION");
    let user_agent = format!("vuln-relay/{}", version);
    let client = reqwest::Client::builder()
        .timeout(timeout)
        .user_agent(user_agent)
        .build()?;
    Ok(client)
}

#[async_trait]
impl ReportSender for HttpReportSender {
    async fn send_report(&self, report: &ScanResultReport) -> Result<()> {
        let url = self.report_url(report.tenant_id());
        let response = self
            .client
            .post(&url)
            .json(report)
            .send()
            .await
            .with_context(|| format!("failed to post report to {}", url))?;

        if !response.status().is_success() {
            anyhow::bail!(
                "event receiver returned status code {} for report {}",
                response.status(),
                report.pagination.report_number
            );
        }
        Ok(())
    }
}
