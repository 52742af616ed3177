use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use vuln_relay::prelude::*;

/// Mock ReportSender that captures delivered reports
///
/// Reports whose number is listed in `failing_reports` are rejected; all
/// others are recorded after an optional delay.
#[derive(Default, Clone)]
pub struct MockReportSender {
    pub failing_reports: HashSet<usize>,
    pub delay: Option<Duration>,
    pub reports: Arc<Mutex<Vec<ScanResultReport>>>,
}

impl MockReportSender {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_on(mut self, report_number: usize) -> Self {
        self.failing_reports.insert(report_number);
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Delivered reports ordered by report number
    pub fn get_reports(&self) -> Vec<ScanResultReport> {
        let mut reports = self.reports.lock().unwrap().clone();
        reports.sort_by_key(|report| report.pagination.report_number);
        reports
    }
}

#[async_trait]
impl ReportSender for MockReportSender {
    async fn send_report(&self, report: &ScanResultReport) -> Result<()> {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        if self.failing_reports.contains(&report.pagination.report_number) {
            anyhow::bail!("Mock receiver rejected report {}", report.pagination.report_number);
        }
        self.reports.lock().unwrap().push(report.clone());
        Ok(())
    }
}
