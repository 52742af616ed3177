use crate::scan_orchestration::domain::ScanResultReport;
use crate::shared::Result;
use async_trait::async_trait;

/// ReportSender port for transmitting a single scan result report
///
/// Used concurrently by the chunk dispatcher, one call per report.
#[async_trait]
pub trait ReportSender: Send + Sync + 'static {
    async fn send_report(&self, report: &ScanResultReport) -> Result<()>;
}
