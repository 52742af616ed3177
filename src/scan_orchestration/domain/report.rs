use super::{Designators, Severity, ShortVulnerability, VulnerabilityRecord};
use serde::{Deserialize, Serialize};

/// Per-severity vulnerability counters
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeverityStats {
    pub severity: Severity,
    pub total_count: u64,
    pub fix_available_of_total_count: u64,
    #[serde(rename = "rceCount")]
    pub rce_count: u64,
    #[serde(rename = "rceFixCount")]
    pub rce_fix_count: u64,
    pub relevant_count: u64,
    pub fix_available_for_relevant_count: u64,
}

impl SeverityStats {
    pub fn new(severity: Severity) -> Self {
        Self {
            severity,
            total_count: 0,
            fix_available_of_total_count: 0,
            rce_count: 0,
            rce_fix_count: 0,
            relevant_count: 0,
            fix_available_for_relevant_count: 0,
        }
    }
}

/// Aggregated scan result sent with the first report of a scan
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanSummary {
    pub designators: Designators,
    #[serde(rename = "customerGUID")]
    pub tenant_id: String,
    #[serde(rename = "containersScanID")]
    pub scan_id: String,
    #[serde(rename = "wlid")]
    pub instance_id: String,
    pub image_id: String,
    pub image_tag: String,
    pub registry: String,
    pub version: String,
    pub cluster_name: String,
    pub namespace: String,
    pub container_name: String,
    #[serde(rename = "jobIDs")]
    pub job_ids: Vec<String>,
    pub timestamp: i64,
    pub has_relevancy_data: bool,
    pub status: String,
    pub total_count: u64,
    pub fix_available_of_total_count: u64,
    #[serde(rename = "rceCount")]
    pub rce_count: u64,
    #[serde(rename = "rceFixCount")]
    pub rce_fix_count: u64,
    pub relevant_count: u64,
    pub fix_available_for_relevant_count: u64,
    pub severities_stats: Vec<SeverityStats>,
    pub excluded_severities_stats: Vec<SeverityStats>,
    pub vulnerabilities: Vec<ShortVulnerability>,
    pub packages_name: Vec<String>,
}

/// Position of a report within the sequence delivered for one scan
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationInfo {
    pub report_number: usize,
    pub is_last_report: bool,
}

/// One delivery unit of a scan result.
///
/// The reports of a scan are numbered from 0 without gaps and exactly one of
/// them is flagged as the last. Only report 0 carries the summary.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanResultReport {
    #[serde(rename = "paginationInfo")]
    pub pagination: PaginationInfo,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<ScanSummary>,
    pub vulnerabilities: Vec<VulnerabilityRecord>,
    #[serde(rename = "containersScanID")]
    pub scan_id: String,
    pub timestamp: i64,
    pub designators: Designators,
}

impl ScanResultReport {
    /// Report shell carrying the summary and no vulnerabilities yet
    pub fn with_summary(summary: ScanSummary) -> Self {
        Self {
            pagination: PaginationInfo::default(),
            scan_id: summary.scan_id.clone(),
            timestamp: summary.timestamp,
            designators: summary.designators.clone(),
            vulnerabilities: Vec::new(),
            summary: Some(summary),
        }
    }

    /// A chunk report sharing the identity of `shell`
    pub fn chunk_of(
        shell: &ScanResultReport,
        report_number: usize,
        is_last_report: bool,
        vulnerabilities: Vec<VulnerabilityRecord>,
    ) -> Self {
        Self {
            pagination: PaginationInfo {
                report_number,
                is_last_report,
            },
            summary: None,
            vulnerabilities,
            scan_id: shell.scan_id.clone(),
            timestamp: shell.timestamp,
            designators: shell.designators.clone(),
        }
    }

    pub fn tenant_id(&self) -> &str {
        self.designators.tenant_id()
    }
}
