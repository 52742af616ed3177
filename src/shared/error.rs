use thiserror::Error;

/// Fatal errors raised by the scan orchestration flows.
///
/// Collaborator failures (creator, scanner, platform) are propagated as
/// `anyhow::Error` with their own context; these variants cover the failures
/// the orchestrator itself detects.
#[derive(Debug, Error)]
pub enum ScanError {
    #[error("missing {field} in scan command")]
    MissingField { field: &'static str },

    #[error("missing SBOM for image {image_id} (creator version {creator_version})")]
    MissingSbom {
        image_id: String,
        creator_version: String,
    },

    #[error("Invalid config: {field}: {reason}")]
    InvalidConfig { field: String, reason: String },
}

/// Errors surfaced on the delivery error queue.
///
/// None of these abort a flow: delivery runs detached from the flow that
/// submitted the manifest, so they are only observable through
/// [`DeliveryHandle`](crate::application::dispatch::DeliveryHandle) and logs.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DispatchError {
    #[error("failed to deliver report {report_number} of scan {scan_id}: {reason}")]
    Delivery {
        scan_id: String,
        report_number: usize,
        reason: String,
    },

    #[error(
        "error while splitting vulnerabilities chunks of scan {scan_id}, expected {expected} vulnerabilities but received {actual}"
    )]
    Accounting {
        scan_id: String,
        expected: usize,
        actual: usize,
    },

    #[error("failed to serialize report: {reason}")]
    Serialization { reason: String },
}

impl DispatchError {
    /// Returns true for chunk accounting mismatches
    pub fn is_accounting(&self) -> bool {
        matches!(self, DispatchError::Accounting { .. })
    }
}
