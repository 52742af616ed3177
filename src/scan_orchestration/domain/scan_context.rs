use super::ScanCommand;
use chrono::Utc;
use uuid::Uuid;

/// Request-scoped state of a single scan.
///
/// Created once per inbound command by the `validate_*` operations and
/// threaded explicitly through every orchestrator and port call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanContext {
    scan_id: String,
    timestamp: i64,
    command: ScanCommand,
}

impl ScanContext {
    /// Creates a context with a fresh random scan id, stamped with the current time
    pub fn new(command: ScanCommand) -> Self {
        Self {
            scan_id: Uuid::new_v4().to_string(),
            timestamp: Utc::now().timestamp(),
            command,
        }
    }

    /// Creates a context with a caller-chosen identity
    pub fn with_identity(command: ScanCommand, scan_id: impl Into<String>, timestamp: i64) -> Self {
        Self {
            scan_id: scan_id.into(),
            timestamp,
            command,
        }
    }

    pub fn scan_id(&self) -> &str {
        &self.scan_id
    }

    /// Unix timestamp (seconds) at which the scan was accepted
    pub fn timestamp(&self) -> i64 {
        self.timestamp
    }

    pub fn command(&self) -> &ScanCommand {
        &self.command
    }

    pub fn image_id(&self) -> &str {
        &self.command.image_hash
    }

    pub fn instance_id(&self) -> &str {
        &self.command.instance_id
    }
}
