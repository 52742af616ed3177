use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle status reported to the platform.
///
/// A scan moves through `Accepted -> Started -> Success -> Done`; a flow
/// that fails stops before `Success`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ScanStatus {
    Accepted,
    Started,
    Success,
    Done,
}

impl fmt::Display for ScanStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ScanStatus::Accepted => "accepted",
            ScanStatus::Started => "started",
            ScanStatus::Success => "success",
            ScanStatus::Done => "done",
        };
        f.write_str(label)
    }
}
