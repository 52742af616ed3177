/// Network adapters for the remote platform
mod http_platform;
mod report_sender;

pub use http_platform::HttpPlatform;
pub use report_sender::{build_client, HttpReportSender};
