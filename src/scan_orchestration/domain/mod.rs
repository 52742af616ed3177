pub mod cve_manifest;
pub mod designators;
pub mod image_reference;
pub mod report;
pub mod sbom;
pub mod scan_command;
pub mod scan_context;
pub mod scan_status;
pub mod vulnerability;

pub use cve_manifest::CveManifest;
pub use designators::Designators;
pub use image_reference::ImageInfo;
pub use report::{PaginationInfo, ScanResultReport, ScanSummary, SeverityStats};
pub use sbom::Sbom;
pub use scan_command::{ScanCommand, Session};
pub use scan_context::ScanContext;
pub use scan_status::ScanStatus;
pub use vulnerability::{
    ExceptionAction, FixInfo, Severity, ShortVulnerability, VulnerabilityException,
    VulnerabilityRecord,
};
