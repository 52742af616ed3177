/// Outbound ports (Driven ports) - Collaborator interfaces
///
/// These ports define the capabilities the scan core consumes from the
/// outside world: SBOM creation, CVE matching, artifact caches and the
/// remote platform.
pub mod cve_repository;
pub mod cve_scanner;
pub mod platform;
pub mod report_sender;
pub mod sbom_creator;
pub mod sbom_repository;

pub use cve_repository::CveRepository;
pub use cve_scanner::CveScanner;
pub use platform::Platform;
pub use report_sender::ReportSender;
pub use sbom_creator::SbomCreator;
pub use sbom_repository::SbomRepository;
