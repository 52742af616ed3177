/// Mock implementations for testing
mod mock_cve_repository;
mod mock_cve_scanner;
mod mock_platform;
mod mock_report_sender;
mod mock_sbom_creator;
mod mock_sbom_repository;

pub use mock_cve_repository::MockCveRepository;
pub use mock_cve_scanner::MockCveScanner;
pub use mock_platform::MockPlatform;
pub use mock_report_sender::MockReportSender;
pub use mock_sbom_creator::MockSbomCreator;
pub use mock_sbom_repository::MockSbomRepository;

pub use mock_cve_scanner::{DATABASE_VERSION, SCANNER_VERSION};
pub use mock_sbom_creator::CREATOR_VERSION;
