//! vuln-relay - vulnerability scan orchestration for container images
//!
//! This library drives the scan of a workload's image: it produces or reuses
//! an SBOM, matches it against a vulnerability database, merges in runtime
//! relevancy data and ships the result to a remote platform in size-bounded
//! reports, following hexagonal architecture principles.
//!
//! # Architecture
//!
//! The library is organized into the following layers:
//!
//! - **Domain Layer** (`scan_orchestration`): Scan data model and pure services
//! - **Application Layer** (`application`): Scan flows, status reporting and delivery
//! - **Ports** (`ports`): Interface definitions for collaborators
//! - **Adapters** (`adapters`): Concrete implementations of ports
//! - **Shared** (`shared`): Error types, result alias and logging
//!
//! # Example
//!
//! ```no_run
//! use vuln_relay::prelude::*;
//! use std::path::Path;
//!
//! # async fn run<SC: SbomCreator, CS: CveScanner>(creator: SC, scanner: CS) -> Result<()> {
//! let config = discover_config(Path::new("."))?.unwrap_or_default();
//! init_tracing(&config.logging)?;
//!
//! let storage = MemoryStorage::new();
//! let platform = HttpPlatform::new(&config)?;
//! let service = ScanService::new(creator, storage.clone(), scanner, storage, platform);
//!
//! let command = ScanCommand::new("sha256:4c1e...", "wlid://cluster-prod/namespace-shop/deployment-web");
//! let context = service.validate_scan_cve(command).await?;
//! service.scan_cve(&context).await?;
//! # Ok(())
//! # }
//! ```

pub mod adapters;
pub mod application;
pub mod config;
pub mod ports;
pub mod scan_orchestration;
pub mod shared;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::adapters::outbound::network::{HttpPlatform, HttpReportSender};
    pub use crate::adapters::outbound::storage::MemoryStorage;
    pub use crate::application::dispatch::{ChunkDispatcher, DeliveryHandle};
    pub use crate::application::use_cases::ScanService;
    pub use crate::application::StatusReporter;
    pub use crate::config::{
        discover_config, load_config_from_path, DeliveryConfig, LogFormat, LoggingConfig,
        PlatformConfig, ServiceConfig,
    };
    pub use crate::ports::inbound::ScanServicePort;
    pub use crate::ports::outbound::{
        CveRepository, CveScanner, Platform, ReportSender, SbomCreator, SbomRepository,
    };
    pub use crate::scan_orchestration::domain::{
        CveManifest, Designators, ExceptionAction, FixInfo, PaginationInfo, Sbom, ScanCommand,
        ScanContext, ScanResultReport, ScanStatus, ScanSummary, Severity, SeverityStats,
        VulnerabilityException, VulnerabilityRecord,
    };
    pub use crate::scan_orchestration::services::{
        json_size, CacheGate, CacheLookup, DeliveryLimits, Summarizer, VulnerabilityChunker,
    };
    pub use crate::shared::logging::init_tracing;
    pub use crate::shared::{DispatchError, Result, ScanError};
}
