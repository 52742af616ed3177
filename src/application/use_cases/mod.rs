/// Use cases module containing application business logic orchestration
mod scan_service;

pub use scan_service::ScanService;
