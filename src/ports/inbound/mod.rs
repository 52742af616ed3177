/// Inbound ports (Driving ports) - Use case interfaces
///
/// These ports define the interfaces that inbound adapters use to trigger
/// scans in the application core.
pub mod scan_service_port;

pub use scan_service_port::ScanServicePort;
