/// Scan orchestration domain: the data exchanged with scanners, caches and
/// the platform, plus the pure services built on it.
pub mod domain;
pub mod services;
