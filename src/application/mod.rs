/// Application layer - Use cases and delivery
///
/// This layer contains the application logic that orchestrates
/// domain services and coordinates with infrastructure through ports.
pub mod dispatch;
pub mod status_reporter;
pub mod use_cases;

pub use status_reporter::StatusReporter;
