/// Ports module defining interfaces for hexagonal architecture
///
/// Inbound ports are driven by the request transport; outbound ports are
/// implemented by the creator, scanner, cache and platform collaborators.
pub mod inbound;
pub mod outbound;
