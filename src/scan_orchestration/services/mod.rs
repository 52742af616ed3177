pub mod cache_gate;
pub mod chunker;
pub mod summarizer;

pub use cache_gate::{CacheGate, CacheLookup};
pub use chunker::{json_size, DeliveryLimits, VulnerabilityChunker, VulnerabilityChunks};
pub use summarizer::Summarizer;
