/// Storage adapters for cached scan artifacts
mod memory_storage;

pub use memory_storage::MemoryStorage;
