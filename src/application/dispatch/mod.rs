pub mod chunk_dispatcher;
pub mod delivery_handle;

pub use chunk_dispatcher::ChunkDispatcher;
pub use delivery_handle::DeliveryHandle;
