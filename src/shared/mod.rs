/// Shared utilities used across layers
pub mod error;
pub mod logging;
pub mod result;

pub use error::{DispatchError, ScanError};
pub use result::Result;
