// exported modules
pub mod error;
pub mod model;
pub mod push;

// store impls
pub mod memory;

// re-exports
pub use error::*;
pub use memory::MemoryStore;
pub use model::*;
pub use push::{Deployment, EndpointDescriptor};
