pub mod error;
pub mod json;
pub mod util;

pub use json::JsonFileStore;
