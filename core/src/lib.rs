pub mod action;
pub mod config;
pub mod detail;
pub mod interactive;
pub mod storage;
pub mod style;

pub use crate::config::Config;
pub use crate::detail::LoginDetail;
