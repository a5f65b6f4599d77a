pub mod common;
pub mod config;
pub mod error;
pub mod frontend;
pub mod network;

pub use config::FrontendConfig;
pub use error::{FrontendError, Result};
