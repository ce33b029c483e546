pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod tokens;

pub use config::Config;
pub use error::{BackendError, Error, Result};
