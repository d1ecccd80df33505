pub mod config;
pub mod error;
pub mod ops;

pub use config::{CleanConfig, IngestConfig};
pub use error::{HxpError, Result};
pub use ops::{CleanOp, TargetType};
