pub mod config;
pub mod error;

pub use config::{CompleterConfig, ConfigOverrides};
