//! Configuration: TOML file, `PORT` environment override, validation.

mod loader;
mod types;

pub use loader::ConfigError;
pub use types::{Config, SeedCounter, ServerConfig};
