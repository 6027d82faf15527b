//! Configuration module for procmem
//!
//! Provides configuration loading, validation, and default settings.

mod defaults;
mod loader;
mod validator;

pub use defaults::{default_config, ConfigDefaults};
pub use loader::{Config, ConfigError, ConfigLoader, LoggingConfig, MemoryConfig};
pub use validator::{validate_config, ConfigValidator};
