//! Core module containing fundamental types for procmem
//!
//! This module provides the foundational building blocks used throughout
//! the crate: address handling, memory values and error types.

pub mod types;

// Re-export commonly used types for convenience
pub use types::{Address, ChainStep, Direction, MemoryError, MemoryResult, MemoryValue, ValueType};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const AUTHORS: &str = env!("CARGO_PKG_AUTHORS");

#[cfg(not(any(target_pointer_width = "32", target_pointer_width = "64")))]
compile_error!("procmem requires a 32- or 64-bit host");
