//! Core type definitions for procmem
//!
//! Address wrapper, dynamic memory values, copy direction and the error
//! type shared by every operation.

mod address;
mod error;
mod transfer;
mod value;

// Re-export all public types
pub use address::Address;
pub use error::{ChainStep, MemoryError, MemoryResult};
pub use transfer::Direction;
pub use value::{MemoryValue, ValueType};

// Common type aliases
pub type ProcessId = u32;
