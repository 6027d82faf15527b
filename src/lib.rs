//! procmem: typed read/write access to the memory of another process
//!
//! A [`ProcessHandle`] wraps a platform backend (`/proc/<pid>/mem` on
//! Linux, `ReadProcessMemory`/`WriteProcessMemory` on Windows) and hands
//! out [`MemoryReader`] and [`MemoryWriter`] views for fixed-size scalars,
//! raw bytes, 32- and 64-bit pointer chains and null-terminated strings.

pub mod config;
pub mod core;
pub mod memory;
pub mod process;

#[cfg(target_os = "linux")]
pub mod linux;

#[cfg(windows)]
pub mod windows;

// Re-export main types from core module
pub use crate::core::types::{
    Address, ChainStep, Direction, MemoryError, MemoryResult, MemoryValue, ProcessId, ValueType,
};
pub use crate::core::{AUTHORS, VERSION};

pub use config::{Config, ConfigLoader};
pub use memory::{
    MemoryReader, MemoryWriter, MockMemory, PointerValue, RawCopier, Scalar, StringDecoder,
};
pub use process::ProcessHandle;
