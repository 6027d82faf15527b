//! Memory operations module for reading and writing process memory
//!
//! This module provides:
//! - the raw copy capability every backend implements
//! - type-safe reads and writes over a closed set of scalar types
//! - pointer-chain resolution
//! - null-terminated string decoding with adaptive probe reads

pub mod copier;
pub mod mock;
pub mod pointer;
pub mod reader;
pub mod scalar;
pub mod strings;
pub mod writer;

pub use copier::RawCopier;
pub use mock::MockMemory;
pub use reader::MemoryReader;
pub use scalar::{PointerValue, Scalar};
pub use strings::{decode_utf16, StringDecoder, DEFAULT_PROBE_SIZE, MAX_PROBE_SIZE};
pub use writer::MemoryWriter;
