//! Type-safe memory writing

use crate::core::types::{Address, MemoryResult, MemoryValue};
use crate::memory::scalar::Scalar;
use crate::process::ProcessHandle;

/// Memory writer for type-safe write operations
#[derive(Debug, Clone, Copy)]
pub struct MemoryWriter<'a> {
    handle: &'a ProcessHandle,
}

impl<'a> MemoryWriter<'a> {
    /// Create a new memory writer
    pub fn new(handle: &'a ProcessHandle) -> Self {
        MemoryWriter { handle }
    }

    /// Write raw bytes to memory
    pub fn write_bytes(&self, address: Address, data: &[u8]) -> MemoryResult<()> {
        self.handle.write_memory(address, data)
    }

    /// Write a typed value to memory
    pub fn write<T: Scalar>(&self, address: Address, value: T) -> MemoryResult<()> {
        let mut buffer = [0u8; 8];
        value.write_le(&mut buffer);
        self.write_bytes(address, &buffer[..T::WIDTH])
    }

    /// Write a string to memory (null-terminated)
    pub fn write_string(&self, address: Address, value: &str) -> MemoryResult<()> {
        let mut bytes = value.as_bytes().to_vec();
        bytes.push(0);
        self.write_bytes(address, &bytes)
    }

    /// Write a wide string (UTF-16LE) to memory (null-terminated)
    pub fn write_wide_string(&self, address: Address, value: &str) -> MemoryResult<()> {
        let bytes: Vec<u8> = value
            .encode_utf16()
            .chain(std::iter::once(0))
            .flat_map(u16::to_le_bytes)
            .collect();
        self.write_bytes(address, &bytes)
    }

    /// Write a MemoryValue to memory
    pub fn write_value(&self, address: Address, value: &MemoryValue) -> MemoryResult<()> {
        match value {
            MemoryValue::U8(v) => self.write(address, *v),
            MemoryValue::U16(v) => self.write(address, *v),
            MemoryValue::U32(v) => self.write(address, *v),
            MemoryValue::U64(v) => self.write(address, *v),
            MemoryValue::Usize(v) => self.write(address, *v),
            MemoryValue::I8(v) => self.write(address, *v),
            MemoryValue::I16(v) => self.write(address, *v),
            MemoryValue::I32(v) => self.write(address, *v),
            MemoryValue::I64(v) => self.write(address, *v),
            MemoryValue::F32(v) => self.write(address, *v),
            MemoryValue::F64(v) => self.write(address, *v),
            MemoryValue::String(s) => self.write_string(address, s),
            MemoryValue::WideString(s) => self.write_wide_string(address, s),
            MemoryValue::Bytes(b) => self.write_bytes(address, b),
        }
    }
}
