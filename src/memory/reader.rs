//! Type-safe memory reading

use crate::core::types::{Address, MemoryResult, MemoryValue, ValueType};
use crate::memory::pointer;
use crate::memory::scalar::Scalar;
use crate::memory::strings::StringDecoder;
use crate::process::ProcessHandle;

/// Memory reader with type-safe operations
#[derive(Debug, Clone, Copy)]
pub struct MemoryReader<'a> {
    handle: &'a ProcessHandle,
    strings: StringDecoder,
}

impl<'a> MemoryReader<'a> {
    /// Create a new memory reader
    pub fn new(handle: &'a ProcessHandle) -> Self {
        MemoryReader {
            handle,
            strings: StringDecoder::default(),
        }
    }

    /// Use a different initial probe size for string reads
    pub fn with_probe_size(mut self, initial_probe_size: usize) -> Self {
        self.strings = StringDecoder::new(initial_probe_size);
        self
    }

    /// Read raw bytes from memory
    pub fn read_bytes(&self, address: Address, size: usize) -> MemoryResult<Vec<u8>> {
        let mut buffer = vec![0u8; size];
        self.handle.read_memory(address, &mut buffer)?;
        Ok(buffer)
    }

    /// Read a typed value from memory
    pub fn read<T: Scalar>(&self, address: Address) -> MemoryResult<T> {
        let mut buffer = [0u8; 8];
        let bytes = &mut buffer[..T::WIDTH];
        self.handle.read_memory(address, bytes)?;
        Ok(T::from_le_slice(bytes))
    }

    /// Follow a chain of 32-bit pointers and return the final 32-bit value
    pub fn read_pointer_chain(&self, base: Address, offsets: &[u64]) -> MemoryResult<u32> {
        pointer::resolve::<u32>(self, base, offsets)
    }

    /// Follow a chain of 64-bit pointers and return the final 64-bit value
    pub fn read_pointer_chain_u64(&self, base: Address, offsets: &[u64]) -> MemoryResult<u64> {
        pointer::resolve::<u64>(self, base, offsets)
    }

    /// Read a null-terminated UTF-8 string
    pub fn read_null_terminated_utf8(&self, address: Address) -> MemoryResult<String> {
        self.strings.read_utf8(self.handle, address)
    }

    /// Read a UTF-16 string terminated by a zero code unit
    pub fn read_null_terminated_utf16(&self, address: Address) -> MemoryResult<String> {
        self.strings.read_utf16(self.handle, address)
    }

    /// Read a MemoryValue from memory.
    ///
    /// `Bytes` needs a length and is read as `len` bytes; the other types
    /// ignore it.
    pub fn read_value(
        &self,
        address: Address,
        value_type: ValueType,
        len: usize,
    ) -> MemoryResult<MemoryValue> {
        let value = match value_type {
            ValueType::U8 => MemoryValue::U8(self.read(address)?),
            ValueType::U16 => MemoryValue::U16(self.read(address)?),
            ValueType::U32 => MemoryValue::U32(self.read(address)?),
            ValueType::U64 => MemoryValue::U64(self.read(address)?),
            ValueType::Usize => MemoryValue::Usize(self.read(address)?),
            ValueType::I8 => MemoryValue::I8(self.read(address)?),
            ValueType::I16 => MemoryValue::I16(self.read(address)?),
            ValueType::I32 => MemoryValue::I32(self.read(address)?),
            ValueType::I64 => MemoryValue::I64(self.read(address)?),
            ValueType::F32 => MemoryValue::F32(self.read(address)?),
            ValueType::F64 => MemoryValue::F64(self.read(address)?),
            ValueType::Bytes => MemoryValue::Bytes(self.read_bytes(address, len)?),
            ValueType::String => MemoryValue::String(self.read_null_terminated_utf8(address)?),
            ValueType::WideString => {
                MemoryValue::WideString(self.read_null_terminated_utf16(address)?)
            }
        };
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::MemoryError;
    use crate::memory::MockMemory;

    fn create_test_handle() -> ProcessHandle {
        let mut data = vec![0u8; 64];
        data[..4].copy_from_slice(&0xDEADBEEFu32.to_le_bytes());
        data[8..16].copy_from_slice(&(-2.5f64).to_le_bytes());
        data[16..20].copy_from_slice(b"abc\0");
        data[24..30].copy_from_slice(&[0x68, 0x00, 0x69, 0x00, 0x00, 0x00]);
        ProcessHandle::from_copier(42, MockMemory::new().with_region(0x4000, data))
    }

    #[test]
    fn test_read_scalars() {
        let handle = create_test_handle();
        let reader = handle.reader();

        assert_eq!(reader.read::<u32>(Address::new(0x4000)).unwrap(), 0xDEADBEEF);
        assert_eq!(reader.read::<u16>(Address::new(0x4002)).unwrap(), 0xDEAD);
        assert_eq!(reader.read::<i8>(Address::new(0x4003)).unwrap(), -34);
        assert_eq!(reader.read::<f64>(Address::new(0x4008)).unwrap(), -2.5);
    }

    #[test]
    fn test_read_is_unaligned_and_exact_width() {
        let handle = create_test_handle();
        // Last 8 bytes of the region start at 0x4038; one byte later runs off the end
        assert!(handle.reader().read::<u64>(Address::new(0x4038)).is_ok());
        let err = handle
            .reader()
            .read::<u64>(Address::new(0x4039))
            .unwrap_err();
        assert!(matches!(
            err,
            MemoryError::PartialTransfer {
                requested: 8,
                transferred: 7,
                ..
            }
        ));
    }

    #[test]
    fn test_read_bytes() {
        let handle = create_test_handle();
        let reader = handle.reader();
        assert_eq!(
            reader.read_bytes(Address::new(0x4000), 4).unwrap(),
            vec![0xEF, 0xBE, 0xAD, 0xDE]
        );
        assert!(reader.read_bytes(Address::new(0x4000), 0).unwrap().is_empty());
    }

    #[test]
    fn test_read_value_dispatch() {
        let handle = create_test_handle();
        let reader = handle.reader();

        assert_eq!(
            reader.read_value(Address::new(0x4000), ValueType::U32, 0).unwrap(),
            MemoryValue::U32(0xDEADBEEF)
        );
        assert_eq!(
            reader.read_value(Address::new(0x4010), ValueType::String, 0).unwrap(),
            MemoryValue::String("abc".to_string())
        );
        assert_eq!(
            reader.read_value(Address::new(0x4018), ValueType::WideString, 0).unwrap(),
            MemoryValue::WideString("hi".to_string())
        );
        assert_eq!(
            reader.read_value(Address::new(0x4010), ValueType::Bytes, 2).unwrap(),
            MemoryValue::Bytes(b"ab".to_vec())
        );
    }

    #[test]
    fn test_custom_probe_size() {
        let handle = create_test_handle();
        let reader = handle.reader().with_probe_size(2);
        assert_eq!(
            reader.read_null_terminated_utf8(Address::new(0x4010)).unwrap(),
            "abc"
        );
    }

    #[test]
    fn test_unmapped_read_is_error() {
        let handle = create_test_handle();
        let err = handle.reader().read::<u32>(Address::new(0x10)).unwrap_err();
        assert!(matches!(err, MemoryError::UnreadableAddress { .. }));
    }
}
