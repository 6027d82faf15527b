//! The raw cross-process copy capability

use crate::core::types::{Address, MemoryResult};

/// Copies bytes between the target process and a caller buffer.
///
/// One implementation exists per backend. A call either transfers some
/// prefix of the requested range and reports its length, or fails as a
/// whole. Callers treat any count below `buffer.len()` as a failure.
pub trait RawCopier: Send + Sync {
    /// Copies `buffer.len()` bytes at `address` in the target into `buffer`
    fn read_at(&self, address: Address, buffer: &mut [u8]) -> MemoryResult<usize>;

    /// Copies `data` into the target at `address`
    fn write_at(&self, address: Address, data: &[u8]) -> MemoryResult<usize>;

    /// Short name of the backend, used in diagnostics
    fn backend_name(&self) -> &'static str;
}

impl<C: RawCopier + ?Sized> RawCopier for std::sync::Arc<C> {
    fn read_at(&self, address: Address, buffer: &mut [u8]) -> MemoryResult<usize> {
        (**self).read_at(address, buffer)
    }

    fn write_at(&self, address: Address, data: &[u8]) -> MemoryResult<usize> {
        (**self).write_at(address, data)
    }

    fn backend_name(&self) -> &'static str {
        (**self).backend_name()
    }
}
