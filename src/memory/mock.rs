//! In-memory backend for tests and offline use
//!
//! Serves reads and writes from a sparse set of mapped regions held in the
//! current process, so memory logic can be exercised without a live target.

use crate::core::types::{Address, Direction, MemoryError, MemoryResult};
use crate::memory::copier::RawCopier;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::RwLock;

#[derive(Debug, Clone)]
struct MockRegion {
    base: u64,
    data: Vec<u8>,
    writable: bool,
}

impl MockRegion {
    fn end(&self) -> u64 {
        self.base + self.data.len() as u64
    }

    fn contains(&self, address: u64) -> bool {
        address >= self.base && address < self.end()
    }
}

/// Mock target memory.
///
/// A copy that starts in a mapped region but runs past its end transfers
/// the mapped prefix and reports the short count, the way a positioned read
/// of `/proc/<pid>/mem` does. A copy that starts outside every region fails
/// with [`MemoryError::UnreadableAddress`].
#[derive(Debug, Default)]
pub struct MockMemory {
    regions: RwLock<Vec<MockRegion>>,
    reads: AtomicUsize,
    writes: AtomicUsize,
}

impl MockMemory {
    /// Creates an empty address space
    pub fn new() -> Self {
        Self::default()
    }

    /// Maps a writable region starting at `base`
    pub fn with_region(self, base: u64, data: impl Into<Vec<u8>>) -> Self {
        self.map(base, data.into(), true);
        self
    }

    /// Maps a region that rejects writes
    pub fn with_read_only_region(self, base: u64, data: impl Into<Vec<u8>>) -> Self {
        self.map(base, data.into(), false);
        self
    }

    /// Maps a region, replacing any region with the same base
    pub fn map(&self, base: u64, data: Vec<u8>, writable: bool) {
        let mut regions = self.regions.write().unwrap_or_else(|e| e.into_inner());
        regions.retain(|r| r.base != base);
        regions.push(MockRegion {
            base,
            data,
            writable,
        });
        regions.sort_by_key(|r| r.base);
    }

    /// Returns a copy of mapped bytes, or `None` if any byte is unmapped
    pub fn snapshot(&self, base: u64, len: usize) -> Option<Vec<u8>> {
        let mut out = vec![0u8; len];
        let copied = self.copy_out(Address::new(base), &mut out).ok()?;
        (copied == len).then_some(out)
    }

    /// Number of read calls served so far
    pub fn read_calls(&self) -> usize {
        self.reads.load(Ordering::Relaxed)
    }

    /// Number of write calls served so far
    pub fn write_calls(&self) -> usize {
        self.writes.load(Ordering::Relaxed)
    }

    fn copy_out(&self, address: Address, buffer: &mut [u8]) -> MemoryResult<usize> {
        let regions = self.regions.read().unwrap_or_else(|e| e.into_inner());
        let mut cursor = address.as_u64();
        let mut copied = 0;

        while copied < buffer.len() {
            let Some(region) = regions.iter().find(|r| r.contains(cursor)) else {
                break;
            };
            let start = (cursor - region.base) as usize;
            let take = (region.data.len() - start).min(buffer.len() - copied);
            buffer[copied..copied + take].copy_from_slice(&region.data[start..start + take]);
            copied += take;
            cursor += take as u64;
        }

        if copied == 0 && !buffer.is_empty() {
            return Err(MemoryError::unreadable(Direction::Read, address, buffer.len()));
        }
        Ok(copied)
    }

    fn copy_in(&self, address: Address, data: &[u8]) -> MemoryResult<usize> {
        let mut regions = self.regions.write().unwrap_or_else(|e| e.into_inner());
        let mut cursor = address.as_u64();
        let mut copied = 0;

        while copied < data.len() {
            let Some(region) = regions.iter_mut().find(|r| r.contains(cursor)) else {
                break;
            };
            if !region.writable {
                break;
            }
            let start = (cursor - region.base) as usize;
            let take = (region.data.len() - start).min(data.len() - copied);
            region.data[start..start + take].copy_from_slice(&data[copied..copied + take]);
            copied += take;
            cursor += take as u64;
        }

        if copied == 0 && !data.is_empty() {
            return Err(MemoryError::unreadable(Direction::Write, address, data.len()));
        }
        Ok(copied)
    }
}

impl RawCopier for MockMemory {
    fn read_at(&self, address: Address, buffer: &mut [u8]) -> MemoryResult<usize> {
        self.reads.fetch_add(1, Ordering::Relaxed);
        self.copy_out(address, buffer)
    }

    fn write_at(&self, address: Address, data: &[u8]) -> MemoryResult<usize> {
        self.writes.fetch_add(1, Ordering::Relaxed);
        self.copy_in(address, data)
    }

    fn backend_name(&self) -> &'static str {
        "mock"
    }
}
