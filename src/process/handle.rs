//! Owned capability over one target process's address space

use crate::core::types::{Address, Direction, MemoryError, MemoryResult, ProcessId};
use crate::memory::copier::RawCopier;
use crate::memory::{MemoryReader, MemoryWriter};
use std::fmt;
use tracing::trace;

/// Read/write access to the memory of one process.
///
/// The backend is chosen when the handle is built and any OS resource it
/// holds is released when the handle is dropped or [`close`](Self::close)d.
/// The handle can be shared by reference between threads.
pub struct ProcessHandle {
    pid: ProcessId,
    name: Option<String>,
    copier: Box<dyn RawCopier>,
}

impl ProcessHandle {
    /// Wraps a custom backend
    pub fn from_copier(pid: ProcessId, copier: impl RawCopier + 'static) -> Self {
        ProcessHandle {
            pid,
            name: None,
            copier: Box::new(copier),
        }
    }

    /// Opens the process with the given PID using the platform backend
    pub fn open(pid: ProcessId) -> MemoryResult<Self> {
        super::discovery::open_by_pid(pid)
    }

    /// Opens the first process whose executable file name equals `name`
    pub fn find_by_name(name: &str) -> MemoryResult<Self> {
        super::discovery::open_by_name(name)
    }

    /// Records the executable name the handle was found by
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Get the process ID
    pub fn pid(&self) -> ProcessId {
        self.pid
    }

    /// Executable name, when the handle was found by name
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Name of the backend serving this handle
    pub fn backend_name(&self) -> &'static str {
        self.copier.backend_name()
    }

    /// Base address of a loaded module, matched case-sensitively by file name
    pub fn module_base(&self, module_name: &str) -> MemoryResult<Address> {
        super::discovery::module_base(self.pid, module_name)
    }

    /// Typed reader over this process
    pub fn reader(&self) -> MemoryReader<'_> {
        MemoryReader::new(self)
    }

    /// Typed writer over this process
    pub fn writer(&self) -> MemoryWriter<'_> {
        MemoryWriter::new(self)
    }

    /// Fills `buffer` from target memory at `address`, all or nothing
    pub fn read_memory(&self, address: Address, buffer: &mut [u8]) -> MemoryResult<()> {
        if buffer.is_empty() {
            return Ok(());
        }
        let transferred = self.copier.read_at(address, buffer)?;
        self.check_transfer(Direction::Read, address, buffer.len(), transferred)
    }

    /// Writes `data` into target memory at `address`, all or nothing
    pub fn write_memory(&self, address: Address, data: &[u8]) -> MemoryResult<()> {
        if data.is_empty() {
            return Ok(());
        }
        let transferred = self.copier.write_at(address, data)?;
        self.check_transfer(Direction::Write, address, data.len(), transferred)
    }

    /// Releases the handle explicitly
    pub fn close(self) {
        trace!(pid = self.pid, "closing process handle");
    }

    fn check_transfer(
        &self,
        direction: Direction,
        address: Address,
        requested: usize,
        transferred: usize,
    ) -> MemoryResult<()> {
        trace!(
            pid = self.pid,
            %direction,
            %address,
            requested,
            transferred,
            "raw copy"
        );
        if transferred != requested {
            return Err(MemoryError::partial(direction, address, requested, transferred));
        }
        Ok(())
    }
}

impl fmt::Debug for ProcessHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProcessHandle")
            .field("pid", &self.pid)
            .field("name", &self.name)
            .field("backend", &self.copier.backend_name())
            .finish()
    }
}

impl fmt::Display for ProcessHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ProcessHandle(pid={}, backend={})",
            self.pid,
            self.copier.backend_name()
        )
    }
}
