//! Raw copier backed by ReadProcessMemory/WriteProcessMemory

use crate::core::types::{Address, Direction, MemoryResult, ProcessId};
use crate::memory::copier::RawCopier;
use crate::windows::bindings::kernel32;
use crate::windows::types::Handle;
use tracing::debug;
use winapi::um::winnt::{
    PROCESS_QUERY_INFORMATION, PROCESS_VM_OPERATION, PROCESS_VM_READ, PROCESS_VM_WRITE,
};

const ACCESS_RIGHTS: u32 =
    PROCESS_VM_READ | PROCESS_VM_WRITE | PROCESS_VM_OPERATION | PROCESS_QUERY_INFORMATION;

/// Process handle opened with read/write VM rights
pub struct Win32Copier {
    pid: ProcessId,
    handle: Handle,
}

impl Win32Copier {
    pub fn open(pid: ProcessId) -> MemoryResult<Self> {
        let handle = kernel32::open_process(pid, ACCESS_RIGHTS)?;
        Ok(Win32Copier { pid, handle })
    }
}

impl RawCopier for Win32Copier {
    fn read_at(&self, address: Address, buffer: &mut [u8]) -> MemoryResult<usize> {
        let remote = address.to_usize()?;
        kernel32::read_process_memory(&self.handle, remote, buffer).map_err(|code| {
            debug!(pid = self.pid, %address, %code, "ReadProcessMemory failed");
            code.into_transfer_error(self.pid, Direction::Read, address, buffer.len())
        })
    }

    fn write_at(&self, address: Address, data: &[u8]) -> MemoryResult<usize> {
        let remote = address.to_usize()?;
        kernel32::write_process_memory(&self.handle, remote, data).map_err(|code| {
            debug!(pid = self.pid, %address, %code, "WriteProcessMemory failed");
            code.into_transfer_error(self.pid, Direction::Write, address, data.len())
        })
    }

    fn backend_name(&self) -> &'static str {
        "win32"
    }
}
