//! Kernel32.dll bindings for process and memory operations

use crate::core::types::{MemoryResult, ProcessId};
use crate::windows::types::Handle;
use crate::windows::utils::ErrorCode;
use winapi::shared::minwindef::{DWORD, FALSE, LPCVOID, LPVOID};
use winapi::um::memoryapi::{ReadProcessMemory, WriteProcessMemory};
use winapi::um::processthreadsapi::OpenProcess;

/// Safe wrapper for OpenProcess
pub fn open_process(pid: ProcessId, desired_access: DWORD) -> MemoryResult<Handle> {
    let raw = unsafe { OpenProcess(desired_access, FALSE, pid) };
    Handle::new(raw).ok_or_else(|| ErrorCode::last_error().into_open_error(pid))
}

/// Safe wrapper for ReadProcessMemory
///
/// Returns the byte count on success and the last error code on failure.
pub fn read_process_memory(
    handle: &Handle,
    address: usize,
    buffer: &mut [u8],
) -> Result<usize, ErrorCode> {
    let mut bytes_read = 0;

    // The OS validates the remote range; the local buffer is exclusively borrowed
    let result = unsafe {
        ReadProcessMemory(
            handle.raw(),
            address as LPCVOID,
            buffer.as_mut_ptr() as LPVOID,
            buffer.len(),
            &mut bytes_read,
        )
    };

    if result == FALSE {
        Err(ErrorCode::last_error())
    } else {
        Ok(bytes_read)
    }
}

/// Safe wrapper for WriteProcessMemory
pub fn write_process_memory(
    handle: &Handle,
    address: usize,
    data: &[u8],
) -> Result<usize, ErrorCode> {
    let mut bytes_written = 0;

    let result = unsafe {
        WriteProcessMemory(
            handle.raw(),
            address as LPVOID,
            data.as_ptr() as LPCVOID,
            data.len(),
            &mut bytes_written,
        )
    };

    if result == FALSE {
        Err(ErrorCode::last_error())
    } else {
        Ok(bytes_written)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::MemoryError;
    use winapi::um::winnt::PROCESS_VM_READ;

    #[test]
    fn test_open_invalid_process() {
        let result = open_process(0, PROCESS_VM_READ);
        assert!(matches!(
            result,
            Err(MemoryError::ProcessNotFound(_)) | Err(MemoryError::ProcessAccessDenied { .. })
        ));
    }

    #[test]
    fn test_read_own_memory() {
        let handle = open_process(std::process::id(), PROCESS_VM_READ).unwrap();
        let value = 0xA1B2_C3D4u32;
        let mut buffer = [0u8; 4];
        let read =
            read_process_memory(&handle, &value as *const u32 as usize, &mut buffer).unwrap();
        assert_eq!(read, 4);
        assert_eq!(u32::from_le_bytes(buffer), value);
    }
}
