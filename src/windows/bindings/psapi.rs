//! PSAPI.dll bindings for process enumeration

use crate::core::types::{MemoryResult, ProcessId};
use crate::windows::types::Handle;
use crate::windows::utils::{last_error_as_memory_error, wide_to_string};
use winapi::shared::minwindef::{DWORD, FALSE, MAX_PATH};
use winapi::um::psapi::{EnumProcesses, GetProcessImageFileNameW};

/// Safe wrapper for EnumProcesses; the buffer grows until every PID fits
pub fn enum_processes() -> MemoryResult<Vec<ProcessId>> {
    let mut pids = vec![0u32; 1024];

    loop {
        let capacity = (pids.len() * std::mem::size_of::<DWORD>()) as DWORD;
        let mut bytes_needed = 0u32;
        let result = unsafe { EnumProcesses(pids.as_mut_ptr(), capacity, &mut bytes_needed) };
        if result == FALSE {
            return Err(last_error_as_memory_error("EnumProcesses"));
        }

        if bytes_needed < capacity {
            let count = bytes_needed as usize / std::mem::size_of::<DWORD>();
            pids.truncate(count);
            pids.retain(|&pid| pid != 0);
            return Ok(pids);
        }
        pids.resize(pids.len() * 2, 0);
    }
}

/// Device path of the process image, e.g. `\Device\HarddiskVolume3\app.exe`
pub fn process_image_file_name(handle: &Handle) -> MemoryResult<String> {
    let mut buffer = [0u16; MAX_PATH];
    let len = unsafe {
        GetProcessImageFileNameW(handle.raw(), buffer.as_mut_ptr(), buffer.len() as DWORD)
    };
    if len == 0 {
        return Err(last_error_as_memory_error("GetProcessImageFileNameW"));
    }
    Ok(wide_to_string(&buffer[..len as usize]))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enum_processes_contains_self() {
        let pids = enum_processes().unwrap();
        assert!(pids.contains(&std::process::id()));
    }
}
