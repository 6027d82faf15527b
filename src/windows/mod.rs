//! Windows backend
//!
//! Memory transfers go through ReadProcessMemory/WriteProcessMemory;
//! processes are found with EnumProcesses and modules with a ToolHelp32
//! snapshot.

pub mod bindings;
pub mod copier;
pub mod types;
pub mod utils;

pub use copier::Win32Copier;
pub use types::Handle;
pub use utils::ErrorCode;

use crate::core::types::{Address, MemoryError, MemoryResult, ProcessId};
use crate::process::ProcessHandle;
use bindings::{kernel32, psapi, ModuleSnapshot};
use tracing::debug;
use winapi::um::winnt::PROCESS_QUERY_LIMITED_INFORMATION;

/// Open a handle on a running process
pub fn open(pid: ProcessId) -> MemoryResult<ProcessHandle> {
    let copier = Win32Copier::open(pid)?;
    Ok(ProcessHandle::from_copier(pid, copier))
}

/// Lowest PID whose image file name equals `name`
pub fn find_pid_by_name(name: &str) -> MemoryResult<ProcessId> {
    let mut pids = psapi::enum_processes()?;
    pids.sort_unstable();

    for pid in pids {
        let image = kernel32::open_process(pid, PROCESS_QUERY_LIMITED_INFORMATION)
            .and_then(|handle| psapi::process_image_file_name(&handle));
        match image {
            Ok(path) if utils::extract_filename(&path) == name => {
                debug!(pid, name, "matched process by name");
                return Ok(pid);
            }
            Ok(_) => {}
            Err(err) => debug!(pid, error = %err, "skipping process"),
        }
    }

    Err(MemoryError::ProcessNotFound(name.to_string()))
}

/// Open the lowest-PID process whose image file name equals `name`
pub fn open_by_name(name: &str) -> MemoryResult<ProcessHandle> {
    let pid = find_pid_by_name(name)?;
    Ok(open(pid)?.with_name(name))
}

/// Base address of the first module named exactly `module`
pub fn module_base(pid: ProcessId, module: &str) -> MemoryResult<Address> {
    ModuleSnapshot::new(pid)?
        .find(|entry| entry.name == module)
        .map(|entry| entry.base)
        .ok_or_else(|| MemoryError::ModuleNotFound(module.to_string()))
}
