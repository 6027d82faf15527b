//! Linux backend: `/proc/<pid>/mem` transfers and procfs discovery

pub mod mem_file;
pub mod procfs;

pub use mem_file::ProcMemCopier;

use crate::core::types::{Address, MemoryError, MemoryResult, ProcessId};
use crate::process::ProcessHandle;

/// Open a handle on a running process
pub fn open(pid: ProcessId) -> MemoryResult<ProcessHandle> {
    if !procfs::process_exists(pid) {
        return Err(MemoryError::ProcessNotFound(format!("PID: {}", pid)));
    }
    let copier = ProcMemCopier::open(pid)?;
    Ok(ProcessHandle::from_copier(pid, copier))
}

/// Open the lowest-PID process whose name equals `name`
pub fn open_by_name(name: &str) -> MemoryResult<ProcessHandle> {
    let pid = procfs::find_pid_by_name(name)?;
    Ok(open(pid)?.with_name(name))
}

/// Load address of a mapped module in `pid`
pub fn module_base(pid: ProcessId, module: &str) -> MemoryResult<Address> {
    procfs::module_base(pid, module)
}
