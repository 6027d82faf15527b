//! Platform dispatch for opening processes and locating modules

use crate::core::types::{Address, MemoryResult, ProcessId};
use crate::process::ProcessHandle;

#[cfg(not(any(target_os = "linux", windows)))]
use crate::core::types::MemoryError;

/// Opens `pid` with the native backend
pub fn open_by_pid(pid: ProcessId) -> MemoryResult<ProcessHandle> {
    #[cfg(target_os = "linux")]
    {
        crate::linux::open(pid)
    }
    #[cfg(windows)]
    {
        crate::windows::open(pid)
    }
    #[cfg(not(any(target_os = "linux", windows)))]
    {
        let _ = pid;
        Err(unsupported())
    }
}

/// Opens the lowest-PID process whose executable name equals `name`
pub fn open_by_name(name: &str) -> MemoryResult<ProcessHandle> {
    #[cfg(target_os = "linux")]
    {
        crate::linux::open_by_name(name)
    }
    #[cfg(windows)]
    {
        crate::windows::open_by_name(name)
    }
    #[cfg(not(any(target_os = "linux", windows)))]
    {
        let _ = name;
        Err(unsupported())
    }
}

/// Load address of `module` inside `pid`
pub fn module_base(pid: ProcessId, module: &str) -> MemoryResult<Address> {
    #[cfg(target_os = "linux")]
    {
        crate::linux::module_base(pid, module)
    }
    #[cfg(windows)]
    {
        crate::windows::module_base(pid, module)
    }
    #[cfg(not(any(target_os = "linux", windows)))]
    {
        let _ = (pid, module);
        Err(unsupported())
    }
}

#[cfg(not(any(target_os = "linux", windows)))]
fn unsupported() -> MemoryError {
    MemoryError::UnsupportedPlatform(std::env::consts::OS.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[cfg(any(target_os = "linux", windows))]
    fn test_open_current_process() {
        let handle = open_by_pid(std::process::id()).unwrap();
        assert_eq!(handle.pid(), std::process::id());

        let value = 77u16;
        assert_eq!(handle.reader().read::<u16>(Address::of(&value)).unwrap(), 77);
    }

    #[test]
    #[cfg(any(target_os = "linux", windows))]
    fn test_open_missing_name() {
        let err = open_by_name("no-such-process-procmem-1f3a").unwrap_err();
        assert!(matches!(err, crate::MemoryError::ProcessNotFound(_)));
    }

    #[test]
    #[cfg(not(any(target_os = "linux", windows)))]
    fn test_unsupported_platform() {
        assert!(matches!(
            open_by_pid(1),
            Err(MemoryError::UnsupportedPlatform(_))
        ));
    }
}
