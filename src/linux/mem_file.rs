//! Raw copier backed by positioned I/O on `/proc/<pid>/mem`

use crate::core::types::{Address, Direction, MemoryError, MemoryResult, ProcessId};
use crate::memory::copier::RawCopier;
use nix::errno::Errno;
use std::fs::{File, OpenOptions};
use std::io;
use std::os::unix::fs::FileExt;
use tracing::{debug, warn};

/// Copies through the memory pseudo-file of a process.
///
/// The file is opened once and shared; positioned reads and writes carry
/// no seek state, so concurrent calls with distinct buffers are safe.
#[derive(Debug)]
pub struct ProcMemCopier {
    pid: ProcessId,
    file: File,
    writable: bool,
}

impl ProcMemCopier {
    /// Opens `/proc/<pid>/mem`, read-write when permitted, else read-only
    pub fn open(pid: ProcessId) -> MemoryResult<Self> {
        let path = mem_path(pid);

        match OpenOptions::new().read(true).write(true).open(&path) {
            Ok(file) => Ok(ProcMemCopier {
                pid,
                file,
                writable: true,
            }),
            Err(err) if err.kind() == io::ErrorKind::PermissionDenied => {
                warn!(pid, path = %path, "no write access, opening read-only");
                let file = OpenOptions::new()
                    .read(true)
                    .open(&path)
                    .map_err(|e| open_error(pid, &path, e))?;
                Ok(ProcMemCopier {
                    pid,
                    file,
                    writable: false,
                })
            }
            Err(err) => Err(open_error(pid, &path, err)),
        }
    }

    fn transfer_error(&self, direction: Direction, address: Address, len: usize, err: io::Error) -> MemoryError {
        debug!(pid = self.pid, %direction, %address, len, error = %err, "proc mem transfer failed");
        if err.kind() == io::ErrorKind::PermissionDenied {
            return MemoryError::access_denied(self.pid, format!("{} denied: {}", direction, err));
        }
        match err.raw_os_error().map(Errno::from_raw) {
            Some(Errno::EIO | Errno::EFAULT | Errno::EINVAL) => {
                MemoryError::unreadable(direction, address, len)
            }
            Some(Errno::ESRCH) => {
                MemoryError::ProcessNotFound(format!("PID: {} has exited", self.pid))
            }
            _ => MemoryError::Io(err),
        }
    }
}

impl RawCopier for ProcMemCopier {
    fn read_at(&self, address: Address, buffer: &mut [u8]) -> MemoryResult<usize> {
        self.file
            .read_at(buffer, address.as_u64())
            .map_err(|e| self.transfer_error(Direction::Read, address, buffer.len(), e))
    }

    fn write_at(&self, address: Address, data: &[u8]) -> MemoryResult<usize> {
        if !self.writable {
            return Err(MemoryError::access_denied(
                self.pid,
                format!("{} was opened read-only", mem_path(self.pid)),
            ));
        }
        self.file
            .write_at(data, address.as_u64())
            .map_err(|e| self.transfer_error(Direction::Write, address, data.len(), e))
    }

    fn backend_name(&self) -> &'static str {
        "procfs"
    }
}

fn mem_path(pid: ProcessId) -> String {
    format!("/proc/{}/mem", pid)
}

fn open_error(pid: ProcessId, path: &str, err: io::Error) -> MemoryError {
    match err.kind() {
        io::ErrorKind::NotFound => MemoryError::ProcessNotFound(format!("PID: {}", pid)),
        io::ErrorKind::PermissionDenied => {
            MemoryError::access_denied(pid, format!("cannot open {}: {}", path, err))
        }
        _ => MemoryError::Io(err),
    }
}
