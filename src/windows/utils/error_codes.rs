//! Windows error code handling utilities

use crate::core::types::{Address, Direction, MemoryError, ProcessId};
use std::fmt;
use winapi::shared::winerror::{
    ERROR_ACCESS_DENIED, ERROR_INVALID_ADDRESS, ERROR_INVALID_HANDLE, ERROR_INVALID_PARAMETER,
    ERROR_NOACCESS, ERROR_PARTIAL_COPY, ERROR_SUCCESS,
};
use winapi::um::errhandlingapi::GetLastError;

/// Windows error codes the backend distinguishes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    Success,
    AccessDenied,
    InvalidHandle,
    InvalidParameter,
    PartialCopy,
    InvalidAddress,
    NoAccess,
    Unknown(u32),
}

impl From<u32> for ErrorCode {
    fn from(code: u32) -> Self {
        match code {
            ERROR_SUCCESS => ErrorCode::Success,
            ERROR_ACCESS_DENIED => ErrorCode::AccessDenied,
            ERROR_INVALID_HANDLE => ErrorCode::InvalidHandle,
            ERROR_INVALID_PARAMETER => ErrorCode::InvalidParameter,
            ERROR_PARTIAL_COPY => ErrorCode::PartialCopy,
            ERROR_INVALID_ADDRESS => ErrorCode::InvalidAddress,
            ERROR_NOACCESS => ErrorCode::NoAccess,
            _ => ErrorCode::Unknown(code),
        }
    }
}

impl ErrorCode {
    /// Get the last Windows error
    pub fn last_error() -> Self {
        unsafe { ErrorCode::from(GetLastError()) }
    }

    /// Raw numeric value
    pub fn code(self) -> u32 {
        match self {
            ErrorCode::Success => ERROR_SUCCESS,
            ErrorCode::AccessDenied => ERROR_ACCESS_DENIED,
            ErrorCode::InvalidHandle => ERROR_INVALID_HANDLE,
            ErrorCode::InvalidParameter => ERROR_INVALID_PARAMETER,
            ErrorCode::PartialCopy => ERROR_PARTIAL_COPY,
            ErrorCode::InvalidAddress => ERROR_INVALID_ADDRESS,
            ErrorCode::NoAccess => ERROR_NOACCESS,
            ErrorCode::Unknown(code) => code,
        }
    }

    /// Maps a failed ReadProcessMemory/WriteProcessMemory call
    pub fn into_transfer_error(
        self,
        pid: ProcessId,
        direction: Direction,
        address: Address,
        len: usize,
    ) -> MemoryError {
        match self {
            ErrorCode::AccessDenied => {
                MemoryError::access_denied(pid, format!("{} denied by the OS", direction))
            }
            ErrorCode::PartialCopy | ErrorCode::InvalidAddress | ErrorCode::NoAccess => {
                MemoryError::unreadable(direction, address, len)
            }
            other => MemoryError::WindowsApi {
                code: other.code(),
                context: format!("{} of {} bytes at {}", direction, len, address),
            },
        }
    }

    /// Maps a failed OpenProcess call
    pub fn into_open_error(self, pid: ProcessId) -> MemoryError {
        match self {
            ErrorCode::AccessDenied => MemoryError::access_denied(pid, "OpenProcess denied"),
            ErrorCode::InvalidParameter => MemoryError::ProcessNotFound(format!("PID: {}", pid)),
            other => MemoryError::WindowsApi {
                code: other.code(),
                context: format!("OpenProcess({})", pid),
            },
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorCode::Success => write!(f, "Success"),
            ErrorCode::AccessDenied => write!(f, "Access denied"),
            ErrorCode::InvalidHandle => write!(f, "Invalid handle"),
            ErrorCode::InvalidParameter => write!(f, "Invalid parameter"),
            ErrorCode::PartialCopy => write!(f, "Partial copy"),
            ErrorCode::InvalidAddress => write!(f, "Invalid address"),
            ErrorCode::NoAccess => write!(f, "Invalid access to memory location"),
            ErrorCode::Unknown(code) => write!(f, "Unknown error: {}", code),
        }
    }
}

/// Last Windows error as a `WindowsApi` error with context
pub fn last_error_as_memory_error(context: impl Into<String>) -> MemoryError {
    MemoryError::WindowsApi {
        code: ErrorCode::last_error().code(),
        context: context.into(),
    }
}
