//! Owned HANDLE with automatic cleanup

use std::ptr;
use winapi::shared::minwindef::FALSE;
use winapi::um::handleapi::{CloseHandle, INVALID_HANDLE_VALUE};
use winapi::um::winnt::HANDLE;

/// Owned Windows HANDLE, closed on drop
pub struct Handle {
    handle: HANDLE,
}

impl Handle {
    /// Takes ownership of `handle`; null and `INVALID_HANDLE_VALUE` are rejected
    pub fn new(handle: HANDLE) -> Option<Self> {
        if handle.is_null() || handle == INVALID_HANDLE_VALUE {
            None
        } else {
            Some(Handle { handle })
        }
    }

    /// Get the raw handle
    pub fn raw(&self) -> HANDLE {
        self.handle
    }
}

impl Drop for Handle {
    fn drop(&mut self) {
        unsafe {
            if CloseHandle(self.handle) == FALSE {
                tracing::debug!("CloseHandle failed");
            }
        }
        self.handle = ptr::null_mut();
    }
}

// HANDLE values are process-wide and the kernel serialises calls on them
unsafe impl Send for Handle {}
unsafe impl Sync for Handle {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_handles_rejected() {
        assert!(Handle::new(ptr::null_mut()).is_none());
        assert!(Handle::new(INVALID_HANDLE_VALUE).is_none());
    }
}
