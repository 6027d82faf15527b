//! Error types shared by every memory operation

use super::address::Address;
use super::transfer::Direction;
use std::fmt;
use thiserror::Error;

/// Step of a pointer chain at which resolution stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChainStep {
    /// The initial read at the base address
    Base,
    /// The read after applying the offset at this index
    Offset(usize),
}

impl fmt::Display for ChainStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChainStep::Base => write!(f, "base"),
            ChainStep::Offset(index) => write!(f, "offset #{}", index),
        }
    }
}

/// Main error type for memory operations
#[derive(Error, Debug)]
pub enum MemoryError {
    #[error("Invalid memory address: {0}")]
    InvalidAddress(String),

    #[error("Process not found: {0}")]
    ProcessNotFound(String),

    #[error("Access denied to process {pid}: {reason}")]
    ProcessAccessDenied { pid: u32, reason: String },

    #[error("Address {address} is not accessible ({direction} of {len} bytes)")]
    UnreadableAddress {
        direction: Direction,
        address: Address,
        len: usize,
    },

    #[error("Partial {direction} at {address}: requested {requested} bytes, transferred {transferred}")]
    PartialTransfer {
        direction: Direction,
        address: Address,
        requested: usize,
        transferred: usize,
    },

    #[error("Failed to decode {encoding} string: {reason}")]
    DecodeError {
        encoding: &'static str,
        reason: String,
    },

    #[error("Pointer chain broken at {step}: {source}")]
    ChainStepFailed {
        step: ChainStep,
        #[source]
        source: Box<MemoryError>,
    },

    #[error("Module not found: {0}")]
    ModuleNotFound(String),

    #[error("Invalid value type: {0}")]
    InvalidValueType(String),

    #[error("Unsupported platform: {0}")]
    UnsupportedPlatform(String),

    #[error("Windows API error {code} in {context}")]
    WindowsApi { code: u32, context: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for memory operations
pub type MemoryResult<T> = Result<T, MemoryError>;

impl MemoryError {
    /// Creates an access denied error for a process
    pub fn access_denied(pid: u32, reason: impl Into<String>) -> Self {
        MemoryError::ProcessAccessDenied {
            pid,
            reason: reason.into(),
        }
    }

    /// Creates an error for a range the target does not map
    pub fn unreadable(direction: Direction, address: Address, len: usize) -> Self {
        MemoryError::UnreadableAddress {
            direction,
            address,
            len,
        }
    }

    /// Creates an error for a copy that moved fewer bytes than requested
    pub fn partial(
        direction: Direction,
        address: Address,
        requested: usize,
        transferred: usize,
    ) -> Self {
        MemoryError::PartialTransfer {
            direction,
            address,
            requested,
            transferred,
        }
    }

    /// Creates a text decoding error
    pub fn decode(encoding: &'static str, reason: impl Into<String>) -> Self {
        MemoryError::DecodeError {
            encoding,
            reason: reason.into(),
        }
    }

    /// Wraps the error of a failed pointer chain step
    pub fn chain_step(step: ChainStep, source: MemoryError) -> Self {
        MemoryError::ChainStepFailed {
            step,
            source: Box::new(source),
        }
    }

    /// True when the target range is unmapped or only partially mapped
    pub fn is_unreadable(&self) -> bool {
        match self {
            MemoryError::UnreadableAddress { .. } | MemoryError::PartialTransfer { .. } => true,
            MemoryError::ChainStepFailed { source, .. } => source.is_unreadable(),
            _ => false,
        }
    }

    /// True when the failure comes from missing rights rather than target state
    pub fn is_permission_error(&self) -> bool {
        match self {
            MemoryError::ProcessAccessDenied { .. } => true,
            MemoryError::ChainStepFailed { source, .. } => source.is_permission_error(),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = MemoryError::InvalidAddress("0xDEADBEEF".to_string());
        assert_eq!(err.to_string(), "Invalid memory address: 0xDEADBEEF");

        let err = MemoryError::access_denied(1234, "cannot open /proc/1234/mem");
        assert_eq!(
            err.to_string(),
            "Access denied to process 1234: cannot open /proc/1234/mem"
        );
    }

    #[test]
    fn test_all_error_variants() {
        let errors: Vec<(MemoryError, &str)> = vec![
            (
                MemoryError::ProcessNotFound("notepad.exe".to_string()),
                "Process not found: notepad.exe",
            ),
            (
                MemoryError::unreadable(Direction::Read, Address::new(0x1000), 4),
                "Address 0x0000000000001000 is not accessible (read of 4 bytes)",
            ),
            (
                MemoryError::partial(Direction::Write, Address::new(0x2000), 8, 3),
                "Partial write at 0x0000000000002000: requested 8 bytes, transferred 3",
            ),
            (
                MemoryError::decode("UTF-16", "unpaired surrogate"),
                "Failed to decode UTF-16 string: unpaired surrogate",
            ),
            (
                MemoryError::ModuleNotFound("kernel32.dll".to_string()),
                "Module not found: kernel32.dll",
            ),
            (
                MemoryError::UnsupportedPlatform("macos".to_string()),
                "Unsupported platform: macos",
            ),
            (
                MemoryError::WindowsApi {
                    code: 6,
                    context: "OpenProcess".to_string(),
                },
                "Windows API error 6 in OpenProcess",
            ),
        ];

        for (error, expected) in errors {
            assert_eq!(error.to_string(), expected);
        }
    }

    #[test]
    fn test_chain_step_error() {
        let inner = MemoryError::unreadable(Direction::Read, Address::new(0x10), 4);
        let err = MemoryError::chain_step(ChainStep::Offset(1), inner);
        assert!(err.to_string().starts_with("Pointer chain broken at offset #1:"));
        assert!(err.is_unreadable());
        assert!(!err.is_permission_error());

        let source = std::error::Error::source(&err).expect("chain errors carry a source");
        assert!(source.to_string().contains("0x0000000000000010"));

        let base = MemoryError::chain_step(ChainStep::Base, MemoryError::access_denied(1, "x"));
        assert!(base.to_string().contains("at base"));
        assert!(base.is_permission_error());
    }

    #[test]
    fn test_classification() {
        assert!(MemoryError::partial(Direction::Read, Address::null(), 4, 2).is_unreadable());
        assert!(!MemoryError::decode("UTF-8", "bad").is_unreadable());
        assert!(MemoryError::access_denied(7, "denied").is_permission_error());
        assert!(!MemoryError::unreadable(Direction::Read, Address::null(), 1).is_permission_error());
    }

    #[test]
    fn test_from_io_error() {
        use std::io;

        let io_err = io::Error::new(io::ErrorKind::NotFound, "gone");
        let mem_err: MemoryError = io_err.into();
        assert!(matches!(mem_err, MemoryError::Io(_)));
    }
}
