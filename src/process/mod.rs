//! Process access
//!
//! This module provides the owned process handle and the platform
//! dispatch used to open one by PID or by executable name.

pub mod discovery;
pub mod handle;

pub use handle::ProcessHandle;
