//! Windows API bindings
//!
//! Thin wrappers over the system calls the backend needs. Every unsafe
//! FFI call in the crate lives below this module.

pub mod kernel32;
pub mod psapi;
pub mod toolhelp;

pub use toolhelp::{ModuleEntry, ModuleSnapshot};
