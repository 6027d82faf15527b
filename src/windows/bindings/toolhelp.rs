//! ToolHelp32 module snapshots

use crate::core::types::{Address, MemoryResult, ProcessId};
use crate::windows::types::Handle;
use crate::windows::utils::{last_error_as_memory_error, wide_to_string};
use std::mem;
use winapi::shared::minwindef::FALSE;
use winapi::um::tlhelp32::{
    CreateToolhelp32Snapshot, Module32FirstW, Module32NextW, MODULEENTRY32W, TH32CS_SNAPMODULE,
    TH32CS_SNAPMODULE32,
};

/// Module loaded in a target process
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleEntry {
    pub name: String,
    pub base: Address,
}

/// Iterator over the modules of a process at snapshot time
pub struct ModuleSnapshot {
    snapshot: Handle,
    first_called: bool,
}

impl ModuleSnapshot {
    /// Snapshot both native and 32-bit modules of `pid`
    pub fn new(pid: ProcessId) -> MemoryResult<Self> {
        let raw = unsafe { CreateToolhelp32Snapshot(TH32CS_SNAPMODULE | TH32CS_SNAPMODULE32, pid) };
        let snapshot = Handle::new(raw)
            .ok_or_else(|| last_error_as_memory_error(format!("CreateToolhelp32Snapshot({})", pid)))?;
        Ok(ModuleSnapshot {
            snapshot,
            first_called: false,
        })
    }
}

impl Iterator for ModuleSnapshot {
    type Item = ModuleEntry;

    fn next(&mut self) -> Option<ModuleEntry> {
        let mut entry: MODULEENTRY32W = unsafe { mem::zeroed() };
        entry.dwSize = mem::size_of::<MODULEENTRY32W>() as u32;

        let success = unsafe {
            if self.first_called {
                Module32NextW(self.snapshot.raw(), &mut entry)
            } else {
                self.first_called = true;
                Module32FirstW(self.snapshot.raw(), &mut entry)
            }
        };
        if success == FALSE {
            return None;
        }

        Some(ModuleEntry {
            name: wide_to_string(&entry.szModule),
            base: Address::new(entry.modBaseAddr as usize as u64),
        })
    }
}
