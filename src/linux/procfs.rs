//! Process discovery through procfs

use crate::core::types::{Address, MemoryError, MemoryResult, ProcessId};
use std::fs;
use std::path::Path;
use tracing::{debug, trace};

/// One line of `/proc/<pid>/maps`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MapEntry {
    pub start: u64,
    pub end: u64,
    pub perms: String,
    pub path: Option<String>,
}

impl MapEntry {
    /// Final path component of the mapped file, if any
    pub fn file_name(&self) -> Option<&str> {
        self.path.as_deref().and_then(|p| p.rsplit('/').next())
    }
}

/// Check whether `/proc/<pid>` exists
pub fn process_exists(pid: ProcessId) -> bool {
    Path::new(&format!("/proc/{}", pid)).is_dir()
}

/// All numeric entries under `/proc`, ascending
pub fn list_pids() -> MemoryResult<Vec<ProcessId>> {
    let mut pids: Vec<ProcessId> = fs::read_dir("/proc")?
        .filter_map(|entry| entry.ok())
        .filter_map(|entry| entry.file_name().to_str()?.parse().ok())
        .collect();
    pids.sort_unstable();
    Ok(pids)
}

/// Find the lowest PID whose short name or executable file name equals `name`
pub fn find_pid_by_name(name: &str) -> MemoryResult<ProcessId> {
    for pid in list_pids()? {
        match process_matches(pid, name) {
            Ok(true) => {
                debug!(pid, name, "matched process by name");
                return Ok(pid);
            }
            Ok(false) => {}
            Err(err) => debug!(pid, error = %err, "skipping process"),
        }
    }

    Err(MemoryError::ProcessNotFound(name.to_string()))
}

fn process_matches(pid: ProcessId, name: &str) -> std::io::Result<bool> {
    let stat = fs::read_to_string(format!("/proc/{}/stat", pid))?;
    if comm_from_stat(&stat) == Some(name) {
        return Ok(true);
    }

    // comm is cut at 15 bytes, so long names only match through the executable
    Ok(exe_file_name(pid).as_deref() == Some(name))
}

/// Extract the command name from the contents of `/proc/<pid>/stat`.
///
/// The name sits between the first `(` and the last `)` and may itself
/// contain spaces or parentheses.
pub fn comm_from_stat(stat: &str) -> Option<&str> {
    let start = stat.find('(')?;
    let end = stat.rfind(')')?;
    stat.get(start + 1..end)
}

fn exe_file_name(pid: ProcessId) -> Option<String> {
    let target = fs::read_link(format!("/proc/{}/exe", pid)).ok()?;
    target.file_name()?.to_str().map(str::to_string)
}

/// Parse one maps line
pub fn parse_map_line(line: &str) -> Option<MapEntry> {
    let mut fields = line.split_whitespace();
    let (start, end) = fields.next()?.split_once('-')?;
    let perms = fields.next()?.to_string();
    // offset, device, inode
    for _ in 0..3 {
        fields.next()?;
    }
    let path: Vec<&str> = fields.collect();

    Some(MapEntry {
        start: u64::from_str_radix(start, 16).ok()?,
        end: u64::from_str_radix(end, 16).ok()?,
        perms,
        path: if path.is_empty() {
            None
        } else {
            Some(path.join(" "))
        },
    })
}

/// Lowest start address of any mapping whose file name equals `module`
pub fn module_base_in_maps(maps: &str, module: &str) -> Option<Address> {
    maps.lines()
        .filter_map(parse_map_line)
        .filter(|entry| entry.file_name() == Some(module))
        .map(|entry| entry.start)
        .min()
        .map(Address::new)
}

/// Load address of `module` in process `pid`
pub fn module_base(pid: ProcessId, module: &str) -> MemoryResult<Address> {
    let maps = fs::read_to_string(format!("/proc/{}/maps", pid)).map_err(|err| match err.kind() {
        std::io::ErrorKind::NotFound => MemoryError::ProcessNotFound(format!("PID: {}", pid)),
        std::io::ErrorKind::PermissionDenied => {
            MemoryError::access_denied(pid, format!("cannot read maps: {}", err))
        }
        _ => MemoryError::Io(err),
    })?;

    let base = module_base_in_maps(&maps, module)
        .ok_or_else(|| MemoryError::ModuleNotFound(module.to_string()))?;
    trace!(pid, module, %base, "module base resolved");
    Ok(base)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_MAPS: &str = "\
55d0c8a00000-55d0c8a02000 r--p 00000000 08:01 1048602                    /usr/bin/cat
55d0c8a02000-55d0c8a07000 r-xp 00002000 08:01 1048602                    /usr/bin/cat
55d0c9b3c000-55d0c9b5d000 rw-p 00000000 00:00 0                          [heap]
7f1d2c000000-7f1d2c028000 r--p 00000000 08:01 1054892                    /usr/lib/x86_64-linux-gnu/libc.so.6
7f1d2c300000-7f1d2c301000 rw-p 00000000 00:00 0
7f1d2c400000-7f1d2c401000 r--p 00000000 08:01 99                         /opt/my app/lib thing.so
";

    #[test]
    fn test_comm_from_stat() {
        assert_eq!(comm_from_stat("1234 (bash) S 1 1234"), Some("bash"));
        assert_eq!(
            comm_from_stat("99 (weird (name)) R 1 99"),
            Some("weird (name)")
        );
        assert_eq!(comm_from_stat("garbage"), None);
    }

    #[test]
    fn test_parse_map_line() {
        let entry = parse_map_line(SAMPLE_MAPS.lines().next().unwrap()).unwrap();
        assert_eq!(entry.start, 0x55d0c8a00000);
        assert_eq!(entry.end, 0x55d0c8a02000);
        assert_eq!(entry.perms, "r--p");
        assert_eq!(entry.file_name(), Some("cat"));

        let anonymous = parse_map_line(SAMPLE_MAPS.lines().nth(4).unwrap()).unwrap();
        assert_eq!(anonymous.path, None);
        assert_eq!(anonymous.file_name(), None);

        assert!(parse_map_line("not a maps line").is_none());
    }

    #[test]
    fn test_module_base_in_maps() {
        assert_eq!(
            module_base_in_maps(SAMPLE_MAPS, "cat"),
            Some(Address::new(0x55d0c8a00000))
        );
        assert_eq!(
            module_base_in_maps(SAMPLE_MAPS, "libc.so.6"),
            Some(Address::new(0x7f1d2c000000))
        );
        assert_eq!(
            module_base_in_maps(SAMPLE_MAPS, "lib thing.so"),
            Some(Address::new(0x7f1d2c400000))
        );
        // Matching is exact and case-sensitive
        assert_eq!(module_base_in_maps(SAMPLE_MAPS, "LIBC.so.6"), None);
        assert_eq!(module_base_in_maps(SAMPLE_MAPS, "libc"), None);
    }

    #[test]
    fn test_current_process_discovery() {
        let pid = std::process::id();
        assert!(process_exists(pid));
        assert!(list_pids().unwrap().contains(&pid));

        let exe = std::env::current_exe().unwrap();
        let exe_name = exe.file_name().unwrap().to_str().unwrap();
        let base = module_base(pid, exe_name).unwrap();
        assert!(!base.is_null());
    }

    #[test]
    fn test_missing_process() {
        assert!(!process_exists(u32::MAX));
        assert!(matches!(
            module_base(u32::MAX, "anything"),
            Err(MemoryError::ProcessNotFound(_))
        ));
        assert!(matches!(
            find_pid_by_name("definitely-not-running-procmem-test"),
            Err(MemoryError::ProcessNotFound(_))
        ));
    }
}
