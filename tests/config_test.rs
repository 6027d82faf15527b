//! Configuration loading and validation

use pretty_assertions::assert_eq;
use procmem::config::{validate_config, Config, ConfigError, ConfigLoader};
use procmem::memory::MAX_PROBE_SIZE;
use std::fs;
use tempfile::TempDir;

#[test]
fn test_full_config_file() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("procmem.toml");
    fs::write(
        &path,
        r#"
[memory]
initial_probe_size = 512
pointer_width = 64

[logging]
level = "debug"
with_target = true
"#,
    )
    .unwrap();

    let config = ConfigLoader::new(&path).load_or_default().unwrap();
    assert_eq!(config.memory.initial_probe_size, 512);
    assert_eq!(config.memory.pointer_width, 64);
    assert_eq!(config.logging.level, "debug");
    assert!(config.logging.with_target);
    assert!(validate_config(&config).is_ok());
}

#[test]
fn test_missing_file_gives_defaults() {
    let temp_dir = TempDir::new().unwrap();
    let loader = ConfigLoader::new(temp_dir.path().join("absent.toml"));
    assert_eq!(loader.load_or_default().unwrap(), Config::default());
}

#[test]
fn test_invalid_values_rejected() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("bad.toml");
    fs::write(&path, "[memory]\ninitial_probe_size = 1\n").unwrap();

    let config = ConfigLoader::new(&path).load().unwrap();
    assert!(matches!(
        validate_config(&config),
        Err(ConfigError::Invalid(_))
    ));
}

#[test]
fn test_oversized_probe_rejected() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("huge.toml");
    fs::write(&path, "[memory]\ninitial_probe_size = 1073741824\n").unwrap();

    let config = ConfigLoader::new(&path).load().unwrap();
    assert!(config.memory.initial_probe_size > MAX_PROBE_SIZE);
    assert!(matches!(
        validate_config(&config),
        Err(ConfigError::Invalid(_))
    ));
}

#[test]
fn test_probe_size_reaches_reader() {
    use procmem::{Address, MockMemory, ProcessHandle};
    use std::sync::Arc;

    let mut config = Config::default();
    config.memory.initial_probe_size = 4;

    let mock = Arc::new(MockMemory::new().with_region(0x100, b"abcdefgh\0xyz".to_vec()));
    let handle = ProcessHandle::from_copier(1, mock.clone());
    let text = handle
        .reader()
        .with_probe_size(config.memory.initial_probe_size)
        .read_null_terminated_utf8(Address::new(0x100))
        .unwrap();

    assert_eq!(text, "abcdefgh");
    assert_eq!(mock.read_calls(), 3);
}
