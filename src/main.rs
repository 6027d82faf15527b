use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use procmem::config::{validate_config, ConfigLoader, LoggingConfig};
use procmem::{Address, Config, MemoryValue, ProcessHandle, ValueType};
use serde_json::json;
use std::path::PathBuf;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "procmem")]
#[command(about = "Read and write the memory of another process", version)]
struct Args {
    /// Target process ID
    #[arg(long, conflicts_with = "name", required_unless_present = "name")]
    pid: Option<u32>,

    /// Target executable name (lowest PID wins)
    #[arg(long)]
    name: Option<String>,

    /// Path to config file
    #[arg(short, long, default_value = "procmem.toml", env = "PROCMEM_CONFIG")]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Read a typed value
    Read {
        address: Address,
        #[arg(value_name = "TYPE")]
        value_type: ValueType,
    },
    /// Write a typed value
    Write {
        address: Address,
        #[arg(value_name = "TYPE")]
        value_type: ValueType,
        value: String,
    },
    /// Read raw bytes and print them as hex
    ReadBytes { address: Address, len: usize },
    /// Write raw bytes given as hex
    WriteBytes { address: Address, hex: String },
    /// Read a null-terminated string
    String {
        address: Address,
        /// Decode as UTF-16 instead of UTF-8
        #[arg(long)]
        wide: bool,
    },
    /// Follow a pointer chain; offsets may be negative
    Chain {
        address: Address,
        #[arg(value_parser = parse_offset, allow_hyphen_values = true)]
        offsets: Vec<u64>,
        /// Pointer width in bits, 32 or 64
        #[arg(long)]
        width: Option<u8>,
    },
    /// Print the load address of a module
    Module { name: String },
}

fn main() -> Result<()> {
    let args = Args::parse();

    let config = ConfigLoader::new(&args.config)
        .load_or_default()
        .with_context(|| format!("Failed to load config from {:?}", args.config))?;
    validate_config(&config).context("Invalid configuration")?;

    init_tracing(&config.logging)?;
    debug!(?config, "configuration loaded");

    let handle = open_target(&args)?;
    info!(pid = handle.pid(), backend = handle.backend_name(), "attached");

    let output = run(&handle, &config, args.command)?;
    println!("{}", serde_json::to_string_pretty(&output)?);

    handle.close();
    Ok(())
}

fn init_tracing(logging: &LoggingConfig) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(&logging.level))?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(logging.with_target)
        .with_writer(std::io::stderr)
        .init();
    Ok(())
}

fn open_target(args: &Args) -> Result<ProcessHandle> {
    match (args.pid, args.name.as_deref()) {
        (Some(pid), _) => {
            ProcessHandle::open(pid).with_context(|| format!("Failed to open process {}", pid))
        }
        (None, Some(name)) => ProcessHandle::find_by_name(name)
            .with_context(|| format!("Failed to find process {:?}", name)),
        (None, None) => bail!("Either --pid or --name is required"),
    }
}

fn run(handle: &ProcessHandle, config: &Config, command: Command) -> Result<serde_json::Value> {
    let reader = handle
        .reader()
        .with_probe_size(config.memory.initial_probe_size);
    let writer = handle.writer();

    let output = match command {
        Command::Read {
            address,
            value_type,
        } => {
            if value_type == ValueType::Bytes {
                bail!("Use read-bytes to read a byte range");
            }
            let value = reader.read_value(address, value_type, 0)?;
            json!({ "address": address.to_string(), "len": value.size(), "value": value })
        }
        Command::Write {
            address,
            value_type,
            value,
        } => {
            let value = MemoryValue::parse(value_type, &value)?;
            writer.write_value(address, &value)?;
            json!({ "address": address.to_string(), "len": value.size(), "written": value })
        }
        Command::ReadBytes { address, len } => {
            let bytes = reader.read_bytes(address, len)?;
            json!({ "address": address.to_string(), "len": len, "hex": hex::encode(bytes) })
        }
        Command::WriteBytes { address, hex } => {
            let digits: String = hex.split_whitespace().collect();
            let bytes = hex::decode(digits.trim_start_matches("0x"))
                .with_context(|| format!("Invalid hex: {:?}", hex))?;
            writer.write_bytes(address, &bytes)?;
            json!({ "address": address.to_string(), "len": bytes.len() })
        }
        Command::String { address, wide } => {
            let value = if wide {
                MemoryValue::WideString(reader.read_null_terminated_utf16(address)?)
            } else {
                MemoryValue::String(reader.read_null_terminated_utf8(address)?)
            };
            json!({ "address": address.to_string(), "value": value })
        }
        Command::Chain {
            address,
            offsets,
            width,
        } => {
            let value = match width.unwrap_or(config.memory.pointer_width) {
                32 => MemoryValue::U32(reader.read_pointer_chain(address, &offsets)?),
                64 => MemoryValue::U64(reader.read_pointer_chain_u64(address, &offsets)?),
                other => bail!("Unsupported pointer width: {}", other),
            };
            json!({ "base": address.to_string(), "offsets": offsets, "value": value })
        }
        Command::Module { name } => {
            let base = handle.module_base(&name)?;
            json!({ "module": name, "base": base.to_string() })
        }
    };

    Ok(output)
}

/// Offsets are hex with `0x`, or decimal; a leading `-` wraps around
fn parse_offset(text: &str) -> Result<u64, String> {
    let (negative, magnitude) = match text.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, text),
    };
    let value = magnitude
        .parse::<Address>()
        .map_err(|e| e.to_string())?
        .as_u64();
    Ok(if negative { value.wrapping_neg() } else { value })
}
