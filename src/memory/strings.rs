//! Null-terminated string decoding with adaptive probe reads
//!
//! The length of a string in the target is not known in advance and the
//! bytes after its terminator may be unmapped. Reads start with a large
//! probe and halve it whenever a read runs into unmapped memory, so a
//! terminator that sits right before the end of a mapped region is still
//! found. Any other failure ends the read at once.

use crate::core::types::{Address, MemoryError, MemoryResult};
use crate::process::ProcessHandle;
use encoding_rs::{Encoding, UTF_16BE, UTF_16LE};
use tracing::debug;

/// Probe size, in bytes, the first read of a string uses
pub const DEFAULT_PROBE_SIZE: usize = 2048;

/// Largest first probe a decoder will allocate
pub const MAX_PROBE_SIZE: usize = 1024 * 1024;

const BOM_BE: [u8; 2] = [0xFE, 0xFF];
const BOM_LE: [u8; 2] = [0xFF, 0xFE];

/// Width of the code units a string is scanned in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CodeUnit {
    Byte,
    Wide,
}

impl CodeUnit {
    const fn width(self) -> usize {
        match self {
            CodeUnit::Byte => 1,
            CodeUnit::Wide => 2,
        }
    }

    /// Byte offset of the first all-zero unit in `chunk`
    fn find_terminator(self, chunk: &[u8]) -> Option<usize> {
        match self {
            CodeUnit::Byte => chunk.iter().position(|&b| b == 0),
            CodeUnit::Wide => chunk
                .chunks_exact(2)
                .position(|unit| unit == [0, 0])
                .map(|index| index * 2),
        }
    }

    /// Largest whole number of units not above `size`, at least one unit
    fn round(self, size: usize) -> usize {
        let width = self.width();
        (size - size % width).max(width)
    }
}

/// Reads null-terminated strings out of a target process
#[derive(Debug, Clone, Copy)]
pub struct StringDecoder {
    initial_probe_size: usize,
}

impl Default for StringDecoder {
    fn default() -> Self {
        Self::new(DEFAULT_PROBE_SIZE)
    }
}

impl StringDecoder {
    /// Creates a decoder whose first read is `initial_probe_size` bytes,
    /// clamped to `1..=MAX_PROBE_SIZE`
    pub fn new(initial_probe_size: usize) -> Self {
        StringDecoder {
            initial_probe_size: initial_probe_size.clamp(1, MAX_PROBE_SIZE),
        }
    }

    /// Initial probe size in bytes
    pub fn initial_probe_size(&self) -> usize {
        self.initial_probe_size
    }

    /// Reads a NUL-terminated UTF-8 string
    pub fn read_utf8(&self, handle: &ProcessHandle, address: Address) -> MemoryResult<String> {
        let bytes = self.collect(handle, address, CodeUnit::Byte)?;
        String::from_utf8(bytes).map_err(|e| MemoryError::decode("UTF-8", e.to_string()))
    }

    /// Reads a UTF-16 string terminated by a zero code unit.
    ///
    /// A leading byte-order mark selects the byte order and is stripped;
    /// without one the text is little-endian.
    pub fn read_utf16(&self, handle: &ProcessHandle, address: Address) -> MemoryResult<String> {
        let bytes = self.collect(handle, address, CodeUnit::Wide)?;
        decode_utf16(&bytes)
    }

    /// Raw bytes of the string at `address`, terminator excluded
    fn collect(
        &self,
        handle: &ProcessHandle,
        address: Address,
        unit: CodeUnit,
    ) -> MemoryResult<Vec<u8>> {
        let mut collected = Vec::new();
        let mut probe = unit.round(self.initial_probe_size);
        let mut chunk = vec![0u8; probe];

        loop {
            let at = address.offset(collected.len() as u64);
            let window = &mut chunk[..probe];

            match handle.read_memory(at, window) {
                Ok(()) => {
                    if let Some(end) = unit.find_terminator(window) {
                        collected.extend_from_slice(&window[..end]);
                        return Ok(collected);
                    }
                    collected.extend_from_slice(window);
                }
                Err(err) if err.is_unreadable() && probe > unit.width() => {
                    let next = unit.round(probe / 2);
                    debug!(
                        address = %at,
                        probe,
                        next,
                        error = %err,
                        "string probe failed, shrinking"
                    );
                    probe = next;
                }
                Err(err) => return Err(err),
            }
        }
    }
}

/// Decodes little-endian stored UTF-16 bytes, honouring a leading BOM
pub fn decode_utf16(bytes: &[u8]) -> MemoryResult<String> {
    let (encoding, body): (&'static Encoding, &[u8]) = match bytes {
        [a, b, rest @ ..] if [*a, *b] == BOM_BE => (UTF_16BE, rest),
        [a, b, rest @ ..] if [*a, *b] == BOM_LE => (UTF_16LE, rest),
        _ => (UTF_16LE, bytes),
    };

    encoding
        .decode_without_bom_handling_and_without_replacement(body)
        .map(|text| text.into_owned())
        .ok_or_else(|| {
            MemoryError::decode(
                "UTF-16",
                format!("invalid {} code unit sequence", encoding.name()),
            )
        })
}
