//! Memory value enum for handling different data types

use super::error::{MemoryError, MemoryResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Represents different types of values that can be stored in memory
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value")]
pub enum MemoryValue {
    I8(i8),
    I16(i16),
    I32(i32),
    I64(i64),
    U8(u8),
    U16(u16),
    U32(u32),
    U64(u64),
    /// Pointer-sized unsigned integer of the host
    Usize(usize),
    F32(f32),
    F64(f64),
    Bytes(Vec<u8>),
    String(String),
    WideString(String),
}

impl MemoryValue {
    /// Returns the number of bytes this value occupies in target memory,
    /// including the terminator for strings
    pub fn size(&self) -> usize {
        match self {
            MemoryValue::I8(_) | MemoryValue::U8(_) => 1,
            MemoryValue::I16(_) | MemoryValue::U16(_) => 2,
            MemoryValue::I32(_) | MemoryValue::U32(_) | MemoryValue::F32(_) => 4,
            MemoryValue::I64(_) | MemoryValue::U64(_) | MemoryValue::F64(_) => 8,
            MemoryValue::Usize(_) => std::mem::size_of::<usize>(),
            MemoryValue::Bytes(b) => b.len(),
            MemoryValue::String(s) => s.len() + 1,
            MemoryValue::WideString(s) => (s.encode_utf16().count() + 1) * 2,
        }
    }

    /// Gets the value type enum for this value
    pub fn value_type(&self) -> ValueType {
        match self {
            MemoryValue::I8(_) => ValueType::I8,
            MemoryValue::I16(_) => ValueType::I16,
            MemoryValue::I32(_) => ValueType::I32,
            MemoryValue::I64(_) => ValueType::I64,
            MemoryValue::U8(_) => ValueType::U8,
            MemoryValue::U16(_) => ValueType::U16,
            MemoryValue::U32(_) => ValueType::U32,
            MemoryValue::U64(_) => ValueType::U64,
            MemoryValue::Usize(_) => ValueType::Usize,
            MemoryValue::F32(_) => ValueType::F32,
            MemoryValue::F64(_) => ValueType::F64,
            MemoryValue::Bytes(_) => ValueType::Bytes,
            MemoryValue::String(_) => ValueType::String,
            MemoryValue::WideString(_) => ValueType::WideString,
        }
    }

    /// Parses a textual value as the given type.
    ///
    /// Integers accept a `0x` prefix, bytes are given as hex.
    pub fn parse(value_type: ValueType, text: &str) -> MemoryResult<Self> {
        let invalid = || MemoryError::InvalidValueType(format!("{:?} is not a valid {}", text, value_type));
        let text = text.trim();

        macro_rules! int {
            ($variant:ident, $ty:ty) => {{
                let parsed = match text.strip_prefix("0x").or_else(|| text.strip_prefix("0X")) {
                    Some(hex) => <$ty>::from_str_radix(hex, 16),
                    None => text.parse::<$ty>(),
                };
                parsed.map(MemoryValue::$variant).map_err(|_| invalid())
            }};
        }

        match value_type {
            ValueType::I8 => int!(I8, i8),
            ValueType::I16 => int!(I16, i16),
            ValueType::I32 => int!(I32, i32),
            ValueType::I64 => int!(I64, i64),
            ValueType::U8 => int!(U8, u8),
            ValueType::U16 => int!(U16, u16),
            ValueType::U32 => int!(U32, u32),
            ValueType::U64 => int!(U64, u64),
            ValueType::Usize => int!(Usize, usize),
            ValueType::F32 => text.parse().map(MemoryValue::F32).map_err(|_| invalid()),
            ValueType::F64 => text.parse().map(MemoryValue::F64).map_err(|_| invalid()),
            ValueType::Bytes => hex::decode(text.replace(' ', ""))
                .map(MemoryValue::Bytes)
                .map_err(|_| invalid()),
            ValueType::String => Ok(MemoryValue::String(text.to_string())),
            ValueType::WideString => Ok(MemoryValue::WideString(text.to_string())),
        }
    }
}

/// Enum representing the type of a memory value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueType {
    I8,
    I16,
    I32,
    I64,
    U8,
    U16,
    U32,
    U64,
    Usize,
    F32,
    F64,
    Bytes,
    String,
    WideString,
}

impl ValueType {
    fn name(&self) -> &'static str {
        match self {
            ValueType::I8 => "i8",
            ValueType::I16 => "i16",
            ValueType::I32 => "i32",
            ValueType::I64 => "i64",
            ValueType::U8 => "u8",
            ValueType::U16 => "u16",
            ValueType::U32 => "u32",
            ValueType::U64 => "u64",
            ValueType::Usize => "usize",
            ValueType::F32 => "f32",
            ValueType::F64 => "f64",
            ValueType::Bytes => "bytes",
            ValueType::String => "string",
            ValueType::WideString => "widestring",
        }
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ValueType {
    type Err = MemoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value_type = match s.trim().to_ascii_lowercase().as_str() {
            "i8" => ValueType::I8,
            "i16" => ValueType::I16,
            "i32" => ValueType::I32,
            "i64" => ValueType::I64,
            "u8" => ValueType::U8,
            "u16" => ValueType::U16,
            "u32" => ValueType::U32,
            "u64" => ValueType::U64,
            "usize" | "uintptr" => ValueType::Usize,
            "f32" => ValueType::F32,
            "f64" => ValueType::F64,
            "bytes" => ValueType::Bytes,
            "string" | "utf8" => ValueType::String,
            "widestring" | "utf16" => ValueType::WideString,
            other => return Err(MemoryError::InvalidValueType(other.to_string())),
        };
        Ok(value_type)
    }
}

impl fmt::Display for MemoryValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MemoryValue::I8(v) => write!(f, "{}", v),
            MemoryValue::I16(v) => write!(f, "{}", v),
            MemoryValue::I32(v) => write!(f, "{}", v),
            MemoryValue::I64(v) => write!(f, "{}", v),
            MemoryValue::U8(v) => write!(f, "{}", v),
            MemoryValue::U16(v) => write!(f, "{}", v),
            MemoryValue::U32(v) => write!(f, "{}", v),
            MemoryValue::U64(v) => write!(f, "{}", v),
            MemoryValue::Usize(v) => write!(f, "{}", v),
            MemoryValue::F32(v) => write!(f, "{}", v),
            MemoryValue::F64(v) => write!(f, "{}", v),
            MemoryValue::Bytes(b) => write!(f, "{}", hex::encode(b)),
            MemoryValue::String(s) | MemoryValue::WideString(s) => write!(f, "\"{}\"", s),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_size() {
        assert_eq!(MemoryValue::I32(42).size(), 4);
        assert_eq!(MemoryValue::U64(100).size(), 8);
        assert_eq!(MemoryValue::F32(1.5).size(), 4);
        assert_eq!(MemoryValue::Usize(1).size(), std::mem::size_of::<usize>());
        assert_eq!(MemoryValue::Bytes(vec![1, 2, 3]).size(), 3);
        assert_eq!(MemoryValue::String("Hi".to_string()).size(), 3);
        assert_eq!(MemoryValue::WideString("Hi".to_string()).size(), 6);
    }

    #[test]
    fn test_parse_integers() {
        assert_eq!(
            MemoryValue::parse(ValueType::U32, "0xDEADBEEF").unwrap(),
            MemoryValue::U32(0xDEADBEEF)
        );
        assert_eq!(
            MemoryValue::parse(ValueType::I16, "-32768").unwrap(),
            MemoryValue::I16(i16::MIN)
        );
        assert_eq!(
            MemoryValue::parse(ValueType::Usize, "0x7FF0").unwrap(),
            MemoryValue::Usize(0x7FF0)
        );
        assert!(MemoryValue::parse(ValueType::Usize, "-1").is_err());
        assert!(MemoryValue::parse(ValueType::U8, "256").is_err());
        assert!(MemoryValue::parse(ValueType::I32, "abc").is_err());
    }

    #[test]
    fn test_parse_other_types() {
        assert_eq!(
            MemoryValue::parse(ValueType::F64, "0.125").unwrap(),
            MemoryValue::F64(0.125)
        );
        assert_eq!(
            MemoryValue::parse(ValueType::Bytes, "de ad be ef").unwrap(),
            MemoryValue::Bytes(vec![0xDE, 0xAD, 0xBE, 0xEF])
        );
        assert_eq!(
            MemoryValue::parse(ValueType::WideString, "hi").unwrap(),
            MemoryValue::WideString("hi".to_string())
        );
    }

    #[test]
    fn test_value_type_round_trip_names() {
        for value_type in [
            ValueType::I8,
            ValueType::U64,
            ValueType::Usize,
            ValueType::F32,
            ValueType::Bytes,
            ValueType::String,
            ValueType::WideString,
        ] {
            assert_eq!(value_type.to_string().parse::<ValueType>().unwrap(), value_type);
        }
        assert_eq!("uintptr".parse::<ValueType>().unwrap(), ValueType::Usize);
        assert!("u128".parse::<ValueType>().is_err());
    }

    #[test]
    fn test_serde_tagging() {
        let json = serde_json::to_string(&MemoryValue::U32(7)).unwrap();
        assert_eq!(json, r#"{"type":"U32","value":7}"#);
    }
}
