//! Direction of a cross-process copy

use serde::{Deserialize, Serialize};
use std::fmt;

/// Which way bytes move between the target process and the caller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Target memory into a local buffer
    Read,
    /// Local buffer into target memory
    Write,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Read => write!(f, "read"),
            Direction::Write => write!(f, "write"),
        }
    }
}
