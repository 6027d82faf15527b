//! Pointer-chain resolution
//!
//! A chain is a base address plus offsets. The value at the base is read,
//! then each offset in turn is added to the last value read and the result
//! is dereferenced. The 32-bit form is what game trainers usually record;
//! the 64-bit form is a separate entry point and is never picked
//! automatically.

use crate::core::types::{Address, ChainStep, MemoryError, MemoryResult};
use crate::memory::scalar::PointerValue;
use crate::memory::MemoryReader;
use tracing::debug;

/// Follows `offsets` from `base`, reading `P`-sized pointers at each step.
///
/// An empty offset list returns the value at `base`. The first failed read
/// stops resolution and is reported with the step it happened at.
pub fn resolve<P: PointerValue>(
    reader: &MemoryReader<'_>,
    base: Address,
    offsets: &[u64],
) -> MemoryResult<P> {
    let mut current: P = reader
        .read(base)
        .map_err(|e| step_failed(ChainStep::Base, base, e))?;

    for (index, &offset) in offsets.iter().enumerate() {
        let next = Address::new(current.to_address_bits()).offset(offset);
        current = reader
            .read(next)
            .map_err(|e| step_failed(ChainStep::Offset(index), next, e))?;
    }

    Ok(current)
}

fn step_failed(step: ChainStep, address: Address, err: MemoryError) -> MemoryError {
    debug!(%step, %address, error = %err, "pointer chain broken");
    MemoryError::chain_step(step, err)
}
