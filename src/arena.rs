//! Domain-sized flat buffers
//!
//! Every per-vertex structure in the crate (parent pointers, walk marks,
//! adjacency rows, frontier queues, the bijection itself) is one flat
//! allocation indexed by vertex id. At the reference size these run to
//! hundreds of megabytes, so allocation failure is reported as an error
//! instead of aborting the process.

use crate::io::error::{AlgorithmError, Result};

/// Allocate a buffer of `len` copies of `fill`
///
/// # Errors
///
/// Returns [`AlgorithmError::Allocation`] if the memory cannot be reserved
pub fn filled<T: Clone>(buffer: &'static str, len: usize, fill: T) -> Result<Vec<T>> {
    let mut values = with_capacity(buffer, len)?;
    values.resize(len, fill);
    Ok(values)
}

/// Allocate an empty buffer able to hold `len` entries without reallocating
///
/// # Errors
///
/// Returns [`AlgorithmError::Allocation`] if the memory cannot be reserved
pub fn with_capacity<T>(buffer: &'static str, len: usize) -> Result<Vec<T>> {
    let mut values = Vec::new();
    values
        .try_reserve_exact(len)
        .map_err(|_reserve_error| AlgorithmError::Allocation { buffer, len })?;
    Ok(values)
}
