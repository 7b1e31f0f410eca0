// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.


//! Failure reporting for the exchange optimizer.
//!
//! The optimizer has exactly one failure mode: a working structure (group
//! store, partner index, centroid or objective buffers) could not be
//! allocated. Every buffer is acquired with a fallible reservation, and every
//! buffer is owned by a value that is dropped on the way out, so an error
//! leaves nothing behind and the caller's output untouched.

use std::collections::TryReserveError;

/// The error type of the exchange optimizer.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ExchangeError {
    /// A working structure could not be allocated.
    #[error("failed to allocate {structure}: {source}")]
    Allocation {
        structure: &'static str,
        #[source]
        source: TryReserveError,
    },
}

impl ExchangeError {
    /// Returns the name of the structure whose allocation failed.
    pub fn structure(&self) -> &'static str {
        match self {
            ExchangeError::Allocation { structure, .. } => structure,
        }
    }
}

/// Allocates an empty vector able to hold `len` items without reallocating.
pub fn try_vec<T>(len: usize, structure: &'static str) -> Result<Vec<T>, ExchangeError> {
    let mut v = Vec::new();
    v.try_reserve_exact(len)
        .map_err(|source| ExchangeError::Allocation { structure, source })?;
    Ok(v)
}

/// Allocates a vector of `len` copies of `value`.
pub fn try_filled<T>(
    len: usize,
    value: T,
    structure: &'static str,
) -> Result<Vec<T>, ExchangeError>
where
    T: Clone,
{
    let mut v = try_vec(len, structure)?;
    v.resize(len, value);
    Ok(v)
}

/// Clears `buffer` and refills it with `len` copies of `value`, reusing its
/// allocation when it is large enough.
pub fn try_reset<T>(
    buffer: &mut Vec<T>,
    len: usize,
    value: T,
    structure: &'static str,
) -> Result<(), ExchangeError>
where
    T: Clone,
{
    buffer.clear();
    buffer
        .try_reserve_exact(len)
        .map_err(|source| ExchangeError::Allocation { structure, source })?;
    buffer.resize(len, value);
    Ok(())
}
