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


//! Validation errors raised while building model inputs.
//!
//! The exchange optimizer trusts its inputs. These errors exist only at the
//! construction boundary, where `try_*` constructors check dimensions,
//! label ranges, and frequency tables before anything reaches the core.

use std::collections::TryReserveError;

/// The error type for model construction.
#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    /// A flat buffer does not have the length implied by its dimensions.
    #[error("buffer has {actual} values but the dimensions require {expected}")]
    DimensionMismatch { expected: usize, actual: usize },

    /// A row-wise input has a row whose length differs from the first row.
    #[error("row {row} has {actual} features but row 0 has {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        actual: usize,
    },

    /// A label is outside `0..bound`.
    #[error("element {element} has label {label} but only {bound} labels exist")]
    LabelOutOfRange {
        element: usize,
        label: usize,
        bound: usize,
    },

    /// A frequency does not equal the multiplicity of its label.
    #[error("label {label} occurs {actual} times but its frequency is {expected}")]
    FrequencyMismatch {
        label: usize,
        expected: usize,
        actual: usize,
    },

    /// A working buffer could not be allocated.
    #[error("failed to allocate {structure}: {source}")]
    Allocation {
        structure: &'static str,
        #[source]
        source: TryReserveError,
    },
}

/// Checks that `labels` are in `0..bound` and that `frequencies[l]` equals the
/// number of occurrences of `l`.
pub(crate) fn validate_labels(
    labels: &[usize],
    frequencies: &[usize],
) -> Result<(), ModelError> {
    let bound = frequencies.len();
    let mut counts = vec![0usize; bound];

    for (element, &label) in labels.iter().enumerate() {
        if label >= bound {
            return Err(ModelError::LabelOutOfRange {
                element,
                label,
                bound,
            });
        }
        counts[label] += 1;
    }

    for (label, (&expected, &actual)) in frequencies.iter().zip(counts.iter()).enumerate() {
        if expected != actual {
            return Err(ModelError::FrequencyMismatch {
                label,
                expected,
                actual,
            });
        }
    }

    Ok(())
}

/// Counts label multiplicities for labels already known to be in `0..bound`.
pub(crate) fn count_labels(labels: &[usize], bound: usize) -> Result<Vec<usize>, ModelError> {
    let mut counts = vec![0usize; bound];
    for (element, &label) in labels.iter().enumerate() {
        match counts.get_mut(label) {
            Some(count) => *count += 1,
            None => {
                return Err(ModelError::LabelOutOfRange {
                    element,
                    label,
                    bound,
                });
            }
        }
    }
    Ok(counts)
}
