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


//! Objective evaluation for the exchange method.
//!
//! The optimizer never recomputes the objective from scratch while it
//! searches. Instead it asks an `ExchangeObjective` to evaluate a candidate
//! exchange incrementally, in two halves that bracket the tentative swap of the
//! group store:
//!
//! 1. `begin_probe` sees the membership *before* the swap and records what
//!    the two affected groups lose.
//! 2. The optimizer swaps the two elements in the store.
//! 3. `finish_probe` sees the membership *after* the swap, completes the two
//!    affected group values, and returns the resulting total.
//! 4. The optimizer swaps the elements back.
//!
//! The probe only ever writes to scratch space. `retain_probe` copies that
//! scratch into a "best so far" slot, and `commit` promotes the best slot to the
//! authoritative state once the optimizer decides to keep the exchange. Groups
//! not touched by a probe keep their cached values throughout.
//!
//! Implementations:
//! - `variance`: sum of squared distances of members to their group centroid.
//! - `distance`: sum of pairwise distances within each group.

pub mod distance;
pub mod variance;

use crate::{error::ExchangeError, store::GroupStore};
use anticlust_model::index::{ElementIndex, GroupIndex};

/// An objective the exchange method maximizes, evaluated incrementally.
pub trait ExchangeObjective {
    /// Returns the name of the objective.
    fn name(&self) -> &str;

    /// Computes the per-group values for the store's current membership.
    ///
    /// Acquires every buffer the probes need; this is the only fallible step.
    fn initialize(&mut self, store: &GroupStore) -> Result<(), ExchangeError>;

    /// Returns the authoritative per-group values.
    fn group_values(&self) -> &[f64];

    /// Returns the authoritative total, summed over groups in index order.
    #[inline]
    fn total(&self) -> f64 {
        self.group_values().iter().fold(0.0, |acc, &v| acc + v)
    }

    /// Starts the evaluation of exchanging `a` and `b`.
    ///
    /// Called while `a` and `b` are still in their original, distinct groups.
    fn begin_probe(&mut self, store: &GroupStore, a: ElementIndex, b: ElementIndex);

    /// Completes the evaluation and returns the total the exchange would yield.
    ///
    /// Called after the store has swapped `a` and `b`.
    fn finish_probe(&mut self, store: &GroupStore, a: ElementIndex, b: ElementIndex) -> f64;

    /// Remembers the last probe as the best candidate so far.
    fn retain_probe(&mut self);

    /// Adopts the retained probe as the authoritative state.
    fn commit(&mut self);
}

/// Per-group values of the two groups touched by a probe.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct PairValues {
    pub first: GroupIndex,
    pub second: GroupIndex,
    pub first_value: f64,
    pub second_value: f64,
}

impl Default for PairValues {
    fn default() -> Self {
        Self {
            first: GroupIndex::new(0),
            second: GroupIndex::new(0),
            first_value: 0.0,
            second_value: 0.0,
        }
    }
}

impl PairValues {
    /// Sums `values` in group order with the two touched groups replaced.
    #[inline]
    pub fn total_over(&self, values: &[f64]) -> f64 {
        let (a, b) = (self.first.get(), self.second.get());
        let mut sum = 0.0;
        for (g, &v) in values.iter().enumerate() {
            sum += if g == a {
                self.first_value
            } else if g == b {
                self.second_value
            } else {
                v
            };
        }
        sum
    }

    /// Writes the two touched group values into `values`.
    #[inline]
    pub fn write_into(&self, values: &mut [f64]) {
        values[self.first.get()] = self.first_value;
        values[self.second.get()] = self.second_value;
    }
}
