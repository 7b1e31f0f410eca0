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


//! Summed within-group pairwise distance over a distance matrix.
//!
//! The value of a group is the sum of `d(a, b)` over every unordered pair of
//! its members. Exchanging `a` (group 1) and `b` (group 2) changes only those
//! two values: group 1 loses `a`'s distances to its members and gains `b`'s,
//! group 2 the reverse. Each probe therefore performs four `O(group size)`
//! scans, two before the tentative swap and two after it.

use super::{ExchangeObjective, PairValues};
use crate::{
    error::{ExchangeError, try_reset},
    store::GroupStore,
};
use anticlust_model::{
    distance::DistanceMatrix,
    index::{ElementIndex, GroupIndex},
};

/// The pairwise distance objective over a borrowed distance matrix.
#[derive(Debug, Clone)]
pub struct DistanceObjective<'a> {
    distances: &'a DistanceMatrix,
    sums: Vec<f64>, // len = k
    probe: PairValues,
    best: PairValues,
}

impl<'a> DistanceObjective<'a> {
    /// Creates an uninitialized objective.
    #[inline]
    pub fn new(distances: &'a DistanceMatrix) -> Self {
        Self {
            distances,
            sums: Vec::new(),
            probe: PairValues::default(),
            best: PairValues::default(),
        }
    }

    /// Returns the borrowed distance matrix.
    #[inline]
    pub fn distances(&self) -> &'a DistanceMatrix {
        self.distances
    }

    /// Sums the distances from `element` to the current members of `group`,
    /// leaving out `element` itself.
    #[inline]
    pub fn distance_to_group(&self, store: &GroupStore, element: ElementIndex, group: GroupIndex) -> f64 {
        let row = self.distances.row(element);
        let mut sum = 0.0;
        for &member in store.members(group) {
            if member != element {
                sum += row[member.get()];
            }
        }
        sum
    }
}

impl ExchangeObjective for DistanceObjective<'_> {
    fn name(&self) -> &str {
        "DistanceObjective"
    }

    fn initialize(&mut self, store: &GroupStore) -> Result<(), ExchangeError> {
        debug_assert_eq!(
            store.num_elements(),
            self.distances.num_elements(),
            "called `DistanceObjective::initialize` with a store of {} elements for a {}x{} distance matrix",
            store.num_elements(),
            self.distances.num_elements(),
            self.distances.num_elements()
        );

        let k = store.num_groups();
        try_reset(&mut self.sums, k, 0.0, "group distance sums")?;
        self.probe = PairValues::default();
        self.best = PairValues::default();

        for g in 0..k {
            let members = store.members(GroupIndex::new(g));
            let mut sum = 0.0;
            for (pos, &a) in members.iter().enumerate() {
                let row = self.distances.row(a);
                for &b in &members[pos + 1..] {
                    sum += row[b.get()];
                }
            }
            self.sums[g] = sum;
        }

        Ok(())
    }

    #[inline]
    fn group_values(&self) -> &[f64] {
        &self.sums
    }

    #[inline]
    fn begin_probe(&mut self, store: &GroupStore, a: ElementIndex, b: ElementIndex) {
        let g1 = store.group_of(a);
        let g2 = store.group_of(b);
        debug_assert_ne!(
            g1, g2,
            "called `DistanceObjective::begin_probe` with elements {} and {} of the same group {}",
            a, b, g1
        );

        let first_value = self.sums[g1.get()] - self.distance_to_group(store, a, g1);
        let second_value = self.sums[g2.get()] - self.distance_to_group(store, b, g2);
        self.probe = PairValues {
            first: g1,
            second: g2,
            first_value,
            second_value,
        };
    }

    #[inline]
    fn finish_probe(&mut self, store: &GroupStore, a: ElementIndex, b: ElementIndex) -> f64 {
        let (g1, g2) = (self.probe.first, self.probe.second);
        debug_assert!(
            store.group_of(b) == g1 && store.group_of(a) == g2,
            "called `DistanceObjective::finish_probe` before elements {} and {} were swapped",
            a,
            b
        );

        let gained_first = self.distance_to_group(store, b, g1);
        let gained_second = self.distance_to_group(store, a, g2);
        self.probe.first_value += gained_first;
        self.probe.second_value += gained_second;

        self.probe.total_over(&self.sums)
    }

    #[inline]
    fn retain_probe(&mut self) {
        self.best = self.probe;
    }

    #[inline]
    fn commit(&mut self) {
        self.best.write_into(&mut self.sums);
    }
}
