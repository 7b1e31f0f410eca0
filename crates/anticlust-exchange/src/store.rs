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


//! Element and group bookkeeping for the exchange method.
//!
//! `GroupStore` answers the two questions the search asks constantly: which
//! group does element `e` belong to, and who are the members of group `g`.
//! Members are kept in one flat buffer in which group `g` owns the fixed slot
//! range `offsets[g]..offsets[g + 1]`. Because group sizes never change, the
//! ranges never move; a swap only rewrites which element sits in which slot.
//!
//! Every element keeps a back-reference to its slot, so exchanging two
//! elements is three `O(1)` swaps (members, back-references, labels) and no
//! list is ever traversed. The exchange is its own inverse, which is what the
//! optimizer relies on to probe a move and take it back.

use crate::error::{ExchangeError, try_filled, try_vec};
use anticlust_model::{
    index::{ElementIndex, GroupIndex},
    partition::Partition,
};

/// Group membership of `n` elements in `k` fixed-size groups.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupStore {
    labels: Vec<GroupIndex>,    // len = n, group of each element
    slots: Vec<usize>,          // len = n, position of each element in `members`
    members: Vec<ElementIndex>, // len = n, grouped by `offsets`
    offsets: Vec<usize>,        // len = k + 1
}

impl GroupStore {
    /// Builds the store from an initial partition.
    ///
    /// Members of a group are laid out in ascending element order. The partition
    /// is trusted: its frequencies must match its labels.
    pub fn try_new(partition: &Partition) -> Result<Self, ExchangeError> {
        let n = partition.num_elements();
        let k = partition.num_groups();

        let mut labels = try_vec(n, "group labels")?;
        labels.extend_from_slice(partition.labels());

        let mut offsets = try_vec(k + 1, "group offsets")?;
        offsets.push(0);
        for &frequency in partition.frequencies() {
            let last = offsets[offsets.len() - 1];
            offsets.push(last + frequency);
        }

        debug_assert_eq!(
            offsets[k], n,
            "called `GroupStore::try_new` with frequencies summing to {} for {} elements",
            offsets[k], n
        );

        let mut slots = try_filled(n, 0usize, "element slots")?;
        let mut members = try_filled(n, ElementIndex::new(0), "group members")?;
        let mut cursor = try_vec(k, "group cursors")?;
        cursor.extend_from_slice(&offsets[..k]);

        for (e, group) in labels.iter().enumerate() {
            let g = group.get();
            let slot = cursor[g];

            debug_assert!(
                slot < offsets[g + 1],
                "called `GroupStore::try_new` with group {} holding more elements than its frequency {}",
                g,
                partition.frequencies()[g]
            );

            members[slot] = ElementIndex::new(e);
            slots[e] = slot;
            cursor[g] += 1;
        }

        Ok(Self {
            labels,
            slots,
            members,
            offsets,
        })
    }

    /// Returns the current group of an element.
    #[inline(always)]
    pub fn group_of(&self, element: ElementIndex) -> GroupIndex {
        debug_assert!(
            element.get() < self.labels.len(),
            "called `GroupStore::group_of` with element index out of bounds: the len is {} but the index is {}",
            self.labels.len(),
            element.get()
        );

        self.labels[element.get()]
    }

    /// Returns the current members of a group.
    #[inline(always)]
    pub fn members(&self, group: GroupIndex) -> &[ElementIndex] {
        let g = group.get();
        debug_assert!(
            g < self.num_groups(),
            "called `GroupStore::members` with group index out of bounds: the len is {} but the index is {}",
            self.num_groups(),
            g
        );

        &self.members[self.offsets[g]..self.offsets[g + 1]]
    }

    /// Returns the fixed member count of a group.
    #[inline(always)]
    pub fn frequency(&self, group: GroupIndex) -> usize {
        let g = group.get();
        self.offsets[g + 1] - self.offsets[g]
    }

    /// Returns the number of elements.
    #[inline]
    pub fn num_elements(&self) -> usize {
        self.labels.len()
    }

    /// Returns the number of groups.
    #[inline]
    pub fn num_groups(&self) -> usize {
        self.offsets.len() - 1
    }

    /// Returns the current labels, indexed by element.
    #[inline]
    pub fn labels(&self) -> &[GroupIndex] {
        &self.labels
    }

    /// Exchanges the groups of two elements.
    ///
    /// `a` takes over `b`'s slot in `b`'s group and vice versa; all other
    /// elements keep their group and slot. Applying the same swap twice restores
    /// the previous state exactly.
    #[inline(always)]
    pub fn swap(&mut self, a: ElementIndex, b: ElementIndex) {
        let (a, b) = (a.get(), b.get());
        debug_assert!(
            a < self.labels.len() && b < self.labels.len(),
            "called `GroupStore::swap` with element index out of bounds: the len is {} but the indices are {} and {}",
            self.labels.len(),
            a,
            b
        );

        self.members.swap(self.slots[a], self.slots[b]);
        self.slots.swap(a, b);
        self.labels.swap(a, b);
    }

    /// Consumes the store and returns the assignment it currently holds.
    pub fn try_into_partition(self) -> Result<Partition, ExchangeError> {
        let mut frequencies = try_vec(self.num_groups(), "partition frequencies")?;
        frequencies.extend(self.offsets.windows(2).map(|w| w[1] - w[0]));
        Ok(Partition::new(self.labels, frequencies))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ei(i: usize) -> ElementIndex {
        ElementIndex::new(i)
    }

    fn gi(i: usize) -> GroupIndex {
        GroupIndex::new(i)
    }

    fn store(labels: &[usize], frequencies: &[usize]) -> GroupStore {
        GroupStore::try_new(&Partition::try_new(labels, frequencies).unwrap()).unwrap()
    }

    /// Checks that labels, member lists, and back-references agree.
    fn assert_consistent(s: &GroupStore) {
        for g in 0..s.num_groups() {
            for &e in s.members(gi(g)) {
                assert_eq!(s.group_of(e), gi(g), "{} listed in wrong group", e);
                assert_eq!(s.members[s.slots[e.get()]], e, "stale slot for {}", e);
            }
        }
        let listed: usize = (0..s.num_groups()).map(|g| s.members(gi(g)).len()).sum();
        assert_eq!(listed, s.num_elements());
    }

    #[test]
    fn test_layout_follows_partition() {
        let s = store(&[1, 0, 1, 0, 2], &[2, 2, 1]);
        assert_eq!(s.num_elements(), 5);
        assert_eq!(s.num_groups(), 3);
        assert_eq!(s.members(gi(0)), &[ei(1), ei(3)]);
        assert_eq!(s.members(gi(1)), &[ei(0), ei(2)]);
        assert_eq!(s.members(gi(2)), &[ei(4)]);
        assert_eq!(s.frequency(gi(1)), 2);
        assert_consistent(&s);
    }

    #[test]
    fn test_swap_exchanges_membership_in_place() {
        let mut s = store(&[0, 0, 1, 1], &[2, 2]);
        s.swap(ei(0), ei(3));

        assert_eq!(s.group_of(ei(0)), gi(1));
        assert_eq!(s.group_of(ei(3)), gi(0));
        assert_eq!(s.members(gi(0)), &[ei(3), ei(1)]);
        assert_eq!(s.members(gi(1)), &[ei(2), ei(0)]);
        assert_eq!(s.frequency(gi(0)), 2);
        assert_eq!(s.frequency(gi(1)), 2);
        assert_consistent(&s);
    }

    #[test]
    fn test_swap_is_an_involution() {
        let original = store(&[2, 0, 1, 0, 2, 1], &[2, 2, 2]);
        let mut s = original.clone();

        for (a, b) in [(0, 1), (2, 5), (4, 3), (0, 4)] {
            s.swap(ei(a), ei(b));
            assert_consistent(&s);
            s.swap(ei(a), ei(b));
            assert_eq!(s, original);
        }
    }

    #[test]
    fn test_swap_within_group_keeps_labels() {
        let mut s = store(&[0, 0, 1], &[2, 1]);
        s.swap(ei(0), ei(1));
        assert_eq!(s.labels(), &[gi(0), gi(0), gi(1)]);
        assert_eq!(s.members(gi(0)), &[ei(1), ei(0)]);
        assert_consistent(&s);
    }

    #[test]
    fn test_try_into_partition_preserves_frequencies() {
        let mut s = store(&[0, 1, 1, 2, 2, 2], &[1, 2, 3]);
        s.swap(ei(0), ei(5));
        s.swap(ei(1), ei(3));

        let p = s.try_into_partition().unwrap();
        assert_eq!(p.frequencies(), &[1, 2, 3]);
        assert_eq!(p.labels(), &[gi(2), gi(2), gi(1), gi(1), gi(2), gi(0)]);
    }

    #[test]
    fn test_empty_store() {
        let s = store(&[], &[]);
        assert_eq!(s.num_elements(), 0);
        assert_eq!(s.num_groups(), 0);
        assert_eq!(s.try_into_partition().unwrap().num_elements(), 0);
    }
}
