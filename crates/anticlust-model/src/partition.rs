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


//! Group assignments with fixed group sizes.
//!
//! A `Partition` is both the input and the output of the exchange method: a
//! group label per element plus the member count (`frequency`) of every
//! group. Swaps exchange membership, never counts, so the frequency table of a
//! partition produced by the optimizer equals the one it was given.

use crate::{
    error::{ModelError, count_labels, validate_labels},
    index::{ElementIndex, GroupIndex},
};

/// An assignment of `n` elements to `k` groups of fixed size.
///
/// Data is indexed by element: `labels[e]` is the group of element `e`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Partition {
    labels: Vec<GroupIndex>,
    frequencies: Vec<usize>, // len = num_groups
}

impl Partition {
    /// Creates a partition without validating it.
    ///
    /// The caller guarantees that every label is in `0..frequencies.len()` and that
    /// `frequencies[g]` is the number of elements labelled `g`. Debug builds check this.
    pub fn new(labels: Vec<GroupIndex>, frequencies: Vec<usize>) -> Self {
        debug_assert!(
            labels.iter().all(|g| g.get() < frequencies.len()),
            "called `Partition::new` with a label out of range: there are {} groups",
            frequencies.len()
        );
        debug_assert_eq!(
            frequencies.iter().sum::<usize>(),
            labels.len(),
            "called `Partition::new` with frequencies that do not sum to the number of elements"
        );

        Self {
            labels,
            frequencies,
        }
    }

    /// Creates a partition after checking labels and frequencies.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use anticlust_model::partition::Partition;
    /// let p = Partition::try_new(&[0, 0, 1, 1], &[2, 2]).unwrap();
    /// assert_eq!(p.num_groups(), 2);
    /// assert!(Partition::try_new(&[0, 0, 1, 1], &[3, 1]).is_err());
    /// ```
    pub fn try_new(labels: &[usize], frequencies: &[usize]) -> Result<Self, ModelError> {
        validate_labels(labels, frequencies)?;
        Ok(Self {
            labels: labels.iter().copied().map(GroupIndex::new).collect(),
            frequencies: frequencies.to_vec(),
        })
    }

    /// Creates a partition over `num_groups` groups, deriving frequencies from the labels.
    pub fn from_labels(labels: &[usize], num_groups: usize) -> Result<Self, ModelError> {
        let frequencies = count_labels(labels, num_groups)?;
        Ok(Self {
            labels: labels.iter().copied().map(GroupIndex::new).collect(),
            frequencies,
        })
    }

    /// Returns the group of an element.
    ///
    /// # Panics
    ///
    /// Panics if `element` is out of bounds.
    #[inline]
    pub fn group_of(&self, element: ElementIndex) -> GroupIndex {
        debug_assert!(
            element.get() < self.num_elements(),
            "called `Partition::group_of` with element index out of bounds: the len is {} but the index is {}",
            self.num_elements(),
            element.get()
        );

        self.labels[element.get()]
    }

    /// Returns the fixed member count of a group.
    #[inline]
    pub fn frequency(&self, group: GroupIndex) -> usize {
        self.frequencies[group.get()]
    }

    /// Returns the number of elements.
    #[inline]
    pub fn num_elements(&self) -> usize {
        self.labels.len()
    }

    /// Returns the number of groups.
    #[inline]
    pub fn num_groups(&self) -> usize {
        self.frequencies.len()
    }

    /// Returns all labels, indexed by element.
    #[inline]
    pub fn labels(&self) -> &[GroupIndex] {
        &self.labels
    }

    /// Returns the group frequencies, indexed by group.
    #[inline]
    pub fn frequencies(&self) -> &[usize] {
        &self.frequencies
    }

    /// Writes the labels as raw `usize` values into `out`.
    ///
    /// # Panics
    ///
    /// Panics if `out.len() != self.num_elements()`.
    pub fn write_labels(&self, out: &mut [usize]) {
        assert_eq!(
            out.len(),
            self.labels.len(),
            "called `Partition::write_labels` with an output of length {} for {} elements",
            out.len(),
            self.labels.len()
        );

        for (dst, g) in out.iter_mut().zip(&self.labels) {
            *dst = g.get();
        }
    }

    /// Returns the elements of every group, in ascending element order.
    pub fn groups(&self) -> Vec<Vec<ElementIndex>> {
        let mut groups: Vec<Vec<ElementIndex>> = self
            .frequencies
            .iter()
            .map(|&f| Vec::with_capacity(f))
            .collect();
        for (e, g) in self.labels.iter().enumerate() {
            groups[g.get()].push(ElementIndex::new(e));
        }
        groups
    }
}

impl std::fmt::Display for Partition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Partition Summary")?;
        writeln!(f, "   Elements: {}", self.num_elements())?;
        writeln!(f, "   Groups:   {}", self.num_groups())?;
        writeln!(f)?;

        if self.num_groups() == 0 {
            writeln!(f, "   (No groups)")?;
            return Ok(());
        }

        writeln!(f, "   {:<10} | {:<10} | Members", "Group", "Size")?;
        writeln!(f, "   {:-<10}-+-{:-<10}-+-{:-<10}", "", "", "")?;
        for (g, members) in self.groups().iter().enumerate() {
            let members: Vec<String> = members.iter().map(|e| e.get().to_string()).collect();
            writeln!(
                f,
                "   {:<10} | {:<10} | {}",
                g,
                self.frequencies[g],
                members.join(", ")
            )?;
        }

        Ok(())
    }
}
