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


//! Categorical labels that restrict exchange partners.
//!
//! Categories partition the elements independently of the groups. When a
//! categorical constraint is active, an element is only ever exchanged with
//! elements of its own category, so every group keeps the category mix it was
//! initialized with. Categories are read-only for the whole run.

use crate::{
    error::{ModelError, count_labels, validate_labels},
    index::{CategoryIndex, ElementIndex},
};

/// A category label per element plus the size of every category.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Categories {
    labels: Vec<CategoryIndex>,
    frequencies: Vec<usize>, // len = num_categories
}

impl Categories {
    /// Creates categories without validating them.
    ///
    /// The caller guarantees that labels are in `0..frequencies.len()` and that the
    /// frequencies match the label multiplicities.
    pub fn new(labels: Vec<CategoryIndex>, frequencies: Vec<usize>) -> Self {
        debug_assert!(
            labels.iter().all(|c| c.get() < frequencies.len()),
            "called `Categories::new` with a label out of range: there are {} categories",
            frequencies.len()
        );

        Self {
            labels,
            frequencies,
        }
    }

    /// Creates categories after checking labels and frequencies.
    pub fn try_new(labels: &[usize], frequencies: &[usize]) -> Result<Self, ModelError> {
        validate_labels(labels, frequencies)?;
        Ok(Self {
            labels: labels.iter().copied().map(CategoryIndex::new).collect(),
            frequencies: frequencies.to_vec(),
        })
    }

    /// Creates categories from labels alone; the number of categories is
    /// one past the largest label.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use anticlust_model::category::Categories;
    /// let c = Categories::from_labels(&[0, 0, 1, 1, 1]).unwrap();
    /// assert_eq!(c.num_categories(), 2);
    /// assert_eq!(c.frequencies(), &[2, 3]);
    /// ```
    pub fn from_labels(labels: &[usize]) -> Result<Self, ModelError> {
        let num_categories = labels.iter().max().map_or(0, |&m| m + 1);
        let frequencies = count_labels(labels, num_categories)?;
        Ok(Self {
            labels: labels.iter().copied().map(CategoryIndex::new).collect(),
            frequencies,
        })
    }

    /// Returns the category of an element.
    #[inline]
    pub fn category_of(&self, element: ElementIndex) -> CategoryIndex {
        debug_assert!(
            element.get() < self.labels.len(),
            "called `Categories::category_of` with element index out of bounds: the len is {} but the index is {}",
            self.labels.len(),
            element.get()
        );

        self.labels[element.get()]
    }

    /// Returns the number of elements in a category.
    #[inline]
    pub fn frequency(&self, category: CategoryIndex) -> usize {
        self.frequencies[category.get()]
    }

    /// Returns the number of labelled elements.
    #[inline]
    pub fn num_elements(&self) -> usize {
        self.labels.len()
    }

    /// Returns the number of categories.
    #[inline]
    pub fn num_categories(&self) -> usize {
        self.frequencies.len()
    }

    /// Returns all labels, indexed by element.
    #[inline]
    pub fn labels(&self) -> &[CategoryIndex] {
        &self.labels
    }

    /// Returns the category frequencies.
    #[inline]
    pub fn frequencies(&self) -> &[usize] {
        &self.frequencies
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_try_new_and_accessors() {
        let c = Categories::try_new(&[0, 0, 1, 1], &[2, 2]).unwrap();
        assert_eq!(c.num_elements(), 4);
        assert_eq!(c.num_categories(), 2);
        assert_eq!(c.category_of(ElementIndex::new(2)), CategoryIndex::new(1));
        assert_eq!(c.frequency(CategoryIndex::new(0)), 2);
    }

    #[test]
    fn test_try_new_rejects_mismatched_frequencies() {
        assert!(matches!(
            Categories::try_new(&[0, 1, 1], &[1, 1]),
            Err(ModelError::FrequencyMismatch { label: 1, .. })
        ));
    }

    #[test]
    fn test_from_labels_empty() {
        let c = Categories::from_labels(&[]).unwrap();
        assert_eq!(c.num_categories(), 0);
        assert_eq!(c.num_elements(), 0);
    }
}
