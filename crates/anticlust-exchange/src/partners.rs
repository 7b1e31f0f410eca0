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


//! Candidate exchange partners.
//!
//! For every element the optimizer scans a list of potential partners. Without
//! a categorical constraint that list is simply all elements. With one, it is
//! the elements sharing the element's category, so that every committed (or
//! merely probed) exchange keeps the category composition of each group
//! intact.
//!
//! Both modes are served by the same structure: the unrestricted index is a
//! single implicit category holding all `n` elements, which keeps the search
//! loop free of mode switches.

use crate::error::{ExchangeError, try_filled, try_vec};
use anticlust_model::{category::Categories, index::ElementIndex};

/// Per-category lists of elements, used to look up exchange partners.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartnerIndex {
    category_of: Vec<usize>,     // len = n
    elements: Vec<ElementIndex>, // len = n, grouped by `offsets`, ascending within a category
    offsets: Vec<usize>,         // len = c + 1
}

impl PartnerIndex {
    /// Every element is a candidate partner of every other element.
    pub fn unrestricted(num_elements: usize) -> Result<Self, ExchangeError> {
        let category_of = try_filled(num_elements, 0usize, "partner categories")?;

        let mut elements = try_vec(num_elements, "partner lists")?;
        elements.extend((0..num_elements).map(ElementIndex::new));

        let mut offsets = try_vec(2, "partner offsets")?;
        offsets.extend_from_slice(&[0, num_elements]);

        Ok(Self {
            category_of,
            elements,
            offsets,
        })
    }

    /// Candidates of an element are the elements of its own category.
    pub fn by_category(categories: &Categories) -> Result<Self, ExchangeError> {
        let n = categories.num_elements();
        let c = categories.num_categories();

        let mut category_of = try_vec(n, "partner categories")?;
        category_of.extend(categories.labels().iter().map(|c| c.get()));

        let mut offsets = try_vec(c + 1, "partner offsets")?;
        offsets.push(0);
        for &frequency in categories.frequencies() {
            let last = offsets[offsets.len() - 1];
            offsets.push(last + frequency);
        }

        let mut cursor = try_vec(c, "partner cursors")?;
        cursor.extend_from_slice(&offsets[..c]);

        let mut elements = try_filled(n, ElementIndex::new(0), "partner lists")?;
        for (e, &category) in category_of.iter().enumerate() {
            debug_assert!(
                cursor[category] < offsets[category + 1],
                "called `PartnerIndex::by_category` with category {} holding more elements than its frequency {}",
                category,
                categories.frequencies()[category]
            );

            elements[cursor[category]] = ElementIndex::new(e);
            cursor[category] += 1;
        }

        Ok(Self {
            category_of,
            elements,
            offsets,
        })
    }

    /// Builds the restricted index when categories are given, the unrestricted one otherwise.
    pub fn new(num_elements: usize, categories: Option<&Categories>) -> Result<Self, ExchangeError> {
        match categories {
            Some(categories) => {
                debug_assert_eq!(
                    categories.num_elements(),
                    num_elements,
                    "called `PartnerIndex::new` with categories for {} elements but {} elements",
                    categories.num_elements(),
                    num_elements
                );
                Self::by_category(categories)
            }
            None => Self::unrestricted(num_elements),
        }
    }

    /// Returns the candidate partners of an element, including the element itself.
    #[inline(always)]
    pub fn partners_of(&self, element: ElementIndex) -> &[ElementIndex] {
        debug_assert!(
            element.get() < self.category_of.len(),
            "called `PartnerIndex::partners_of` with element index out of bounds: the len is {} but the index is {}",
            self.category_of.len(),
            element.get()
        );

        let c = self.category_of[element.get()];
        &self.elements[self.offsets[c]..self.offsets[c + 1]]
    }

    /// Returns the number of partner lists (1 when unrestricted).
    #[inline]
    pub fn num_categories(&self) -> usize {
        self.offsets.len() - 1
    }

    /// Returns the number of indexed elements.
    #[inline]
    pub fn num_elements(&self) -> usize {
        self.category_of.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ei(i: usize) -> ElementIndex {
        ElementIndex::new(i)
    }

    #[test]
    fn test_unrestricted_lists_everyone() {
        let p = PartnerIndex::unrestricted(4).unwrap();
        assert_eq!(p.num_categories(), 1);
        assert_eq!(p.num_elements(), 4);
        for e in 0..4 {
            assert_eq!(p.partners_of(ei(e)), &[ei(0), ei(1), ei(2), ei(3)]);
        }
    }

    #[test]
    fn test_by_category_restricts_to_own_category() {
        let categories = Categories::try_new(&[1, 0, 1, 0, 1], &[2, 3]).unwrap();
        let p = PartnerIndex::by_category(&categories).unwrap();

        assert_eq!(p.num_categories(), 2);
        assert_eq!(p.partners_of(ei(0)), &[ei(0), ei(2), ei(4)]);
        assert_eq!(p.partners_of(ei(1)), &[ei(1), ei(3)]);
        assert_eq!(p.partners_of(ei(4)), &[ei(0), ei(2), ei(4)]);
    }

    #[test]
    fn test_new_dispatches_on_categories() {
        let categories = Categories::try_new(&[0, 0, 1, 1], &[2, 2]).unwrap();
        assert_eq!(PartnerIndex::new(4, None).unwrap().num_categories(), 1);
        assert_eq!(
            PartnerIndex::new(4, Some(&categories)).unwrap().num_categories(),
            2
        );
    }

    #[test]
    fn test_unrestricted_empty() {
        let p = PartnerIndex::unrestricted(0).unwrap();
        assert_eq!(p.num_elements(), 0);
        assert_eq!(p.num_categories(), 1);
    }
}
