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


//! Precomputed pairwise distances.
//!
//! The distance objective never looks at feature vectors; it only reads an
//! `n × n` matrix of dissimilarities. The matrix is stored row-major and is
//! expected (but not required) to be symmetric with a zero diagonal.

use crate::{error::ModelError, features::FeatureMatrix, index::ElementIndex};

/// An `n × n` matrix of pairwise distances.
#[derive(Clone, Debug, PartialEq)]
pub struct DistanceMatrix {
    num_elements: usize,
    values: Vec<f64>, // len = num_elements * num_elements
}

impl DistanceMatrix {
    /// Builds a matrix from a row-major buffer of `num_elements²` values.
    pub fn from_row_major(num_elements: usize, values: Vec<f64>) -> Result<Self, ModelError> {
        let expected = num_elements.saturating_mul(num_elements);
        if values.len() != expected {
            return Err(ModelError::DimensionMismatch {
                expected,
                actual: values.len(),
            });
        }

        Ok(Self {
            num_elements,
            values,
        })
    }

    /// Computes the Euclidean distance between every pair of feature vectors.
    ///
    /// The buffer is reserved fallibly; on failure nothing is retained.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use anticlust_model::{distance::DistanceMatrix, features::FeatureMatrix};
    /// # use anticlust_model::index::ElementIndex;
    /// let fm = FeatureMatrix::from_rows(&[[0.0, 0.0], [3.0, 4.0]]).unwrap();
    /// let dm = DistanceMatrix::euclidean(&fm).unwrap();
    /// assert_eq!(dm.get(ElementIndex::new(0), ElementIndex::new(1)), 5.0);
    /// ```
    pub fn euclidean(features: &FeatureMatrix) -> Result<Self, ModelError> {
        let n = features.num_elements();
        let len = n.saturating_mul(n);

        let mut values = Vec::new();
        values
            .try_reserve_exact(len)
            .map_err(|source| ModelError::Allocation {
                structure: "distance matrix",
                source,
            })?;

        for i in 0..n {
            let a = features.row(ElementIndex::new(i));
            for j in 0..n {
                let b = features.row(ElementIndex::new(j));
                let squared: f64 = a.iter().zip(b).map(|(x, y)| (x - y) * (x - y)).sum();
                values.push(squared.sqrt());
            }
        }

        Ok(Self {
            num_elements: n,
            values,
        })
    }

    /// Returns the number of elements.
    #[inline]
    pub fn num_elements(&self) -> usize {
        self.num_elements
    }

    /// Returns the distance between two elements.
    ///
    /// # Panics
    ///
    /// Panics if either index is not in `0..num_elements()`.
    #[inline]
    pub fn get(&self, a: ElementIndex, b: ElementIndex) -> f64 {
        debug_assert!(
            a.get() < self.num_elements && b.get() < self.num_elements,
            "called `DistanceMatrix::get` with element index out of bounds: the len is {} but the indices are {} and {}",
            self.num_elements,
            a.get(),
            b.get()
        );

        self.values[a.get() * self.num_elements + b.get()]
    }

    /// Returns all distances from one element.
    #[inline]
    pub fn row(&self, element: ElementIndex) -> &[f64] {
        let start = element.get() * self.num_elements;
        &self.values[start..start + self.num_elements]
    }

    /// Returns the underlying row-major buffer.
    #[inline]
    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ei(i: usize) -> ElementIndex {
        ElementIndex::new(i)
    }

    #[test]
    fn test_from_row_major_valid_and_invalid() {
        let dm = DistanceMatrix::from_row_major(2, vec![0.0, 1.5, 1.5, 0.0]).unwrap();
        assert_eq!(dm.num_elements(), 2);
        assert_eq!(dm.get(ei(0), ei(1)), 1.5);
        assert_eq!(dm.row(ei(1)), &[1.5, 0.0]);

        assert!(matches!(
            DistanceMatrix::from_row_major(3, vec![0.0; 8]),
            Err(ModelError::DimensionMismatch {
                expected: 9,
                actual: 8
            })
        ));
    }

    #[test]
    fn test_euclidean_is_symmetric_with_zero_diagonal() {
        let fm = FeatureMatrix::from_column(&[0.0, 0.0, 10.0, 10.0]);
        let dm = DistanceMatrix::euclidean(&fm).unwrap();

        for i in 0..4 {
            assert_eq!(dm.get(ei(i), ei(i)), 0.0);
            for j in 0..4 {
                assert_eq!(dm.get(ei(i), ei(j)), dm.get(ei(j), ei(i)));
            }
        }
        assert_eq!(dm.get(ei(0), ei(1)), 0.0);
        assert_eq!(dm.get(ei(0), ei(2)), 10.0);
        assert_eq!(dm.get(ei(3), ei(1)), 10.0);
    }

    #[test]
    fn test_euclidean_multidimensional() {
        let fm = FeatureMatrix::from_rows(&[[1.0, 1.0], [4.0, 5.0], [1.0, 1.0]]).unwrap();
        let dm = DistanceMatrix::euclidean(&fm).unwrap();
        assert_eq!(dm.get(ei(0), ei(1)), 5.0);
        assert_eq!(dm.get(ei(0), ei(2)), 0.0);
    }

    #[test]
    fn test_euclidean_empty() {
        let fm = FeatureMatrix::from_row_major(0, 3, Vec::new()).unwrap();
        let dm = DistanceMatrix::euclidean(&fm).unwrap();
        assert_eq!(dm.num_elements(), 0);
        assert!(dm.as_slice().is_empty());
    }
}
