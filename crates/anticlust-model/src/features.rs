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


//! Per-element feature vectors.
//!
//! `FeatureMatrix` stores `n` rows of `m` features in a single row-major
//! buffer, so that the feature vector of an element is one contiguous slice.
//! This is the input of the variance objective.

use crate::{error::ModelError, index::ElementIndex};

/// An `n × m` matrix of feature values, one row per element.
#[derive(Clone, Debug, PartialEq)]
pub struct FeatureMatrix {
    num_elements: usize,
    num_features: usize,
    values: Vec<f64>, // len = num_elements * num_features
}

impl FeatureMatrix {
    /// Builds a matrix from a row-major buffer of `num_elements * num_features` values.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use anticlust_model::features::FeatureMatrix;
    /// # use anticlust_model::index::ElementIndex;
    /// let fm = FeatureMatrix::from_row_major(2, 3, vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]).unwrap();
    /// assert_eq!(fm.row(ElementIndex::new(1)), &[4.0, 5.0, 6.0]);
    /// ```
    pub fn from_row_major(
        num_elements: usize,
        num_features: usize,
        values: Vec<f64>,
    ) -> Result<Self, ModelError> {
        let expected = num_elements.saturating_mul(num_features);
        if values.len() != expected {
            return Err(ModelError::DimensionMismatch {
                expected,
                actual: values.len(),
            });
        }

        Ok(Self {
            num_elements,
            num_features,
            values,
        })
    }

    /// Builds a matrix from one vector per element.
    ///
    /// All rows must have the same length. An empty input yields a `0 × 0` matrix.
    pub fn from_rows<R>(rows: &[R]) -> Result<Self, ModelError>
    where
        R: AsRef<[f64]>,
    {
        let num_features = rows.first().map_or(0, |r| r.as_ref().len());
        let mut values = Vec::with_capacity(rows.len() * num_features);

        for (row, r) in rows.iter().enumerate() {
            let r = r.as_ref();
            if r.len() != num_features {
                return Err(ModelError::RaggedRow {
                    row,
                    expected: num_features,
                    actual: r.len(),
                });
            }
            values.extend_from_slice(r);
        }

        Ok(Self {
            num_elements: rows.len(),
            num_features,
            values,
        })
    }

    /// Builds a one-feature matrix from a slice of scalars.
    pub fn from_column(values: &[f64]) -> Self {
        Self {
            num_elements: values.len(),
            num_features: 1,
            values: values.to_vec(),
        }
    }

    /// Returns the number of elements (rows).
    #[inline]
    pub fn num_elements(&self) -> usize {
        self.num_elements
    }

    /// Returns the number of features per element (columns).
    #[inline]
    pub fn num_features(&self) -> usize {
        self.num_features
    }

    /// Returns the feature vector of an element.
    ///
    /// # Panics
    ///
    /// Panics if `element` is not in `0..num_elements()`.
    #[inline]
    pub fn row(&self, element: ElementIndex) -> &[f64] {
        let index = element.get();
        debug_assert!(
            index < self.num_elements,
            "called `FeatureMatrix::row` with element index out of bounds: the len is {} but the index is {}",
            self.num_elements,
            index
        );

        let start = index * self.num_features;
        &self.values[start..start + self.num_features]
    }

    /// Returns the underlying row-major buffer.
    #[inline]
    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }
}
