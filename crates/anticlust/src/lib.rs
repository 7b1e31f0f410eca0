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


//! # Anticlust
//!
//! Balanced group assignment by anticlustering: split `n` elements into `k`
//! groups of fixed sizes so that the groups are as similar to each other as
//! possible, which is the same as making each group internally as diverse as
//! possible. The optimizer is the exchange method from `anticlust-exchange`,
//! run as a single sweep over all elements.
//!
//! ## Entry points
//!
//! - `anticlustering`: maximize the summed within-group variance of feature
//!   vectors. Overwrites the initial labels in place on success.
//! - `distance_anticlustering`: maximize the summed within-group pairwise
//!   distance, optionally exchanging only elements of the same category.
//! - `solver`: `ExchangeSolver` and its builder, for time limits, logging,
//!   custom monitors, and access to the full `ExchangeOutcome`.
//!
//! ```rust
//! use anticlust::anticlustering;
//! use anticlust::model::features::FeatureMatrix;
//!
//! let features = FeatureMatrix::from_column(&[0.0, 0.0, 10.0, 10.0]);
//! let mut clusters = [0, 0, 1, 1];
//! anticlustering(&features, &[2, 2], &mut clusters).unwrap();
//! assert_eq!(clusters, [1, 0, 0, 1]);
//! ```

pub mod solver;

pub use anticlust_exchange as exchange;
pub use anticlust_model as model;
pub use solver::{anticlustering, distance_anticlustering};
