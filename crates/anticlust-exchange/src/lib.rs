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


//! # Anticlust Exchange
//!
//! The exchange method for anticlustering: starting from a fixed-size
//! partition of `n` elements into `k` groups, visit each element once and
//! exchange it with the partner from another group that maximizes the
//! objective, provided the exchange strictly improves on the current value.
//! Group sizes never change.
//!
//! ## Modules
//!
//! - `store`: `GroupStore`, element-to-group labels and per-group member
//!   lists with `O(1)` self-inverse swaps.
//! - `partners`: `PartnerIndex`, the candidate partners of every element,
//!   optionally restricted to a shared category.
//! - `objective`: the `ExchangeObjective` seam and its two implementations,
//!   `VarianceObjective` (features) and `DistanceObjective` (pairwise
//!   distances). Both evaluate a candidate exchange incrementally, touching
//!   only the two affected groups.
//! - `engine`: `ExchangeEngine`, the single-sweep driver.
//! - `monitor`: lifecycle hooks, time limits and `tracing`-based logging.
//! - `stats`, `result`: run statistics and the `ExchangeOutcome`.
//! - `error`: `ExchangeError`; allocation failure is the only failure mode.
//!
//! ## Example
//!
//! ```rust
//! use anticlust_exchange::{
//!     engine::ExchangeEngine, monitor::no_op::NoOpMonitor,
//!     objective::variance::VarianceObjective, partners::PartnerIndex,
//! };
//! use anticlust_model::{features::FeatureMatrix, partition::Partition};
//!
//! let features = FeatureMatrix::from_column(&[0.0, 0.0, 10.0, 10.0]);
//! let partition = Partition::try_new(&[0, 0, 1, 1], &[2, 2]).unwrap();
//! let partners = PartnerIndex::unrestricted(4).unwrap();
//! let mut objective = VarianceObjective::new(&features);
//!
//! let outcome = ExchangeEngine::new()
//!     .run(&partition, &partners, &mut objective, &mut NoOpMonitor)
//!     .unwrap();
//! assert_eq!(outcome.final_objective(), 100.0);
//! ```

pub mod engine;
pub mod error;
pub mod monitor;
pub mod objective;
pub mod partners;
pub mod result;
pub mod stats;
pub mod store;
