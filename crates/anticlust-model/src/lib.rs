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


//! # Anticlust Model
//!
//! Input data for exchange-method anticlustering: what is being split, how it
//! is currently split, and which elements may trade places.
//!
//! ## Modules
//!
//! * **`index`**: Typed indices (`ElementIndex`, `GroupIndex`, `CategoryIndex`).
//! * **`features`**: `FeatureMatrix`, one feature vector per element (variance objective).
//! * **`distance`**: `DistanceMatrix`, precomputed pairwise distances (distance objective).
//! * **`partition`**: `Partition`, group labels plus fixed group sizes.
//! * **`category`**: `Categories`, optional labels restricting exchange partners.
//! * **`error`**: `ModelError`, raised only by the validating `try_*` constructors.
//!
//! The optimizer trusts what it is given. Validation happens here, at the
//! boundary, or not at all when the trusting constructors are used.

pub mod category;
pub mod distance;
pub mod error;
pub mod features;
pub mod index;
pub mod partition;
