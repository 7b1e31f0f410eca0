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


//! # Exchange Solver
//!
//! The user-facing side of the exchange method. `ExchangeSolver` wires the
//! objective, the partner index and the monitors together for one run and
//! hands back the `ExchangeOutcome`. The two free functions cover the common
//! case of improving a label slice in place.
//!
//! ## Configuration
//!
//! `ExchangeSolverBuilder` configures a solver:
//! - `with_time_limit`: stop the sweep once a wall-clock budget is spent. The
//!   assignment reached so far is still returned.
//! - `with_logging`: emit `tracing` events for start, commits and end.
//! - `add_monitor`: attach any `ExchangeMonitor`.
//!
//! ```rust
//! use anticlust::solver::ExchangeSolverBuilder;
//! use anticlust::model::{features::FeatureMatrix, partition::Partition};
//! use std::time::Duration;
//!
//! let features = FeatureMatrix::from_column(&[0.0, 0.0, 10.0, 10.0]);
//! let partition = Partition::try_new(&[0, 0, 1, 1], &[2, 2]).unwrap();
//!
//! let mut solver = ExchangeSolverBuilder::new()
//!     .with_time_limit(Duration::from_secs(10))
//!     .with_logging(true)
//!     .build();
//! let outcome = solver.solve_features(&features, &partition).unwrap();
//! assert_eq!(outcome.final_objective(), 100.0);
//! ```

use anticlust_exchange::{
    engine::ExchangeEngine,
    error::{ExchangeError, try_vec},
    monitor::{
        composite::CompositeExchangeMonitor, exchange_monitor::ExchangeMonitor,
        log::LogExchangeMonitor, time::TimeLimitMonitor,
    },
    objective::{ExchangeObjective, distance::DistanceObjective, variance::VarianceObjective},
    partners::PartnerIndex,
    result::ExchangeOutcome,
};
use anticlust_model::{
    category::Categories, distance::DistanceMatrix, features::FeatureMatrix, index::GroupIndex,
    partition::Partition,
};
use std::time::Duration;

/// Improves `clusters` in place by maximizing the summed within-group variance.
///
/// `features` holds one row per element, `frequencies[g]` is the size of group
/// `g`, and `clusters[e]` is the initial group of element `e`. The labels must
/// be in `0..frequencies.len()` and agree with `frequencies`; this is not
/// checked. On success `clusters` holds the improved assignment; on error it is
/// left untouched.
#[tracing::instrument(skip_all, fields(n = clusters.len(), k = frequencies.len()))]
pub fn anticlustering(
    features: &FeatureMatrix,
    frequencies: &[usize],
    clusters: &mut [usize],
) -> Result<(), ExchangeError> {
    debug_assert_eq!(
        features.num_elements(),
        clusters.len(),
        "called `anticlustering` with {} feature rows for {} cluster labels",
        features.num_elements(),
        clusters.len()
    );

    let partition = trusted_partition(clusters, frequencies)?;
    let outcome = ExchangeSolver::new().solve_features(features, &partition)?;
    outcome.partition().write_labels(clusters);
    Ok(())
}

/// Improves `clusters` in place by maximizing the summed within-group pairwise
/// distance.
///
/// With `categories`, an element is only ever exchanged with elements of its
/// own category, so every group keeps its category composition. With `None`
/// every element may be exchanged with every other. Inputs are trusted as in
/// `anticlustering`, and `clusters` is only written on success.
#[tracing::instrument(skip_all, fields(n = clusters.len(), k = frequencies.len()))]
pub fn distance_anticlustering(
    distances: &DistanceMatrix,
    frequencies: &[usize],
    clusters: &mut [usize],
    categories: Option<&Categories>,
) -> Result<(), ExchangeError> {
    debug_assert_eq!(
        distances.num_elements(),
        clusters.len(),
        "called `distance_anticlustering` with a {}x{} distance matrix for {} cluster labels",
        distances.num_elements(),
        distances.num_elements(),
        clusters.len()
    );

    let partition = trusted_partition(clusters, frequencies)?;
    let outcome = ExchangeSolver::new().solve_distances(distances, &partition, categories)?;
    outcome.partition().write_labels(clusters);
    Ok(())
}

/// Copies raw labels and frequencies into a `Partition` without validating them.
fn trusted_partition(labels: &[usize], frequencies: &[usize]) -> Result<Partition, ExchangeError> {
    let mut typed = try_vec(labels.len(), "initial labels")?;
    typed.extend(labels.iter().copied().map(GroupIndex::new));

    let mut sizes = try_vec(frequencies.len(), "group frequencies")?;
    sizes.extend_from_slice(frequencies);

    Ok(Partition::new(typed, sizes))
}

/// A configured exchange-method solver.
pub struct ExchangeSolver<'a> {
    monitors: Vec<Box<dyn ExchangeMonitor + 'a>>,
    time_limit: Option<Duration>,
    logging: bool,
}

impl Default for ExchangeSolver<'_> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ExchangeSolver<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExchangeSolver")
            .field("monitors", &self.monitors)
            .field("time_limit", &self.time_limit)
            .field("logging", &self.logging)
            .finish()
    }
}

impl<'a> ExchangeSolver<'a> {
    /// Creates a solver without limits, logging or monitors.
    #[inline]
    pub fn new() -> Self {
        Self {
            monitors: Vec::new(),
            time_limit: None,
            logging: false,
        }
    }

    #[inline]
    pub fn add_monitor<M>(&mut self, monitor: M)
    where
        M: ExchangeMonitor + 'a,
    {
        self.monitors.push(Box::new(monitor));
    }

    #[inline]
    pub fn add_monitor_boxed(&mut self, monitor: Box<dyn ExchangeMonitor + 'a>) {
        self.monitors.push(monitor);
    }

    #[inline]
    pub fn time_limit(&self) -> Option<Duration> {
        self.time_limit
    }

    #[inline]
    pub fn has_time_limit(&self) -> bool {
        self.time_limit.is_some()
    }

    #[inline]
    pub fn logging(&self) -> bool {
        self.logging
    }

    /// Runs one sweep with the variance objective over `features`.
    pub fn solve_features(
        &mut self,
        features: &FeatureMatrix,
        partition: &Partition,
    ) -> Result<ExchangeOutcome, ExchangeError> {
        let partners = PartnerIndex::unrestricted(partition.num_elements())?;
        let mut objective = VarianceObjective::new(features);
        self.run(partition, &partners, &mut objective)
    }

    /// Runs one sweep with the pairwise distance objective, restricting
    /// exchanges to shared categories when `categories` is given.
    pub fn solve_distances(
        &mut self,
        distances: &DistanceMatrix,
        partition: &Partition,
        categories: Option<&Categories>,
    ) -> Result<ExchangeOutcome, ExchangeError> {
        let partners = PartnerIndex::new(partition.num_elements(), categories)?;
        let mut objective = DistanceObjective::new(distances);
        self.run(partition, &partners, &mut objective)
    }

    fn run<O>(
        &mut self,
        partition: &Partition,
        partners: &PartnerIndex,
        objective: &mut O,
    ) -> Result<ExchangeOutcome, ExchangeError>
    where
        O: ExchangeObjective,
    {
        let mut monitor = CompositeExchangeMonitor::try_with_capacity(self.monitors.len() + 2)?;
        if let Some(limit) = self.time_limit {
            monitor.add_monitor(TimeLimitMonitor::new(limit));
        }
        if self.logging {
            monitor.add_monitor(LogExchangeMonitor::new());
        }
        for m in &mut self.monitors {
            monitor.add_monitor(m.as_mut());
        }

        ExchangeEngine::new().run(partition, partners, objective, &mut monitor)
    }
}

/// Builder for `ExchangeSolver`.
pub struct ExchangeSolverBuilder<'a> {
    monitors: Vec<Box<dyn ExchangeMonitor + 'a>>,
    time_limit: Option<Duration>,
    logging: bool,
}

impl Default for ExchangeSolverBuilder<'_> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> ExchangeSolverBuilder<'a> {
    #[inline]
    pub fn new() -> Self {
        Self {
            monitors: Vec::new(),
            time_limit: None,
            logging: false,
        }
    }

    #[inline]
    pub fn with_time_limit(mut self, limit: Duration) -> Self {
        self.time_limit = Some(limit);
        self
    }

    #[inline]
    pub fn with_logging(mut self, enabled: bool) -> Self {
        self.logging = enabled;
        self
    }

    #[inline]
    pub fn add_monitor<M>(mut self, monitor: M) -> Self
    where
        M: ExchangeMonitor + 'a,
    {
        self.monitors.push(Box::new(monitor));
        self
    }

    #[inline]
    pub fn build(self) -> ExchangeSolver<'a> {
        ExchangeSolver {
            monitors: self.monitors,
            time_limit: self.time_limit,
            logging: self.logging,
        }
    }
}
