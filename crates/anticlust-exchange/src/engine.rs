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


//! Single-sweep exchange driver.
//!
//! The engine visits every element once, in index order. For each element it
//! probes the exchange with every admissible partner (every element of the
//! same category that currently sits in a different group), remembers the
//! partner yielding the largest objective, and commits that exchange if it
//! beats the objective the element started from. Probes simulate the
//! exchange on the group store and take it back immediately, so between
//! elements the store and the objective always describe the same assignment.
//!
//! Two comparisons decide a commit, both strict:
//! - a probe replaces the current best only if its value is greater than the
//!   best so far, which starts at `0.0`;
//! - the best probe is committed only if its value is greater than the
//!   objective before the element was visited.
//!
//! Ties therefore go to the first partner in scan order, and an element whose
//! best exchange does not change the objective stays where it is.

use crate::{
    error::ExchangeError,
    monitor::exchange_monitor::{ExchangeMonitor, SearchCommand},
    objective::ExchangeObjective,
    partners::PartnerIndex,
    result::{ExchangeOutcome, ExchangeTerminationReason},
    stats::ExchangeStatistics,
    store::GroupStore,
};
use anticlust_model::{index::ElementIndex, partition::Partition};
use std::time::Instant;
use tracing::debug;

/// The exchange-method driver.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExchangeEngine;

impl ExchangeEngine {
    #[inline]
    pub fn new() -> Self {
        Self
    }

    /// Runs one sweep starting from `partition`.
    ///
    /// # Parameters:
    /// - `partition`: The initial assignment; group sizes are preserved.
    /// - `partners`: Which elements each element may be exchanged with.
    /// - `objective`: The objective to maximize; initialized here.
    /// - `monitor`: Observes the sweep and may stop it between elements.
    ///
    /// # Errors
    ///
    /// Returns `ExchangeError::Allocation` if a working structure cannot be
    /// allocated. Nothing is produced in that case and every buffer acquired so
    /// far is released.
    #[tracing::instrument(
        skip_all,
        fields(
            n = partition.num_elements(),
            k = partition.num_groups(),
            objective = objective.name()
        )
    )]
    pub fn run<O, M>(
        &self,
        partition: &Partition,
        partners: &PartnerIndex,
        objective: &mut O,
        monitor: &mut M,
    ) -> Result<ExchangeOutcome, ExchangeError>
    where
        O: ExchangeObjective + ?Sized,
        M: ExchangeMonitor + ?Sized,
    {
        let start_time = Instant::now();
        let mut stats = ExchangeStatistics::default();

        debug_assert_eq!(
            partners.num_elements(),
            partition.num_elements(),
            "called `ExchangeEngine::run` with a partner index over {} elements for a partition of {} elements",
            partners.num_elements(),
            partition.num_elements()
        );

        let mut store = GroupStore::try_new(partition)?;
        objective.initialize(&store)?;

        let initial_objective = objective.total();
        debug!(initial_objective, "sweep initialized");
        monitor.on_start(&store, initial_objective);

        let mut termination_reason = ExchangeTerminationReason::SweepCompleted;
        for e in 0..store.num_elements() {
            if let SearchCommand::Terminate(reason) = monitor.search_command(&stats) {
                termination_reason = ExchangeTerminationReason::Aborted(reason);
                break;
            }

            let element = ElementIndex::new(e);
            stats.on_element();
            monitor.on_element(element, &stats);

            let baseline = objective.total();
            let home = store.group_of(element);
            let mut best_value = 0.0;
            let mut best_partner = None;

            for &partner in partners.partners_of(element) {
                // Also skips `element` itself.
                if store.group_of(partner) == home {
                    continue;
                }

                objective.begin_probe(&store, element, partner);
                store.swap(element, partner);
                let value = objective.finish_probe(&store, element, partner);
                store.swap(element, partner);

                stats.on_probe();
                monitor.on_probe(element, partner, value, &stats);

                if value > best_value {
                    best_value = value;
                    best_partner = Some(partner);
                    objective.retain_probe();
                    stats.on_improving_probe();
                    monitor.on_improvement(element, partner, value, &stats);
                }
            }

            if let Some(partner) = best_partner {
                if best_value > baseline {
                    store.swap(element, partner);
                    objective.commit();
                    stats.on_commit();
                    monitor.on_commit(element, partner, objective.total(), &stats);
                }
            }
        }

        stats.set_total_time(start_time.elapsed());
        let final_objective = objective.total();
        debug!(
            final_objective,
            swaps = stats.committed_swaps,
            reason = %termination_reason,
            "sweep finished"
        );
        monitor.on_end(&store, final_objective, &stats);

        let partition = store.try_into_partition()?;
        Ok(match termination_reason {
            ExchangeTerminationReason::SweepCompleted => {
                ExchangeOutcome::completed(partition, initial_objective, final_objective, stats)
            }
            ExchangeTerminationReason::Aborted(reason) => ExchangeOutcome::aborted(
                partition,
                initial_objective,
                final_objective,
                reason,
                stats,
            ),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        monitor::{no_op::NoOpMonitor, time::TimeLimitMonitor},
        objective::{distance::DistanceObjective, variance::VarianceObjective},
    };
    use anticlust_model::{
        category::Categories, distance::DistanceMatrix, features::FeatureMatrix,
        index::GroupIndex,
    };
    use std::time::Duration;

    fn ei(i: usize) -> ElementIndex {
        ElementIndex::new(i)
    }

    fn labels(partition: &Partition) -> Vec<usize> {
        partition.labels().iter().map(GroupIndex::get).collect()
    }

    /// Records every probed and committed pair.
    #[derive(Default)]
    struct PairRecorder {
        probes: Vec<(usize, usize)>,
        commits: Vec<(usize, usize)>,
    }

    impl ExchangeMonitor for PairRecorder {
        fn name(&self) -> &str {
            "PairRecorder"
        }

        fn on_start(&mut self, _store: &GroupStore, _objective: f64) {}

        fn on_end(&mut self, _store: &GroupStore, _objective: f64, _s: &ExchangeStatistics) {}

        fn on_element(&mut self, _element: ElementIndex, _s: &ExchangeStatistics) {}

        fn on_probe(&mut self, a: ElementIndex, b: ElementIndex, _v: f64, _s: &ExchangeStatistics) {
            self.probes.push((a.get(), b.get()));
        }

        fn on_commit(&mut self, a: ElementIndex, b: ElementIndex, _o: f64, _s: &ExchangeStatistics) {
            self.commits.push((a.get(), b.get()));
        }
    }

    #[test]
    fn test_variance_sweep_splits_pairs() {
        let features = FeatureMatrix::from_column(&[0.0, 0.0, 10.0, 10.0]);
        let partition = Partition::try_new(&[0, 0, 1, 1], &[2, 2]).unwrap();
        let partners = PartnerIndex::unrestricted(4).unwrap();
        let mut objective = VarianceObjective::new(&features);
        let mut monitor = PairRecorder::default();

        let outcome = ExchangeEngine::new()
            .run(&partition, &partners, &mut objective, &mut monitor)
            .unwrap();

        assert_eq!(labels(outcome.partition()), vec![1, 0, 0, 1]);
        assert_eq!(outcome.initial_objective(), 0.0);
        assert_eq!(outcome.final_objective(), 100.0);
        assert_eq!(
            outcome.termination_reason(),
            &ExchangeTerminationReason::SweepCompleted
        );
        // Element 0 ties between partners 2 and 3; the first one wins.
        assert_eq!(monitor.commits, vec![(0, 2)]);
        assert_eq!(outcome.statistics().elements_visited, 4);
        assert_eq!(outcome.statistics().committed_swaps, 1);
        // Element 2 moved as the partner of element 0 but committed nothing itself.
        assert_eq!(outcome.statistics().elements_without_commit(), 3);
    }

    #[test]
    fn test_distance_sweep_splits_pairs() {
        let features = FeatureMatrix::from_column(&[0.0, 0.0, 10.0, 10.0]);
        let distances = DistanceMatrix::euclidean(&features).unwrap();
        let partition = Partition::try_new(&[0, 0, 1, 1], &[2, 2]).unwrap();
        let partners = PartnerIndex::unrestricted(4).unwrap();
        let mut objective = DistanceObjective::new(&distances);

        let outcome = ExchangeEngine::new()
            .run(&partition, &partners, &mut objective, &mut NoOpMonitor)
            .unwrap();

        assert_eq!(labels(outcome.partition()), vec![1, 0, 0, 1]);
        assert_eq!(outcome.initial_objective(), 0.0);
        assert_eq!(outcome.final_objective(), 20.0);
    }

    #[test]
    fn test_second_sweep_changes_nothing() {
        let features = FeatureMatrix::from_column(&[0.0, 0.0, 10.0, 10.0]);
        let partners = PartnerIndex::unrestricted(4).unwrap();
        let engine = ExchangeEngine::new();

        let first = engine
            .run(
                &Partition::try_new(&[0, 0, 1, 1], &[2, 2]).unwrap(),
                &partners,
                &mut VarianceObjective::new(&features),
                &mut NoOpMonitor,
            )
            .unwrap();
        let second = engine
            .run(
                first.partition(),
                &partners,
                &mut VarianceObjective::new(&features),
                &mut NoOpMonitor,
            )
            .unwrap();

        assert_eq!(second.partition(), first.partition());
        assert_eq!(second.final_objective(), second.initial_objective());
        assert_eq!(second.statistics().committed_swaps, 0);
    }

    #[test]
    fn test_categories_restrict_partners() {
        let features = FeatureMatrix::from_column(&[0.0, 0.0, 10.0, 10.0]);
        let distances = DistanceMatrix::euclidean(&features).unwrap();
        let partition = Partition::try_new(&[0, 1, 0, 1], &[2, 2]).unwrap();
        let categories = Categories::try_new(&[0, 0, 1, 1], &[2, 2]).unwrap();
        let partners = PartnerIndex::by_category(&categories).unwrap();
        let mut monitor = PairRecorder::default();

        ExchangeEngine::new()
            .run(
                &partition,
                &partners,
                &mut DistanceObjective::new(&distances),
                &mut monitor,
            )
            .unwrap();

        assert!(!monitor.probes.is_empty());
        for &(a, b) in monitor.probes.iter().chain(&monitor.commits) {
            assert_eq!(
                categories.category_of(ei(a)),
                categories.category_of(ei(b)),
                "elements {a} and {b} were paired across categories"
            );
        }
        assert!(!monitor.probes.contains(&(0, 2)));
        assert!(!monitor.probes.contains(&(0, 3)));
    }

    #[test]
    fn test_local_optimum_is_left_alone() {
        let features = FeatureMatrix::from_column(&[0.0, 10.0, 0.0, 10.0]);
        let partition = Partition::try_new(&[0, 0, 1, 1], &[2, 2]).unwrap();
        let partners = PartnerIndex::unrestricted(4).unwrap();

        let outcome = ExchangeEngine::new()
            .run(
                &partition,
                &partners,
                &mut VarianceObjective::new(&features),
                &mut NoOpMonitor,
            )
            .unwrap();

        assert_eq!(outcome.partition(), &partition);
        assert_eq!(outcome.initial_objective(), 100.0);
        assert_eq!(outcome.final_objective(), 100.0);
        assert!(outcome.statistics().probes > 0);
    }

    #[test]
    fn test_single_group_probes_nothing() {
        let features = FeatureMatrix::from_column(&[3.0, 1.0, 2.0]);
        let partition = Partition::try_new(&[0, 0, 0], &[3]).unwrap();
        let partners = PartnerIndex::unrestricted(3).unwrap();

        let outcome = ExchangeEngine::new()
            .run(
                &partition,
                &partners,
                &mut VarianceObjective::new(&features),
                &mut NoOpMonitor,
            )
            .unwrap();

        assert_eq!(outcome.partition(), &partition);
        assert_eq!(outcome.statistics().probes, 0);
    }

    #[test]
    fn test_empty_input_completes() {
        let features = FeatureMatrix::from_column(&[]);
        let partition = Partition::try_new(&[], &[]).unwrap();
        let partners = PartnerIndex::unrestricted(0).unwrap();

        let outcome = ExchangeEngine::new()
            .run(
                &partition,
                &partners,
                &mut VarianceObjective::new(&features),
                &mut NoOpMonitor,
            )
            .unwrap();

        assert_eq!(outcome.partition().num_elements(), 0);
        assert_eq!(outcome.final_objective(), 0.0);
        assert_eq!(
            outcome.termination_reason(),
            &ExchangeTerminationReason::SweepCompleted
        );
    }

    #[test]
    fn test_time_limit_aborts_before_first_element() {
        let features = FeatureMatrix::from_column(&[0.0, 0.0, 10.0, 10.0]);
        let partition = Partition::try_new(&[0, 0, 1, 1], &[2, 2]).unwrap();
        let partners = PartnerIndex::unrestricted(4).unwrap();
        let mut monitor = TimeLimitMonitor::new(Duration::ZERO);

        let outcome = ExchangeEngine::new()
            .run(
                &partition,
                &partners,
                &mut VarianceObjective::new(&features),
                &mut monitor,
            )
            .unwrap();

        assert_eq!(
            outcome.termination_reason(),
            &ExchangeTerminationReason::Aborted("time limit exceeded".to_string())
        );
        assert_eq!(outcome.partition(), &partition);
        assert_eq!(outcome.statistics().elements_visited, 0);
    }

    #[test]
    fn test_dyn_objective_and_monitor() {
        let features = FeatureMatrix::from_column(&[0.0, 0.0, 10.0, 10.0]);
        let partition = Partition::try_new(&[0, 0, 1, 1], &[2, 2]).unwrap();
        let partners = PartnerIndex::unrestricted(4).unwrap();
        let mut variance = VarianceObjective::new(&features);
        let objective: &mut dyn ExchangeObjective = &mut variance;
        let mut no_op = NoOpMonitor;
        let monitor: &mut dyn ExchangeMonitor = &mut no_op;

        let outcome = ExchangeEngine::new()
            .run(&partition, &partners, objective, monitor)
            .unwrap();

        assert_eq!(outcome.final_objective(), 100.0);
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        /// `(labels, k, features, category labels)` for `n` in `2..24`.
        fn instance() -> impl Strategy<Value = (Vec<usize>, usize, FeatureMatrix, Vec<usize>)> {
            (2usize..24, 1usize..5, 1usize..4).prop_flat_map(|(n, k, m)| {
                (
                    prop::collection::vec(0..k, n),
                    Just(k),
                    prop::collection::vec(-50.0f64..50.0, n * m)
                        .prop_map(move |v| FeatureMatrix::from_row_major(n, m, v).unwrap()),
                    prop::collection::vec(0usize..3, n),
                )
            })
        }

        fn close(a: f64, b: f64) -> bool {
            (a - b).abs() <= 1e-6 * (1.0 + a.abs().max(b.abs()))
        }

        fn variance_of(features: &FeatureMatrix, partition: &Partition) -> f64 {
            let store = GroupStore::try_new(partition).unwrap();
            let mut objective = VarianceObjective::new(features);
            objective.initialize(&store).unwrap();
            objective.total()
        }

        fn distance_of(distances: &DistanceMatrix, partition: &Partition) -> f64 {
            let store = GroupStore::try_new(partition).unwrap();
            let mut objective = DistanceObjective::new(distances);
            objective.initialize(&store).unwrap();
            objective.total()
        }

        fn category_counts(partition: &Partition, categories: &[usize]) -> Vec<Vec<usize>> {
            let mut counts = vec![vec![0; 3]; partition.num_groups()];
            for (e, g) in partition.labels().iter().enumerate() {
                counts[g.get()][categories[e]] += 1;
            }
            counts
        }

        proptest! {
            /// Group sizes survive the sweep and the objective never decreases.
            #[test]
            fn variance_sweep_keeps_sizes_and_improves((initial, k, features, _) in instance()) {
                let partition = Partition::from_labels(&initial, k).unwrap();
                let partners = PartnerIndex::unrestricted(initial.len()).unwrap();

                let outcome = ExchangeEngine::new()
                    .run(&partition, &partners, &mut VarianceObjective::new(&features), &mut NoOpMonitor)
                    .unwrap();
                let result = outcome.partition();

                let relabelled = Partition::from_labels(&labels(result), k).unwrap();
                prop_assert_eq!(result.frequencies(), partition.frequencies());
                prop_assert_eq!(relabelled.frequencies(), partition.frequencies());
                prop_assert!(outcome.final_objective() >= outcome.initial_objective());
                prop_assert!(close(outcome.final_objective(), variance_of(&features, result)));
            }

            #[test]
            fn distance_sweep_keeps_sizes_and_improves((initial, k, features, _) in instance()) {
                let distances = DistanceMatrix::euclidean(&features).unwrap();
                let partition = Partition::from_labels(&initial, k).unwrap();
                let partners = PartnerIndex::unrestricted(initial.len()).unwrap();

                let outcome = ExchangeEngine::new()
                    .run(&partition, &partners, &mut DistanceObjective::new(&distances), &mut NoOpMonitor)
                    .unwrap();
                let result = outcome.partition();

                let relabelled = Partition::from_labels(&labels(result), k).unwrap();
                prop_assert_eq!(relabelled.frequencies(), partition.frequencies());
                prop_assert!(outcome.final_objective() >= outcome.initial_objective());
                prop_assert!(close(outcome.final_objective(), distance_of(&distances, result)));
            }

            /// Two runs on the same input produce the same output.
            #[test]
            fn sweep_is_deterministic((initial, k, features, _) in instance()) {
                let partition = Partition::from_labels(&initial, k).unwrap();
                let partners = PartnerIndex::unrestricted(initial.len()).unwrap();
                let engine = ExchangeEngine::new();

                let first = engine
                    .run(&partition, &partners, &mut VarianceObjective::new(&features), &mut NoOpMonitor)
                    .unwrap();
                let second = engine
                    .run(&partition, &partners, &mut VarianceObjective::new(&features), &mut NoOpMonitor)
                    .unwrap();

                prop_assert_eq!(first.partition(), second.partition());
                prop_assert_eq!(first.final_objective(), second.final_objective());
            }

            /// Only same-category elements are ever paired, so each group keeps
            /// its category composition.
            #[test]
            fn categories_are_respected((initial, k, features, category_labels) in instance()) {
                let distances = DistanceMatrix::euclidean(&features).unwrap();
                let partition = Partition::from_labels(&initial, k).unwrap();
                let categories = Categories::try_new(
                    &category_labels,
                    &[0, 1, 2].map(|c| category_labels.iter().filter(|&&l| l == c).count()),
                )
                .unwrap();
                let partners = PartnerIndex::by_category(&categories).unwrap();
                let mut monitor = PairRecorder::default();

                let outcome = ExchangeEngine::new()
                    .run(&partition, &partners, &mut DistanceObjective::new(&distances), &mut monitor)
                    .unwrap();

                for &(a, b) in monitor.probes.iter().chain(&monitor.commits) {
                    prop_assert_eq!(category_labels[a], category_labels[b]);
                }
                prop_assert_eq!(
                    category_counts(outcome.partition(), &category_labels),
                    category_counts(&partition, &category_labels)
                );
            }
        }
    }
}
