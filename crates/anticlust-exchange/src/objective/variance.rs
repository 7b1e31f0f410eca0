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


//! Summed within-group variance over a feature matrix.
//!
//! The value of a group is the sum, over its members, of the squared Euclidean
//! distance between the member's feature vector and the group centroid. The
//! centroid is the mean of the members' feature vectors.
//!
//! A probe moves the two affected centroids by the exchanged elements'
//! contribution (`x_b / f - x_a / f` on the first group, the reverse on the
//! second) without touching the cached centroids, then recomputes only the two
//! affected variances. Each probe costs `O((f1 + f2) * m)`.

use super::{ExchangeObjective, PairValues};
use crate::{
    error::{ExchangeError, try_reset},
    store::GroupStore,
};
use anticlust_model::{
    features::FeatureMatrix,
    index::{ElementIndex, GroupIndex},
};

/// The variance objective over a borrowed feature matrix.
#[derive(Debug, Clone)]
pub struct VarianceObjective<'a> {
    features: &'a FeatureMatrix,
    centroids: Vec<f64>,       // len = k * m
    variances: Vec<f64>,       // len = k
    probe_centroids: Vec<f64>, // len = 2 * m
    probe: PairValues,
    best_centroids: Vec<f64>, // len = 2 * m
    best: PairValues,
}

impl<'a> VarianceObjective<'a> {
    /// Creates an uninitialized objective. Nothing is allocated until
    /// `initialize` is called.
    #[inline]
    pub fn new(features: &'a FeatureMatrix) -> Self {
        Self {
            features,
            centroids: Vec::new(),
            variances: Vec::new(),
            probe_centroids: Vec::new(),
            probe: PairValues::default(),
            best_centroids: Vec::new(),
            best: PairValues::default(),
        }
    }

    /// Returns the borrowed feature matrix.
    #[inline]
    pub fn features(&self) -> &'a FeatureMatrix {
        self.features
    }

    /// Returns the authoritative centroid of a group.
    #[inline]
    pub fn centroid(&self, group: GroupIndex) -> &[f64] {
        let m = self.features.num_features();
        let g = group.get();
        debug_assert!(
            (g + 1) * m <= self.centroids.len(),
            "called `VarianceObjective::centroid` with group index out of bounds: the len is {} but the index is {}",
            self.variances.len(),
            g
        );

        &self.centroids[g * m..(g + 1) * m]
    }

    #[inline]
    fn variance(&self, members: &[ElementIndex], centroid: &[f64]) -> f64 {
        let mut sum = 0.0;
        for &member in members {
            let mut squared = 0.0;
            for (x, c) in self.features.row(member).iter().zip(centroid) {
                let d = x - c;
                squared += d * d;
            }
            sum += squared;
        }
        sum
    }
}

impl ExchangeObjective for VarianceObjective<'_> {
    fn name(&self) -> &str {
        "VarianceObjective"
    }

    fn initialize(&mut self, store: &GroupStore) -> Result<(), ExchangeError> {
        debug_assert_eq!(
            store.num_elements(),
            self.features.num_elements(),
            "called `VarianceObjective::initialize` with a store of {} elements for {} feature rows",
            store.num_elements(),
            self.features.num_elements()
        );

        let m = self.features.num_features();
        let k = store.num_groups();

        try_reset(&mut self.centroids, k * m, 0.0, "group centroids")?;
        try_reset(&mut self.variances, k, 0.0, "group variances")?;
        try_reset(&mut self.probe_centroids, 2 * m, 0.0, "probe centroids")?;
        try_reset(&mut self.best_centroids, 2 * m, 0.0, "best centroids")?;
        self.probe = PairValues::default();
        self.best = PairValues::default();

        for g in 0..k {
            let group = GroupIndex::new(g);
            let frequency = store.frequency(group);
            if frequency == 0 {
                continue;
            }

            let centroid = &mut self.centroids[g * m..(g + 1) * m];
            for &member in store.members(group) {
                for (c, x) in centroid.iter_mut().zip(self.features.row(member)) {
                    *c += x;
                }
            }
            let f = frequency as f64;
            for c in centroid.iter_mut() {
                *c /= f;
            }
        }

        for g in 0..k {
            let centroid = &self.centroids[g * m..(g + 1) * m];
            let variance = self.variance(store.members(GroupIndex::new(g)), centroid);
            self.variances[g] = variance;
        }

        Ok(())
    }

    #[inline]
    fn group_values(&self) -> &[f64] {
        &self.variances
    }

    #[inline]
    fn begin_probe(&mut self, store: &GroupStore, a: ElementIndex, b: ElementIndex) {
        let g1 = store.group_of(a);
        let g2 = store.group_of(b);
        debug_assert_ne!(
            g1, g2,
            "called `VarianceObjective::begin_probe` with elements {} and {} of the same group {}",
            a, b, g1
        );

        let m = self.features.num_features();
        let f1 = store.frequency(g1) as f64;
        let f2 = store.frequency(g2) as f64;
        let xa = self.features.row(a);
        let xb = self.features.row(b);
        let c1 = &self.centroids[g1.get() * m..(g1.get() + 1) * m];
        let c2 = &self.centroids[g2.get() * m..(g2.get() + 1) * m];

        let (p1, p2) = self.probe_centroids.split_at_mut(m);
        for p in 0..m {
            p1[p] = c1[p] + xb[p] / f1 - xa[p] / f1;
            p2[p] = c2[p] - xb[p] / f2 + xa[p] / f2;
        }

        self.probe.first = g1;
        self.probe.second = g2;
    }

    #[inline]
    fn finish_probe(&mut self, store: &GroupStore, _a: ElementIndex, _b: ElementIndex) -> f64 {
        let m = self.features.num_features();
        let (g1, g2) = (self.probe.first, self.probe.second);

        self.probe.first_value = self.variance(store.members(g1), &self.probe_centroids[..m]);
        self.probe.second_value = self.variance(store.members(g2), &self.probe_centroids[m..]);

        self.probe.total_over(&self.variances)
    }

    #[inline]
    fn retain_probe(&mut self) {
        self.best = self.probe;
        self.best_centroids.copy_from_slice(&self.probe_centroids);
    }

    #[inline]
    fn commit(&mut self) {
        let m = self.features.num_features();
        let (g1, g2) = (self.best.first.get(), self.best.second.get());

        self.centroids[g1 * m..(g1 + 1) * m].copy_from_slice(&self.best_centroids[..m]);
        self.centroids[g2 * m..(g2 + 1) * m].copy_from_slice(&self.best_centroids[m..]);
        self.best.write_into(&mut self.variances);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anticlust_model::partition::Partition;

    fn ei(i: usize) -> ElementIndex {
        ElementIndex::new(i)
    }

    fn gi(i: usize) -> GroupIndex {
        GroupIndex::new(i)
    }

    fn store(labels: &[usize], frequencies: &[usize]) -> GroupStore {
        GroupStore::try_new(&Partition::try_new(labels, frequencies).unwrap()).unwrap()
    }

    fn fresh_total(features: &FeatureMatrix, store: &GroupStore) -> f64 {
        let mut objective = VarianceObjective::new(features);
        objective.initialize(store).unwrap();
        objective.total()
    }

    #[test]
    fn test_initialize_computes_centroids_and_variances() {
        let features = FeatureMatrix::from_column(&[0.0, 0.0, 10.0, 10.0]);
        let store = store(&[0, 1, 0, 1], &[2, 2]);
        let mut objective = VarianceObjective::new(&features);
        objective.initialize(&store).unwrap();

        assert_eq!(objective.centroid(gi(0)), &[5.0]);
        assert_eq!(objective.centroid(gi(1)), &[5.0]);
        assert_eq!(objective.group_values(), &[50.0, 50.0]);
        assert_eq!(objective.total(), 100.0);
    }

    #[test]
    fn test_group_value_sums_member_distances() {
        let features =
            FeatureMatrix::from_rows(&[[0.0, 0.0], [2.0, 0.0], [1.0, 3.0], [1.0, 1.0]]).unwrap();
        let store = store(&[0, 0, 1, 1], &[2, 2]);
        let mut objective = VarianceObjective::new(&features);
        objective.initialize(&store).unwrap();

        assert_eq!(objective.centroid(gi(0)), &[1.0, 0.0]);
        assert_eq!(objective.centroid(gi(1)), &[1.0, 2.0]);
        // Each member lies at squared distance 1 from its centroid.
        assert_eq!(objective.group_values(), &[2.0, 2.0]);
        assert_eq!(objective.total(), 4.0);
    }

    #[test]
    fn test_initialize_homogeneous_groups_is_zero() {
        let features = FeatureMatrix::from_column(&[0.0, 0.0, 10.0, 10.0]);
        let store = store(&[0, 0, 1, 1], &[2, 2]);
        let mut objective = VarianceObjective::new(&features);
        objective.initialize(&store).unwrap();

        assert_eq!(objective.centroid(gi(0)), &[0.0]);
        assert_eq!(objective.centroid(gi(1)), &[10.0]);
        assert_eq!(objective.total(), 0.0);
    }

    #[test]
    fn test_probe_matches_recomputation() {
        let features =
            FeatureMatrix::from_rows(&[[1.0, 2.0], [4.0, 0.0], [2.0, 2.0], [8.0, 1.0], [0.0, 3.0]])
                .unwrap();
        let mut store = store(&[0, 0, 1, 1, 1], &[2, 3]);
        let mut objective = VarianceObjective::new(&features);
        objective.initialize(&store).unwrap();
        let before = objective.total();

        objective.begin_probe(&store, ei(1), ei(3));
        store.swap(ei(1), ei(3));
        let value = objective.finish_probe(&store, ei(1), ei(3));
        let expected = fresh_total(&features, &store);
        store.swap(ei(1), ei(3));

        assert!((value - expected).abs() < 1e-9, "{value} vs {expected}");
        // Probing leaves the authoritative state alone.
        assert_eq!(objective.total(), before);
    }

    #[test]
    fn test_commit_adopts_retained_probe() {
        let features = FeatureMatrix::from_column(&[0.0, 0.0, 10.0, 10.0]);
        let mut store = store(&[0, 0, 1, 1], &[2, 2]);
        let mut objective = VarianceObjective::new(&features);
        objective.initialize(&store).unwrap();

        objective.begin_probe(&store, ei(0), ei(2));
        store.swap(ei(0), ei(2));
        let value = objective.finish_probe(&store, ei(0), ei(2));
        store.swap(ei(0), ei(2));
        objective.retain_probe();
        assert_eq!(value, 100.0);

        store.swap(ei(0), ei(2));
        objective.commit();

        assert_eq!(objective.total(), 100.0);
        assert_eq!(objective.centroid(gi(0)), &[5.0]);
        assert_eq!(objective.centroid(gi(1)), &[5.0]);
        assert_eq!(objective.group_values(), &[50.0, 50.0]);
    }

    #[test]
    fn test_later_probe_does_not_clobber_retained_one() {
        let features = FeatureMatrix::from_column(&[0.0, 1.0, 10.0, 4.0]);
        let mut store = store(&[0, 0, 1, 1], &[2, 2]);
        let mut objective = VarianceObjective::new(&features);
        objective.initialize(&store).unwrap();

        objective.begin_probe(&store, ei(0), ei(2));
        store.swap(ei(0), ei(2));
        let retained = objective.finish_probe(&store, ei(0), ei(2));
        store.swap(ei(0), ei(2));
        objective.retain_probe();

        objective.begin_probe(&store, ei(0), ei(3));
        store.swap(ei(0), ei(3));
        objective.finish_probe(&store, ei(0), ei(3));
        store.swap(ei(0), ei(3));

        store.swap(ei(0), ei(2));
        objective.commit();

        assert!((objective.total() - retained).abs() < 1e-12);
        assert!((objective.total() - fresh_total(&features, &store)).abs() < 1e-9);
    }

    #[test]
    fn test_unequal_group_sizes_probe_matches_recomputation() {
        let features = FeatureMatrix::from_column(&[3.0, 7.0, 1.0, 9.0, 4.0, 6.0]);
        let mut store = store(&[0, 1, 1, 1, 1, 0], &[2, 4]);
        let mut objective = VarianceObjective::new(&features);
        objective.initialize(&store).unwrap();

        for (a, b) in [(0, 1), (5, 3), (0, 4)] {
            objective.begin_probe(&store, ei(a), ei(b));
            store.swap(ei(a), ei(b));
            let value = objective.finish_probe(&store, ei(a), ei(b));
            let expected = fresh_total(&features, &store);
            store.swap(ei(a), ei(b));
            assert!((value - expected).abs() < 1e-9, "swap ({a}, {b}): {value} vs {expected}");
        }
    }

    #[test]
    fn test_no_features_gives_zero() {
        let features = FeatureMatrix::from_row_major(3, 0, Vec::new()).unwrap();
        let store = store(&[0, 1, 0], &[2, 1]);
        let mut objective = VarianceObjective::new(&features);
        objective.initialize(&store).unwrap();
        assert_eq!(objective.total(), 0.0);
    }

    #[test]
    fn test_name() {
        let features = FeatureMatrix::from_column(&[1.0]);
        assert_eq!(VarianceObjective::new(&features).name(), "VarianceObjective");
    }
}
