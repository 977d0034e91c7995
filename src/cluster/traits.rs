use super::point::Point;
use crate::error::Result;
use rand::Rng;

/// Common interface for hard clustering algorithms (one label per point).
pub trait Clustering {
    /// Fit the model and return one cluster label per input point.
    fn fit_predict(&self, points: &[Point]) -> Result<Vec<usize>>;

    /// The configured number of clusters.
    fn n_clusters(&self) -> usize;
}

/// Source of randomness for initialization and empty-cluster reseeding.
///
/// Every [`Rng`] is a `Sampler`. Tests can implement it directly to script
/// which points get picked.
pub trait Sampler {
    /// Draw `amount` distinct indices from `0..length`.
    ///
    /// Callers guarantee `amount <= length`.
    fn sample_distinct(&mut self, length: usize, amount: usize) -> Vec<usize>;

    /// Draw one index from `0..length`, with replacement. `length > 0`.
    fn sample_one(&mut self, length: usize) -> usize;
}

impl<R: Rng> Sampler for R {
    fn sample_distinct(&mut self, length: usize, amount: usize) -> Vec<usize> {
        rand::seq::index::sample(self, length, amount).into_vec()
    }

    fn sample_one(&mut self, length: usize) -> usize {
        self.random_range(0..length)
    }
}

/// What to do with a centroid whose cluster received no points.
///
/// Called once per empty cluster, in ascending cluster order, during the update step.
/// Closures with the same signature as [`EmptyClusterPolicy::reseed`] are policies too.
pub trait EmptyClusterPolicy {
    /// Return the replacement centroid for `cluster`.
    fn reseed(
        &mut self,
        cluster: usize,
        points: &[Point],
        assignments: &[usize],
        sampler: &mut dyn Sampler,
    ) -> Point;
}

impl<F> EmptyClusterPolicy for F
where
    F: FnMut(usize, &[Point], &[usize], &mut dyn Sampler) -> Point,
{
    fn reseed(
        &mut self,
        cluster: usize,
        points: &[Point],
        assignments: &[usize],
        sampler: &mut dyn Sampler,
    ) -> Point {
        self(cluster, points, assignments, sampler)
    }
}
