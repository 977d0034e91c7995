//! K-means (Lloyd's algorithm) over 2-D points.
//!
//! 1. Initialization: `k` distinct points drawn uniformly at random.
//! 2. Assignment: each point goes to the centroid with the smallest squared
//!    Euclidean distance; exact ties go to the lowest centroid index.
//! 3. Update: each centroid becomes the mean of its members. A centroid whose
//!    cluster is empty is handed to an [`EmptyClusterPolicy`]; the default,
//!    [`ReseedFromPoints`], replaces it with a random input point.
//! 4. Convergence: stop when the total squared centroid shift drops below the
//!    tolerance, returning the freshly updated centroids. Otherwise stop after
//!    `max_iter` iterations with whatever the last update produced.
//!
//! ## Complexity
//!
//! - **Time**: O(max_iter * n * k).
//! - **Space**: O(n + k).

use super::point::Point;
use super::traits::{Clustering, EmptyClusterPolicy, Sampler};
use crate::error::{Error, Result};
use rand::prelude::*;
use tracing::{debug, trace};

/// Default number of clusters.
pub const DEFAULT_N_CLUSTERS: usize = 3;
/// Default iteration cap.
pub const DEFAULT_MAX_ITER: usize = 100;
/// Default convergence tolerance on the total squared shift.
pub const DEFAULT_TOLERANCE: f64 = 1e-4;

/// K-means clusterer.
#[derive(Debug, Clone)]
pub struct Kmeans {
    k: usize,
    max_iter: usize,
    tol: f64,
    seed: Option<u64>,
}

/// Result of a k-means run.
#[derive(Debug, Clone, PartialEq)]
pub struct KmeansFit {
    /// Exactly `k` centroids. Their order carries no meaning across runs.
    pub centroids: Vec<Point>,
    /// Cluster index per input point, from the last assignment step.
    pub assignments: Vec<usize>,
    /// Number of completed iterations.
    pub iterations: usize,
    /// `false` when the iteration cap was hit before the shift dropped below tolerance.
    pub converged: bool,
    /// Total squared centroid shift of the last iteration.
    pub shift: f64,
}

impl KmeansFit {
    /// Number of points assigned to each cluster.
    pub fn cluster_sizes(&self) -> Vec<usize> {
        let mut sizes = vec![0; self.centroids.len()];
        for &a in &self.assignments {
            sizes[a] += 1;
        }
        sizes
    }

    /// Within-cluster sum of squared distances to the returned centroids.
    pub fn inertia(&self, points: &[Point]) -> f64 {
        points
            .iter()
            .zip(&self.assignments)
            .map(|(p, &a)| p.squared_distance(self.centroids[a]))
            .sum()
    }
}

impl Kmeans {
    /// Create a new k-means clusterer with `k` clusters.
    pub fn new(k: usize) -> Self {
        Self {
            k,
            max_iter: DEFAULT_MAX_ITER,
            tol: DEFAULT_TOLERANCE,
            seed: None,
        }
    }

    /// Set the iteration cap.
    pub fn with_max_iter(mut self, max_iter: usize) -> Self {
        self.max_iter = max_iter;
        self
    }

    /// Set the convergence tolerance.
    pub fn with_tolerance(mut self, tol: f64) -> Self {
        self.tol = tol;
        self
    }

    /// Seed the internal RNG used by [`Kmeans::fit`].
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Fit using the configured seed, or the thread RNG when unseeded.
    pub fn fit(&self, points: &[Point]) -> Result<KmeansFit> {
        match self.seed {
            Some(seed) => self.fit_with(points, &mut StdRng::seed_from_u64(seed)),
            None => self.fit_with(points, &mut rand::rng()),
        }
    }

    /// Fit with an explicit randomness source and the default empty-cluster policy.
    pub fn fit_with<S: Sampler>(&self, points: &[Point], sampler: &mut S) -> Result<KmeansFit> {
        self.fit_with_policy(points, sampler, &mut ReseedFromPoints)
    }

    /// Fit with an explicit randomness source and empty-cluster policy.
    pub fn fit_with_policy(
        &self,
        points: &[Point],
        sampler: &mut dyn Sampler,
        policy: &mut dyn EmptyClusterPolicy,
    ) -> Result<KmeansFit> {
        self.validate(points)?;
        let n = points.len();
        debug!(n, k = self.k, max_iter = self.max_iter, tol = self.tol, "kmeans start");

        let init = sampler.sample_distinct(n, self.k);
        debug_assert_eq!(init.len(), self.k);
        let mut centroids: Vec<Point> = init.into_iter().map(|i| points[i]).collect();
        let mut assignments = vec![0usize; n];
        let mut shift = f64::INFINITY;

        for iter in 0..self.max_iter {
            assign_points(points, &centroids, &mut assignments);
            let update = update_centroids(points, &assignments, &centroids, sampler, policy);
            shift = update.shift;
            centroids = update.centroids;
            trace!(iteration = iter + 1, shift, "lloyd iteration");

            if shift < self.tol {
                debug!(iterations = iter + 1, shift, "kmeans converged");
                return Ok(KmeansFit {
                    centroids,
                    assignments,
                    iterations: iter + 1,
                    converged: true,
                    shift,
                });
            }
        }

        debug!(iterations = self.max_iter, shift, "kmeans hit iteration cap");
        Ok(KmeansFit {
            centroids,
            assignments,
            iterations: self.max_iter,
            converged: false,
            shift,
        })
    }

    fn validate(&self, points: &[Point]) -> Result<()> {
        let n = points.len();
        if n == 0 {
            return Err(Error::EmptyInput);
        }
        if self.k == 0 || self.k > n {
            return Err(Error::InvalidClusterCount {
                requested: self.k,
                n_items: n,
            });
        }
        if self.max_iter == 0 {
            return Err(Error::InvalidParameter {
                name: "max_iter",
                message: "must be at least 1",
            });
        }
        if self.tol.is_nan() || self.tol < 0.0 {
            return Err(Error::InvalidParameter {
                name: "tolerance",
                message: "must be non-negative",
            });
        }
        if let Some(index) = points.iter().position(|p| !p.is_finite()) {
            return Err(Error::NonFinitePoint { index });
        }
        Ok(())
    }
}

impl Default for Kmeans {
    fn default() -> Self {
        Self::new(DEFAULT_N_CLUSTERS)
    }
}

impl Clustering for Kmeans {
    fn fit_predict(&self, points: &[Point]) -> Result<Vec<usize>> {
        Ok(self.fit(points)?.assignments)
    }

    fn n_clusters(&self) -> usize {
        self.k
    }
}

/// Run k-means with an explicit randomness source.
pub fn run<S: Sampler>(
    points: &[Point],
    k: usize,
    max_iterations: usize,
    tolerance: f64,
    sampler: &mut S,
) -> Result<Vec<Point>> {
    let fit = Kmeans::new(k)
        .with_max_iter(max_iterations)
        .with_tolerance(tolerance)
        .fit_with(points, sampler)?;
    Ok(fit.centroids)
}

/// Reseed an empty cluster with a point drawn uniformly (with replacement) from all inputs.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReseedFromPoints;

impl EmptyClusterPolicy for ReseedFromPoints {
    fn reseed(
        &mut self,
        cluster: usize,
        points: &[Point],
        _assignments: &[usize],
        sampler: &mut dyn Sampler,
    ) -> Point {
        let idx = sampler.sample_one(points.len());
        debug!(cluster, point = idx, "reseeding empty cluster");
        points[idx]
    }
}

/// Index of the nearest centroid; the lowest index wins exact ties.
///
/// # Panics
///
/// Panics if `centroids` is empty.
#[inline]
pub fn nearest_centroid(point: Point, centroids: &[Point]) -> usize {
    assert!(!centroids.is_empty(), "no centroids to choose from");
    let mut best = 0;
    let mut best_dist = f64::INFINITY;
    for (j, &c) in centroids.iter().enumerate() {
        let d = point.squared_distance(c);
        if d < best_dist {
            best_dist = d;
            best = j;
        }
    }
    best
}

/// Assignment step. Overwrites every entry of `assignments`.
///
/// # Panics
///
/// Panics if `assignments` and `points` differ in length, or if `centroids` is empty.
pub fn assign_points(points: &[Point], centroids: &[Point], assignments: &mut [usize]) {
    assert_eq!(points.len(), assignments.len());
    for (p, a) in points.iter().zip(assignments.iter_mut()) {
        *a = nearest_centroid(*p, centroids);
    }
}

/// Output of one update step.
#[derive(Debug, Clone, PartialEq)]
pub struct Update {
    pub centroids: Vec<Point>,
    /// Sum over clusters of the squared distance between old and new centroid.
    pub shift: f64,
    /// Members per cluster.
    pub counts: Vec<usize>,
}

/// Update step: mean of each cluster, policy-chosen point for empty ones.
///
/// `previous` is only read; the returned centroids replace it wholesale.
///
/// # Panics
///
/// Panics if `assignments` and `points` differ in length, or if a label is not
/// below `previous.len()`.
pub fn update_centroids(
    points: &[Point],
    assignments: &[usize],
    previous: &[Point],
    sampler: &mut dyn Sampler,
    policy: &mut dyn EmptyClusterPolicy,
) -> Update {
    let k = previous.len();
    let mut counts = vec![0usize; k];
    let mut sums = vec![(0.0f64, 0.0f64); k];
    assert_eq!(points.len(), assignments.len());

    for (p, &a) in points.iter().zip(assignments) {
        assert!(a < k, "assignment {a} out of range for {k} centroids");
        counts[a] += 1;
        sums[a].0 += p.x;
        sums[a].1 += p.y;
    }

    let mut centroids = Vec::with_capacity(k);
    let mut shift = 0.0;
    for i in 0..k {
        let next = if counts[i] == 0 {
            policy.reseed(i, points, assignments, &mut *sampler)
        } else {
            let c = counts[i] as f64;
            Point::new(sums[i].0 / c, sums[i].1 / c)
        };
        shift += previous[i].squared_distance(next);
        centroids.push(next);
    }

    Update {
        centroids,
        shift,
        counts,
    }
}
