//! Centroid clustering of 2-D locations.
//!
//! ## K-means
//!
//! Assign each point to the nearest centroid, then move each centroid to the
//! mean of its points. Repeat until the centroids stop moving.
//!
//! **Objective**: Minimize within-cluster sum of squares:
//!
//! ```text
//! J = Σ_k Σ_{x ∈ C_k} ||x - μ_k||²
//! ```
//!
//! **Assumptions**:
//! - Clusters are roughly spherical
//! - Distances are planar (latitude/longitude are treated as Euclidean coordinates)
//! - You know k in advance
//!
//! ## Randomness
//!
//! Initialization and empty-cluster reseeding draw from a [`Sampler`]. Any
//! [`rand::Rng`] works; a seeded RNG makes a run reproducible.
//!
//! ## Usage
//!
//! ```rust
//! use geoclump::cluster::{Clustering, Kmeans, Point};
//!
//! let data = vec![
//!     Point::new(0.0, 0.0),
//!     Point::new(0.1, 0.1),
//!     Point::new(10.0, 10.0),
//!     Point::new(10.1, 10.1),
//! ];
//!
//! let labels = Kmeans::new(2).with_seed(42).fit_predict(&data).unwrap();
//! assert_eq!(labels[0], labels[1]);
//! assert_ne!(labels[0], labels[2]);
//!
//! let fit = Kmeans::new(2).with_seed(42).fit(&data).unwrap();
//! assert_eq!(fit.centroids.len(), 2);
//! ```

mod kmeans;
mod point;
mod traits;

pub use kmeans::{
    assign_points, nearest_centroid, run, update_centroids, Kmeans, KmeansFit, ReseedFromPoints,
    Update, DEFAULT_MAX_ITER, DEFAULT_N_CLUSTERS, DEFAULT_TOLERANCE,
};
pub use point::Point;
pub use traits::{Clustering, EmptyClusterPolicy, Sampler};
