//! Geolocation ping clustering.
//!
//! `geoclump` simulates location pings for a tracked subject and reduces them to a
//! handful of predominant locations with k-means.
//!
//! - [`cluster`]: the k-means engine (Lloyd iterations, random initialization,
//!   pluggable empty-cluster policy)
//! - [`ping`]: trajectory synthesis
//! - [`records`]: CSV reading and writing
//! - [`report`]: labelled centroids and map view

#![forbid(unsafe_code)]

pub mod cluster;
pub mod error;
pub mod ping;
pub mod records;
pub mod report;

pub use cluster::{Clustering, EmptyClusterPolicy, Kmeans, KmeansFit, Point, ReseedFromPoints, Sampler};
pub use error::{Error, Result};
pub use ping::{Ping, Simulation};
pub use report::Report;
