//! Presentation of clustering results: positional cluster labels and the map.
//!
//! The map is described, not drawn: a view state, one scatter layer for the
//! ping history and one for the centroids, and a tooltip template keyed on `id`.

use crate::cluster::{KmeansFit, Point};
use crate::ping::Ping;
use crate::records::TIMESTAMP_FORMAT;
use serde::Serialize;
use std::fmt::Write as _;

pub const DEFAULT_ZOOM: u8 = 10;
pub const HISTORY_RADIUS: u32 = 100;
pub const CLUSTER_RADIUS: u32 = 200;
const ORANGE: [u8; 3] = [255, 140, 0];
const GREEN: [u8; 3] = [0, 255, 0];

/// A centroid with its display identifier.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LabeledCentroid {
    /// `"Cluster {i}"`, 1-based, following centroid order.
    pub id: String,
    pub latitude: f64,
    pub longitude: f64,
    /// Pings assigned to this centroid in the last assignment step.
    pub members: usize,
}

/// Where a map of the pings should be centred.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ViewState {
    pub latitude: f64,
    pub longitude: f64,
    pub zoom: u8,
}

impl ViewState {
    /// Centred on the mean ping position; `None` without pings.
    pub fn centred_on(pings: &[Ping]) -> Option<Self> {
        Point::mean(pings.iter().map(Ping::location)).map(|c| Self {
            latitude: c.x,
            longitude: c.y,
            zoom: DEFAULT_ZOOM,
        })
    }
}

/// Which rows a scatter layer draws.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LayerSource {
    /// The pings, positioned by their `lon`/`lat` fields.
    History,
    /// The labelled centroids, positioned by `longitude`/`latitude`.
    Clusters,
}

/// A scatter layer over one of the report's row sets.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterLayer {
    pub source: LayerSource,
    /// Field names for longitude, then latitude.
    pub position: [&'static str; 2],
    pub radius: u32,
    pub fill_color: [u8; 3],
    pub pickable: bool,
}

impl ScatterLayer {
    pub fn history() -> Self {
        Self {
            source: LayerSource::History,
            position: ["lon", "lat"],
            radius: HISTORY_RADIUS,
            fill_color: ORANGE,
            pickable: true,
        }
    }

    pub fn clusters() -> Self {
        Self {
            source: LayerSource::Clusters,
            position: ["longitude", "latitude"],
            radius: CLUSTER_RADIUS,
            fill_color: GREEN,
            pickable: true,
        }
    }
}

/// Hover text shown for picked rows; `{id}` is filled from the row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Tooltip {
    pub html: &'static str,
    pub background_color: &'static str,
    pub color: &'static str,
}

impl Default for Tooltip {
    fn default() -> Self {
        Self {
            html: "<b>ID:</b> {id}",
            background_color: "steelblue",
            color: "white",
        }
    }
}

/// Predominant locations of a subject.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    pub clusters: Vec<LabeledCentroid>,
    pub view: Option<ViewState>,
    /// Drawn in order: history first, clusters on top.
    pub layers: Vec<ScatterLayer>,
    pub tooltip: Tooltip,
    pub iterations: usize,
    pub converged: bool,
}

/// Attach `"Cluster 1"`..`"Cluster k"` to the centroids in order.
pub fn label_centroids(fit: &KmeansFit) -> Vec<LabeledCentroid> {
    fit.centroids
        .iter()
        .zip(fit.cluster_sizes())
        .enumerate()
        .map(|(i, (c, members))| LabeledCentroid {
            id: format!("Cluster {}", i + 1),
            latitude: c.x,
            longitude: c.y,
            members,
        })
        .collect()
}

impl Report {
    pub fn new(pings: &[Ping], fit: &KmeansFit) -> Self {
        Self {
            subject: None,
            clusters: label_centroids(fit),
            view: ViewState::centred_on(pings),
            layers: vec![ScatterLayer::history(), ScatterLayer::clusters()],
            tooltip: Tooltip::default(),
            iterations: fit.iterations,
            converged: fit.converged,
        }
    }

    pub fn with_subject(mut self, name: impl Into<String>) -> Self {
        self.subject = Some(name.into());
        self
    }

    /// Plain-text table of the labelled centroids.
    pub fn render_table(&self) -> String {
        let mut out = String::new();
        if let Some(name) = &self.subject {
            let _ = writeln!(out, "Predominant locations of {name}:");
        }
        let _ = writeln!(out, "{:<12} {:>12} {:>12} {:>8}", "id", "Latitude", "Longitude", "pings");
        for c in &self.clusters {
            let _ = writeln!(
                out,
                "{:<12} {:>12.6} {:>12.6} {:>8}",
                c.id, c.latitude, c.longitude, c.members
            );
        }
        if !self.converged {
            let _ = writeln!(out, "(stopped after {} iterations without converging)", self.iterations);
        }
        out
    }
}

/// Plain-text table of a location history.
pub fn render_history(pings: &[Ping]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{:>5} {:>12} {:>12}  {}", "id", "lat", "lon", "time");
    for p in pings {
        let _ = writeln!(
            out,
            "{:>5} {:>12.6} {:>12.6}  {}",
            p.id,
            p.lat,
            p.lon,
            p.timestamp.format(TIMESTAMP_FORMAT)
        );
    }
    out
}
