//! Simulated geolocation pings for a tracked subject.
//!
//! A subject moves between three key locations (home, work, grocery store)
//! around a random centre, jittering a little on every ping and occasionally
//! jumping straight to a key location. The clock advances faster while the
//! subject is moving and slower while it stays put.

use crate::cluster::Point;
use chrono::{NaiveDateTime, TimeDelta};
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Names the front end offers for tracking. A subject's index offsets its centre.
pub const SUBJECTS: [&str; 26] = [
    "Alice", "Bob", "Charlie", "David", "Eve", "Frank", "Grace", "Hannah", "Isaac", "Jasmine",
    "Kailen", "Liam", "Martin", "Nkonsi", "Olivia", "Peter", "Quin", "Richard", "Samantha",
    "Thabo", "Upasna", "Vusi", "Wonka", "Xolisa", "Yolanda", "Zed",
];

/// Position in [`SUBJECTS`], case-insensitive.
pub fn subject_index(name: &str) -> Option<usize> {
    SUBJECTS.iter().position(|s| s.eq_ignore_ascii_case(name))
}

/// One location report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ping {
    pub id: u64,
    pub lat: f64,
    pub lon: f64,
    pub timestamp: NaiveDateTime,
}

impl Ping {
    pub fn location(&self) -> Point {
        Point::new(self.lat, self.lon)
    }
}

const HISTORY_WINDOW_SECS: i64 = 4 * 24 * 60 * 60;
const JUMP_PROBABILITY: f64 = 0.1;
const JITTER: f64 = 0.01;
const SUBJECT_OFFSET: f64 = 0.1;

/// Trajectory synthesis settings.
#[derive(Debug, Clone)]
pub struct Simulation {
    samples: usize,
    subject_index: usize,
}

impl Simulation {
    pub fn new(samples: usize) -> Self {
        Self {
            samples,
            subject_index: 0,
        }
    }

    /// Shift the centre by `index * 0.1` degrees on both axes.
    pub fn with_subject_index(mut self, index: usize) -> Self {
        self.subject_index = index;
        self
    }

    pub fn samples(&self) -> usize {
        self.samples
    }

    /// Generate `samples` pings starting somewhere in the four days before `now`.
    pub fn run<R: Rng>(&self, rng: &mut R, now: NaiveDateTime) -> Vec<Ping> {
        let offset = self.subject_index as f64 * SUBJECT_OFFSET;
        let centre = Point::new(
            rng.random_range(-90.0f64..90.0) + offset,
            rng.random_range(-180.0f64..180.0) + offset,
        );
        let keys = key_locations(centre);

        let mut here = keys[rng.random_range(0..keys.len())];
        let mut timestamp = now - TimeDelta::seconds(rng.random_range(0..=HISTORY_WINDOW_SECS));
        let mut previous = here;
        debug!(
            samples = self.samples,
            subject = self.subject_index,
            lat = centre.x,
            lon = centre.y,
            "simulating trajectory"
        );

        let mut pings = Vec::with_capacity(self.samples);
        for id in 0..self.samples as u64 {
            if rng.random::<f64>() < JUMP_PROBABILITY {
                here = keys[rng.random_range(0..keys.len())];
            }
            here.x += rng.random_range(-JITTER..=JITTER);
            here.y += rng.random_range(-JITTER..=JITTER);

            pings.push(Ping {
                id,
                lat: here.x,
                lon: here.y,
                timestamp,
            });

            timestamp += update_interval(rng, here, previous);
            previous = here;
        }
        pings
    }
}

impl Default for Simulation {
    fn default() -> Self {
        Self::new(100)
    }
}

/// Home, work and grocery store around `centre`.
pub fn key_locations(centre: Point) -> [Point; 3] {
    [
        centre,
        Point::new(centre.x + 0.05, centre.y + 0.05),
        Point::new(centre.x - 0.05, centre.y - 0.02),
    ]
}

/// Time until the next ping, shorter the further the subject just moved.
pub fn update_interval<R: Rng>(rng: &mut R, current: Point, previous: Point) -> TimeDelta {
    let moved = current.distance(previous);
    let minutes = if moved < 0.01 {
        rng.random_range(30..=90)
    } else if moved < 0.05 {
        rng.random_range(10..=30)
    } else {
        rng.random_range(1..=10)
    };
    TimeDelta::minutes(minutes)
}
