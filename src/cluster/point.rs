use serde::{Deserialize, Serialize};

/// A 2-D point. For pings, `x` is latitude and `y` is longitude.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Plain Euclidean, no geodesic correction.
    #[inline]
    pub fn squared_distance(self, other: Self) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }

    #[inline]
    pub fn distance(self, other: Self) -> f64 {
        self.squared_distance(other).sqrt()
    }

    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// Arithmetic mean of the coordinates, `None` for an empty input.
    pub fn mean<I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = Point>,
    {
        let (mut sx, mut sy, mut n) = (0.0, 0.0, 0usize);
        for p in points {
            sx += p.x;
            sy += p.y;
            n += 1;
        }
        (n > 0).then(|| Self::new(sx / n as f64, sy / n as f64))
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Self::new(x, y)
    }
}

impl From<[f64; 2]> for Point {
    fn from([x, y]: [f64; 2]) -> Self {
        Self::new(x, y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_squared_distance() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(3.0, 4.0);
        assert_eq!(a.squared_distance(b), 25.0);
        assert_eq!(b.squared_distance(a), 25.0);
        assert_eq!(a.distance(b), 5.0);
        assert_eq!(a.squared_distance(a), 0.0);
    }

    #[test]
    fn test_mean() {
        let pts = [Point::new(0.0, 0.0), Point::new(2.0, 4.0), Point::new(4.0, 2.0)];
        assert_eq!(Point::mean(pts), Some(Point::new(2.0, 2.0)));
        assert_eq!(Point::mean(std::iter::empty()), None);
    }

    #[test]
    fn test_is_finite() {
        assert!(Point::new(1.0, -1.0).is_finite());
        assert!(!Point::new(f64::NAN, 0.0).is_finite());
        assert!(!Point::new(0.0, f64::INFINITY).is_finite());
    }
}
