//! Planar and great-circle geometry on `(lat, lng)` coordinates.
//!
//! The threshold neighbor graph is measured in metres on the sphere; the
//! likelihood and the grid partition work in raw coordinate units.
use geo::{Distance, Haversine};

/// Mean Earth radius used by the haversine metric, in metres.
pub const EARTH_RADIUS_M: f64 = 6_371_008.8;

/// Metres per degree of latitude along a meridian.
pub const METRES_PER_DEGREE: f64 = EARTH_RADIUS_M * std::f64::consts::PI / 180.0;

/// A geographic coordinate in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub lat: f64,
    pub lng: f64,
}

impl Point {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    pub fn is_finite(&self) -> bool {
        self.lat.is_finite() && self.lng.is_finite()
    }

    /// Squared Euclidean distance in coordinate units.
    pub fn squared_distance(&self, other: &Point) -> f64 {
        let dlat = self.lat - other.lat;
        let dlng = self.lng - other.lng;
        dlat * dlat + dlng * dlng
    }

    /// Great-circle distance in metres.
    pub fn haversine_m(&self, other: &Point) -> f64 {
        Haversine::distance(geo::Point::from(*self), geo::Point::from(*other))
    }
}

impl From<Point> for geo::Point<f64> {
    fn from(p: Point) -> Self {
        geo::Point::new(p.lng, p.lat)
    }
}

/// Unweighted mean of a set of points, `None` when empty.
pub fn mean_point<'a, I>(points: I) -> Option<Point>
where
    I: IntoIterator<Item = &'a Point>,
{
    weighted_mean(points.into_iter().map(|p| (p, 1.0)))
}

/// Weighted mean of `(point, weight)` pairs.
///
/// Returns `None` when the total weight is zero or not finite.
pub fn weighted_mean<'a, I>(pairs: I) -> Option<Point>
where
    I: IntoIterator<Item = (&'a Point, f64)>,
{
    let (mut lat, mut lng, mut total) = (0.0, 0.0, 0.0);
    for (p, w) in pairs {
        lat += w * p.lat;
        lng += w * p.lng;
        total += w;
    }
    if total == 0.0 || !total.is_finite() {
        return None;
    }
    let mean = Point::new(lat / total, lng / total);
    mean.is_finite().then_some(mean)
}

/// Minimal axis-aligned rectangle enclosing a set of points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lng: f64,
    pub max_lng: f64,
}

impl BoundingBox {
    /// `None` for an empty slice.
    pub fn enclosing(points: &[Point]) -> Option<Self> {
        let first = points.first()?;
        let init =
            Self { min_lat: first.lat, max_lat: first.lat, min_lng: first.lng, max_lng: first.lng };
        Some(points.iter().fold(init, |b, p| Self {
            min_lat: b.min_lat.min(p.lat),
            max_lat: b.max_lat.max(p.lat),
            min_lng: b.min_lng.min(p.lng),
            max_lng: b.max_lng.max(p.lng),
        }))
    }
}
