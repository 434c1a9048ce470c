use geo_types::{coord, Coord};

pub const EARTH_RADIUS: f64 = 6_371_000.0;

const EPSILON: f64 = 1e-6;

#[derive(Debug, Clone, Copy, Default)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinates {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

impl PartialEq for Coordinates {
    fn eq(&self, other: &Self) -> bool {
        (self.lat - other.lat).abs() < EPSILON && (self.lng - other.lng).abs() < EPSILON
    }
}

/// Longitude maps to `x`, latitude to `y`.
impl From<Coordinates> for Coord<f64> {
    fn from(c: Coordinates) -> Self {
        coord! { x: c.lng, y: c.lat }
    }
}

/// Great-circle distance in meters (spherical law of cosines).
pub fn compute_distance(from: Coordinates, to: Coordinates) -> f64 {
    if from == to {
        return 0.0;
    }

    let (from_lat, to_lat) = (from.lat.to_radians(), to.lat.to_radians());
    let delta_lng = (from.lng - to.lng).abs().to_radians();

    // Rounding can push the cosine just past 1 for nearly identical points
    let cos = from_lat.sin() * to_lat.sin() + from_lat.cos() * to_lat.cos() * delta_lng.cos();
    cos.clamp(-1.0, 1.0).acos() * EARTH_RADIUS
}
