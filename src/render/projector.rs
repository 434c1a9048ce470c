use geo_types::{Coord, Rect};
use itertools::{Itertools, MinMaxResult};

use crate::{catalogue::geo::Coordinates, svg::Point};

const EPSILON: f64 = 1e-6;

fn is_zero(value: f64) -> bool {
    value.abs() < EPSILON
}

/// Fits the bounding box of a set of coordinates into a canvas with a single
/// scale, so the map keeps its aspect ratio.
#[derive(Debug, Clone, PartialEq)]
pub struct SphereProjector {
    padding: f64,
    min_lon: f64,
    max_lat: f64,
    zoom: f64,
}

fn bounding_box(points: &[Coordinates]) -> Option<Rect<f64>> {
    let (min_lon, max_lon) = match points.iter().map(|c| c.lng).minmax_by(f64::total_cmp) {
        MinMaxResult::NoElements => return None,
        MinMaxResult::OneElement(lon) => (lon, lon),
        MinMaxResult::MinMax(min, max) => (min, max),
    };
    let (min_lat, max_lat) = match points.iter().map(|c| c.lat).minmax_by(f64::total_cmp) {
        MinMaxResult::NoElements => return None,
        MinMaxResult::OneElement(lat) => (lat, lat),
        MinMaxResult::MinMax(min, max) => (min, max),
    };

    Some(Rect::new(
        Coord::from(Coordinates::new(min_lat, min_lon)),
        Coord::from(Coordinates::new(max_lat, max_lon)),
    ))
}

impl SphereProjector {
    pub fn new(points: &[Coordinates], width: f64, height: f64, padding: f64) -> Self {
        let Some(bounds) = bounding_box(points) else {
            return Self {
                padding,
                min_lon: 0.0,
                max_lat: 0.0,
                zoom: 0.0,
            };
        };

        let width_zoom =
            (!is_zero(bounds.width())).then(|| (width - 2.0 * padding) / bounds.width());
        let height_zoom =
            (!is_zero(bounds.height())).then(|| (height - 2.0 * padding) / bounds.height());

        let zoom = match (width_zoom, height_zoom) {
            (Some(w), Some(h)) => w.min(h),
            (Some(z), None) | (None, Some(z)) => z,
            (None, None) => 0.0,
        };

        Self {
            padding,
            min_lon: bounds.min().x,
            max_lat: bounds.max().y,
            zoom,
        }
    }

    pub fn project(&self, coordinates: Coordinates) -> Point {
        Point::new(
            (coordinates.lng - self.min_lon) * self.zoom + self.padding,
            (self.max_lat - coordinates.lat) * self.zoom + self.padding,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use proptest::prelude::*;

    #[test]
    fn empty_input_maps_to_padding() {
        let projector = SphereProjector::new(&[], 600.0, 400.0, 50.0);
        assert_eq!(
            projector.project(Coordinates::new(55.0, 37.0)),
            Point::new(50.0, 50.0)
        );
    }

    #[test]
    fn single_point_maps_to_padding() {
        let c = Coordinates::new(55.0, 37.0);
        let projector = SphereProjector::new(&[c], 600.0, 400.0, 50.0);
        assert_eq!(projector.project(c), Point::new(50.0, 50.0));
    }

    #[test]
    fn smaller_zoom_wins() {
        // 0.1 degrees each way: width allows 5000, height allows 3000
        let points = [Coordinates::new(55.0, 37.0), Coordinates::new(55.1, 37.1)];
        let projector = SphereProjector::new(&points, 600.0, 400.0, 50.0);

        let top_right = projector.project(points[1]);
        let bottom_left = projector.project(points[0]);
        assert_relative_eq!(top_right.x, 350.0, epsilon = 1e-6);
        assert_relative_eq!(top_right.y, 50.0, epsilon = 1e-6);
        assert_relative_eq!(bottom_left.x, 50.0, epsilon = 1e-6);
        assert_relative_eq!(bottom_left.y, 350.0, epsilon = 1e-6);
    }

    #[test]
    fn flat_latitude_uses_width_zoom() {
        let points = [Coordinates::new(55.0, 37.0), Coordinates::new(55.0, 37.5)];
        let projector = SphereProjector::new(&points, 600.0, 400.0, 50.0);

        let east = projector.project(points[1]);
        assert_relative_eq!(east.x, 550.0, epsilon = 1e-6);
        assert_relative_eq!(east.y, 50.0, epsilon = 1e-6);
    }

    proptest! {
        #[test]
        fn extremes_land_on_padding(
            coords in prop::collection::vec((-80.0f64..80.0, -170.0f64..170.0), 1..30),
            padding in 0.0f64..100.0,
        ) {
            let points: Vec<_> = coords
                .iter()
                .map(|&(lat, lng)| Coordinates::new(lat, lng))
                .collect();
            let projector = SphereProjector::new(&points, 1200.0, 800.0, padding);

            let westmost = points.iter().min_by(|a, b| a.lng.total_cmp(&b.lng)).unwrap();
            let northmost = points.iter().max_by(|a, b| a.lat.total_cmp(&b.lat)).unwrap();
            prop_assert!((projector.project(*westmost).x - padding).abs() < 1e-9);
            prop_assert!((projector.project(*northmost).y - padding).abs() < 1e-9);

            for p in &points {
                let q = projector.project(*p);
                prop_assert!(q.x >= padding - 1e-9 && q.x <= 1200.0 - padding + 1e-6);
                prop_assert!(q.y >= padding - 1e-9 && q.y <= 800.0 - padding + 1e-6);
            }
        }
    }
}
