use std::f64::consts::FRAC_PI_4;

use geo::{coord, Coord, Point};

use super::bounds::BoundingBox;

/// Sphere radius of the map view in metres.
pub const MAP_EARTH_RADIUS: f64 = 6_370_997.0;

fn miller_y(lat: f64) -> f64 {
    1.25 * (FRAC_PI_4 + 0.4 * lat.to_radians()).tan().ln()
}

/// Miller cylindrical projection with the lower left corner of a bounding box at the origin.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Miller {
    origin: Coord,
    extent: Coord,
}

impl Miller {
    pub fn new(bbox: &BoundingBox) -> Self {
        let origin = coord! {
            x: MAP_EARTH_RADIUS * bbox.min_lon.to_radians(),
            y: MAP_EARTH_RADIUS * miller_y(bbox.min_lat),
        };
        let upper = coord! {
            x: MAP_EARTH_RADIUS * bbox.max_lon.to_radians(),
            y: MAP_EARTH_RADIUS * miller_y(bbox.max_lat),
        };
        Self {
            origin,
            extent: upper - origin,
        }
    }

    pub fn project(&self, point: Point) -> Coord {
        let projected = coord! {
            x: MAP_EARTH_RADIUS * point.x().to_radians(),
            y: MAP_EARTH_RADIUS * miller_y(point.y()),
        };
        projected - self.origin
    }

    /// `(xmax, ymax)`, the projected size of the bounding box.
    pub fn extent(&self) -> Coord {
        self.extent
    }

    /// Largest step between consecutive points that is not a wrap around the map edge. An axis
    /// narrower than a metre reports zero.
    pub fn half_extent(&self) -> Coord {
        let half = |extent: f64| if extent < 1.0 { 0.0 } else { extent / 2.0 };
        coord! {
            x: half(self.extent.x),
            y: half(self.extent.y),
        }
    }
}
