use geo::{point, Destination as _, Geodesic, Point};
use uom::si::f64::Length;
use uom::si::length::meter;

fn normalize_longitude(lon: f64) -> f64 {
    if (-180.0..=180.0).contains(&lon) {
        lon
    } else {
        (lon + 180.0).rem_euclid(360.0) - 180.0
    }
}

/// Points at a constant geodesic distance around `centre` on the WGS-84 ellipsoid, with bearings
/// evenly spaced from 0° to 360° inclusive so the first and last point coincide.
pub fn ring(centre: Point, radius: Length, points: usize) -> Vec<Point> {
    let distance = radius.get::<meter>();
    let step = if points > 1 {
        360.0 / (points - 1) as f64
    } else {
        0.0
    };

    (0..points)
        .map(|i| {
            let destination = Geodesic.destination(centre, i as f64 * step, distance);
            point! { x: normalize_longitude(destination.x()), y: destination.y() }
        })
        .collect()
}
