use std::f64::consts::PI;

use geo::{point, Point};
use thiserror::Error;

/// Central angles (radians) closer than this to `0` or `π` have no usable slerp weights.
const DEGENERATE_ANGLE: f64 = 1e-12;

#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum DegenerateGreatCircle {
    /// Every great circle through the two points is equally short.
    #[error("start and end are antipodal")]
    Antipodal,
}

/// Haversine central angle between two points, in radians.
pub fn central_angle(start: Point, end: Point) -> f64 {
    let (lat1, lon1) = (start.y().to_radians(), start.x().to_radians());
    let (lat2, lon2) = (end.y().to_radians(), end.x().to_radians());
    let dlat = lat2 - lat1;
    let dlon = lon2 - lon1;

    let a = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlon / 2.0).sin().powi(2);
    // rounding can push `a` just outside [0, 1] near the antipode
    let a = a.clamp(0.0, 1.0);
    2.0 * a.sqrt().atan2((1.0 - a).sqrt())
}

/// Samples `n + 1` points along the shorter great circle arc from `start` to `end`, both
/// included, by spherical linear interpolation.
///
/// Coincident points yield `n + 1` copies of `start`. Antipodal points have no unique arc and are
/// rejected.
pub fn sample(start: Point, end: Point, n: usize) -> Result<Vec<Point>, DegenerateGreatCircle> {
    let c = central_angle(start, end);
    if c < DEGENERATE_ANGLE {
        return Ok(vec![start; n + 1]);
    }
    if PI - c < DEGENERATE_ANGLE {
        return Err(DegenerateGreatCircle::Antipodal);
    }
    if n == 0 {
        return Ok(vec![start]);
    }

    let (lat1, lon1) = (start.y().to_radians(), start.x().to_radians());
    let (lat2, lon2) = (end.y().to_radians(), end.x().to_radians());
    let from = [lat1.cos() * lon1.cos(), lat1.cos() * lon1.sin(), lat1.sin()];
    let to = [lat2.cos() * lon2.cos(), lat2.cos() * lon2.sin(), lat2.sin()];
    let sin_c = c.sin();

    Ok((0..=n)
        .map(|i| {
            let f = i as f64 / n as f64;
            let a = ((1.0 - f) * c).sin() / sin_c;
            let b = (f * c).sin() / sin_c;

            let x = a * from[0] + b * to[0];
            let y = a * from[1] + b * to[1];
            let z = a * from[2] + b * to[2];

            point! {
                x: y.atan2(x).to_degrees(),
                y: z.atan2(x.hypot(y)).to_degrees(),
            }
        })
        .collect())
}

#[cfg(test)]
mod test {
    use geo::{point, Point};

    use super::{sample, DegenerateGreatCircle};

    fn assert_close(left: Point, right: Point) {
        assert!(
            (left.x() - right.x()).abs() < 1e-9 && (left.y() - right.y()).abs() < 1e-9,
            "left: {left:?} not equal right: {right:?}"
        );
    }

    #[test]
    fn test_endpoints() {
        let pairs = [
            (point! { x: -118.4, y: 33.9 }, point! { x: -73.8, y: 40.6 }),
            (point! { x: 140.4, y: 35.8 }, point! { x: -122.4, y: 37.6 }),
            (point! { x: 174.8, y: -37.0 }, point! { x: -0.5, y: 51.5 }),
            (point! { x: 0.0, y: 0.0 }, point! { x: 90.0, y: 0.0 }),
            (point! { x: 10.0, y: 89.0 }, point! { x: -170.0, y: 89.0 }),
        ];
        for (start, end) in pairs {
            for n in [1, 2, 100, 500] {
                let points = sample(start, end, n).unwrap();
                assert_eq!(points.len(), n + 1);
                assert_close(points[0], start);
                assert_close(points[n], end);
                assert!(points.iter().all(|p| p.x().is_finite() && p.y().is_finite()));
            }
        }
    }

    #[test]
    fn test_equator_midpoint() {
        let points = sample(point! { x: 0.0, y: 0.0 }, point! { x: 90.0, y: 0.0 }, 2).unwrap();
        assert_close(points[1], point! { x: 45.0, y: 0.0 });
    }

    #[test]
    fn test_crosses_antimeridian() {
        let points = sample(point! { x: 170.0, y: 0.0 }, point! { x: -170.0, y: 0.0 }, 2).unwrap();
        assert!((points[1].x().abs() - 180.0).abs() < 1e-9);
    }

    #[test]
    fn test_coincident() {
        let p = point! { x: 11.7861, y: 48.353_802 };
        assert_eq!(sample(p, p, 100).unwrap(), vec![p; 101]);
        assert_eq!(sample(p, p, 0).unwrap(), vec![p]);
    }

    #[test]
    fn test_antipodal() {
        assert_eq!(
            sample(point! { x: 0.0, y: 0.0 }, point! { x: 180.0, y: 0.0 }, 10),
            Err(DegenerateGreatCircle::Antipodal)
        );
        assert_eq!(
            sample(point! { x: 0.0, y: 90.0 }, point! { x: 0.0, y: -90.0 }, 10),
            Err(DegenerateGreatCircle::Antipodal)
        );
    }

    #[test]
    fn test_zero_samples() {
        let start = point! { x: 1.0, y: 2.0 };
        assert_eq!(sample(start, point! { x: 3.0, y: 4.0 }, 0).unwrap(), vec![start]);
    }
}
