use geo::Point;
use serde::Serialize;

/// Padded map viewport in degrees.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct BoundingBox {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lon: f64,
    pub max_lon: f64,
}

fn min_max(values: &[f64]) -> Option<(f64, f64)> {
    values
        .iter()
        .copied()
        .filter(|value| !value.is_nan())
        .fold(None, |acc, value| match acc {
            None => Some((value, value)),
            Some((min, max)) => Some((f64::min(min, value), f64::max(max, value))),
        })
}

impl BoundingBox {
    /// Extent of all latitudes and longitudes, widened by `padding` degrees on every side and
    /// clamped to the valid coordinate ranges. `None` if either list has no usable value.
    pub fn compute(lats: &[f64], lons: &[f64], padding: f64) -> Option<Self> {
        let (min_lat, max_lat) = min_max(lats)?;
        let (min_lon, max_lon) = min_max(lons)?;

        Some(Self {
            min_lat: (min_lat - padding).clamp(-90.0, 90.0),
            max_lat: (max_lat + padding).clamp(-90.0, 90.0),
            min_lon: (min_lon - padding).clamp(-180.0, 180.0),
            max_lon: (max_lon + padding).clamp(-180.0, 180.0),
        })
    }

    pub fn from_points<'a>(points: impl IntoIterator<Item = &'a Point>, padding: f64) -> Option<Self> {
        let (lats, lons): (Vec<_>, Vec<_>) = points.into_iter().map(|p| (p.y(), p.x())).unzip();
        Self::compute(&lats, &lons, padding)
    }
}

#[cfg(test)]
mod test {
    use geo::{point, Point};

    use super::BoundingBox;

    #[test]
    fn test_padding() {
        let bbox = BoundingBox::compute(&[10.0, 20.0, 15.0], &[-30.0, 40.0], 5.0).unwrap();
        assert_eq!(
            bbox,
            BoundingBox {
                min_lat: 5.0,
                max_lat: 25.0,
                min_lon: -35.0,
                max_lon: 45.0,
            }
        );
    }

    #[test]
    fn test_clamped() {
        let bbox = BoundingBox::compute(&[-88.0, 89.0], &[-179.0, 178.0], 5.0).unwrap();
        assert_eq!(
            bbox,
            BoundingBox {
                min_lat: -90.0,
                max_lat: 90.0,
                min_lon: -180.0,
                max_lon: 180.0,
            }
        );
    }

    #[test]
    fn test_always_valid() {
        let samples: &[(&[f64], &[f64])] = &[
            (&[0.0], &[0.0]),
            (&[90.0], &[180.0]),
            (&[-90.0], &[-180.0]),
            (&[-90.0, 90.0], &[-180.0, 180.0]),
            (&[f64::NAN, 12.0], &[3.0, f64::NAN]),
        ];
        for (lats, lons) in samples {
            let bbox = BoundingBox::compute(lats, lons, 5.0).unwrap();
            assert!((-90.0..=90.0).contains(&bbox.min_lat));
            assert!((-90.0..=90.0).contains(&bbox.max_lat));
            assert!((-180.0..=180.0).contains(&bbox.min_lon));
            assert!((-180.0..=180.0).contains(&bbox.max_lon));
            assert!(bbox.min_lat <= bbox.max_lat);
            assert!(bbox.min_lon <= bbox.max_lon);
        }
    }

    #[test]
    fn test_empty() {
        assert_eq!(BoundingBox::compute(&[], &[], 5.0), None);
        assert_eq!(BoundingBox::compute(&[f64::NAN], &[1.0], 5.0), None);
        let no_points: [Point; 0] = [];
        assert_eq!(BoundingBox::from_points(&no_points, 5.0), None);
    }

    #[test]
    fn test_from_points() {
        let points = [point! { x: 11.0, y: 48.0 }, point! { x: -0.5, y: 51.5 }];
        let bbox = BoundingBox::from_points(&points, 0.0).unwrap();
        assert_eq!(
            bbox,
            BoundingBox {
                min_lat: 48.0,
                max_lat: 51.5,
                min_lon: -0.5,
                max_lon: 11.0,
            }
        );
    }
}
