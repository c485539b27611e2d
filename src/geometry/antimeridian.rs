use std::ops::Range;

use geo::Coord;

/// Splits a projected polyline into runs that can be drawn on their own. A new run starts
/// wherever two consecutive points are further apart than `half_extent` on either axis, which is
/// what a path wrapping around the map edge looks like after projection. An axis without extent
/// never splits.
pub fn split_runs(points: &[Coord], half_extent: Coord) -> Vec<Range<usize>> {
    if points.is_empty() {
        return Vec::new();
    }

    let mut starts = vec![0];
    starts.extend(
        points
            .windows(2)
            .enumerate()
            .filter(|(_, pair)| {
                let jump = pair[1] - pair[0];
                (half_extent.x > 0.0 && jump.x.abs() > half_extent.x)
                    || (half_extent.y > 0.0 && jump.y.abs() > half_extent.y)
            })
            .map(|(i, _)| i + 1),
    );
    starts.push(points.len());

    starts.windows(2).map(|bounds| bounds[0]..bounds[1]).collect()
}
