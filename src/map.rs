use std::ops::Range;

use geo::{Coord, Point};
use itertools::Itertools as _;
use serde::Serialize;
use tracing::{debug, warn};

use crate::{
    airports::AirportResolver,
    colours::Colour,
    diagnostics::Diagnostic,
    geometry::{ring, sample, split_runs, BoundingBox, Miller},
    route::{
        distances::{route_distances, RouteDistance},
        interpret, DistanceRing, RouteSegment,
    },
    settings::Settings,
    HorizontalAlignment,
};

/// A polyline ready to be drawn, split into runs that must not be connected to each other.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Track {
    pub label: String,
    pub colour: Colour,
    pub points: Vec<Point>,
    pub projected: Vec<Coord>,
    pub runs: Vec<Range<usize>>,
}

impl Track {
    fn new(label: String, colour: Colour, points: Vec<Point>, projection: &Miller) -> Self {
        let projected = points
            .iter()
            .map(|point| projection.project(*point))
            .collect::<Vec<_>>();
        let runs = split_runs(&projected, projection.half_extent());
        Self {
            label,
            colour,
            points,
            projected,
            runs,
        }
    }

    pub fn projected_runs(&self) -> impl Iterator<Item = &[Coord]> {
        self.runs.iter().map(|run| &self.projected[run.clone()])
    }

    pub fn geographic_runs(&self) -> impl Iterator<Item = &[Point]> {
        self.runs.iter().map(|run| &self.points[run.clone()])
    }
}

/// An airport to dot and label on the map.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct AirportMarker {
    pub code: String,
    pub coordinate: Point,
    pub colour: Colour,
    pub label_alignment: HorizontalAlignment,
}

/// Everything drawn for one route input.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct RouteMap {
    pub segments: Vec<RouteSegment>,
    pub rings: Vec<DistanceRing>,
    pub distances: Vec<RouteDistance>,
    /// `None` when there is nothing to draw.
    pub bounding_box: Option<BoundingBox>,
    pub tracks: Vec<Track>,
    pub markers: Vec<AirportMarker>,
    pub diagnostics: Vec<Diagnostic>,
}

fn markers(segments: &[RouteSegment], rings: &[DistanceRing]) -> Vec<AirportMarker> {
    segments
        .iter()
        .flat_map(|segment| {
            [
                AirportMarker {
                    code: segment.from.clone(),
                    coordinate: segment.from_coordinate,
                    colour: segment.colour,
                    label_alignment: HorizontalAlignment::Right,
                },
                AirportMarker {
                    code: segment.to.clone(),
                    coordinate: segment.to_coordinate,
                    colour: segment.colour,
                    label_alignment: HorizontalAlignment::Left,
                },
            ]
        })
        .chain(rings.iter().map(|ring| AirportMarker {
            code: ring.centre.clone(),
            coordinate: ring.coordinate,
            colour: ring.colour,
            label_alignment: HorizontalAlignment::Right,
        }))
        .unique_by(|marker| marker.code.clone())
        .collect()
}

impl RouteMap {
    pub fn build(input: &str, resolver: &impl AirportResolver, settings: &Settings) -> Self {
        let interpretation = interpret(input, resolver, settings.default_colour);
        let segments = interpretation
            .routes()
            .flat_map(|route| route.segments())
            .collect::<Vec<_>>();
        let rings = interpretation.rings().cloned().collect::<Vec<_>>();
        let distances = route_distances(interpretation.routes());
        let mut diagnostics = interpretation.diagnostics;

        if segments.is_empty() && rings.is_empty() {
            debug!("nothing to draw for {input:?}");
            diagnostics.push(Diagnostic::EmptyResult);
            return Self {
                distances,
                diagnostics,
                ..Self::default()
            };
        }

        let outlines = rings
            .iter()
            .map(|r| ring(r.coordinate, r.radius, settings.ring_points))
            .collect::<Vec<_>>();

        let mut extent_points = Vec::new();
        for segment in &segments {
            match sample(
                segment.from_coordinate,
                segment.to_coordinate,
                settings.bounding_box_samples,
            ) {
                Ok(points) => extent_points.extend(points),
                Err(err) => {
                    warn!("{}-{}: {err}", segment.from, segment.to);
                    diagnostics.push(Diagnostic::DegenerateGreatCircle {
                        from: segment.from.clone(),
                        to: segment.to.clone(),
                    });
                    extent_points.extend([segment.from_coordinate, segment.to_coordinate]);
                }
            }
        }
        for (r, outline) in rings.iter().zip(&outlines) {
            extent_points.extend(outline.iter().copied());
            // keeps the airport in view when the ring is larger than the map
            extent_points.push(r.coordinate);
        }

        let Some(bounding_box) = BoundingBox::from_points(&extent_points, settings.padding_degrees)
        else {
            diagnostics.push(Diagnostic::EmptyResult);
            return Self {
                segments,
                rings,
                distances,
                diagnostics,
                ..Self::default()
            };
        };
        debug!("bounding box {bounding_box:?}");

        let projection = Miller::new(&bounding_box);
        let tracks = segments
            .iter()
            .filter_map(|segment| {
                let points = sample(
                    segment.from_coordinate,
                    segment.to_coordinate,
                    settings.render_samples,
                )
                .ok()?;
                Some(Track::new(
                    format!("{}-{}", segment.from, segment.to),
                    segment.colour,
                    points,
                    &projection,
                ))
            })
            .chain(rings.iter().zip(outlines).map(|(r, outline)| {
                Track::new(
                    format!("{:.1}km@{}", r.radius_km(), r.centre),
                    r.colour,
                    outline,
                    &projection,
                )
            }))
            .collect();

        Self {
            markers: markers(&segments, &rings),
            segments,
            rings,
            distances,
            bounding_box: Some(bounding_box),
            tracks,
            diagnostics,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty() && self.rings.is_empty()
    }
}
