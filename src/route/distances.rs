use geo::{Distance as _, Haversine, Point};
use itertools::Itertools as _;
use serde::Serialize;
use tracing::trace;
use uom::si::f64::Length;
use uom::si::length::{kilometer, meter};

use super::RouteSet;

/// Factor used for the nautical mile column of the distance table.
pub const KM_TO_NM: f64 = 0.539_957;

/// Great circle distance on the mean Earth sphere.
pub fn haversine(from: Point, to: Point) -> Length {
    Length::new::<meter>(Haversine.distance(from, to))
}

/// One row of the route distance table.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RouteDistance {
    /// Codes of the route joined by `-`.
    pub route: String,
    pub distance_km: f64,
    pub distance_nm: f64,
}

impl RouteDistance {
    pub fn new(route: String, distance: Length) -> Self {
        let distance_km = distance.get::<kilometer>();
        Self {
            route,
            distance_km,
            distance_nm: distance_km * KM_TO_NM,
        }
    }
}

impl RouteSet {
    /// Length of every full route through the alternatives. A route with any unknown code is
    /// left out entirely.
    pub fn distances(&self) -> Vec<RouteDistance> {
        self.chains()
            .filter_map(|chain| {
                let coordinates = chain
                    .iter()
                    .map(|waypoint| waypoint.coordinate)
                    .collect::<Option<Vec<_>>>()?;
                let label = chain.iter().map(|waypoint| &waypoint.code).join("-");
                let distance = coordinates
                    .into_iter()
                    .tuple_windows()
                    .map(|(from, to)| haversine(from, to))
                    .fold(Length::new::<meter>(0.0), |acc, leg| acc + leg);
                trace!("{label}: {distance:?}");
                Some(RouteDistance::new(label, distance))
            })
            .collect()
    }
}

/// The distance table for all routes, in input order.
pub fn route_distances<'a>(routes: impl IntoIterator<Item = &'a RouteSet>) -> Vec<RouteDistance> {
    routes.into_iter().flat_map(RouteSet::distances).collect()
}
