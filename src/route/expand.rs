use itertools::Itertools as _;

use super::{RouteSegment, RouteSet, Waypoint};

impl RouteSet {
    /// Every resolved pair of alternatives of adjacent legs. `A/B-X/Y` yields A-X, A-Y, B-X and
    /// B-Y; a third leg fans out from X and Y again rather than forming longer chains.
    pub fn segments(&self) -> Vec<RouteSegment> {
        self.legs
            .iter()
            .tuple_windows()
            .flat_map(|(from_leg, to_leg)| from_leg.iter().cartesian_product(to_leg))
            .filter_map(|(from, to)| {
                Some(RouteSegment {
                    from: from.code.clone(),
                    to: to.code.clone(),
                    from_coordinate: from.coordinate?,
                    to_coordinate: to.coordinate?,
                    colour: self.colour,
                })
            })
            .collect()
    }

    /// Every full-length route through one alternative per leg, unresolved ones included.
    pub fn chains(&self) -> impl Iterator<Item = Vec<&Waypoint>> {
        self.legs
            .iter()
            .map(|leg| leg.iter())
            .multi_cartesian_product()
    }
}

#[cfg(test)]
mod test {
    use geo::point;

    use crate::{airports::test::table, colours::Colour, route::interpret};

    use super::RouteSet;

    fn route_set(input: &str) -> RouteSet {
        interpret(input, &table(), Colour::DEFAULT)
            .routes()
            .next()
            .cloned()
            .unwrap()
    }

    fn pairs(route: &RouteSet) -> Vec<(String, String)> {
        route
            .segments()
            .into_iter()
            .map(|segment| (segment.from, segment.to))
            .collect()
    }

    fn owned(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(from, to)| ((*from).to_string(), (*to).to_string()))
            .collect()
    }

    #[test]
    fn test_alternatives() {
        let route = route_set("LAX-JFK/BOS");
        assert_eq!(pairs(&route), owned(&[("LAX", "JFK"), ("LAX", "BOS")]));

        let segments = route.segments();
        assert_eq!(segments[0].from_coordinate, point! { x: -118.407_997, y: 33.942_501 });
        assert_eq!(segments[0].to_coordinate, point! { x: -73.7789, y: 40.639_801 });
    }

    #[test]
    fn test_adjacent_pairs_only() {
        let route = route_set("LAX-JFK-MUC");
        assert_eq!(pairs(&route), owned(&[("LAX", "JFK"), ("JFK", "MUC")]));
    }

    #[test]
    fn test_fan_out() {
        let route = route_set("LAX/SFO-JFK/BOS-MUC/LHR/NRT");
        assert_eq!(
            pairs(&route),
            owned(&[
                ("LAX", "JFK"),
                ("LAX", "BOS"),
                ("SFO", "JFK"),
                ("SFO", "BOS"),
                ("JFK", "MUC"),
                ("JFK", "LHR"),
                ("JFK", "NRT"),
                ("BOS", "MUC"),
                ("BOS", "LHR"),
                ("BOS", "NRT"),
            ])
        );
        // sum of k_i * k_(i+1)
        assert_eq!(route.segments().len(), 2 * 2 + 2 * 3);
        // product of k_i
        assert_eq!(route.chains().count(), 2 * 2 * 3);
    }

    #[test]
    fn test_unresolved_alternative_is_dropped_alone() {
        let route = route_set("LAX-XXX/JFK-MUC");
        assert_eq!(pairs(&route), owned(&[("LAX", "JFK"), ("JFK", "MUC")]));
        assert_eq!(route.chains().count(), 2);
    }

    #[test]
    fn test_unresolved_route() {
        let route = route_set("XXX-LAX");
        assert!(route.segments().is_empty());
    }

    #[test]
    fn test_colour_is_carried() {
        let route = interpret("RED,LAX-JFK", &table(), Colour::DEFAULT)
            .routes()
            .next()
            .cloned()
            .unwrap();
        assert!(route
            .segments()
            .iter()
            .all(|segment| segment.colour == Colour::RED));
    }
}
