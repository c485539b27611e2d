//! The route language: comma-separated colour names, distance rings (`900nm@LHR`) and routes
//! (`LAX-JFK/BOS-MUC`).

pub mod distances;
pub mod expand;

use geo::Point;
use pest::{iterators::Pair, Parser};
use pest_derive::Parser;
use serde::Serialize;
use tracing::{debug, warn};
use uom::si::f64::Length;
use uom::si::length::{kilometer, nautical_mile};

use crate::{airports::AirportResolver, colours::Colour, diagnostics::Diagnostic};

#[derive(Parser)]
#[grammar = "pest/base.pest"]
#[grammar = "pest/route.pest"]
pub struct RouteParser;

/// One comma-separated element of the input, classified by its shape alone.
#[derive(Clone, Debug, PartialEq)]
pub enum Token {
    Colour(Colour),
    Ring { radius: Length, centre: String },
    /// Legs in order, each with its `/`-separated alternatives.
    Route(Vec<Vec<String>>),
    Malformed(String),
}

fn parse_code(pair: &Pair<Rule>) -> String {
    pair.as_str().to_uppercase()
}

fn parse_radius(pair: Pair<Rule>) -> Option<Length> {
    let mut distance = pair.into_inner();
    let magnitude: f64 = distance.next()?.as_str().parse().ok()?;
    let radius = match distance.next()?.as_str().to_lowercase().as_str() {
        "nm" => Length::new::<nautical_mile>(magnitude),
        "km" => Length::new::<kilometer>(magnitude),
        unit => unreachable!("{unit}"),
    };

    (radius.value.is_finite() && radius.value > 0.0).then_some(radius)
}

impl Token {
    pub fn parse(raw: &str) -> Self {
        let malformed = || Self::Malformed(raw.to_string());
        let Some(pair) = RouteParser::parse(Rule::token, raw)
            .ok()
            .and_then(|mut pairs| pairs.next())
            .and_then(|token| {
                token.into_inner().find(|pair| {
                    matches!(pair.as_rule(), Rule::colour | Rule::ring | Rule::route)
                })
            })
        else {
            return malformed();
        };

        match pair.as_rule() {
            Rule::colour => Colour::from_name(pair.as_str()).map_or_else(malformed, Self::Colour),
            Rule::ring => {
                let mut ring = pair.into_inner();
                let radius = ring.next().and_then(parse_radius);
                let centre = ring.next().map(|code| parse_code(&code));
                match (radius, centre) {
                    (Some(radius), Some(centre)) => Self::Ring { radius, centre },
                    _ => malformed(),
                }
            }
            Rule::route => Self::Route(
                pair.into_inner()
                    .map(|leg| leg.into_inner().map(|code| parse_code(&code)).collect())
                    .collect(),
            ),
            rule => unreachable!("{rule:?}"),
        }
    }
}

/// Splits the input at commas and classifies every non-empty element.
pub fn tokenize(input: &str) -> impl Iterator<Item = (&str, Token)> {
    input
        .split(',')
        .map(str::trim)
        .filter(|raw| !raw.is_empty())
        .map(|raw| (raw, Token::parse(raw)))
}

/// An airport code of a route together with its coordinate, if it is known.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Waypoint {
    pub code: String,
    pub coordinate: Option<Point>,
}

/// A route token after resolution: every leg keeps all its alternatives, unresolved ones included.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RouteSet {
    pub legs: Vec<Vec<Waypoint>>,
    pub colour: Colour,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RouteSegment {
    pub from: String,
    pub to: String,
    pub from_coordinate: Point,
    pub to_coordinate: Point,
    pub colour: Colour,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct DistanceRing {
    pub centre: String,
    pub coordinate: Point,
    pub radius: Length,
    pub colour: Colour,
}

impl DistanceRing {
    pub fn radius_km(&self) -> f64 {
        self.radius.get::<kilometer>()
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub enum Directive {
    Ring(DistanceRing),
    Route(RouteSet),
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct Interpretation {
    pub directives: Vec<Directive>,
    pub diagnostics: Vec<Diagnostic>,
}

impl Interpretation {
    pub fn rings(&self) -> impl Iterator<Item = &DistanceRing> {
        self.directives.iter().filter_map(|directive| match directive {
            Directive::Ring(ring) => Some(ring),
            Directive::Route(_) => None,
        })
    }

    pub fn routes(&self) -> impl Iterator<Item = &RouteSet> {
        self.directives.iter().filter_map(|directive| match directive {
            Directive::Route(route) => Some(route),
            Directive::Ring(_) => None,
        })
    }

    fn unresolved(&mut self, code: &str, token: &str) {
        warn!("Invalid code: {code} in {token}");
        self.diagnostics.push(Diagnostic::UnresolvedCode {
            code: code.to_string(),
            token: token.to_string(),
        });
    }
}

/// Interprets route input from left to right. Colour tokens set the colour of every following
/// ring and route; unknown codes and malformed tokens are reported and skipped.
pub fn interpret(
    input: &str,
    resolver: &impl AirportResolver,
    default_colour: Colour,
) -> Interpretation {
    let (_, interpretation) = tokenize(input).fold(
        (default_colour, Interpretation::default()),
        |(colour, mut acc), (raw, token)| {
            match token {
                Token::Colour(next) => return (next, acc),
                Token::Ring { radius, centre } => match resolver.resolve(&centre) {
                    Some(coordinate) => acc.directives.push(Directive::Ring(DistanceRing {
                        centre,
                        coordinate,
                        radius,
                        colour,
                    })),
                    None => acc.unresolved(&centre, raw),
                },
                Token::Route(legs) => {
                    let legs = legs
                        .into_iter()
                        .map(|leg| {
                            leg.into_iter()
                                .map(|code| {
                                    let coordinate = resolver.resolve(&code);
                                    if coordinate.is_none() {
                                        acc.unresolved(&code, raw);
                                    }
                                    Waypoint { code, coordinate }
                                })
                                .collect()
                        })
                        .collect();
                    acc.directives
                        .push(Directive::Route(RouteSet { legs, colour }));
                }
                Token::Malformed(token) => {
                    warn!("Invalid input format: {token}");
                    acc.diagnostics.push(Diagnostic::MalformedToken { token });
                }
            }
            (colour, acc)
        },
    );
    debug!(
        "interpreted {} directives with {} diagnostics",
        interpretation.directives.len(),
        interpretation.diagnostics.len()
    );

    interpretation
}
