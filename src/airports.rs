use std::collections::HashMap;
use std::io;
use std::path::PathBuf;

use from_pest::FromPest;
use geo::{point, Point};
use itertools::Itertools as _;
use multimap::MultiMap;
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, trace};

use super::read_to_string;

pub mod grammar {
    use pest_derive::Parser;

    #[derive(Parser)]
    #[grammar = "pest/base.pest"]
    #[grammar = "pest/airports.pest"]
    pub struct Parser;
}

pub mod ast {
    use pest::Span;
    use pest_ast::FromPest;

    use super::grammar::Rule;

    fn span_into_str(span: Span) -> &str {
        span.as_str()
    }

    fn span_into_string(span: Span) -> String {
        span.as_str().trim().to_string()
    }

    #[derive(Debug, FromPest)]
    #[pest_ast(rule(Rule::airports))]
    pub struct Airports {
        pub definitions: Vec<Definition>,
        _eoi: Eoi,
    }

    #[derive(Debug, FromPest)]
    #[pest_ast(rule(Rule::EOI))]
    struct Eoi;

    #[derive(Debug, FromPest, Clone, PartialEq)]
    #[pest_ast(rule(Rule::definition))]
    pub struct Definition {
        #[pest_ast(inner(rule(Rule::icao), with(span_into_string)))]
        pub icao: String,
        #[pest_ast(inner(rule(Rule::iata), with(span_into_string)))]
        pub iata: String,
        #[pest_ast(inner(rule(Rule::name), with(span_into_string)))]
        pub name: String,
        #[pest_ast(inner(rule(Rule::city), with(span_into_string)))]
        pub city: String,
        #[pest_ast(inner(rule(Rule::country), with(span_into_string)))]
        pub country: String,
        #[pest_ast(inner(
            rule(Rule::latitude),
            with(span_into_str),
            with(str::parse),
            with(Result::unwrap)
        ))]
        pub latitude: f64,
        #[pest_ast(inner(
            rule(Rule::longitude),
            with(span_into_str),
            with(str::parse),
            with(Result::unwrap)
        ))]
        pub longitude: f64,
    }
}

#[derive(Error, Debug)]
pub enum AirportsError {
    #[error("failed to parse airport file: {0}")]
    Parse(#[from] pest::error::Error<grammar::Rule>),
    #[error("failed to read airport file: {0}")]
    FileRead(#[from] io::Error),
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Airport {
    pub icao: String,
    pub iata: Option<String>,
    pub name: String,
    pub city: String,
    pub country: String,
    pub coordinate: Point,
}

impl From<ast::Definition> for Airport {
    fn from(definition: ast::Definition) -> Self {
        Self {
            icao: definition.icao.to_uppercase(),
            iata: Some(definition.iata.to_uppercase()).filter(|iata| !iata.is_empty()),
            name: definition.name,
            city: definition.city,
            country: definition.country,
            coordinate: point! { x: definition.longitude, y: definition.latitude },
        }
    }
}

/// Anything that can turn an airport code into a coordinate.
pub trait AirportResolver {
    fn resolve(&self, code: &str) -> Option<Point>;
}

impl<R: AirportResolver + ?Sized> AirportResolver for &R {
    fn resolve(&self, code: &str) -> Option<Point> {
        (**self).resolve(code)
    }
}

/// Airports by ICAO designator, with a secondary IATA index.
#[derive(Clone, Debug, Default, Serialize)]
pub struct AirportTable {
    airports: HashMap<String, Airport>,
    iata: MultiMap<String, String>,
}

impl AirportTable {
    pub fn insert(&mut self, airport: Airport) {
        if self.airports.contains_key(&airport.icao) {
            trace!("duplicate airport {}, keeping first definition", airport.icao);
            return;
        }
        if let Some(iata) = &airport.iata {
            self.iata.insert(iata.clone(), airport.icao.clone());
        }
        self.airports.insert(airport.icao.clone(), airport);
    }

    /// ICAO first, then IATA. Codes are trimmed and compared case-insensitively.
    pub fn get(&self, code: &str) -> Option<&Airport> {
        let code = code.trim().to_uppercase();
        self.airports.get(&code).or_else(|| {
            self.iata
                .get(&code)
                .and_then(|icao| self.airports.get(icao))
        })
    }

    pub fn len(&self) -> usize {
        self.airports.len()
    }

    pub fn is_empty(&self) -> bool {
        self.airports.is_empty()
    }

    /// Airports whose city contains `phrase`, ignoring case, ordered by ICAO designator.
    pub fn search_city(&self, phrase: &str) -> Vec<&Airport> {
        let phrase = phrase.trim().to_lowercase();
        if phrase.is_empty() {
            return Vec::new();
        }

        self.airports
            .values()
            .filter(|airport| airport.city.to_lowercase().contains(&phrase))
            .sorted_by(|a, b| a.icao.cmp(&b.icao))
            .collect()
    }

    pub fn load(path: impl Into<PathBuf>) -> AirportsResult {
        parse_airports(&fs_err::read(path.into())?)
    }
}

impl FromIterator<Airport> for AirportTable {
    fn from_iter<T: IntoIterator<Item = Airport>>(iter: T) -> Self {
        iter.into_iter().fold(Self::default(), |mut acc, airport| {
            acc.insert(airport);
            acc
        })
    }
}

impl AirportResolver for AirportTable {
    fn resolve(&self, code: &str) -> Option<Point> {
        self.get(code).map(|airport| airport.coordinate)
    }
}

pub type AirportsResult = Result<AirportTable, AirportsError>;

pub fn parse_airports(content: &[u8]) -> AirportsResult {
    use pest::Parser;

    let unparsed_file = read_to_string(content)?;
    let mut parse_tree = grammar::Parser::parse(grammar::Rule::airports, &unparsed_file)?;
    let syntax_tree = ast::Airports::from_pest(&mut parse_tree).expect("infallible");
    let table: AirportTable = syntax_tree
        .definitions
        .into_iter()
        .map(Airport::from)
        .collect();
    debug!("parsed {} airports", table.len());

    Ok(table)
}

/// Appends an airport code to route input, joining it to the previous code with `-`.
pub fn append_waypoint(input: &str, code: &str) -> String {
    let current = input.trim();
    if current.is_empty() || current.ends_with('-') {
        format!("{current}{code}")
    } else {
        format!("{current}-{code}")
    }
}
