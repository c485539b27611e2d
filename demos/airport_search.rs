use std::{env::args_os, io};

use route_map::AirportTable;

fn main() {
    tracing_subscriber::fmt().with_writer(io::stderr).init();
    let path = args_os()
        .nth(1)
        .expect("missing argument: path to airport file");
    let phrase = args_os()
        .nth(2)
        .expect("missing argument: city name")
        .into_string()
        .unwrap();
    let airports = AirportTable::load(path).expect("unsuccessful parse");

    let found = airports.search_city(&phrase);
    if found.is_empty() {
        println!("No airports found for this city.");
        return;
    }
    for airport in found {
        println!(
            "{}\t{}\t{}",
            airport.icao,
            airport.iata.as_deref().unwrap_or(""),
            airport.name
        );
    }
}
