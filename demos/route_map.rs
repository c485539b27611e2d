use std::{env::args_os, fs, io};

use geo::{LineString, MultiLineString};
use geojson::{Feature, FeatureCollection};
use route_map::{AirportTable, RouteMap, Settings};
use serde_json::Map;

fn hex(colour: route_map::Colour) -> String {
    let channel = |value: f32| (value.clamp(0.0, 1.0) * 255.0).round() as u8;
    format!(
        "#{:02x}{:02x}{:02x}",
        channel(colour.r),
        channel(colour.g),
        channel(colour.b)
    )
}

fn main() {
    tracing_subscriber::fmt().with_writer(io::stderr).init();
    let airports_path = args_os()
        .nth(1)
        .expect("missing argument: path to airport file");
    let input = args_os()
        .nth(2)
        .expect("missing argument: route input, e.g. RED,KLAX-KJFK/KBOS,900nm@EGLL")
        .into_string()
        .unwrap();
    let geojson_path = args_os()
        .nth(3)
        .expect("missing argument: path to .geojson output");
    let settings = args_os().nth(4).map_or_else(Settings::default, |path| {
        Settings::load(path).expect("unsuccessful settings parse")
    });

    let airports = AirportTable::load(airports_path).expect("unsuccessful parse");
    let map = RouteMap::build(&input, &airports, &settings);

    for diagnostic in &map.diagnostics {
        tracing::info!("{diagnostic}");
    }
    for row in &map.distances {
        println!("{}\t{:.2} km\t{:.2} nm", row.route, row.distance_km, row.distance_nm);
    }

    let tracks = map.tracks.iter().map(|track| Feature {
        geometry: Some(
            (&MultiLineString::new(
                track
                    .geographic_runs()
                    .map(|run| LineString::from(run.to_vec()))
                    .collect(),
            ))
                .into(),
        ),
        properties: Some(Map::from_iter(vec![
            ("label".to_string(), track.label.clone().into()),
            ("colour".to_string(), hex(track.colour).into()),
        ])),
        ..Default::default()
    });
    let markers = map.markers.iter().map(|marker| Feature {
        geometry: Some((&marker.coordinate).into()),
        properties: Some(Map::from_iter(vec![
            ("label".to_string(), marker.code.clone().into()),
            ("colour".to_string(), hex(marker.colour).into()),
        ])),
        ..Default::default()
    });
    let feature_collection = FeatureCollection::from_iter(tracks.chain(markers));

    fs::write(geojson_path, feature_collection.to_string()).expect("could not write .geojson");
    if let Some(bbox) = map.bounding_box {
        println!("{}", serde_json::to_string(&bbox).unwrap());
    }
}
