use std::io;

use bevy_reflect::Reflect;
use serde::Serialize;
use tracing::warn;

pub mod airports;
pub mod colours;
pub mod diagnostics;
pub mod geometry;
pub mod map;
pub mod route;
pub mod settings;

pub use airports::{AirportResolver, AirportTable};
pub use colours::Colour;
pub use diagnostics::Diagnostic;
pub use map::RouteMap;
pub use settings::Settings;

fn read_to_string(contents: &[u8]) -> Result<String, io::Error> {
    String::from_utf8(contents.to_vec()).or_else(|_| {
        let (string, _, errors) = encoding_rs::WINDOWS_1252.decode(contents);
        if errors {
            warn!("errors while decoding win-1252");
        }
        Ok(string.to_string())
    })
}

/// Which side of its anchor a label is drawn on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Reflect, Serialize)]
pub enum HorizontalAlignment {
    Left,
    Right,
}
