use serde::{Deserialize, Serialize};
use std::io;
use thiserror::Error;

use crate::colours::Colour;

#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("failed to read settings file: {0}")]
    FileRead(#[from] io::Error),
    #[error("failed to deserialize settings file: {0}")]
    Deserialize(#[from] serde_json::Error),
}

/// Tunables of the interpreter and geometry pipeline.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Settings {
    /// Colour of everything before the first colour token.
    pub default_colour: Colour,
    /// Points per great circle when estimating the bounding box.
    pub bounding_box_samples: usize,
    /// Points per great circle in rendered tracks.
    pub render_samples: usize,
    pub ring_points: usize,
    /// Degrees added on every side of the bounding box.
    pub padding_degrees: f64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            default_colour: Colour::DEFAULT,
            bounding_box_samples: 100,
            render_samples: 500,
            ring_points: 360,
            padding_degrees: 5.0,
        }
    }
}

pub type SettingsResult = Result<Settings, SettingsError>;

pub fn parse_settings_json(content: &[u8]) -> SettingsResult {
    Ok(serde_json::from_slice(content)?)
}

impl Settings {
    pub fn load(path: impl Into<std::path::PathBuf>) -> SettingsResult {
        parse_settings_json(&fs_err::read(path.into())?)
    }
}

#[cfg(test)]
mod test {
    use pretty_assertions_sorted::assert_eq_sorted;

    use crate::colours::Colour;

    use super::{parse_settings_json, Settings};

    #[test]
    fn test_partial_settings() {
        let parsed = parse_settings_json(
            br##"{
                "default_colour": "#ffffff",
                "render_samples": 250
            }"##,
        )
        .unwrap();

        assert_eq_sorted!(
            parsed,
            Settings {
                default_colour: Colour::from_rgb(1.0, 1.0, 1.0),
                render_samples: 250,
                ..Settings::default()
            }
        );
    }

    #[test]
    fn test_invalid_settings() {
        assert!(parse_settings_json(br#"{"ring_points": "many"}"#).is_err());
        assert!(parse_settings_json(br##"{"default_colour": "#zzzzzz"}"##).is_err());
    }
}
