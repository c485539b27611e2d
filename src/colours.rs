use bevy_reflect::Reflect;
use once_cell::sync::Lazy;
use phf::phf_map;
use regex::Regex;
use serde::{de::Visitor, Deserialize, Serialize};

/// RGBA colour with every channel in `0.0..=1.0`.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Reflect)]
pub struct Colour {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

type ColourMap = phf::Map<&'static str, (f32, f32, f32)>;
static NAMED_COLOURS: ColourMap = phf_map! {
    "RED" => (1.0, 0.0, 0.0),
    "GREEN" => (0.0, 1.0, 0.0),
    "BLUE" => (0.0, 0.0, 1.0),
    "YELLOW" => (1.0, 1.0, 0.0),
    "WHITE" => (1.0, 1.0, 1.0),
    "BLACK" => (0.0, 0.0, 0.0),
};

impl Colour {
    pub const DEFAULT: Colour = Colour::from_rgb(0.196, 0.643, 0.808);
    pub const RED: Colour = Colour::from_rgb(1.0, 0.0, 0.0);
    pub const GREEN: Colour = Colour::from_rgb(0.0, 1.0, 0.0);
    pub const BLUE: Colour = Colour::from_rgb(0.0, 0.0, 1.0);

    pub const fn from_rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub fn from_rgba8(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self {
            r: f32::from(r) / 255.0,
            g: f32::from(g) / 255.0,
            b: f32::from(b) / 255.0,
            a: f32::from(a) / 255.0,
        }
    }

    /// Looks up one of the colour names of the route language, ignoring case.
    pub fn from_name(name: &str) -> Option<Self> {
        NAMED_COLOURS
            .get(name.trim().to_uppercase().as_str())
            .map(|&(r, g, b)| Colour::from_rgb(r, g, b))
    }
}

impl Default for Colour {
    fn default() -> Self {
        Self::DEFAULT
    }
}

struct ColourVisitor;

static HASH_RGBA_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^#([0-9a-fA-F]{2})([0-9a-fA-F]{2})([0-9a-fA-F]{2})([0-9a-fA-F]{2})?$").unwrap()
});

impl<'de> Visitor<'de> for ColourVisitor {
    type Value = Colour;

    fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
        formatter.write_str("a colour name or a colour in the format #rrggbb or #rrggbbaa")
    }

    fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
    where
        E: serde::de::Error,
    {
        if let Some(colour) = Colour::from_name(v) {
            return Ok(colour);
        }

        if let Some((((r, g), b), a)) = HASH_RGBA_RE.captures(v).and_then(|captures| {
            let r = u8::from_str_radix(&captures[1], 16);
            let g = u8::from_str_radix(&captures[2], 16);
            let b = u8::from_str_radix(&captures[3], 16);
            let a = captures
                .get(4)
                .map_or(Ok(255), |a| u8::from_str_radix(a.as_str(), 16));
            r.ok().zip(g.ok()).zip(b.ok()).zip(a.ok())
        }) {
            return Ok(Colour::from_rgba8(r, g, b, a));
        }

        Err(serde::de::Error::invalid_value(
            serde::de::Unexpected::Str(v),
            &self,
        ))
    }
}

impl<'de> Deserialize<'de> for Colour {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        deserializer.deserialize_str(ColourVisitor)
    }
}

#[cfg(test)]
mod test {
    use super::Colour;

    #[test]
    fn test_named_colours() {
        assert_eq!(Colour::from_name("red"), Some(Colour::RED));
        assert_eq!(Colour::from_name(" Green "), Some(Colour::GREEN));
        assert_eq!(
            Colour::from_name("YELLOW"),
            Some(Colour::from_rgb(1.0, 1.0, 0.0))
        );
        assert_eq!(Colour::from_name("purple"), None);
    }

    #[test]
    fn test_deserialize() {
        let colour: Colour = serde_json::from_str(r##""#ff0000""##).unwrap();
        assert_eq!(colour, Colour::RED);

        let colour: Colour = serde_json::from_str(r##""#0000ff00""##).unwrap();
        assert_eq!(
            colour,
            Colour {
                a: 0.0,
                ..Colour::BLUE
            }
        );

        let colour: Colour = serde_json::from_str(r#""blue""#).unwrap();
        assert_eq!(colour, Colour::BLUE);

        assert!(serde_json::from_str::<Colour>(r##""#12345""##).is_err());
    }
}
