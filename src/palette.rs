//! Colors and color palettes
//!
//! A palette is the set of colors words are drawn in, plus the canvas
//! background. Palettes can be loaded from TOML so the same frequency list
//! can be rendered with different color schemes.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur when loading or parsing palettes
#[derive(Error, Debug)]
pub enum PaletteError {
    #[error("Failed to read palette file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse palette TOML: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("palette defines no colors")]
    Empty,
}

/// Error for a color string that is not `#rgb`, `#rrggbb` or `#rrggbbaa`
#[derive(Error, Debug, Clone, PartialEq)]
#[error("invalid color '{0}' (expected #rgb, #rrggbb or #rrggbbaa)")]
pub struct InvalidColor(pub String);

/// An RGBA color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(0xff, 0xff, 0xff);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 0xff }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Hex form used in SVG output; alpha is only written when not opaque
    pub fn to_hex(&self) -> String {
        if self.a == 0xff {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            format!("#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
        }
    }
}

impl FromStr for Color {
    type Err = InvalidColor;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || InvalidColor(s.to_string());
        let hex = s.trim().strip_prefix('#').ok_or_else(invalid)?;
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(invalid());
        }

        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| invalid());
        let short = |i: usize| {
            u8::from_str_radix(&hex[i..i + 1], 16)
                .map(|v| v * 17)
                .map_err(|_| invalid())
        };

        match hex.len() {
            3 => Ok(Color::rgb(short(0)?, short(1)?, short(2)?)),
            6 => Ok(Color::rgb(channel(0)?, channel(2)?, channel(4)?)),
            8 => Ok(Color::rgba(channel(0)?, channel(2)?, channel(4)?, channel(6)?)),
            _ => Err(invalid()),
        }
    }
}

impl TryFrom<String> for Color {
    type Error = InvalidColor;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_hex()
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// A set of word colors and a background color
#[derive(Debug, Clone, PartialEq)]
pub struct Palette {
    /// Optional name for the palette
    pub name: Option<String>,
    /// Optional description
    pub description: Option<String>,
    /// Colors words are drawn in, picked at random per word
    pub colors: Vec<Color>,
    pub background: Color,
}

/// TOML structure for deserializing palettes
#[derive(Deserialize)]
struct TomlPalette {
    metadata: Option<TomlMetadata>,
    colors: Vec<Color>,
    background: Option<Color>,
}

#[derive(Deserialize)]
struct TomlMetadata {
    name: Option<String>,
    description: Option<String>,
}

/// Default palette - dark inks on white
const DEFAULT_PALETTE: &str = r##"
colors = [
    "#1a1a1a",
    "#1565c0",
    "#2e7d32",
    "#c62828",
    "#6a1b9a",
    "#e65100",
]
background = "#ffffff"

[metadata]
name = "ink"
description = "Dark inks on a white background"
"##;

impl Palette {
    /// Load palette from TOML file
    pub fn from_file(path: &Path) -> Result<Self, PaletteError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    /// Load palette from TOML string
    pub fn from_str(content: &str) -> Result<Self, PaletteError> {
        let parsed: TomlPalette = toml::from_str(content)?;
        if parsed.colors.is_empty() {
            return Err(PaletteError::Empty);
        }

        Ok(Palette {
            name: parsed.metadata.as_ref().and_then(|m| m.name.clone()),
            description: parsed.metadata.as_ref().and_then(|m| m.description.clone()),
            colors: parsed.colors,
            background: parsed.background.unwrap_or(Color::WHITE),
        })
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::from_str(DEFAULT_PALETTE).expect("Default palette should be valid TOML")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex_forms() {
        assert_eq!("#ff0000".parse::<Color>(), Ok(Color::rgb(255, 0, 0)));
        assert_eq!("#f00".parse::<Color>(), Ok(Color::rgb(255, 0, 0)));
        assert_eq!("#00000080".parse::<Color>(), Ok(Color::rgba(0, 0, 0, 0x80)));
        assert_eq!(" #1A2b3C ".parse::<Color>(), Ok(Color::rgb(0x1a, 0x2b, 0x3c)));
    }

    #[test]
    fn test_parse_invalid_colors() {
        assert!("ff0000".parse::<Color>().is_err());
        assert!("#ff00".parse::<Color>().is_err());
        assert!("#gg0000".parse::<Color>().is_err());
        assert!("#".parse::<Color>().is_err());
    }

    #[test]
    fn test_to_hex() {
        assert_eq!(Color::rgb(0x12, 0xab, 0x00).to_hex(), "#12ab00");
        assert_eq!(Color::rgba(0, 0, 0, 0).to_hex(), "#00000000");
        assert_eq!(Color::WHITE.to_string(), "#ffffff");
    }

    #[test]
    fn test_default_palette() {
        let palette = Palette::default();
        assert_eq!(palette.name, Some("ink".to_string()));
        assert_eq!(palette.colors.len(), 6);
        assert_eq!(palette.colors[0], Color::rgb(0x1a, 0x1a, 0x1a));
        assert_eq!(palette.background, Color::WHITE);
    }

    #[test]
    fn test_parse_toml_with_metadata() {
        let toml_str = r##"
colors = ["#000000", "#ff0000"]
background = "#101010"

[metadata]
name = "Test Theme"
description = "A test theme"
"##;
        let palette = Palette::from_str(toml_str).expect("Should parse");
        assert_eq!(palette.name, Some("Test Theme".to_string()));
        assert_eq!(palette.description, Some("A test theme".to_string()));
        assert_eq!(palette.colors, vec![Color::BLACK, Color::rgb(255, 0, 0)]);
        assert_eq!(palette.background, Color::rgb(0x10, 0x10, 0x10));
    }

    #[test]
    fn test_parse_toml_without_background() {
        let palette = Palette::from_str(r##"colors = ["#111111"]"##).expect("Should parse");
        assert_eq!(palette.name, None);
        assert_eq!(palette.background, Color::WHITE);
    }

    #[test]
    fn test_empty_palette_rejected() {
        let result = Palette::from_str("colors = []");
        assert!(matches!(result, Err(PaletteError::Empty)));
    }

    #[test]
    fn test_invalid_color_in_toml() {
        let result = Palette::from_str(r##"colors = ["red"]"##);
        assert!(matches!(result, Err(PaletteError::ParseError(_))));
    }
}
