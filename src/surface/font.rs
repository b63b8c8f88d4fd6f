//! Block-glyph font metrics
//!
//! Every glyph is drawn as a solid block inside its advance cell. Glyphs
//! without ascenders only fill the x-height band, which leaves real gaps
//! above lower-case runs for smaller words to slip into.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::layout::Rect;

/// Errors resolving a font face. These abort a rendering pass.
#[derive(Error, Debug)]
pub enum FontError {
    #[error("failed to read font file '{}': {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse font file '{}': {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid font metric '{metric}': {value}")]
    InvalidMetric { metric: &'static str, value: f64 },

    #[error("invalid font size {0}")]
    InvalidSize(f64),
}

/// Glyphs drawn at x-height: lower-case letters with no ascender or descender
const SHORT_GLYPHS: &str = "acemnorsuvwxz";

/// Metrics shared by every glyph of a block font, as fractions of the em size
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct BlockFont {
    pub name: String,
    /// Horizontal advance per glyph
    pub advance: f64,
    /// Height of short glyphs
    pub x_height: f64,
    /// Blank space on each side of a glyph inside its advance
    pub side_bearing: f64,
}

impl Default for BlockFont {
    fn default() -> Self {
        Self {
            name: "block".to_string(),
            advance: 0.6,
            x_height: 0.6,
            side_bearing: 0.1,
        }
    }
}

impl BlockFont {
    /// Load metrics from a TOML font file
    pub fn from_file(path: &Path) -> Result<Self, FontError> {
        let content = std::fs::read_to_string(path).map_err(|source| FontError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let font: BlockFont = toml::from_str(&content).map_err(|source| FontError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        font.validate()?;
        Ok(font)
    }

    fn validate(&self) -> Result<(), FontError> {
        let checks = [
            ("advance", self.advance, self.advance > 0.0),
            ("x_height", self.x_height, self.x_height > 0.0 && self.x_height <= 1.0),
            (
                "side_bearing",
                self.side_bearing,
                (0.0..0.5).contains(&self.side_bearing),
            ),
        ];
        for (metric, value, ok) in checks {
            if !ok || !value.is_finite() {
                return Err(FontError::InvalidMetric { metric, value });
            }
        }
        Ok(())
    }

    /// Resolve the face for a point size
    pub fn face(&self, size: f64) -> Result<FontFace, FontError> {
        if !size.is_finite() || size <= 0.0 {
            return Err(FontError::InvalidSize(size));
        }
        Ok(FontFace {
            size,
            advance: self.advance * size,
            x_height: self.x_height * size,
            bearing: self.side_bearing * self.advance * size,
        })
    }
}

/// A block font resolved at one size; all metrics are in pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FontFace {
    pub size: f64,
    pub advance: f64,
    pub x_height: f64,
    pub bearing: f64,
}

impl FontFace {
    /// Extent of a run of text: one advance per character, one em high
    pub fn measure(&self, text: &str) -> (f64, f64) {
        (text.chars().count() as f64 * self.advance, self.size)
    }

    /// Ink height of a glyph, or `None` for glyphs that draw nothing
    pub fn glyph_height(&self, glyph: char) -> Option<f64> {
        if glyph.is_whitespace() {
            None
        } else if SHORT_GLYPHS.contains(glyph) {
            Some(self.x_height)
        } else {
            Some(self.size)
        }
    }

    /// Solid blocks inked by `text` when the point `(x, y)` sits at
    /// `(anchor_x, anchor_y)` of its extent (0.5, 0.5 centers it).
    ///
    /// Glyphs stand on the larger-y edge of the em box. Edges are snapped to
    /// whole pixels, so the blocks are exactly the pixels a raster fills.
    pub fn glyph_blocks(
        &self,
        text: &str,
        x: f64,
        y: f64,
        anchor_x: f64,
        anchor_y: f64,
    ) -> Vec<Rect> {
        let (w, h) = self.measure(text);
        let left = x - anchor_x * w;
        let baseline = y - anchor_y * h + h;

        text.chars()
            .enumerate()
            .filter_map(|(i, glyph)| {
                let height = self.glyph_height(glyph)?;
                let cell = left + i as f64 * self.advance;
                Some(Rect::new(
                    (cell + self.bearing).round(),
                    (cell + self.advance - self.bearing).round(),
                    (baseline - height).round(),
                    baseline.round(),
                ))
            })
            .filter(|block| block.width() > 0.0 && block.height() > 0.0)
            .collect()
    }
}
