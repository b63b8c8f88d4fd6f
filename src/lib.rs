//! Wordcloud - word cloud layout and rendering
//!
//! This library positions words of varying size on a canvas so that no two
//! overlap, spiraling outward from the center with the most frequent words
//! first, and renders the result as SVG.
//!
//! # Example
//!
//! ```rust
//! use wordcloud::{render_with_config, FrequencyList, LayoutConfig, RenderConfig};
//!
//! let words = FrequencyList::from_json(r#"{"rust": 10, "cargo": 4}"#).unwrap();
//! let config = RenderConfig::new()
//!     .with_layout(LayoutConfig::new().with_size(300, 200).with_font_sizes(10.0, 60.0));
//!
//! let svg = render_with_config(&words, config).unwrap();
//! assert!(svg.contains("<title>rust</title>"));
//! ```

pub mod corpus;
pub mod layout;
pub mod palette;
pub mod renderer;
pub mod surface;

pub use corpus::{CorpusError, FrequencyList, WordCount};
pub use layout::{ConfigError, LayoutConfig, LayoutError, LayoutResult, PlacedWord, Rect};
pub use palette::{Color, Palette, PaletteError};
pub use renderer::{render_svg, SvgConfig};
pub use surface::{BlockFont, FontError, RasterCanvas, Surface};

use log::debug;
use thiserror::Error;

/// Errors that can occur during the render pipeline
#[derive(Debug, Error)]
pub enum RenderError {
    /// Error during layout
    #[error("layout error: {0}")]
    Layout(#[from] LayoutError),

    /// The font could not be loaded
    #[error("font error: {0}")]
    Font(#[from] FontError),
}

/// Configuration for the complete render pipeline
#[derive(Debug, Clone, Default)]
pub struct RenderConfig {
    /// Layout configuration
    pub layout: LayoutConfig,
    /// SVG output configuration
    pub svg: SvgConfig,
}

impl RenderConfig {
    /// Create a new configuration with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the layout configuration
    pub fn with_layout(mut self, config: LayoutConfig) -> Self {
        self.layout = config;
        self
    }

    /// Set the SVG configuration
    pub fn with_svg(mut self, config: SvgConfig) -> Self {
        self.svg = config;
        self
    }
}

/// Load the configured font, or the built-in block font
fn load_font(config: &LayoutConfig) -> Result<BlockFont, FontError> {
    match &config.font_file {
        Some(path) => {
            debug!("loading font metrics from {}", path.display());
            BlockFont::from_file(path)
        }
        None => Ok(BlockFont::default()),
    }
}

/// Lay out `words` on a fresh raster canvas without producing SVG
pub fn layout_words(
    words: &FrequencyList,
    config: &LayoutConfig,
) -> Result<(LayoutResult, RasterCanvas), RenderError> {
    let font = load_font(config)?;
    let canvas = RasterCanvas::new(config.width, config.height, config.background, font);
    Ok(layout::compute(words, config, canvas)?)
}

/// Render a frequency list to SVG with default configuration
pub fn render(words: &FrequencyList) -> Result<String, RenderError> {
    render_with_config(words, RenderConfig::default())
}

/// Render a frequency list to SVG with custom configuration
pub fn render_with_config(words: &FrequencyList, config: RenderConfig) -> Result<String, RenderError> {
    let (result, canvas) = layout_words(words, &config.layout)?;
    Ok(render_svg(
        &result,
        canvas.font(),
        &config.svg,
        config.layout.debug,
    )?)
}
