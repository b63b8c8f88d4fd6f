//! Configuration for the layout engine

use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::palette::{Color, Palette};

use super::error::LayoutError;
use super::placement::DEFAULT_RANDOM_ATTEMPTS;
use super::types::Rect;

/// Errors that can occur when loading a configuration file
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse config TOML: {0}")]
    ParseError(#[from] toml::de::Error),
}

/// Configuration options for one rendering pass
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Canvas width in pixels
    pub width: u32,

    /// Canvas height in pixels
    pub height: u32,

    /// Font size of the least frequent words
    pub font_min_size: f64,

    /// Font size of the most frequent word
    pub font_max_size: f64,

    /// Colors words are drawn in, one picked at random per word
    pub colors: Vec<Color>,

    /// Canvas background
    pub background: Color,

    /// Regions no word may overlap
    pub masks: Vec<Rect>,

    /// Place words at random positions instead of spiraling out from the center
    pub random_placement: bool,

    /// Draw outlines around every occupied region and mask
    pub debug: bool,

    /// Padding added to each measured word extent
    pub margin: f64,

    /// Seed for color choice and random placement; entropy when unset
    pub seed: Option<u64>,

    /// Search workers; the number of CPUs when unset
    pub workers: Option<usize>,

    /// Positions tried per word in random placement
    pub random_attempts: usize,

    /// Consecutive unplaceable words tolerated before the pass stops
    pub miss_limit: usize,

    /// Block font metrics file; the built-in metrics when unset
    pub font_file: Option<PathBuf>,

    /// Only the most frequent words are laid out; all of them when unset
    pub max_words: Option<usize>,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        let palette = Palette::default();
        Self {
            width: 2048,
            height: 2048,
            font_min_size: 10.0,
            font_max_size: 500.0,
            colors: palette.colors,
            background: palette.background,
            masks: vec![],
            random_placement: false,
            debug: false,
            margin: 5.0,
            seed: None,
            workers: None,
            random_attempts: DEFAULT_RANDOM_ATTEMPTS,
            miss_limit: 10,
            font_file: None,
            max_words: None,
        }
    }
}

impl LayoutConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from a TOML file; missing keys keep their defaults
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Load configuration from a TOML string
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Set the canvas size
    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Set the font size range
    pub fn with_font_sizes(mut self, min: f64, max: f64) -> Self {
        self.font_min_size = min;
        self.font_max_size = max;
        self
    }

    /// Set the word colors
    pub fn with_colors(mut self, colors: Vec<Color>) -> Self {
        self.colors = colors;
        self
    }

    /// Set the background color
    pub fn with_background(mut self, background: Color) -> Self {
        self.background = background;
        self
    }

    /// Use the colors and background of a palette
    pub fn with_palette(mut self, palette: Palette) -> Self {
        self.colors = palette.colors;
        self.background = palette.background;
        self
    }

    /// Set the regions words must avoid
    pub fn with_masks(mut self, masks: Vec<Rect>) -> Self {
        self.masks = masks;
        self
    }

    /// Enable or disable random placement
    pub fn with_random_placement(mut self, random: bool) -> Self {
        self.random_placement = random;
        self
    }

    /// Enable or disable debug outlines
    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// Set the padding around measured words
    pub fn with_margin(mut self, margin: f64) -> Self {
        self.margin = margin;
        self
    }

    /// Fix the random seed
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set the number of search workers
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = Some(workers);
        self
    }

    /// Set the attempt cap for random placement
    pub fn with_random_attempts(mut self, attempts: usize) -> Self {
        self.random_attempts = attempts;
        self
    }

    /// Set how many consecutive misses are tolerated
    pub fn with_miss_limit(mut self, limit: usize) -> Self {
        self.miss_limit = limit;
        self
    }

    /// Use a block font metrics file
    pub fn with_font_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.font_file = Some(path.into());
        self
    }

    /// Limit the pass to the `limit` most frequent words
    pub fn with_max_words(mut self, limit: usize) -> Self {
        self.max_words = Some(limit);
        self
    }

    /// Font size for a word seen `count` times when the most frequent word
    /// was seen `max_count` times
    pub fn font_size(&self, count: u32, max_count: u32) -> f64 {
        let ratio = if max_count == 0 {
            0.0
        } else {
            count as f64 / max_count as f64
        };
        (self.font_max_size * ratio).max(self.font_min_size)
    }

    /// Check the configuration before a pass starts
    pub fn validate(&self) -> Result<(), LayoutError> {
        if self.width == 0 || self.height == 0 {
            return Err(LayoutError::invalid_config(
                "size",
                format!("canvas must not be empty ({}x{})", self.width, self.height),
            ));
        }
        if !(self.font_min_size.is_finite() && self.font_min_size > 0.0) {
            return Err(LayoutError::invalid_config(
                "font_min_size",
                format!("must be positive, got {}", self.font_min_size),
            ));
        }
        if !self.font_max_size.is_finite() || self.font_max_size < self.font_min_size {
            return Err(LayoutError::invalid_config(
                "font_max_size",
                format!(
                    "must be at least font_min_size ({}), got {}",
                    self.font_min_size, self.font_max_size
                ),
            ));
        }
        if self.colors.is_empty() {
            return Err(LayoutError::invalid_config("colors", "palette is empty"));
        }
        if !(self.margin.is_finite() && self.margin >= 0.0) {
            return Err(LayoutError::invalid_config(
                "margin",
                format!("must not be negative, got {}", self.margin),
            ));
        }
        Ok(())
    }
}
