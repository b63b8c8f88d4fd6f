//! Drawing surfaces the layout engine renders onto
//!
//! The engine needs four things from a surface: select a color and a font
//! size, measure a word, draw a word, and read pixels back so large words
//! can register their actual ink instead of their whole bounding box.

pub mod font;
pub mod raster;

pub use font::{BlockFont, FontError, FontFace};
pub use raster::RasterCanvas;

use crate::palette::Color;

/// A canvas words are measured and drawn on
pub trait Surface {
    fn width(&self) -> u32;

    fn height(&self) -> u32;

    /// Color every pixel starts with
    fn background(&self) -> Color;

    /// Color used by subsequent draws
    fn set_color(&mut self, color: Color);

    /// Resolve the font face for `size`. Failure is fatal for the pass.
    fn set_font_size(&mut self, size: f64) -> Result<(), FontError>;

    /// Width and height of `text` in the current face
    fn measure_text(&self, text: &str) -> (f64, f64);

    /// Draw `text` so that the point `(x, y)` sits at the fraction
    /// `(anchor_x, anchor_y)` of its extent; `(0.5, 0.5)` centers it.
    fn draw_text(&mut self, text: &str, x: f64, y: f64, anchor_x: f64, anchor_y: f64);

    /// Read back one pixel; positions outside the canvas read as background
    fn pixel(&self, x: i64, y: i64) -> Color;
}
