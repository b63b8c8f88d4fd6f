//! In-memory RGBA canvas drawing block glyphs

use super::font::{BlockFont, FontError, FontFace};
use super::Surface;
use crate::palette::Color;

/// A pixel buffer implementing [`Surface`] with a [`BlockFont`]
#[derive(Debug, Clone)]
pub struct RasterCanvas {
    width: u32,
    height: u32,
    background: Color,
    pixels: Vec<Color>,
    font: BlockFont,
    face: Option<FontFace>,
    color: Color,
}

impl RasterCanvas {
    /// Create a canvas cleared to `background`
    pub fn new(width: u32, height: u32, background: Color, font: BlockFont) -> Self {
        Self {
            width,
            height,
            background,
            pixels: vec![background; width as usize * height as usize],
            font,
            face: None,
            color: Color::BLACK,
        }
    }

    pub fn font(&self) -> &BlockFont {
        &self.font
    }

    /// Number of pixels that differ from the background
    pub fn ink_count(&self) -> usize {
        self.pixels.iter().filter(|&&p| p != self.background).count()
    }

    /// Fill the pixels whose centers fall inside `[x0, x1) x [y0, y1)`
    fn fill(&mut self, x0: f64, x1: f64, y0: f64, y1: f64) {
        let clamp = |v: f64, max: u32| v.round().clamp(0.0, max as f64) as usize;
        let (left, right) = (clamp(x0, self.width), clamp(x1, self.width));
        let (low, high) = (clamp(y0, self.height), clamp(y1, self.height));
        for y in low..high {
            let row = y * self.width as usize;
            for x in left..right {
                self.pixels[row + x] = self.color;
            }
        }
    }
}

impl Surface for RasterCanvas {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn background(&self) -> Color {
        self.background
    }

    fn set_color(&mut self, color: Color) {
        self.color = color;
    }

    fn set_font_size(&mut self, size: f64) -> Result<(), FontError> {
        self.face = Some(self.font.face(size)?);
        Ok(())
    }

    fn measure_text(&self, text: &str) -> (f64, f64) {
        self.face.map_or((0.0, 0.0), |face| face.measure(text))
    }

    fn draw_text(&mut self, text: &str, x: f64, y: f64, anchor_x: f64, anchor_y: f64) {
        let Some(face) = self.face else {
            return;
        };
        for block in face.glyph_blocks(text, x, y, anchor_x, anchor_y) {
            self.fill(block.left, block.right, block.bottom, block.top);
        }
    }

    fn pixel(&self, x: i64, y: i64) -> Color {
        if x < 0 || y < 0 || x >= self.width as i64 || y >= self.height as i64 {
            return self.background;
        }
        self.pixels[y as usize * self.width as usize + x as usize]
    }
}
