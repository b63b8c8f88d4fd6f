//! Precise occupancy for large words
//!
//! A word's bounding rectangle over-reports the space it uses: short glyphs
//! leave blank bands, and gaps between words could hold smaller ones. For
//! tall words the drawn surface is sampled on a coarse grid and only the
//! inked samples are registered as occupied.

use crate::surface::Surface;

use super::types::Rect;

/// Words at most this tall register their full rectangle
pub const PRECISE_MIN_HEIGHT: f64 = 40.0;

/// Sampling stride in pixels; each inked sample occupies a box this far
/// around it
pub const SAMPLE_STRIDE: usize = 5;

/// Regions to record in the collision index for a word drawn inside `rect`.
///
/// Every returned region lies within `rect` padded by [`SAMPLE_STRIDE`]. The
/// result is never empty: when no ink is found the full rectangle is used.
pub fn occupied_regions<S: Surface + ?Sized>(surface: &S, rect: &Rect) -> Vec<Rect> {
    if rect.height() <= PRECISE_MIN_HEIGHT {
        return vec![*rect];
    }

    let background = surface.background();
    let pad = SAMPLE_STRIDE as f64;
    let xs = rect.left.ceil() as i64..=rect.right.floor() as i64;
    let ys = rect.bottom.ceil() as i64..=rect.top.floor() as i64;

    let mut regions = Vec::new();
    for x in xs.step_by(SAMPLE_STRIDE) {
        for y in ys.clone().step_by(SAMPLE_STRIDE) {
            if surface.pixel(x, y) != background {
                let (x, y) = (x as f64, y as f64);
                regions.push(Rect::new(x - pad, x + pad, y - pad, y + pad));
            }
        }
    }

    if regions.is_empty() {
        regions.push(*rect);
    }
    regions
}
