//! Core types for the layout engine

use serde::{Deserialize, Serialize};

use crate::palette::Color;

/// A 2D point in canvas pixel coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance_to(&self, other: &Point) -> f64 {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2)).sqrt()
    }
}

/// An axis-aligned rectangle in canvas pixel coordinates.
///
/// `bottom` is the smaller y bound and `top` the larger one, so a valid
/// rectangle always has `left <= right` and `bottom <= top`.
///
/// Two rectangles overlap only when their interiors intersect: rectangles
/// that merely share an edge do not overlap. A rectangle fits a canvas when
/// it lies inside it, touching the border included.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub left: f64,
    pub right: f64,
    pub bottom: f64,
    pub top: f64,
}

impl Rect {
    /// Create a rectangle from its edges, normalizing swapped bounds
    pub fn new(left: f64, right: f64, bottom: f64, top: f64) -> Self {
        Self {
            left: left.min(right),
            right: left.max(right),
            bottom: bottom.min(top),
            top: bottom.max(top),
        }
    }

    /// Create a rectangle of the given size centered on a point
    pub fn centered(center: Point, width: f64, height: f64) -> Self {
        let half_w = width / 2.0;
        let half_h = height / 2.0;
        Self::new(
            center.x - half_w,
            center.x + half_w,
            center.y - half_h,
            center.y + half_h,
        )
    }

    pub fn width(&self) -> f64 {
        self.right - self.left
    }

    pub fn height(&self) -> f64 {
        self.top - self.bottom
    }

    pub fn center(&self) -> Point {
        Point::new(
            (self.left + self.right) / 2.0,
            (self.bottom + self.top) / 2.0,
        )
    }

    /// Strict interior intersection
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.left < other.right
            && self.right > other.left
            && self.bottom < other.top
            && self.top > other.bottom
    }

    /// Check whether the rectangle lies within a `width` x `height` canvas
    pub fn fits(&self, width: f64, height: f64) -> bool {
        self.left >= 0.0 && self.bottom >= 0.0 && self.right <= width && self.top <= height
    }

    /// Check whether `other` lies entirely within this rectangle
    pub fn contains_rect(&self, other: &Rect) -> bool {
        other.left >= self.left
            && other.right <= self.right
            && other.bottom >= self.bottom
            && other.top <= self.top
    }

    /// Grow the rectangle by `amount` on every side
    pub fn padded(&self, amount: f64) -> Rect {
        Rect::new(
            self.left - amount,
            self.right + amount,
            self.bottom - amount,
            self.top + amount,
        )
    }
}

/// A word that found a slot on the canvas
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedWord {
    pub text: String,
    pub count: u32,
    /// Center of the word's rectangle
    pub position: Point,
    pub font_size: f64,
    /// Height of the padded text extent
    pub height: f64,
    pub color: Color,
    /// The full candidate rectangle the search accepted
    pub bounds: Rect,
    /// Regions registered in the collision index for this word
    pub regions: Vec<Rect>,
}

/// The outcome of one rendering pass
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutResult {
    pub width: u32,
    pub height: u32,
    pub background: Color,
    pub masks: Vec<Rect>,
    /// Placed words, in placement order
    pub words: Vec<PlacedWord>,
    /// Words for which no slot was found
    pub skipped: Vec<String>,
    /// Whether the consecutive-miss cap ended the pass before the list ran out
    pub stopped_early: bool,
}

impl LayoutResult {
    pub fn new(width: u32, height: u32, background: Color, masks: Vec<Rect>) -> Self {
        Self {
            width,
            height,
            background,
            masks,
            words: vec![],
            skipped: vec![],
            stopped_early: false,
        }
    }

    pub fn get(&self, text: &str) -> Option<&PlacedWord> {
        self.words.iter().find(|w| w.text == text)
    }
}
