//! Candidate positions on concentric rings around the canvas center

use std::f64::consts::PI;

use super::types::Point;

/// Number of candidate positions on every ring
pub const RING_POINTS: usize = 512;

/// Radius of the innermost ring
pub const FIRST_RADIUS: f64 = 1.0;

/// Distance between consecutive rings
pub const RADIUS_STEP: f64 = 5.0;

/// A ring of evenly spaced points at a fixed distance from a center.
///
/// Point `i` sits at angle `2π·i/n`, so the sequence always starts on the
/// positive x axis and proceeds in increasing angle.
#[derive(Debug, Clone, PartialEq)]
pub struct Circle {
    center: Point,
    radius: f64,
    points: Vec<Point>,
}

impl Circle {
    pub fn new(center: Point, radius: f64, count: usize) -> Self {
        let step = 2.0 * PI / count as f64;
        let points = (0..count)
            .map(|i| {
                let angle = step * i as f64;
                Point::new(
                    center.x + radius * angle.cos(),
                    center.y + radius * angle.sin(),
                )
            })
            .collect();
        Self {
            center,
            radius,
            points,
        }
    }

    pub fn center(&self) -> Point {
        self.center
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }
}

/// Every ring a search may visit, innermost first.
///
/// Rings are addressed by their index in this table rather than by radius.
#[derive(Debug, Clone)]
pub struct RingTable {
    rings: Vec<Circle>,
    center: Point,
    max_radius: f64,
}

impl RingTable {
    /// Build the rings for a `width` x `height` canvas.
    ///
    /// Radii run from [`FIRST_RADIUS`] in steps of [`RADIUS_STEP`] up to the
    /// canvas diagonal, so the outermost ring reaches every canvas corner.
    /// Rings are centered on the whole pixel `(width / 2, height / 2)`, with
    /// integer division, so odd canvases round the center down.
    pub fn new(width: u32, height: u32) -> Self {
        let (w, h) = (width as f64, height as f64);
        let center = Point::new((width / 2) as f64, (height / 2) as f64);
        let max_radius = (w * w + h * h).sqrt();

        let mut rings = Vec::new();
        let mut radius = FIRST_RADIUS;
        while radius < max_radius {
            rings.push(Circle::new(center, radius, RING_POINTS));
            radius += RADIUS_STEP;
        }

        Self {
            rings,
            center,
            max_radius,
        }
    }

    pub fn center(&self) -> Point {
        self.center
    }

    pub fn get(&self, index: usize) -> Option<&Circle> {
        self.rings.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Circle> {
        self.rings.iter()
    }

    pub fn len(&self) -> usize {
        self.rings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rings.is_empty()
    }

    pub fn max_radius(&self) -> f64 {
        self.max_radius
    }
}
