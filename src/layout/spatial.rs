//! Grid-bucketed collision index
//!
//! The canvas is split into square cells. Every inserted rectangle is
//! recorded in each cell it touches, so a query only has to look at the
//! rectangles stored in the cells the query itself touches.

use super::types::Rect;

/// Number of cells along the canvas height
const CELLS_PER_HEIGHT: u32 = 10;

/// Spatial index answering "does this rectangle overlap anything placed?"
#[derive(Debug, Clone)]
pub struct SpatialIndex {
    cell_size: f64,
    columns: usize,
    rows: usize,
    /// Per-cell indices into `rects`, row-major
    cells: Vec<Vec<usize>>,
    rects: Vec<Rect>,
}

impl SpatialIndex {
    /// Create an empty index covering a `width` x `height` canvas
    pub fn new(width: u32, height: u32) -> Self {
        let cell_size = (height / CELLS_PER_HEIGHT).max(1) as f64;
        let columns = ((width.max(1) as f64) / cell_size).ceil() as usize;
        let rows = ((height.max(1) as f64) / cell_size).ceil() as usize;
        Self {
            cell_size,
            columns,
            rows,
            cells: vec![Vec::new(); columns * rows],
            rects: Vec::new(),
        }
    }

    /// Edge length of one grid cell in pixels
    pub fn cell_size(&self) -> f64 {
        self.cell_size
    }

    /// Record an occupied region.
    ///
    /// Regions reaching outside the canvas are filed under the border cells,
    /// which is where any query reaching outside the canvas looks too.
    pub fn insert(&mut self, rect: Rect) {
        let id = self.rects.len();
        self.rects.push(rect);
        let (cols, rows) = self.cell_span(&rect);
        for row in rows.0..=rows.1 {
            for col in cols.0..=cols.1 {
                self.cells[row * self.columns + col].push(id);
            }
        }
    }

    /// Check whether `rect` overlaps any recorded region
    pub fn collides(&self, rect: &Rect) -> bool {
        let (cols, rows) = self.cell_span(rect);
        for row in rows.0..=rows.1 {
            for col in cols.0..=cols.1 {
                let hit = self.cells[row * self.columns + col]
                    .iter()
                    .any(|&id| self.rects[id].overlaps(rect));
                if hit {
                    return true;
                }
            }
        }
        false
    }

    /// All recorded regions, in insertion order
    pub fn rects(&self) -> &[Rect] {
        &self.rects
    }

    pub fn len(&self) -> usize {
        self.rects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rects.is_empty()
    }

    /// Inclusive column and row ranges touched by `rect`, clamped to the grid
    fn cell_span(&self, rect: &Rect) -> ((usize, usize), (usize, usize)) {
        let col = |x: f64| Self::clamp_cell(x / self.cell_size, self.columns);
        let row = |y: f64| Self::clamp_cell(y / self.cell_size, self.rows);
        (
            (col(rect.left), col(rect.right)),
            (row(rect.bottom), row(rect.top)),
        )
    }

    fn clamp_cell(position: f64, count: usize) -> usize {
        let cell = position.floor();
        if cell.is_nan() || cell <= 0.0 {
            0
        } else {
            (cell as usize).min(count - 1)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn index_with(rects: &[Rect]) -> SpatialIndex {
        let mut index = SpatialIndex::new(200, 100);
        for r in rects {
            index.insert(*r);
        }
        index
    }

    #[test]
    fn test_cell_size_follows_height() {
        assert_eq!(SpatialIndex::new(2048, 2048).cell_size(), 204.0);
        assert_eq!(SpatialIndex::new(200, 100).cell_size(), 10.0);
        assert_eq!(SpatialIndex::new(5, 5).cell_size(), 1.0);
    }

    #[test]
    fn test_empty_index_never_collides() {
        let index = SpatialIndex::new(200, 100);
        assert!(index.is_empty());
        assert!(!index.collides(&Rect::new(0.0, 200.0, 0.0, 100.0)));
    }

    #[test]
    fn test_overlapping_query_collides() {
        let index = index_with(&[
            Rect::new(10.0, 30.0, 10.0, 30.0),
            Rect::new(100.0, 150.0, 40.0, 90.0),
        ]);
        assert_eq!(index.len(), 2);
        assert!(index.collides(&Rect::new(25.0, 40.0, 25.0, 40.0)));
        assert!(index.collides(&Rect::new(120.0, 121.0, 60.0, 61.0)));
        // A query covering a stored rect entirely
        assert!(index.collides(&Rect::new(0.0, 200.0, 0.0, 100.0)));
    }

    #[test]
    fn test_disjoint_query_does_not_collide() {
        let index = index_with(&[
            Rect::new(10.0, 30.0, 10.0, 30.0),
            Rect::new(100.0, 150.0, 40.0, 90.0),
        ]);
        // Same cells as the first rect, but geometrically apart
        assert!(!index.collides(&Rect::new(31.0, 39.0, 31.0, 39.0)));
        assert!(!index.collides(&Rect::new(160.0, 190.0, 0.0, 100.0)));
    }

    #[test]
    fn test_touching_edges_do_not_collide() {
        let index = index_with(&[Rect::new(40.0, 60.0, 40.0, 60.0)]);
        assert!(!index.collides(&Rect::new(60.0, 80.0, 40.0, 60.0)));
        assert!(!index.collides(&Rect::new(40.0, 60.0, 60.0, 80.0)));
        assert!(!index.collides(&Rect::new(20.0, 40.0, 20.0, 40.0)));
        assert!(index.collides(&Rect::new(59.5, 80.0, 40.0, 60.0)));
    }

    #[test]
    fn test_rect_spanning_many_cells() {
        let index = index_with(&[Rect::new(5.0, 195.0, 45.0, 55.0)]);
        for x in (10..190).step_by(10) {
            let x = x as f64;
            assert!(index.collides(&Rect::new(x, x + 2.0, 50.0, 52.0)));
        }
    }

    #[test]
    fn test_regions_outside_canvas_are_found() {
        let index = index_with(&[Rect::new(-50.0, 5.0, -50.0, 5.0)]);
        assert!(index.collides(&Rect::new(-10.0, -5.0, -10.0, -5.0)));
        assert!(index.collides(&Rect::new(0.0, 3.0, 0.0, 3.0)));
        assert!(!index.collides(&Rect::new(6.0, 10.0, 6.0, 10.0)));

        let far = index_with(&[Rect::new(250.0, 300.0, 150.0, 200.0)]);
        assert!(far.collides(&Rect::new(260.0, 270.0, 160.0, 170.0)));
        assert!(!far.collides(&Rect::new(190.0, 200.0, 90.0, 100.0)));
    }

    #[test]
    fn test_many_disjoint_rects() {
        let mut rects = vec![];
        for col in 0..10 {
            for row in 0..5 {
                let x = col as f64 * 20.0;
                let y = row as f64 * 20.0;
                rects.push(Rect::new(x + 2.0, x + 18.0, y + 2.0, y + 18.0));
            }
        }
        let index = index_with(&rects);
        for r in &rects {
            assert!(index.collides(&Rect::centered(r.center(), 2.0, 2.0)));
            // The gutters between stored rects stay free
            assert!(!index.collides(&Rect::new(r.right, r.right + 4.0, r.bottom, r.top)));
        }
    }
}
