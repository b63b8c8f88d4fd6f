//! Slot search: find where a rectangle of a given size can go
//!
//! The radial search walks the rings of a [`RingTable`] from the canvas
//! center outward and returns the first free position on the innermost ring
//! that has one. Rings are tested in parallel by a small worker pool; an
//! [`Aggregator`] makes sure a result on an outer ring is only accepted once
//! every inner ring is known to be full.

use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;

use crossbeam_channel::{bounded, unbounded};
use log::trace;
use rand::Rng;

use super::circle::RingTable;
use super::spatial::SpatialIndex;
use super::types::{Point, Rect};

/// Default attempt cap for random placement
pub const DEFAULT_RANDOM_ATTEMPTS: usize = 5_000_000;

/// What a worker found on one ring
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RingOutcome {
    /// First free position in generator order
    Hit(Point),
    /// No position on the ring is free
    Miss,
}

/// Final answer of a search
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Decision {
    Found { ring: usize, position: Point },
    Exhausted,
}

/// Orders ring results that may arrive in any order.
///
/// A hit on ring `r` is only decided once rings `0..r` have all reported a
/// miss; until then a closer hit is still possible.
#[derive(Debug, Clone)]
pub struct Aggregator {
    outcomes: Vec<Option<RingOutcome>>,
    /// Lowest ring not yet known to be a miss
    frontier: usize,
}

impl Aggregator {
    pub fn new(ring_count: usize) -> Self {
        Self {
            outcomes: vec![None; ring_count],
            frontier: 0,
        }
    }

    /// Decision available before any result arrives (only when there are no rings)
    pub fn initial(&self) -> Option<Decision> {
        self.outcomes.is_empty().then_some(Decision::Exhausted)
    }

    /// Record the outcome of `ring` and return the decision if one is now possible
    pub fn record(&mut self, ring: usize, outcome: RingOutcome) -> Option<Decision> {
        if let Some(slot) = self.outcomes.get_mut(ring) {
            *slot = Some(outcome);
        }

        while let Some(resolved) = self.outcomes.get(self.frontier) {
            match resolved {
                None => return None,
                Some(RingOutcome::Miss) => self.frontier += 1,
                Some(RingOutcome::Hit(position)) => {
                    return Some(Decision::Found {
                        ring: self.frontier,
                        position: *position,
                    });
                }
            }
        }
        Some(Decision::Exhausted)
    }
}

/// One ring handed to a worker
struct WorkItem<'a> {
    ring: usize,
    points: &'a [Point],
}

/// Searches the canvas for free slots against a snapshot of the collision index
pub struct PlacementEngine<'a> {
    index: &'a SpatialIndex,
    rings: &'a RingTable,
    canvas_width: f64,
    canvas_height: f64,
    workers: usize,
}

impl<'a> PlacementEngine<'a> {
    pub fn new(index: &'a SpatialIndex, rings: &'a RingTable, width: u32, height: u32) -> Self {
        Self {
            index,
            rings,
            canvas_width: width as f64,
            canvas_height: height as f64,
            workers: num_cpus::get(),
        }
    }

    /// Set the worker pool size (at least one worker is always used)
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers.max(1);
        self
    }

    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Check whether a rectangle can be placed: inside the canvas and clear of
    /// every recorded region
    pub fn is_free(&self, rect: &Rect) -> bool {
        rect.fits(self.canvas_width, self.canvas_height) && !self.index.collides(rect)
    }

    /// Find the free position closest to the canvas center for a
    /// `width` x `height` rectangle, searching rings in parallel.
    ///
    /// Returns `None` when no ring has room. Every worker has stopped by the
    /// time this returns, so the caller may mutate the index afterwards.
    pub fn search(&self, width: f64, height: f64) -> Option<Point> {
        let mut aggregator = Aggregator::new(self.rings.len());
        if let Some(decision) = aggregator.initial() {
            return self.finish(decision);
        }

        let stop = AtomicBool::new(false);
        let (work_tx, work_rx) = bounded::<WorkItem<'_>>(self.workers);
        let (result_tx, result_rx) = unbounded::<(usize, RingOutcome)>();

        let decision = thread::scope(|scope| {
            for _ in 0..self.workers {
                let work_rx = work_rx.clone();
                let result_tx = result_tx.clone();
                let stop = &stop;
                scope.spawn(move || {
                    for item in work_rx.iter() {
                        if stop.load(Ordering::Acquire) {
                            break;
                        }
                        let outcome = self.scan_ring(item.points, width, height);
                        if result_tx.send((item.ring, outcome)).is_err() {
                            break;
                        }
                    }
                });
            }
            // Only workers hold the queue now: once they all exit, the
            // dispatcher's pending send fails instead of blocking forever.
            drop(work_rx);
            drop(result_tx);

            let stop = &stop;
            scope.spawn(move || {
                for (ring, circle) in self.rings.iter().enumerate() {
                    if stop.load(Ordering::Acquire) {
                        break;
                    }
                    let item = WorkItem {
                        ring,
                        points: circle.points(),
                    };
                    if work_tx.send(item).is_err() {
                        break;
                    }
                }
            });

            let mut decision = Decision::Exhausted;
            for (ring, outcome) in result_rx.iter() {
                if let Some(d) = aggregator.record(ring, outcome) {
                    decision = d;
                    break;
                }
            }

            stop.store(true, Ordering::Release);
            // Drain until every worker has dropped its sender
            for _ in result_rx.iter() {}
            decision
        });

        self.finish(decision)
    }

    /// Try uniformly random integer positions until one is free, up to
    /// `attempts` tries.
    pub fn search_random<R: Rng>(
        &self,
        rng: &mut R,
        width: f64,
        height: f64,
        attempts: usize,
    ) -> Option<Point> {
        let max_x = self.canvas_width as u32;
        let max_y = self.canvas_height as u32;
        if max_x == 0 || max_y == 0 {
            return None;
        }

        for attempt in 0..attempts {
            let position = Point::new(
                rng.gen_range(0..max_x) as f64,
                rng.gen_range(0..max_y) as f64,
            );
            if self.is_free(&Rect::centered(position, width, height)) {
                trace!("random slot after {} attempts", attempt + 1);
                return Some(position);
            }
        }
        trace!("random search gave up after {} attempts", attempts);
        None
    }

    /// Scan one ring in generator order, stopping at the first free position
    fn scan_ring(&self, points: &[Point], width: f64, height: f64) -> RingOutcome {
        points
            .iter()
            .find(|p| self.is_free(&Rect::centered(**p, width, height)))
            .map_or(RingOutcome::Miss, |p| RingOutcome::Hit(*p))
    }

    fn finish(&self, decision: Decision) -> Option<Point> {
        match decision {
            Decision::Found { ring, position } => {
                trace!("slot on ring {} at ({:.1}, {:.1})", ring, position.x, position.y);
                Some(position)
            }
            Decision::Exhausted => {
                trace!("all {} rings are full", self.rings.len());
                None
            }
        }
    }
}
