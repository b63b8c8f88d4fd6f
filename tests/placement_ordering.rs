//! The concurrent ring search must agree with a plain sequential scan

use pretty_assertions::assert_eq;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use wordcloud::layout::{PlacementEngine, Point, Rect, RingTable, SpatialIndex};

const WIDTH: u32 = 200;
const HEIGHT: u32 = 200;

/// First free point in ring order, then angular order
fn sequential_scan(
    index: &SpatialIndex,
    rings: &RingTable,
    width: f64,
    height: f64,
) -> Option<(usize, usize, Point)> {
    for (ring, circle) in rings.iter().enumerate() {
        for (slot, point) in circle.points().iter().enumerate() {
            let rect = Rect::centered(*point, width, height);
            if rect.fits(WIDTH as f64, HEIGHT as f64) && !index.collides(&rect) {
                return Some((ring, slot, *point));
            }
        }
    }
    None
}

fn blocked_center() -> SpatialIndex {
    let mut index = SpatialIndex::new(WIDTH, HEIGHT);
    index.insert(Rect::new(60.0, 140.0, 60.0, 140.0));
    // Blocks the points right of center so the hit is not the first angle
    index.insert(Rect::new(140.0, 200.0, 0.0, 200.0));
    index
}

#[test]
fn test_first_free_ring_wins_under_any_worker_count() {
    let index = blocked_center();
    let rings = RingTable::new(WIDTH, HEIGHT);
    let (ring, slot, expected) = sequential_scan(&index, &rings, 20.0, 20.0).expect("room left");
    assert!(ring > 0);
    assert!(slot > 0);

    for workers in [1, 2, 3, 8, 16] {
        let engine = PlacementEngine::new(&index, &rings, WIDTH, HEIGHT).with_workers(workers);
        for _ in 0..5 {
            assert_eq!(engine.search(20.0, 20.0), Some(expected), "{} workers", workers);
        }
    }
}

#[test]
fn test_hit_lies_on_its_ring_and_no_inner_ring_has_room() {
    let index = blocked_center();
    let rings = RingTable::new(WIDTH, HEIGHT);
    let engine = PlacementEngine::new(&index, &rings, WIDTH, HEIGHT).with_workers(4);

    let position = engine.search(20.0, 20.0).expect("room left");
    let center = Point::new(WIDTH as f64 / 2.0, HEIGHT as f64 / 2.0);
    let distance = position.distance_to(&center);

    let (ring, circle) = rings
        .iter()
        .enumerate()
        .find(|(_, c)| (c.radius() - distance).abs() < 1e-9)
        .expect("position lies on a ring");
    assert!(circle.points().contains(&position));

    for inner in rings.iter().take(ring) {
        assert!(inner
            .points()
            .iter()
            .all(|p| !engine.is_free(&Rect::centered(*p, 20.0, 20.0))));
    }
}

#[test]
fn test_scattered_obstacles_match_sequential_scan() {
    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..10 {
        let mut index = SpatialIndex::new(WIDTH, HEIGHT);
        for _ in 0..40 {
            let x = rng.gen_range(0..WIDTH) as f64;
            let y = rng.gen_range(0..HEIGHT) as f64;
            let w = rng.gen_range(5..40) as f64;
            let h = rng.gen_range(5..40) as f64;
            index.insert(Rect::new(x, x + w, y, y + h));
        }
        let rings = RingTable::new(WIDTH, HEIGHT);
        let (w, h) = (rng.gen_range(10..60) as f64, rng.gen_range(10..60) as f64);
        let expected = sequential_scan(&index, &rings, w, h).map(|(_, _, p)| p);

        for workers in [1, 3, 8] {
            let engine = PlacementEngine::new(&index, &rings, WIDTH, HEIGHT).with_workers(workers);
            assert_eq!(engine.search(w, h), expected, "{} workers", workers);
        }
    }
}

#[test]
fn test_full_canvas_exhausts_under_any_worker_count() {
    let mut index = SpatialIndex::new(WIDTH, HEIGHT);
    index.insert(Rect::new(0.0, 200.0, 0.0, 200.0));
    let rings = RingTable::new(WIDTH, HEIGHT);

    for workers in [1, 4, 16] {
        let engine = PlacementEngine::new(&index, &rings, WIDTH, HEIGHT).with_workers(workers);
        assert_eq!(engine.search(10.0, 10.0), None);
    }
}

/// Inner rings run into thousands of tiny obstacles and resolve slowly while
/// outer rings hit at once, so ring results reach the aggregator out of order
fn slow_inner_rings() -> SpatialIndex {
    let mut index = SpatialIndex::new(WIDTH, HEIGHT);
    for x in 40..160 {
        for y in 40..160 {
            let (x, y) = (x as f64, y as f64);
            index.insert(Rect::new(x, x + 1.0, y, y + 1.0));
        }
    }
    index
}

#[test]
fn test_out_of_order_ring_results_keep_the_innermost_hit() {
    let index = slow_inner_rings();
    let rings = RingTable::new(WIDTH, HEIGHT);
    let (ring, _, expected) = sequential_scan(&index, &rings, 16.0, 16.0).expect("room left");
    assert!(ring > 5);

    for workers in [2, 8, 16, 32] {
        let engine = PlacementEngine::new(&index, &rings, WIDTH, HEIGHT).with_workers(workers);
        for _ in 0..3 {
            assert_eq!(engine.search(16.0, 16.0), Some(expected), "{} workers", workers);
        }
    }
}
