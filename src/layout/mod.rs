//! Layout engine for placing words on the canvas
//!
//! This module takes a frequency-sorted word list and computes where each
//! word goes, producing a LayoutResult with positioned words and the regions
//! they occupy.

pub mod circle;
pub mod config;
pub mod engine;
pub mod error;
pub mod placement;
pub mod refine;
pub mod spatial;
pub mod types;

pub use circle::{Circle, RingTable};
pub use config::{ConfigError, LayoutConfig};
pub use engine::{compute, Wordcloud};
pub use error::LayoutError;
pub use placement::{Aggregator, Decision, PlacementEngine, RingOutcome};
pub use refine::occupied_regions;
pub use spatial::SpatialIndex;
pub use types::*;
