//! Word cloud layout: place words one at a time, largest first
//!
//! Each word gets a font size from its count, is measured on the surface and
//! handed to the [`PlacementEngine`]. Accepted words are drawn immediately and
//! their occupied regions recorded, so the next word's search sees them.
//! Searches never overlap: the collision index only changes between them.

use log::{debug, info, warn};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::corpus::{FrequencyList, WordCount};
use crate::palette::Color;
use crate::surface::Surface;

use super::circle::RingTable;
use super::config::LayoutConfig;
use super::error::LayoutError;
use super::placement::PlacementEngine;
use super::refine::occupied_regions;
use super::spatial::SpatialIndex;
use super::types::{LayoutResult, PlacedWord, Rect};

/// State of one rendering pass
pub struct Wordcloud<S: Surface> {
    words: FrequencyList,
    config: LayoutConfig,
    surface: S,
    index: SpatialIndex,
    rings: RingTable,
    rng: StdRng,
    workers: usize,
}

impl<S: Surface> Wordcloud<S> {
    /// Prepare a pass over `words`, which must already be sorted by
    /// descending count (as [`FrequencyList`] guarantees).
    ///
    /// The surface must match the configured canvas size. Masks are recorded
    /// in the collision index before any word is placed.
    pub fn new(
        mut words: FrequencyList,
        config: LayoutConfig,
        surface: S,
    ) -> Result<Self, LayoutError> {
        config.validate()?;
        if (surface.width(), surface.height()) != (config.width, config.height) {
            return Err(LayoutError::invalid_config(
                "size",
                format!(
                    "surface is {}x{} but the layout expects {}x{}",
                    surface.width(),
                    surface.height(),
                    config.width,
                    config.height
                ),
            ));
        }

        if let Some(limit) = config.max_words {
            words.truncate(limit);
        }

        let mut index = SpatialIndex::new(config.width, config.height);
        for mask in &config.masks {
            index.insert(*mask);
        }
        let rings = RingTable::new(config.width, config.height);
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let workers = config.workers.unwrap_or_else(num_cpus::get).max(1);

        debug!(
            "wordcloud {}x{}: {} words, {} masks, {} rings, {} workers",
            config.width,
            config.height,
            words.len(),
            config.masks.len(),
            rings.len(),
            workers
        );

        Ok(Self {
            words,
            config,
            surface,
            index,
            rings,
            rng,
            workers,
        })
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Regions recorded so far, masks first
    pub fn occupied(&self) -> &[Rect] {
        self.index.rects()
    }

    /// Place every word in order until the list runs out or too many
    /// consecutive words find no slot. Returns the layout and the drawn
    /// surface.
    ///
    /// Only a font failure aborts the pass.
    pub fn draw(mut self) -> Result<(LayoutResult, S), LayoutError> {
        let words = std::mem::take(&mut self.words);
        let max_count = words.max_count();
        let mut result = LayoutResult::new(
            self.config.width,
            self.config.height,
            self.config.background,
            self.config.masks.clone(),
        );

        let mut misses = 0;
        for entry in &words {
            match self.place(entry, max_count)? {
                Some(placed) => {
                    misses = 0;
                    result.words.push(placed);
                }
                None => {
                    debug!("no room for '{}' (count {})", entry.word, entry.count);
                    result.skipped.push(entry.word.clone());
                    misses += 1;
                    if misses > self.config.miss_limit {
                        warn!(
                            "stopping after {} consecutive words without room",
                            misses
                        );
                        result.stopped_early = true;
                        break;
                    }
                }
            }
        }

        info!(
            "placed {} of {} words ({} skipped)",
            result.words.len(),
            words.len(),
            result.skipped.len()
        );
        Ok((result, self.surface))
    }

    /// Find a slot for one word, draw it and record its occupancy.
    ///
    /// `Ok(None)` means the word does not fit anywhere.
    pub fn place(
        &mut self,
        entry: &WordCount,
        max_count: u32,
    ) -> Result<Option<PlacedWord>, LayoutError> {
        let color = self.pick_color();
        let font_size = self.config.font_size(entry.count, max_count);
        self.surface.set_color(color);
        self.surface.set_font_size(font_size)?;

        let (width, height) = self.surface.measure_text(&entry.word);
        let width = width + self.config.margin;
        let height = height + self.config.margin;

        let engine = PlacementEngine::new(
            &self.index,
            &self.rings,
            self.config.width,
            self.config.height,
        )
        .with_workers(self.workers);
        let position = if self.config.random_placement {
            engine.search_random(&mut self.rng, width, height, self.config.random_attempts)
        } else {
            engine.search(width, height)
        };
        let Some(position) = position else {
            return Ok(None);
        };

        self.surface
            .draw_text(&entry.word, position.x, position.y, 0.5, 0.5);
        let bounds = Rect::centered(position, width, height);
        let regions = occupied_regions(&self.surface, &bounds);
        for region in &regions {
            self.index.insert(*region);
        }

        debug!(
            "placed '{}' at ({:.1}, {:.1}) size {:.1}, {} region(s)",
            entry.word,
            position.x,
            position.y,
            font_size,
            regions.len()
        );

        Ok(Some(PlacedWord {
            text: entry.word.clone(),
            count: entry.count,
            position,
            font_size,
            height,
            color,
            bounds,
            regions,
        }))
    }

    fn pick_color(&mut self) -> Color {
        self.config
            .colors
            .choose(&mut self.rng)
            .copied()
            .unwrap_or(Color::BLACK)
    }
}

/// Run a complete pass over `words` on `surface`
pub fn compute<S: Surface>(
    words: &FrequencyList,
    config: &LayoutConfig,
    surface: S,
) -> Result<(LayoutResult, S), LayoutError> {
    Wordcloud::new(words.clone(), config.clone(), surface)?.draw()
}
