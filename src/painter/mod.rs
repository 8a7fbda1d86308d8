//! Painter - orchestrates tone analysis, painting passes and touch-up
//!
//! A run moves through a fixed sequence of states with no way back:
//!
//! ```text
//! Constructed -> Initialized -> Painting -> TouchUp -> Done
//! ```
//!
//! Construction validates the source image and the analysis maps, builds the
//! tone buckets and the per-region pixel index, and only then allocates the
//! canvas. `paint()` runs every pass from coarse to fine; within a pass the
//! tone buckets are visited dark to light so lighter strokes land on top of
//! the underpainting.
//!
//! The canvas has exactly one writer. Strokes are rasterized one after the
//! other in schedule order.

mod passes;
mod sampler;
mod touch_up;


pub use passes::{Pass, PassSchedule};
pub use sampler::{SampledRegion, StrokeSampler};
pub use touch_up::{NoTouchUp, TouchUpContext, TouchUpStrategy};

use std::time::Instant;

use image::{DynamicImage, RgbImage};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;

use crate::analysis::{AnalysisMaps, ToneAnalyzer, ToneBucket, ToneMap};
use crate::brush::{BrushTexture, StrokeGeometryBuilder, StrokeRasterizer};
use crate::canvas::Canvas;
use crate::config::PaintConfig;
use crate::core::errors::PaintError;

/// Lifecycle of a painting run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum PainterState {
    Constructed,
    Initialized,
    Painting,
    TouchUp,
    Done,
}

/// Counters for one pass
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PassStats {
    pub brush_size: u32,
    pub opacity: f32,
    pub strokes: usize,
    pub stamps: usize,
    pub elapsed_ms: f64,
}

/// Summary of a finished run
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaintStats {
    /// Seed actually used for shuffling; replay with `PaintConfig::seeded`
    pub seed: u64,
    pub tone_buckets: usize,
    pub regions: usize,
    pub passes: Vec<PassStats>,
    pub touch_up_strokes: usize,
    pub elapsed_ms: f64,
}

/// Turns a source photograph plus its analysis maps into a painted canvas
pub struct Painter {
    state: PainterState,
    config: PaintConfig,
    source: RgbImage,
    maps: AnalysisMaps,
    tones: ToneMap,
    sampler: StrokeSampler,
    texture: BrushTexture,
    touch_up: Box<dyn TouchUpStrategy>,
    canvas: Canvas,
    seed: u64,
    rng: StdRng,
}

impl Painter {
    /// Build a painter from any decoded image
    ///
    /// Fails before any state is built if the image does not have exactly
    /// three colour channels.
    pub fn new(
        source: &DynamicImage,
        maps: AnalysisMaps,
        config: PaintConfig,
    ) -> Result<Self, PaintError> {
        let channels = source.color().channel_count();
        if channels != 3 {
            return Err(PaintError::UnsupportedChannels(channels));
        }
        Self::from_rgb(source.to_rgb8(), maps, config)
    }

    /// Build a painter from an RGB image
    pub fn from_rgb(
        source: RgbImage,
        maps: AnalysisMaps,
        config: PaintConfig,
    ) -> Result<Self, PaintError> {
        let started = Instant::now();
        let (width, height) = source.dimensions();
        tracing::info!("Initializing painter for {}x{} image", width, height);

        config.validate()?;
        maps.validate(width, height)?;

        let tones = ToneAnalyzer::analyze(&source, &maps.regions)?;
        let sampler = StrokeSampler::new(&maps.regions);
        let texture = BrushTexture::disc(config.brush_texture_size);

        let seed = match config.seed {
            Some(seed) => seed,
            None => {
                let seed: u64 = rand::rng().random();
                tracing::warn!(
                    "No seed configured, output is not reproducible (drew seed {})",
                    seed
                );
                seed
            }
        };

        tracing::info!(
            "Found {} distinct color tones across {} regions ({:.1}ms)",
            tones.len(),
            tones.region_count(),
            started.elapsed().as_secs_f64() * 1000.0
        );

        Ok(Self {
            state: PainterState::Initialized,
            canvas: Canvas::new(width, height, config.background),
            config,
            source,
            maps,
            tones,
            sampler,
            texture,
            touch_up: Box::new(NoTouchUp),
            seed,
            rng: StdRng::seed_from_u64(seed),
        })
    }

    /// Replace the default round brush
    pub fn with_texture(mut self, texture: BrushTexture) -> Self {
        self.texture = texture;
        self
    }

    /// Install a touch-up strategy for the final stage
    pub fn with_touch_up(mut self, strategy: impl TouchUpStrategy + 'static) -> Self {
        self.touch_up = Box::new(strategy);
        self
    }

    pub fn state(&self) -> PainterState {
        self.state
    }

    pub fn config(&self) -> &PaintConfig {
        &self.config
    }

    pub fn tones(&self) -> &ToneMap {
        &self.tones
    }

    /// Tone buckets in the order every pass visits them
    pub fn tone_order(&self) -> std::slice::Iter<'_, ToneBucket> {
        self.tones.iter()
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    /// Hand over the canvas
    pub fn into_canvas(self) -> Canvas {
        self.canvas
    }

    /// Run all passes and the touch-up stage
    ///
    /// May be called once; a second call fails with `InvalidState`.
    pub fn paint(&mut self) -> Result<PaintStats, PaintError> {
        if self.state != PainterState::Initialized {
            return Err(PaintError::InvalidState(format!(
                "paint() requires an initialized painter, state is {:?}",
                self.state
            )));
        }

        let started = Instant::now();
        tracing::info!("Starting painting process...");

        self.state = PainterState::Painting;
        let schedule = self.config.passes.clone();
        let mut pass_stats = Vec::with_capacity(schedule.len());
        for (index, pass) in schedule.iter().enumerate() {
            tracing::info!(
                "Pass {}/{}: brush {}px, chunk {}, opacity {:.2}",
                index + 1,
                schedule.len(),
                pass.brush_size,
                pass.chunk_size,
                pass.opacity
            );
            pass_stats.push(self.run_pass(pass));
        }

        self.state = PainterState::TouchUp;
        let touch_up_strokes = self.run_touch_up();

        self.state = PainterState::Done;
        let elapsed_ms = started.elapsed().as_secs_f64() * 1000.0;
        tracing::info!("Painting process complete ({:.1}ms)", elapsed_ms);

        Ok(PaintStats {
            seed: self.seed,
            tone_buckets: self.tones.len(),
            regions: self.tones.region_count(),
            passes: pass_stats,
            touch_up_strokes,
            elapsed_ms,
        })
    }

    fn run_pass(&mut self, pass: &Pass) -> PassStats {
        let started = Instant::now();
        let geometry = StrokeGeometryBuilder::new(self.canvas.width(), self.canvas.height());
        let rasterizer = StrokeRasterizer::new(&self.texture).with_spacing(self.config.stroke_spacing);
        let length = pass.stroke_length(self.config.min_stroke_length);

        let mut strokes = 0;
        let mut stamps = 0;
        for bucket in self.tones.iter() {
            for &region in &bucket.regions {
                let sampled = self.sampler.sample(region, pass.chunk_size, &mut self.rng);
                for chunk in sampled.chunks() {
                    for &start in chunk {
                        let orientation = self.maps.orientation.get(start.x, start.y).unwrap_or(0.0);
                        let stroke = geometry.stroke(
                            start,
                            orientation,
                            length,
                            bucket.color,
                            pass.brush_size,
                            pass.opacity,
                        );
                        stamps += rasterizer.render(&mut self.canvas, &stroke);
                        strokes += 1;
                    }
                }
            }
        }

        let elapsed_ms = started.elapsed().as_secs_f64() * 1000.0;
        tracing::debug!(
            "Pass done: {} strokes, {} stamps in {:.1}ms",
            strokes,
            stamps,
            elapsed_ms
        );

        PassStats {
            brush_size: pass.brush_size,
            opacity: pass.opacity,
            strokes,
            stamps,
            elapsed_ms,
        }
    }

    fn run_touch_up(&mut self) -> usize {
        tracing::info!("Running touch-up stage ({})", self.touch_up.name());
        let ctx = TouchUpContext {
            source: &self.source,
            maps: &self.maps,
            tones: &self.tones,
            texture: &self.texture,
            spacing: self.config.stroke_spacing,
        };
        self.touch_up.apply(&ctx, &mut self.canvas, &mut self.rng)
    }
}
