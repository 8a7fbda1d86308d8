//! Touch-up stage - final localized pass over high-detail areas
//!
//! No strategy ships enabled. A [`TouchUpStrategy`] receives the source image,
//! the analysis maps (saliency, edges, feature mask when supplied) and the
//! tone buckets, and may lay additional fine strokes on the canvas.

use image::RgbImage;
use rand::rngs::StdRng;

use crate::analysis::{AnalysisMaps, ToneMap};
use crate::brush::BrushTexture;
use crate::canvas::Canvas;

/// Read-only inputs available to a touch-up strategy
pub struct TouchUpContext<'a> {
    pub source: &'a RgbImage,
    pub maps: &'a AnalysisMaps,
    pub tones: &'a ToneMap,
    pub texture: &'a BrushTexture,
    /// Stamp spacing as a fraction of the stamp size
    pub spacing: f32,
}

/// A final pass biased toward detailed regions such as faces and edges
pub trait TouchUpStrategy: Send + Sync {
    /// Short name for logs
    fn name(&self) -> &'static str;

    /// Paint onto `canvas`, returning the number of strokes laid
    fn apply(&self, ctx: &TouchUpContext<'_>, canvas: &mut Canvas, rng: &mut StdRng) -> usize;
}

/// Default strategy: leaves the canvas untouched
#[derive(Debug, Clone, Copy, Default)]
pub struct NoTouchUp;

impl TouchUpStrategy for NoTouchUp {
    fn name(&self) -> &'static str {
        "none"
    }

    fn apply(&self, _ctx: &TouchUpContext<'_>, _canvas: &mut Canvas, _rng: &mut StdRng) -> usize {
        0
    }
}
