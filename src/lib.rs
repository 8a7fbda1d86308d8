//! Impasto - procedural stroke painting
//!
//! Renders a photograph as layered, textured brush strokes. The caller
//! supplies the source image together with its analysis maps (region labels
//! and gradient orientation, optionally saliency, edges and a feature mask);
//! the [`painter::Painter`] groups regions into tone buckets and lays strokes
//! over several coarse-to-fine passes onto a [`canvas::Canvas`].

pub mod analysis;
pub mod brush;
pub mod canvas;
pub mod config;
pub mod core;
pub mod painter;

pub use analysis::AnalysisMaps;
pub use canvas::Canvas;
pub use config::PaintConfig;
pub use crate::core::errors::PaintError;
pub use painter::{PaintStats, Painter};

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Install the default log subscriber
///
/// Honours `RUST_LOG`; falls back to debug output for this crate. Calling it
/// again after a subscriber is installed has no effect.
pub fn init_logging() {
    let result = tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "impasto=debug,impasto_lib=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .try_init();

    if result.is_ok() {
        tracing::info!("Impasto initializing...");
    }
}
