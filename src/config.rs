//! Painter configuration

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::brush::{Rgb, DEFAULT_SPACING};
use crate::canvas::WHITE;
use crate::core::contracts::validate_config;
use crate::core::errors::PaintError;
use crate::painter::PassSchedule;

/// Settings for one painting run
///
/// Every field has a default, so a partial JSON document such as
/// `{"seed": 7}` is a valid configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PaintConfig {
    /// Passes, coarsest first
    pub passes: PassSchedule,
    /// Shuffle seed. `None` draws one from the OS, so output is not reproducible
    pub seed: Option<u64>,
    /// Canvas colour before the first stroke
    pub background: Rgb,
    /// Side of the default round brush texture
    pub brush_texture_size: u32,
    /// Stamp spacing along a stroke as a fraction of the stamp size (0 = path points only)
    pub stroke_spacing: f32,
    /// Shortest stroke length in pixels
    pub min_stroke_length: u32,
}

impl Default for PaintConfig {
    fn default() -> Self {
        Self {
            passes: PassSchedule::default(),
            seed: None,
            background: WHITE,
            brush_texture_size: 64,
            stroke_spacing: DEFAULT_SPACING,
            min_stroke_length: 5,
        }
    }
}

impl PaintConfig {
    /// Default settings with a fixed seed
    pub fn seeded(seed: u64) -> Self {
        Self {
            seed: Some(seed),
            ..Self::default()
        }
    }

    pub fn from_json_str(json: &str) -> Result<Self, PaintError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, PaintError> {
        let path = path.as_ref();
        tracing::debug!("Loading paint config: {:?}", path);
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    pub fn validate(&self) -> Result<(), PaintError> {
        validate_config(self)
    }
}
