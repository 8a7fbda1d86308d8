//! Validation of caller-supplied painting parameters.

use crate::config::PaintConfig;
use crate::core::errors::PaintError;
use crate::painter::Pass;

pub fn validate_pass(pass: &Pass) -> Result<(), PaintError> {
    if pass.chunk_size == 0 {
        return Err(PaintError::InvalidConfig(
            "Pass chunk size must be positive".to_string(),
        ));
    }
    if pass.brush_size == 0 {
        return Err(PaintError::InvalidConfig(
            "Pass brush size must be positive".to_string(),
        ));
    }
    if !pass.opacity.is_finite() || pass.opacity <= 0.0 || pass.opacity > 1.0 {
        return Err(PaintError::InvalidConfig(format!(
            "Pass opacity must be in (0, 1], got {}",
            pass.opacity
        )));
    }
    Ok(())
}

pub fn validate_config(config: &PaintConfig) -> Result<(), PaintError> {
    for pass in config.passes.iter() {
        validate_pass(pass)?;
    }
    if config.brush_texture_size == 0 {
        return Err(PaintError::InvalidConfig(
            "Brush texture size must be positive".to_string(),
        ));
    }
    if !config.stroke_spacing.is_finite() || config.stroke_spacing < 0.0 {
        return Err(PaintError::InvalidConfig(
            "Stroke spacing must be a non-negative finite number".to_string(),
        ));
    }
    Ok(())
}
