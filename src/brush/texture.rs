//! Brush textures - square grayscale alpha masks used as stamp shapes

use image::GrayImage;

use crate::core::errors::PaintError;

/// Immutable square alpha mask (0 = transparent, 255 = opaque)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrushTexture {
    side: u32,
    data: Vec<u8>,
}

impl BrushTexture {
    /// Wrap raw row-major alpha bytes
    pub fn from_raw(side: u32, data: Vec<u8>) -> Result<Self, PaintError> {
        if side == 0 {
            return Err(PaintError::InvalidTexture(
                "Texture side must be at least 1 pixel".to_string(),
            ));
        }
        let expected = side as usize * side as usize;
        if data.len() != expected {
            return Err(PaintError::InvalidTexture(format!(
                "Expected {} alpha bytes for a {}x{} texture, got {}",
                expected,
                side,
                side,
                data.len()
            )));
        }
        Ok(Self { side, data })
    }

    /// Use a grayscale image as the brush mask
    pub fn from_gray_image(image: &GrayImage) -> Result<Self, PaintError> {
        let (width, height) = image.dimensions();
        if width != height {
            return Err(PaintError::InvalidTexture(format!(
                "Brush texture must be square, got {}x{}",
                width, height
            )));
        }
        Self::from_raw(width, image.as_raw().clone())
    }

    /// Hard-edged round brush: opaque inside the inscribed circle
    pub fn disc(side: u32) -> Self {
        let side = side.max(1);
        let center = side as f32 / 2.0;
        let radius_sq = center * center;

        let mut data = Vec::with_capacity(side as usize * side as usize);
        for y in 0..side {
            for x in 0..side {
                let dx = x as f32 + 0.5 - center;
                let dy = y as f32 + 0.5 - center;
                data.push(if dx * dx + dy * dy <= radius_sq { 255 } else { 0 });
            }
        }

        Self { side, data }
    }

    /// Fully opaque square mask
    pub fn solid(side: u32) -> Self {
        let side = side.max(1);
        Self {
            side,
            data: vec![255; side as usize * side as usize],
        }
    }

    pub fn side(&self) -> u32 {
        self.side
    }

    /// Alpha at texel `(x, y)`, `None` outside the mask
    #[inline]
    pub fn alpha(&self, x: i64, y: i64) -> Option<u8> {
        let side = self.side as i64;
        if x < 0 || y < 0 || x >= side || y >= side {
            return None;
        }
        self.data.get((y * side + x) as usize).copied()
    }
}
