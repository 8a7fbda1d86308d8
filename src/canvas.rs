//! Canvas - the RGB pixel buffer strokes are painted onto
//!
//! The canvas is a contiguous, row-major `width * height * 3` byte buffer.
//! All access goes through coordinate-checked accessors; there is no raw
//! pointer indexing anywhere in the engine.
//!
//! The canvas has a single writer: the painter owns it for the whole run and
//! lends it mutably to the rasterizer one stamp at a time.

use image::{ImageBuffer, RgbImage};

use crate::brush::Rgb;

/// Default background colour (white paper)
pub const WHITE: Rgb = [255, 255, 255];

/// Mutable 3-channel, 8-bit output buffer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Canvas {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl Canvas {
    /// Create a canvas filled with `background`
    pub fn new(width: u32, height: u32, background: Rgb) -> Self {
        let pixel_count = width as usize * height as usize;
        let mut data = Vec::with_capacity(pixel_count * 3);
        for _ in 0..pixel_count {
            data.extend_from_slice(&background);
        }

        Self {
            width,
            height,
            data,
        }
    }

    /// Copy an existing RGB image into a new canvas
    pub fn from_image(image: &RgbImage) -> Self {
        Self {
            width: image.width(),
            height: image.height(),
            data: image.as_raw().clone(),
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Whether `(x, y)` lies inside the canvas
    #[inline]
    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as u32) < self.width && (y as u32) < self.height
    }

    #[inline]
    fn offset(&self, x: i32, y: i32) -> Option<usize> {
        if !self.contains(x, y) {
            return None;
        }
        Some((y as usize * self.width as usize + x as usize) * 3)
    }

    /// Read the pixel at `(x, y)`
    pub fn pixel(&self, x: i32, y: i32) -> Option<Rgb> {
        let idx = self.offset(x, y)?;
        let px = self.data.get(idx..idx + 3)?;
        Some([px[0], px[1], px[2]])
    }

    /// Mutable view of the three channels at `(x, y)`
    #[inline]
    pub fn pixel_mut(&mut self, x: i32, y: i32) -> Option<&mut [u8]> {
        let idx = self.offset(x, y)?;
        self.data.get_mut(idx..idx + 3)
    }

    /// Raw row-major RGB bytes
    pub fn as_raw(&self) -> &[u8] {
        &self.data
    }

    /// Hand the finished canvas over as an `image` buffer
    pub fn into_image(self) -> RgbImage {
        let (width, height) = (self.width, self.height);
        ImageBuffer::from_raw(width, height, self.data)
            .unwrap_or_else(|| ImageBuffer::new(width, height))
    }
}
