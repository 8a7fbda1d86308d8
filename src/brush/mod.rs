//! Brush module - stroke geometry, brush textures and rasterization

mod geometry;
mod interpolation;
mod rasterizer;
mod texture;

pub use geometry::StrokeGeometryBuilder;
pub use interpolation::{bezier_curve, binomial, taper_factor};
pub use rasterizer::{stamp, StrokeRasterizer, DEFAULT_SPACING};
pub use texture::BrushTexture;

use serde::{Deserialize, Serialize};

/// 8-bit RGB colour
pub type Rgb = [u8; 3];

/// Integer pixel coordinate, origin top-left, y growing downward
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Perceived brightness (ITU-R BT.601 luma)
#[inline]
pub fn luma(color: Rgb) -> f32 {
    0.299 * color[0] as f32 + 0.587 * color[1] as f32 + 0.114 * color[2] as f32
}

/// Pack a colour into a totally ordered 24-bit key
#[inline]
pub fn pack_rgb(color: Rgb) -> u32 {
    (color[0] as u32) << 16 | (color[1] as u32) << 8 | color[2] as u32
}

/// One brush deposit: a path of stamp positions with per-point angles
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stroke {
    /// Stamp positions in drawing order
    pub path: Vec<Point>,
    /// Brush rotation at each path point, in degrees
    pub angles: Vec<f32>,
    pub color: Rgb,
    /// Base stamp size in pixels, before taper
    pub size: u32,
    /// Global opacity in (0, 1]
    pub opacity: f32,
}

impl Stroke {
    /// A stroke that violates its invariants is rendered as a no-op
    pub fn is_degenerate(&self) -> bool {
        self.path.is_empty()
            || self.path.len() != self.angles.len()
            || self.size == 0
            || self.opacity.is_nan()
            || self.opacity <= 0.0
    }
}

/// A single tapered stamp ready for rasterization
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Dab {
    pub center: Point,
    /// Rotation in degrees
    pub angle: f32,
    /// Stamp size in pixels (after taper)
    pub size: u32,
    /// Stamp opacity (after taper)
    pub opacity: f32,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stroke() -> Stroke {
        Stroke {
            path: vec![Point::new(0, 0), Point::new(4, 0)],
            angles: vec![0.0, 0.0],
            color: [0, 0, 0],
            size: 4,
            opacity: 1.0,
        }
    }

    #[test]
    fn test_luma_orders_black_below_white() {
        assert_eq!(luma([0, 0, 0]), 0.0);
        assert!(luma([255, 255, 255]) > 254.9);
        // Green dominates perceived brightness
        assert!(luma([0, 255, 0]) > luma([255, 0, 0]));
        assert!(luma([255, 0, 0]) > luma([0, 0, 255]));
    }

    #[test]
    fn test_pack_rgb() {
        assert_eq!(pack_rgb([0x12, 0x34, 0x56]), 0x123456);
        assert!(pack_rgb([1, 0, 0]) > pack_rgb([0, 255, 255]));
    }

    #[test]
    fn test_degenerate_strokes() {
        assert!(!stroke().is_degenerate());

        let mut s = stroke();
        s.path.clear();
        s.angles.clear();
        assert!(s.is_degenerate());

        let mut s = stroke();
        s.angles.pop();
        assert!(s.is_degenerate());

        let mut s = stroke();
        s.size = 0;
        assert!(s.is_degenerate());

        let mut s = stroke();
        s.opacity = 0.0;
        assert!(s.is_degenerate());

        let mut s = stroke();
        s.opacity = f32::NAN;
        assert!(s.is_degenerate());
    }
}
