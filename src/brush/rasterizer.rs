//! Brush rasterizer - stamps rotated, texture-masked brush dabs onto a canvas
//!
//! A single [`stamp`] composites one copy of the brush texture with a solid
//! colour using "over" blending:
//!
//! ```text
//! channel = channel * (1 - alpha) + color * alpha
//! alpha   = texture_alpha / 255 * opacity
//! ```
//!
//! [`StrokeRasterizer`] turns a whole [`Stroke`] into a sequence of stamps,
//! resampling the path at a fixed spacing and attenuating size and opacity
//! with a `sin(t * PI)` pressure curve so both ends of the stroke lift off.

use super::interpolation::{resample_path, taper_factor};
use super::{BrushTexture, Dab, Point, Rgb, Stroke};
use crate::canvas::Canvas;

/// Default stamp spacing as a fraction of the stamp size
pub const DEFAULT_SPACING: f32 = 0.25;

/// Linear interpolation between two channel values, truncated toward zero
#[inline]
fn lerp(a: u8, b: u8, t: f32) -> u8 {
    (a as f32 + (b as f32 - a as f32) * t) as u8
}

#[inline]
fn blend_pixel(pixel: &mut [u8], color: Rgb, alpha: f32) {
    for (channel, &c) in pixel.iter_mut().zip(color.iter()) {
        *channel = lerp(*channel, c, alpha);
    }
}

/// Stamp one brush dab centred on `center`
///
/// The affected area is the inclusive axis-aligned box `center ± size / 2`
/// clipped to the canvas. Each canvas pixel in the box is rotated by
/// `-angle_degrees` into the brush's local frame and looked up in the
/// texture; samples that fall outside the texture are transparent. At angle 0
/// with an even size the last row and column land one texel past the edge.
///
/// Does nothing when `size` is zero or `opacity` is not positive.
pub fn stamp(
    canvas: &mut Canvas,
    center: Point,
    angle_degrees: f32,
    size: u32,
    color: Rgb,
    opacity: f32,
    texture: &BrushTexture,
) {
    if size == 0 || opacity.is_nan() || opacity <= 0.0 {
        return;
    }

    let half = (size / 2) as i64;
    let cx = center.x as i64;
    let cy = center.y as i64;

    let start_x = (cx - half).max(0);
    let end_x = (cx + half).min(canvas.width() as i64 - 1);
    let start_y = (cy - half).max(0);
    let end_y = (cy + half).min(canvas.height() as i64 - 1);
    if start_x > end_x || start_y > end_y {
        return;
    }

    let (sin, cos) = angle_degrees.to_radians().sin_cos();
    let size_f = size as f32;
    let half_f = half as f32;
    let side = texture.side() as f32;

    for y in start_y..=end_y {
        let dy = (y - cy) as f32;
        for x in start_x..=end_x {
            let dx = (x - cx) as f32;

            // Inverse rotation: canvas offset -> unrotated brush frame
            let local_x = dx * cos + dy * sin;
            let local_y = dy * cos - dx * sin;

            let u = (local_x + half_f) / size_f;
            let v = (local_y + half_f) / size_f;
            let tex_x = (u * side).floor() as i64;
            let tex_y = (v * side).floor() as i64;

            let Some(texture_alpha) = texture.alpha(tex_x, tex_y) else {
                continue;
            };

            let final_alpha = texture_alpha as f32 / 255.0 * opacity;
            if final_alpha > 0.0 {
                if let Some(pixel) = canvas.pixel_mut(x as i32, y as i32) {
                    blend_pixel(pixel, color, final_alpha);
                }
            }
        }
    }
}

/// Renders whole strokes with path resampling and pressure taper
#[derive(Debug, Clone, Copy)]
pub struct StrokeRasterizer<'a> {
    texture: &'a BrushTexture,
    spacing: f32,
}

impl<'a> StrokeRasterizer<'a> {
    pub fn new(texture: &'a BrushTexture) -> Self {
        Self {
            texture,
            spacing: DEFAULT_SPACING,
        }
    }

    /// Stamp spacing as a fraction of the stroke size (0 stamps only the path points)
    pub fn with_spacing(mut self, spacing: f32) -> Self {
        self.spacing = spacing.max(0.0);
        self
    }

    /// Expand a stroke into its tapered dabs
    ///
    /// Dabs whose tapered size rounds below one pixel are dropped. A
    /// degenerate stroke yields no dabs.
    pub fn dabs(&self, stroke: &Stroke) -> Vec<Dab> {
        if stroke.is_degenerate() {
            return vec![];
        }

        let spacing_px = if self.spacing > 0.0 {
            (stroke.size as f32 * self.spacing).max(1.0)
        } else {
            0.0
        };
        let (points, angles) = resample_path(&stroke.path, &stroke.angles, spacing_px);

        let count = points.len();
        points
            .iter()
            .zip(angles.iter())
            .enumerate()
            .filter_map(|(i, (&center, &angle))| {
                let pressure = taper_factor(i, count);
                let size = (stroke.size as f32 * pressure).round();
                if size < 1.0 {
                    return None;
                }
                Some(Dab {
                    center,
                    angle,
                    size: size as u32,
                    opacity: stroke.opacity * pressure,
                })
            })
            .collect()
    }

    /// Rasterize a stroke onto the canvas, returning the number of stamps laid
    pub fn render(&self, canvas: &mut Canvas, stroke: &Stroke) -> usize {
        let dabs = self.dabs(stroke);
        for dab in &dabs {
            stamp(
                canvas,
                dab.center,
                dab.angle,
                dab.size,
                stroke.color,
                dab.opacity,
                self.texture,
            );
        }
        dabs.len()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::canvas::WHITE;

    const RED: Rgb = [200, 10, 30];

    fn changed_pixels(before: &Canvas, after: &Canvas) -> Vec<(i32, i32)> {
        let mut out = vec![];
        for y in 0..after.height() as i32 {
            for x in 0..after.width() as i32 {
                if before.pixel(x, y) != after.pixel(x, y) {
                    out.push((x, y));
                }
            }
        }
        out
    }

    /// Axis-aligned stamp without any rotation math, same inclusive box
    fn stamp_axis_aligned(
        canvas: &mut Canvas,
        center: Point,
        size: u32,
        color: Rgb,
        opacity: f32,
        texture: &BrushTexture,
    ) {
        let half = (size / 2) as i32;
        let side = texture.side() as f32;
        let max_x = (center.x + half).min(canvas.width() as i32 - 1);
        let max_y = (center.y + half).min(canvas.height() as i32 - 1);
        for y in (center.y - half).max(0)..=max_y {
            for x in (center.x - half).max(0)..=max_x {
                let u = (x - (center.x - half)) as f32 / size as f32;
                let v = (y - (center.y - half)) as f32 / size as f32;
                let Some(a) = texture.alpha((u * side) as i64, (v * side) as i64) else {
                    continue;
                };
                let alpha = a as f32 / 255.0 * opacity;
                if alpha > 0.0 {
                    if let Some(px) = canvas.pixel_mut(x, y) {
                        blend_pixel(px, color, alpha);
                    }
                }
            }
        }
    }

    #[test]
    fn test_stamp_stays_inside_bounding_box() {
        let texture = BrushTexture::solid(16);
        let before = Canvas::new(40, 40, WHITE);
        let mut canvas = before.clone();

        stamp(&mut canvas, Point::new(20, 15), 0.0, 8, RED, 1.0, &texture);

        let changed = changed_pixels(&before, &canvas);
        assert!(!changed.is_empty());
        for (x, y) in changed {
            assert!((16..=24).contains(&x), "x = {x}");
            assert!((11..=19).contains(&y), "y = {y}");
        }
    }

    #[test]
    fn test_stamp_clips_at_canvas_edge() {
        let texture = BrushTexture::solid(8);
        let before = Canvas::new(10, 10, WHITE);
        let mut canvas = before.clone();

        stamp(&mut canvas, Point::new(0, 9), 0.0, 8, RED, 1.0, &texture);
        assert!(!changed_pixels(&before, &canvas).is_empty());

        // Entirely off-canvas
        let mut canvas = before.clone();
        stamp(&mut canvas, Point::new(-50, -50), 0.0, 8, RED, 1.0, &texture);
        assert_eq!(canvas, before);
    }

    #[test]
    fn test_zero_opacity_is_noop() {
        let texture = BrushTexture::disc(64);
        let before = Canvas::new(32, 32, [7, 8, 9]);
        let mut canvas = before.clone();

        stamp(&mut canvas, Point::new(16, 16), 30.0, 12, RED, 0.0, &texture);
        stamp(&mut canvas, Point::new(16, 16), 30.0, 12, RED, -0.5, &texture);
        stamp(&mut canvas, Point::new(16, 16), 30.0, 0, RED, 1.0, &texture);

        assert_eq!(canvas.as_raw(), before.as_raw());
    }

    #[test]
    fn test_opaque_center_blends_to_exact_color() {
        let texture = BrushTexture::disc(64);
        for background in [[0, 0, 0], [255, 255, 255], [13, 200, 77]] {
            let mut canvas = Canvas::new(32, 32, background);
            stamp(&mut canvas, Point::new(16, 16), 0.0, 10, RED, 1.0, &texture);
            assert_eq!(canvas.pixel(16, 16), Some(RED));
        }
    }

    #[test]
    fn test_partial_opacity_truncates() {
        let texture = BrushTexture::solid(4);
        let mut canvas = Canvas::new(8, 8, [100, 100, 100]);
        stamp(&mut canvas, Point::new(4, 4), 0.0, 4, [201, 0, 100], 0.5, &texture);
        // 100 + 101 * 0.5 = 150.5 -> 150, 100 - 100 * 0.5 = 50
        assert_eq!(canvas.pixel(4, 4), Some([150, 50, 100]));
    }

    #[test]
    fn test_zero_angle_matches_axis_aligned_baseline() {
        for texture in [BrushTexture::disc(64), BrushTexture::solid(64)] {
            for (center, size, opacity) in [
                (Point::new(20, 20), 8, 0.7),
                (Point::new(3, 37), 16, 0.9),
                (Point::new(25, 11), 10, 1.0),
                (Point::new(20, 20), 7, 1.0),
                (Point::new(38, 1), 5, 0.6),
                (Point::new(9, 30), 3, 0.8),
                (Point::new(12, 12), 1, 1.0),
            ] {
                let mut rotated = Canvas::new(40, 40, WHITE);
                let mut baseline = rotated.clone();

                stamp(&mut rotated, center, 0.0, size, RED, opacity, &texture);
                stamp_axis_aligned(&mut baseline, center, size, RED, opacity, &texture);

                assert_eq!(rotated.as_raw(), baseline.as_raw(), "size {size} at {center:?}");
            }
        }
    }

    #[test]
    fn test_odd_size_covers_full_inclusive_box() {
        let texture = BrushTexture::solid(64);
        let before = Canvas::new(40, 40, WHITE);
        let mut canvas = before.clone();

        stamp(&mut canvas, Point::new(20, 20), 0.0, 7, RED, 1.0, &texture);

        let changed = changed_pixels(&before, &canvas);
        assert_eq!(changed.len(), 49);
        assert_eq!(canvas.pixel(17, 17), Some(RED));
        assert_eq!(canvas.pixel(23, 23), Some(RED));
        assert_eq!(canvas.pixel(24, 20), Some(WHITE));
    }

    #[test]
    fn test_rotation_turns_asymmetric_texture() {
        // Opaque only in the left half: a vertical bar to the left of centre
        let side = 8u32;
        let data = (0..side * side)
            .map(|i| if i % side < side / 2 { 255 } else { 0 })
            .collect();
        let texture = BrushTexture::from_raw(side, data).unwrap();

        let mut upright = Canvas::new(20, 20, WHITE);
        stamp(&mut upright, Point::new(10, 10), 0.0, 8, RED, 1.0, &texture);
        assert_eq!(upright.pixel(7, 10), Some(RED));
        assert_eq!(upright.pixel(12, 10), Some(WHITE));

        // Rotated by 90 degrees (y down) the opaque half points up
        let mut turned = Canvas::new(20, 20, WHITE);
        stamp(&mut turned, Point::new(10, 10), 90.0, 8, RED, 1.0, &texture);
        assert_eq!(turned.pixel(10, 7), Some(RED));
        assert_eq!(turned.pixel(10, 12), Some(WHITE));
    }

    #[test]
    fn test_taper_skips_path_endpoints() {
        let texture = BrushTexture::solid(8);
        let rasterizer = StrokeRasterizer::new(&texture).with_spacing(0.0);
        let stroke = Stroke {
            path: vec![Point::new(5, 5), Point::new(30, 20), Point::new(55, 5)],
            angles: vec![0.0; 3],
            color: RED,
            size: 6,
            opacity: 1.0,
        };

        let dabs = rasterizer.dabs(&stroke);
        assert_eq!(dabs.len(), 1);
        assert_eq!(dabs[0].center, Point::new(30, 20));
        assert_eq!(dabs[0].size, 6);

        let before = Canvas::new(60, 30, WHITE);
        let mut canvas = before.clone();
        assert_eq!(rasterizer.render(&mut canvas, &stroke), 1);

        for (x, y) in changed_pixels(&before, &canvas) {
            assert!((x - 30).abs() <= 3 && (y - 20).abs() <= 3);
        }
        assert_eq!(canvas.pixel(5, 5), Some(WHITE));
        assert_eq!(canvas.pixel(55, 5), Some(WHITE));
    }

    #[test]
    fn test_two_point_stroke_paints_between_endpoints() {
        let texture = BrushTexture::disc(64);
        let rasterizer = StrokeRasterizer::new(&texture);
        let stroke = Stroke {
            path: vec![Point::new(4, 10), Point::new(20, 10)],
            angles: vec![0.0, 0.0],
            color: RED,
            size: 8,
            opacity: 1.0,
        };

        let dabs = rasterizer.dabs(&stroke);
        assert!(!dabs.is_empty());
        assert!(dabs.iter().all(|d| d.center != stroke.path[0]));
        assert!(dabs.iter().all(|d| d.size >= 1 && d.size <= 8));

        let mut canvas = Canvas::new(24, 20, WHITE);
        rasterizer.render(&mut canvas, &stroke);
        assert_eq!(canvas.pixel(12, 10), Some(RED));
    }

    #[test]
    fn test_degenerate_stroke_renders_nothing() {
        let texture = BrushTexture::disc(16);
        let rasterizer = StrokeRasterizer::new(&texture);
        let stroke = Stroke {
            path: vec![Point::new(4, 4), Point::new(8, 8)],
            angles: vec![0.0],
            color: RED,
            size: 8,
            opacity: 1.0,
        };

        let before = Canvas::new(16, 16, WHITE);
        let mut canvas = before.clone();
        assert_eq!(rasterizer.render(&mut canvas, &stroke), 0);
        assert_eq!(canvas, before);
    }
}
