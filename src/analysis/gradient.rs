//! Sobel gradients - orientation and magnitude maps from a source image
//!
//! A convenience for callers that have no external gradient stage. Uses
//! 3x3 Sobel kernels on the luminance channel with reflect-101 borders.

use image::{imageops, GrayImage, RgbImage};

use super::{MagnitudeMap, OrientationMap};

#[inline]
fn reflect_101(i: i64, len: i64) -> u32 {
    if len == 1 {
        return 0;
    }
    let mut i = i;
    if i < 0 {
        i = -i;
    }
    if i >= len {
        i = 2 * (len - 1) - i;
    }
    i.clamp(0, len - 1) as u32
}

#[inline]
fn sample(gray: &GrayImage, x: i64, y: i64) -> f32 {
    let (w, h) = gray.dimensions();
    gray.get_pixel(reflect_101(x, w as i64), reflect_101(y, h as i64))[0] as f32
}

/// Gradient orientation (degrees in `[0, 360)`) and magnitude (min-max
/// normalized to `[0, 255]`) of `image`
pub fn sobel_gradients(image: &RgbImage) -> (OrientationMap, MagnitudeMap) {
    let gray = imageops::grayscale(image);
    let (width, height) = gray.dimensions();

    let mut raw_magnitude = Vec::with_capacity(width as usize * height as usize);
    let orientation = OrientationMap::from_fn(width, height, |x, y| {
        let (x, y) = (x as i64, y as i64);
        let p = |dx: i64, dy: i64| sample(&gray, x + dx, y + dy);

        let gx = (p(1, -1) + 2.0 * p(1, 0) + p(1, 1)) - (p(-1, -1) + 2.0 * p(-1, 0) + p(-1, 1));
        let gy = (p(-1, 1) + 2.0 * p(0, 1) + p(1, 1)) - (p(-1, -1) + 2.0 * p(0, -1) + p(1, -1));

        raw_magnitude.push((gx * gx + gy * gy).sqrt());

        let degrees = gy.atan2(gx).to_degrees();
        let degrees = if degrees < 0.0 { degrees + 360.0 } else { degrees };
        if degrees >= 360.0 {
            0.0
        } else {
            degrees
        }
    });

    let (min, max) = raw_magnitude
        .iter()
        .fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), &m| {
            (lo.min(m), hi.max(m))
        });
    let range = max - min;
    let normalized = raw_magnitude
        .iter()
        .map(|&m| if range > 0.0 { (m - min) / range * 255.0 } else { 0.0 })
        .collect::<Vec<_>>();

    let magnitude = MagnitudeMap::from_fn(width, height, |x, y| {
        normalized[y as usize * width as usize + x as usize]
    });

    (orientation, magnitude)
}
