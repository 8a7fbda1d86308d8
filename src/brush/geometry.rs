//! Stroke geometry - turns a start point and a gradient direction into a path

use super::interpolation::bezier_curve;
use super::{Point, Rgb, Stroke};

/// Builds stroke paths clamped to a canvas of fixed size
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StrokeGeometryBuilder {
    width: u32,
    height: u32,
}

impl StrokeGeometryBuilder {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    fn clamp(&self, x: i32, y: i32) -> Point {
        let max_x = self.width.saturating_sub(1) as i32;
        let max_y = self.height.saturating_sub(1) as i32;
        Point::new(x.clamp(0, max_x), y.clamp(0, max_y))
    }

    /// Two-point path from `start` running `length` pixels along `orientation_degrees`
    ///
    /// The offset is truncated toward zero, then the end point is clamped to
    /// the canvas. Both points carry the orientation as their rotation.
    pub fn build(
        &self,
        start: Point,
        orientation_degrees: f32,
        length: u32,
    ) -> (Vec<Point>, Vec<f32>) {
        let (sin, cos) = (orientation_degrees as f64).to_radians().sin_cos();
        let length = length as f64;
        let end = self.clamp(
            start.x + (length * cos) as i32,
            start.y + (length * sin) as i32,
        );

        (
            vec![start, end],
            vec![orientation_degrees, orientation_degrees],
        )
    }

    /// Smooth path through a Bézier curve defined by `control`
    ///
    /// Every curve point is clamped to the canvas and carries `orientation_degrees`.
    pub fn build_curved(
        &self,
        control: &[Point],
        orientation_degrees: f32,
        num_steps: usize,
    ) -> (Vec<Point>, Vec<f32>) {
        let path: Vec<Point> = bezier_curve(control, num_steps)
            .into_iter()
            .map(|p| self.clamp(p.x, p.y))
            .collect();
        let angles = vec![orientation_degrees; path.len()];
        (path, angles)
    }

    /// Complete straight stroke ready for the rasterizer
    pub fn stroke(
        &self,
        start: Point,
        orientation_degrees: f32,
        length: u32,
        color: Rgb,
        size: u32,
        opacity: f32,
    ) -> Stroke {
        let (path, angles) = self.build(start, orientation_degrees, length);
        Stroke {
            path,
            angles,
            color,
            size,
            opacity,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_follows_orientation() {
        let builder = StrokeGeometryBuilder::new(100, 100);

        let (path, angles) = builder.build(Point::new(50, 50), 0.0, 8);
        assert_eq!(path, vec![Point::new(50, 50), Point::new(58, 50)]);
        assert_eq!(angles, vec![0.0, 0.0]);

        // y grows downward: 90 degrees points down the canvas
        let (path, _) = builder.build(Point::new(50, 50), 90.0, 8);
        assert_eq!(path[1], Point::new(50, 58));

        let (path, _) = builder.build(Point::new(50, 50), 180.0, 8);
        assert_eq!(path[1], Point::new(42, 50));
    }

    #[test]
    fn test_build_clamps_end_point() {
        let builder = StrokeGeometryBuilder::new(20, 10);
        let (path, _) = builder.build(Point::new(18, 8), 45.0, 10);
        assert_eq!(path[0], Point::new(18, 8));
        assert_eq!(path[1], Point::new(19, 9));

        let (path, _) = builder.build(Point::new(1, 1), 225.0, 10);
        assert_eq!(path[1], Point::new(0, 0));
    }

    #[test]
    fn test_build_curved_keeps_endpoints_and_angles() {
        let builder = StrokeGeometryBuilder::new(64, 64);
        let control = [Point::new(2, 2), Point::new(30, 60), Point::new(60, 4)];
        let (path, angles) = builder.build_curved(&control, 12.5, 9);

        assert_eq!(path.len(), 9);
        assert_eq!(angles.len(), 9);
        assert_eq!(path[0], Point::new(2, 2));
        assert_eq!(path[8], Point::new(60, 4));
        assert!(angles.iter().all(|&a| a == 12.5));
    }

    #[test]
    fn test_stroke_carries_style() {
        let builder = StrokeGeometryBuilder::new(32, 32);
        let stroke = builder.stroke(Point::new(4, 4), 0.0, 5, [1, 2, 3], 4, 0.8);
        assert_eq!(stroke.path.len(), 2);
        assert_eq!(stroke.color, [1, 2, 3]);
        assert_eq!(stroke.size, 4);
        assert!(!stroke.is_degenerate());
    }
}
