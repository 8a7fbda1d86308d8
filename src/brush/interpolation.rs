//! Interpolation helpers for stroke paths

use std::f32::consts::PI;

use super::Point;

/// Binomial coefficient `C(n, k)`
///
/// Computed multiplicatively on the smaller of `k` and `n - k`, so
/// `binomial(n, k) == binomial(n, n - k)` and no factorial is ever formed.
/// Saturates at `u64::MAX` for coefficients too large to represent.
pub fn binomial(n: u32, k: u32) -> u64 {
    if k > n {
        return 0;
    }
    let k = k.min(n - k);

    let mut result: u128 = 1;
    for i in 1..=k as u128 {
        // Exact: the running product of i consecutive integers is divisible by i!
        result = result * (n as u128 - i + 1) / i;
        if result > u64::MAX as u128 {
            return u64::MAX;
        }
    }
    result as u64
}

/// Row `n` of Pascal's triangle in floating point
///
/// Same multiplicative recurrence as [`binomial`], without the integer cap,
/// so curves of any degree get finite weights.
fn binomial_row(n: u32) -> Vec<f64> {
    let mut row = Vec::with_capacity(n as usize + 1);
    let mut c = 1.0f64;
    row.push(c);
    for k in 1..=n {
        c = c * (n - k + 1) as f64 / k as f64;
        row.push(c);
    }
    row
}

/// Evaluate the Bézier curve defined by `control` at `num_steps` evenly
/// spaced parameters in `[0, 1]`
///
/// The first and last samples reproduce the first and last control points
/// exactly.
pub fn bezier_curve(control: &[Point], num_steps: usize) -> Vec<Point> {
    if control.is_empty() || num_steps == 0 {
        return vec![];
    }

    let degree = (control.len() - 1) as u32;
    let coefficients = binomial_row(degree);

    let mut curve = Vec::with_capacity(num_steps);
    for step in 0..num_steps {
        let t = if num_steps > 1 {
            step as f64 / (num_steps - 1) as f64
        } else {
            0.0
        };

        let mut x = 0.0f64;
        let mut y = 0.0f64;
        for (i, (p, c)) in control.iter().zip(&coefficients).enumerate() {
            let i = i as i32;
            let basis = c * t.powi(i) * (1.0 - t).powi(degree as i32 - i);
            x += p.x as f64 * basis;
            y += p.y as f64 * basis;
        }
        curve.push(Point::new(x.round() as i32, y.round() as i32));
    }

    curve
}

/// Pressure along a stroke: `sin(t * PI)` with `t = index / (count - 1)`
///
/// Zero at both ends of a multi-point path, one at its midpoint. A
/// single-point path uses `t = 1`.
#[inline]
pub fn taper_factor(index: usize, count: usize) -> f32 {
    let t = if count > 1 {
        index as f32 / (count - 1) as f32
    } else {
        1.0
    };
    (t * PI).sin().max(0.0)
}

/// Insert intermediate points every `spacing` pixels along a polyline
///
/// Each inserted point carries the angle of the segment's start point. The
/// original points are all kept; `spacing <= 0` returns the path unchanged.
pub(crate) fn resample_path(
    path: &[Point],
    angles: &[f32],
    spacing: f32,
) -> (Vec<Point>, Vec<f32>) {
    if path.len() < 2 || spacing.is_nan() || spacing <= 0.0 {
        return (path.to_vec(), angles.to_vec());
    }

    let mut points = Vec::with_capacity(path.len() * 4);
    let mut out_angles = Vec::with_capacity(path.len() * 4);

    for i in 0..path.len() - 1 {
        let p0 = path[i];
        let p1 = path[i + 1];
        let angle = angles[i];

        let dx = (p1.x - p0.x) as f32;
        let dy = (p1.y - p0.y) as f32;
        let dist = (dx * dx + dy * dy).sqrt();

        let steps = (dist / spacing).ceil().max(1.0) as usize;
        for step in 0..steps {
            let t = step as f32 / steps as f32;
            points.push(Point::new(
                (p0.x as f32 + dx * t).round() as i32,
                (p0.y as f32 + dy * t).round() as i32,
            ));
            out_angles.push(angle);
        }
    }

    if let (Some(last), Some(angle)) = (path.last(), angles.last()) {
        points.push(*last);
        out_angles.push(*angle);
    }

    (points, out_angles)
}
