//! This module provides smoothing for closed band loops.

use glam::Vec2;

/// Smooth a closed loop of points with midpoint-quadratic interpolation and flatten it into a
/// polyline with `steps` samples per segment.
///
/// Each quadratic segment runs from the midpoint before a point to the midpoint after it, with
/// the point itself as the control point. This gives a smooth closed ring through irregularly
/// spaced points without needing full spline fitting.
///
/// Fewer than 3 points can't form a loop, so they are returned unchanged, as is any input when
/// `steps` is 0.
pub fn smooth_closed_loop(points: &[Vec2], steps: usize) -> Vec<Vec2> {
    if points.len() < 3 || steps == 0 {
        return points.to_vec();
    }

    let n = points.len();
    let mut polyline = Vec::with_capacity(n * steps);

    for i in 0..n {
        let prev = points[(i + n - 1) % n];
        let curr = points[i];
        let next = points[(i + 1) % n];

        let start = prev.lerp(curr, 0.5);
        let end = curr.lerp(next, 0.5);

        // The segment at t == 1 is the next segment's t == 0, so stop one sample short
        for s in 0..steps {
            let t = s as f32 / steps as f32;
            polyline.push(interpolate_quadratic_segment(start, curr, end, t));
        }
    }

    polyline
}

/// Evaluate the quadratic Bézier segment with the given endpoints and control point at `t`.
fn interpolate_quadratic_segment(start: Vec2, control: Vec2, end: Vec2, t: f32) -> Vec2 {
    debug_assert!((0.0..=1.0).contains(&t), "t must be in [0, 1]");

    let a = start.lerp(control, t);
    let b = control.lerp(end, t);
    a.lerp(b, t)
}
