//! Symmetric digital sightlines.

use crate::Point;

/// Computes the cells on the sightline from `a` to `b`, both inclusive.
///
/// The walk steps once per cell along the dominant axis and accumulates an
/// integer error term for the minor axis, seeded with half of the dominant
/// delta. The path is symmetric: `los(b, a)` is exactly `los(a, b)` reversed,
/// so sight never depends on which end is the viewer.
#[must_use]
pub fn los(a: Point, b: Point) -> Vec<Point> {
    let x_diff = (a.x - b.x).abs();
    let y_diff = (a.y - b.y).abs();
    let x_sign = if b.x < a.x { -1 } else { 1 };
    let y_sign = if b.y < a.y { -1 } else { 1 };

    let size = usize::try_from(x_diff.max(y_diff)).unwrap_or(0) + 1;
    let mut result = Vec::with_capacity(size);
    result.push(a);

    let mut current = a;
    if x_diff >= y_diff {
        let mut test = half_delta(x_diff, y_sign);
        for _ in 0..x_diff {
            current.x += x_sign;
            test -= y_diff;
            if test < 0 {
                current.y += y_sign;
                test += x_diff;
            }
            result.push(current);
        }
    } else {
        let mut test = half_delta(y_diff, x_sign);
        for _ in 0..y_diff {
            current.y += y_sign;
            test -= x_diff;
            if test < 0 {
                current.x += x_sign;
                test += y_diff;
            }
            result.push(current);
        }
    }

    debug_assert_eq!(result.len(), size);
    result
}

// The seeds used by the two directions of a line must sum to `delta - 1`.
// For even deltas the spare unit goes to the walk whose minor axis increases.
fn half_delta(delta: i32, minor_sign: i32) -> i32 {
    if minor_sign < 0 {
        (delta - 1) / 2
    } else {
        delta / 2
    }
}
