use crate::core::{DataPoint, PointBuffer};

/// Ramer-Douglas-Peucker polyline simplification with an error bound.
///
/// Keeps the first and last points and every point whose perpendicular
/// distance to the simplified chord exceeds `epsilon` (data units). Spans are
/// processed from an explicit stack so near-collinear inputs of millions of
/// points cannot exhaust the call stack.
///
/// Negative or non-finite `epsilon` is treated as `0.0`, which keeps every
/// point that is not exactly on its chord.
#[must_use]
pub fn douglas_peucker(buffer: &PointBuffer, epsilon: f64) -> PointBuffer {
    let n = buffer.point_count();
    if n < 3 {
        return buffer.clone();
    }
    let epsilon = if epsilon.is_finite() && epsilon > 0.0 {
        epsilon
    } else {
        0.0
    };

    let mut keep = vec![false; n];
    keep[0] = true;
    keep[n - 1] = true;

    let mut spans = vec![(0usize, n - 1)];
    while let Some((start, end)) = spans.pop() {
        if end <= start + 1 {
            continue;
        }

        let a = buffer.point(start);
        let b = buffer.point(end);
        let mut max_distance = 0.0;
        let mut max_index = start;
        for i in (start + 1)..end {
            let distance = perpendicular_distance(buffer.point(i), a, b);
            if distance > max_distance {
                max_distance = distance;
                max_index = i;
            }
        }

        if max_distance > epsilon {
            keep[max_index] = true;
            spans.push((start, max_index));
            spans.push((max_index, end));
        }
    }

    if keep.iter().all(|&kept| kept) {
        return buffer.clone();
    }
    buffer.gather(
        keep.iter()
            .enumerate()
            .filter_map(|(index, &kept)| kept.then_some(index)),
    )
}

/// Distance from `p` to the line through `a` and `b`; point distance when
/// `a == b`.
pub(crate) fn perpendicular_distance(p: DataPoint, a: DataPoint, b: DataPoint) -> f64 {
    let dx = b.x - a.x;
    let dy = b.y - a.y;
    let length_sq = dx.mul_add(dx, dy * dy);

    if length_sq == 0.0 {
        return (p.x - a.x).hypot(p.y - a.y);
    }

    let cross = dx.mul_add(a.y - p.y, -(dy * (a.x - p.x)));
    cross.abs() / length_sq.sqrt()
}
