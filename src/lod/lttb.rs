use crate::core::PointBuffer;

/// Largest-Triangle-Three-Buckets downsampling for x-ordered series.
///
/// Returns exactly `target` points, always keeping the first and last input
/// points. The interior is split into `target - 2` equal-width index buckets;
/// each bucket contributes the point forming the largest triangle with the
/// previously kept point and the average of the next bucket.
///
/// With `target == 2` only the endpoints remain. The input is returned
/// unchanged (same storage) when `target >= n` or `target < 2`.
#[must_use]
pub fn lttb(buffer: &PointBuffer, target: usize) -> PointBuffer {
    let n = buffer.point_count();
    if target >= n || target < 2 {
        return buffer.clone();
    }
    if target == 2 {
        return buffer.gather([0, n - 1]);
    }

    let coords = buffer.coords();
    let x = |i: usize| coords[i * 2];
    let y = |i: usize| coords[i * 2 + 1];

    let mut kept = Vec::with_capacity(target);
    kept.push(0);

    let bucket_width = (n - 2) as f64 / (target - 2) as f64;
    let bucket_bound = |bucket: usize| ((bucket as f64 * bucket_width) as usize + 1).min(n - 1);

    let mut anchor = 0usize;
    for bucket in 0..(target - 2) {
        let start = bucket_bound(bucket);
        let end = bucket_bound(bucket + 1).max(start + 1).min(n - 1);

        // Average of the next bucket; the final bucket looks at the last point.
        let next_start = end;
        let next_end = bucket_bound(bucket + 2).max(next_start + 1).min(n);
        let next_len = (next_end - next_start) as f64;
        let (mut avg_x, mut avg_y) = (0.0, 0.0);
        for i in next_start..next_end {
            avg_x += x(i);
            avg_y += y(i);
        }
        avg_x /= next_len;
        avg_y /= next_len;

        let (ax, ay) = (x(anchor), y(anchor));
        let mut best = start;
        let mut best_area = -1.0f64;
        for i in start..end {
            let area = ((ax - avg_x) * (y(i) - ay) - (ax - x(i)) * (avg_y - ay)).abs();
            if area > best_area {
                best_area = area;
                best = i;
            }
        }

        kept.push(best);
        anchor = best;
    }

    kept.push(n - 1);
    buffer.gather(kept)
}
