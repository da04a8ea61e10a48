use crate::core::PointBuffer;

/// Cells allocated per requested output point.
const GRID_OVERSAMPLING: f64 = 1.5;

/// Grid-based spatial decimation for unordered scatter data.
///
/// Points are binned into a square grid over their bounding box with roughly
/// `1.5 * target` cells. Sparse cells keep all their points, dense cells keep
/// an evenly strided subset, so the 2D density shape survives without the
/// left-to-right bias of index-based sampling. Output never exceeds `target`.
///
/// Degenerate bounding boxes use a unit extent; `target >= n` returns the
/// input unchanged.
#[must_use]
pub fn grid_decimate(buffer: &PointBuffer, target: usize) -> PointBuffer {
    let n = buffer.point_count();
    if target >= n {
        return buffer.clone();
    }
    if target == 0 {
        return PointBuffer::empty();
    }

    let bounds = Bounds::of(buffer);
    let side = ((GRID_OVERSAMPLING * target as f64).sqrt().ceil() as usize).max(1);
    let cell_of = |i: usize| {
        let coords = buffer.coords();
        let cx = bounds.cell(coords[i * 2], bounds.min_x, bounds.width, side);
        let cy = bounds.cell(coords[i * 2 + 1], bounds.min_y, bounds.height, side);
        cy * side + cx
    };

    // Counting sort of point indices by cell keeps input order within a cell.
    let mut offsets = vec![0usize; side * side + 1];
    for i in 0..n {
        offsets[cell_of(i) + 1] += 1;
    }
    let non_empty = offsets.iter().skip(1).filter(|&&count| count > 0).count();
    for cell in 0..side * side {
        offsets[cell + 1] += offsets[cell];
    }
    let mut cursor = offsets.clone();
    let mut ordered = vec![0usize; n];
    for i in 0..n {
        let cell = cell_of(i);
        ordered[cursor[cell]] = i;
        cursor[cell] += 1;
    }

    let quota = (target / non_empty.max(1)).max(1);
    let mut kept = Vec::with_capacity(target.min(n));
    for cell in 0..side * side {
        let members = &ordered[offsets[cell]..offsets[cell + 1]];
        if members.len() < quota {
            kept.extend_from_slice(members);
        } else {
            kept.extend(stride(members.len(), quota).map(|k| members[k]));
        }
    }

    if kept.len() > target {
        let len = kept.len();
        kept = stride(len, target).map(|k| kept[k]).collect();
    }

    buffer.gather(kept)
}

/// `count` evenly spaced positions in `0..len`, `count <= len`.
fn stride(len: usize, count: usize) -> impl Iterator<Item = usize> {
    (0..count).map(move |k| k * len / count)
}

#[derive(Debug, Clone, Copy)]
struct Bounds {
    min_x: f64,
    min_y: f64,
    width: f64,
    height: f64,
}

impl Bounds {
    fn of(buffer: &PointBuffer) -> Self {
        let (mut min_x, mut max_x) = (f64::INFINITY, f64::NEG_INFINITY);
        let (mut min_y, mut max_y) = (f64::INFINITY, f64::NEG_INFINITY);
        for point in buffer.iter() {
            min_x = min_x.min(point.x);
            max_x = max_x.max(point.x);
            min_y = min_y.min(point.y);
            max_y = max_y.max(point.y);
        }
        Self {
            min_x: if min_x.is_finite() { min_x } else { 0.0 },
            min_y: if min_y.is_finite() { min_y } else { 0.0 },
            width: extent(min_x, max_x),
            height: extent(min_y, max_y),
        }
    }

    fn cell(self, value: f64, min: f64, extent: f64, side: usize) -> usize {
        // `as usize` saturates negatives and NaN to 0.
        let cell = ((value - min) / extent * side as f64) as usize;
        cell.min(side - 1)
    }
}

fn extent(min: f64, max: f64) -> f64 {
    let span = max - min;
    if span.is_finite() && span > 0.0 {
        span
    } else {
        1.0
    }
}
