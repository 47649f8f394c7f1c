use super::{Point2, Point3, TOLERANCE};

/// Returns the total length of an open polyline.
#[must_use]
pub fn polyline_length(points: &[Point2]) -> f64 {
    points
        .windows(2)
        .map(|w| (w[1] - w[0]).norm())
        .sum()
}

/// Returns the cumulative arc length at every vertex, starting at 0.
#[must_use]
pub fn cumulative_lengths(points: &[Point2]) -> Vec<f64> {
    let mut lengths = Vec::with_capacity(points.len());
    let mut acc = 0.0;
    lengths.push(0.0);
    for w in points.windows(2) {
        acc += (w[1] - w[0]).norm();
        lengths.push(acc);
    }
    lengths
}

/// Locates the point at arc length `s` along the polyline.
///
/// Returns the point and the index of the segment carrying it. `s` is
/// clamped to `[0, total length]`; a value landing on a vertex resolves to
/// the segment ending there.
#[must_use]
pub fn point_at_arc_length(points: &[Point2], s: f64) -> Option<(Point2, usize)> {
    if points.len() < 2 {
        return None;
    }
    let mut remaining = s.max(0.0);
    for (i, w) in points.windows(2).enumerate() {
        let seg_len = (w[1] - w[0]).norm();
        if remaining <= seg_len || i == points.len() - 2 {
            if seg_len < TOLERANCE {
                return Some((w[0], i));
            }
            let t = (remaining / seg_len).clamp(0.0, 1.0);
            return Some((w[0] + (w[1] - w[0]) * t, i));
        }
        remaining -= seg_len;
    }
    None
}

/// Filters out consecutive points closer than `TOLERANCE` to each other.
///
/// Embankment polylines keep only consecutive-distinct points; exact joint
/// touches produced by a merge collapse to a single point here.
#[must_use]
pub fn dedup_consecutive(points: &[Point3]) -> Vec<Point3> {
    let mut out: Vec<Point3> = Vec::with_capacity(points.len());
    for &pt in points {
        if let Some(&last) = out.last() {
            let d_sq = (pt.x - last.x).powi(2) + (pt.y - last.y).powi(2);
            if d_sq < TOLERANCE * TOLERANCE {
                continue;
            }
        }
        out.push(pt);
    }
    out
}
