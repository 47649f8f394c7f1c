use super::{Point3, TOLERANCE};

/// Bounded segment-segment intersection in the XY plane.
///
/// Returns `(intersection_point, t, u)` where `t` and `u` are in `[0, 1]`.
/// The Z of the intersection point is interpolated along the first segment.
#[must_use]
pub fn segment_segment_intersect_2d(
    a0: &Point3,
    a1: &Point3,
    b0: &Point3,
    b1: &Point3,
) -> Option<(Point3, f64, f64)> {
    let dax = a1.x - a0.x;
    let day = a1.y - a0.y;
    let dbx = b1.x - b0.x;
    let dby = b1.y - b0.y;

    let cross = dax * dby - day * dbx;
    if cross.abs() < TOLERANCE {
        return None;
    }

    let dx = b0.x - a0.x;
    let dy = b0.y - a0.y;
    let t = (dx * dby - dy * dbx) / cross;
    let u = (dx * day - dy * dax) / cross;

    // Use a small epsilon to include endpoints.
    let eps = TOLERANCE;
    if t >= -eps && t <= 1.0 + eps && u >= -eps && u <= 1.0 + eps {
        let t_clamped = t.clamp(0.0, 1.0);
        let pt = Point3::new(
            a0.x + dax * t_clamped,
            a0.y + day * t_clamped,
            a0.z + (a1.z - a0.z) * t_clamped,
        );
        Some((pt, t_clamped, u.clamp(0.0, 1.0)))
    } else {
        None
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn segment_segment_crossing() {
        let a0 = Point3::new(0.0, 0.0, 0.0);
        let a1 = Point3::new(2.0, 2.0, 4.0);
        let b0 = Point3::new(0.0, 2.0, 0.0);
        let b1 = Point3::new(2.0, 0.0, 0.0);
        let (pt, t, u) = segment_segment_intersect_2d(&a0, &a1, &b0, &b1).unwrap();
        assert!((pt.x - 1.0).abs() < TOLERANCE);
        assert!((pt.y - 1.0).abs() < TOLERANCE);
        // Z interpolated along the first segment.
        assert!((pt.z - 2.0).abs() < TOLERANCE);
        assert!((t - 0.5).abs() < TOLERANCE);
        assert!((u - 0.5).abs() < TOLERANCE);
    }

    #[test]
    fn segment_segment_parallel_returns_none() {
        let a0 = Point3::new(0.0, 0.0, 0.0);
        let a1 = Point3::new(1.0, 0.0, 0.0);
        let b0 = Point3::new(0.0, 1.0, 0.0);
        let b1 = Point3::new(1.0, 1.0, 0.0);
        assert!(segment_segment_intersect_2d(&a0, &a1, &b0, &b1).is_none());
    }

    #[test]
    fn segment_segment_no_crossing_in_range() {
        // The infinite lines cross, the bounded segments do not.
        let a0 = Point3::new(0.0, 0.0, 0.0);
        let a1 = Point3::new(1.0, 0.0, 0.0);
        let b0 = Point3::new(5.0, -1.0, 0.0);
        let b1 = Point3::new(5.0, 1.0, 0.0);
        assert!(segment_segment_intersect_2d(&a0, &a1, &b0, &b1).is_none());
    }

    #[test]
    fn segment_segment_endpoint_touch_included() {
        // B starts exactly on A's endpoint.
        let a0 = Point3::new(0.0, 0.0, 0.0);
        let a1 = Point3::new(2.0, 0.0, 0.0);
        let b0 = Point3::new(2.0, 0.0, 0.0);
        let b1 = Point3::new(2.0, 3.0, 0.0);
        let (pt, t, u) = segment_segment_intersect_2d(&a0, &a1, &b0, &b1).unwrap();
        assert!((pt.x - 2.0).abs() < TOLERANCE);
        assert!(pt.y.abs() < TOLERANCE);
        assert!((t - 1.0).abs() < TOLERANCE);
        assert!(u.abs() < TOLERANCE);
    }
}
