mod by_cross_section;
mod constant;

pub use by_cross_section::CrossSectionOffset;
pub use constant::ConstantDistanceOffset;

use crate::error::{OperationError, Result};
use crate::math::{Point2, Vector2, TOLERANCE};
use crate::network::{Branch, Embankment};

/// Scale-sanity factor for branches without turns: a constant offset
/// distance must stay below this multiple of the shortest branch centerline.
const MAX_LENGTH_RATIO: f64 = 100.0;

/// Which side of the centerline an embankment runs on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    /// Perpendicular of a unit tangent on this side: left rotates the
    /// tangent +90°, right −90°, regardless of local direction reversals.
    #[must_use]
    pub fn normal(self, tangent: Vector2) -> Vector2 {
        match self {
            Side::Left => Vector2::new(-tangent.y, tangent.x),
            Side::Right => Vector2::new(tangent.y, -tangent.x),
        }
    }
}

/// Selection of sides to generate. Iteration order is left, then right,
/// which fixes the emission and naming order per branch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sides {
    pub left: bool,
    pub right: bool,
}

impl Sides {
    #[must_use]
    pub fn both() -> Self {
        Self {
            left: true,
            right: true,
        }
    }

    #[must_use]
    pub fn left_only() -> Self {
        Self {
            left: true,
            right: false,
        }
    }

    #[must_use]
    pub fn right_only() -> Self {
        Self {
            left: false,
            right: true,
        }
    }

    pub(crate) fn iter(self) -> impl Iterator<Item = Side> {
        [(self.left, Side::Left), (self.right, Side::Right)]
            .into_iter()
            .filter_map(|(enabled, side)| enabled.then_some(side))
    }
}

/// An embankment labeled with the branch index and side that produced it.
///
/// The auto-merge orchestrator needs this association; the public builder
/// contracts strip it and return plain embankments.
#[derive(Debug)]
pub(crate) struct SideLine {
    pub branch: usize,
    pub side: Side,
    pub embankment: Embankment,
}

/// Unit direction of every centerline segment.
pub(crate) fn segment_tangents(points: &[Point2]) -> Vec<Vector2> {
    points.windows(2).map(|w| (w[1] - w[0]).normalize()).collect()
}

/// Offsets an interior vertex along the bisector of the two adjacent side
/// perpendiculars (a mitered join).
///
/// `n_prev` and `n_next` are the side perpendiculars of the segments before
/// and after the vertex. The miter point sits `distance / cos(turn / 2)`
/// from the vertex, which the normal-sum form computes without any angle
/// bookkeeping.
pub(crate) fn miter_offset(
    vertex: Point2,
    n_prev: Vector2,
    n_next: Vector2,
    distance: f64,
) -> Point2 {
    let denom = 1.0 + n_prev.dot(&n_next);
    if denom.abs() < TOLERANCE {
        // Near-180° reversal; fall back to the incoming perpendicular.
        return vertex + n_prev * distance;
    }
    vertex + (n_prev + n_next) * (distance / denom)
}

/// Upper bound on a valid constant offset distance for the given branches.
///
/// At every interior vertex, a distance of `min(adjacent segment length) /
/// tan(turn / 2)` or more inverts the local offset direction; branches
/// without turns are bounded by [`MAX_LENGTH_RATIO`] times their centerline
/// length.
#[must_use]
pub fn max_offset_distance(branches: &[Branch]) -> f64 {
    let mut bound = f64::INFINITY;
    for branch in branches {
        let points = branch.points();
        bound = bound.min(MAX_LENGTH_RATIO * branch.geometry_length());
        let tangents = segment_tangents(points);
        for i in 1..points.len() - 1 {
            let cos_turn = tangents[i - 1].dot(&tangents[i]).clamp(-1.0, 1.0);
            let half_tan = (cos_turn.acos() / 2.0).tan();
            if half_tan < TOLERANCE {
                continue;
            }
            let seg_prev = (points[i] - points[i - 1]).norm();
            let seg_next = (points[i + 1] - points[i]).norm();
            bound = bound.min(seg_prev.min(seg_next) / half_tan);
        }
    }
    bound
}

/// Validates a constant offset distance against the branches.
pub(crate) fn validate_distance(branches: &[Branch], distance: f64) -> Result<()> {
    if distance <= 0.0 {
        log::warn!("offset distance must be greater than zero; no embankments generated");
        return Err(OperationError::NonPositiveDistance(distance).into());
    }
    let bound = max_offset_distance(branches);
    if distance >= bound {
        log::warn!(
            "offset distance {distance} is too large for the given branches; \
             no embankments generated"
        );
        return Err(OperationError::DistanceTooLarge {
            value: distance,
            bound,
        }
        .into());
    }
    Ok(())
}
