use crate::error::{OperationError, Result};
use crate::math::Point3;
use crate::network::{Branch, Embankment, NameSequence};

use super::{miter_offset, segment_tangents, validate_distance, SideLine, Sides};

/// Offsets each branch centerline by a fixed perpendicular distance.
///
/// Produces one polyline per requested side with the same vertex count as
/// the centerline: endpoint vertices offset along the perpendicular of
/// their single adjacent segment, interior vertices along the mitered
/// bisector of the two adjacent perpendiculars. Both sides of a branch are
/// emitted (left, then right) before the next branch, and names follow
/// that order.
#[derive(Debug)]
pub struct ConstantDistanceOffset<'a> {
    branches: &'a [Branch],
    distance: f64,
    sides: Sides,
}

impl<'a> ConstantDistanceOffset<'a> {
    #[must_use]
    pub fn new(branches: &'a [Branch], distance: f64, sides: Sides) -> Self {
        Self {
            branches,
            distance,
            sides,
        }
    }

    /// Executes the offset operation.
    ///
    /// # Errors
    ///
    /// - [`OperationError::NonPositiveDistance`] if the distance is zero or
    ///   negative
    /// - [`OperationError::DistanceTooLarge`] if the distance exceeds the
    ///   geometric validity bound of the input branches
    /// - [`OperationError::NoOutput`] if nothing was produced
    ///
    /// All failures leave the output empty; there is no partial result.
    pub fn execute(&self) -> Result<Vec<Embankment>> {
        Ok(self.build()?.into_iter().map(|l| l.embankment).collect())
    }

    /// Builds the offset lines keeping their branch/side association.
    pub(crate) fn build(&self) -> Result<Vec<SideLine>> {
        validate_distance(self.branches, self.distance)?;

        let mut names = NameSequence::new();
        let mut lines = Vec::new();

        for (branch_index, branch) in self.branches.iter().enumerate() {
            let points = branch.points();
            let tangents = segment_tangents(points);
            let last = points.len() - 1;

            for side in self.sides.iter() {
                let mut offset_points = Vec::with_capacity(points.len());
                for (i, &vertex) in points.iter().enumerate() {
                    let pt = if i == 0 {
                        vertex + side.normal(tangents[0]) * self.distance
                    } else if i == last {
                        vertex + side.normal(tangents[last - 1]) * self.distance
                    } else {
                        miter_offset(
                            vertex,
                            side.normal(tangents[i - 1]),
                            side.normal(tangents[i]),
                            self.distance,
                        )
                    };
                    offset_points.push(Point3::new(pt.x, pt.y, 0.0));
                }
                lines.push(SideLine {
                    branch: branch_index,
                    side,
                    embankment: Embankment::new(names.next_embankment(), offset_points)?,
                });
            }
        }

        if lines.is_empty() {
            return Err(OperationError::NoOutput(
                "no branches or no sides requested".to_owned(),
            )
            .into());
        }
        Ok(lines)
    }
}
