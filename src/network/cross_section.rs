use crate::error::{GeometryError, Result};

/// One point of a lateral profile: signed offset from the centerline
/// (negative = left, positive = right) and elevation at that offset.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProfilePoint {
    pub offset: f64,
    pub elevation: f64,
}

impl ProfilePoint {
    #[must_use]
    pub fn new(offset: f64, elevation: f64) -> Self {
        Self { offset, elevation }
    }
}

/// One row of a symmetric width-at-height table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeightWidthRow {
    pub height: f64,
    pub width: f64,
}

impl HeightWidthRow {
    #[must_use]
    pub fn new(height: f64, width: f64) -> Self {
        Self { height, width }
    }
}

/// The lateral shape of a channel at one chainage.
#[derive(Debug, Clone)]
pub enum Profile {
    /// Ordered (offset, elevation) pairs; the first and last points are the
    /// left and right bank points.
    Lateral(Vec<ProfilePoint>),
    /// Symmetric width-at-height table; the widest tabulated height defines
    /// both banks.
    HeightWidth(Vec<HeightWidthRow>),
}

/// Bank geometry extracted from a profile: per-side half-width and
/// bank elevation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BankExtents {
    pub left_half_width: f64,
    pub right_half_width: f64,
    pub left_elevation: f64,
    pub right_elevation: f64,
}

/// A lateral profile attached to a branch at a fixed chainage.
#[derive(Debug, Clone)]
pub struct CrossSection {
    chainage: f64,
    profile: Profile,
}

impl CrossSection {
    /// Creates a cross-section from a lateral (offset, elevation) profile.
    ///
    /// # Errors
    ///
    /// Returns an error if fewer than 2 profile points are given.
    pub fn lateral(chainage: f64, points: Vec<ProfilePoint>) -> Result<Self> {
        if points.len() < 2 {
            return Err(GeometryError::Degenerate(format!(
                "a lateral profile requires at least 2 points, got {}",
                points.len()
            ))
            .into());
        }
        Ok(Self {
            chainage,
            profile: Profile::Lateral(points),
        })
    }

    /// Creates a cross-section from a symmetric height/width table.
    ///
    /// # Errors
    ///
    /// Returns an error if the table is empty.
    pub fn height_width(chainage: f64, rows: Vec<HeightWidthRow>) -> Result<Self> {
        if rows.is_empty() {
            return Err(GeometryError::Degenerate(
                "a height/width table requires at least 1 row".to_owned(),
            )
            .into());
        }
        Ok(Self {
            chainage,
            profile: Profile::HeightWidth(rows),
        })
    }

    #[must_use]
    pub fn chainage(&self) -> f64 {
        self.chainage
    }

    #[must_use]
    pub fn profile(&self) -> &Profile {
        &self.profile
    }

    /// Derives per-side half-widths and bank elevations.
    ///
    /// Lateral profiles take the outermost points as bank points; a
    /// height/width table is symmetric, so both banks sit at half the width
    /// of the maximum tabulated height.
    #[must_use]
    pub fn bank_extents(&self) -> BankExtents {
        match &self.profile {
            Profile::Lateral(points) => {
                // Constructor guarantees at least 2 points.
                let first = points[0];
                let last = points[points.len() - 1];
                BankExtents {
                    left_half_width: first.offset.abs(),
                    right_half_width: last.offset.abs(),
                    left_elevation: first.elevation,
                    right_elevation: last.elevation,
                }
            }
            Profile::HeightWidth(rows) => {
                let top = rows
                    .iter()
                    .fold(rows[0], |best, &r| if r.height > best.height { r } else { best });
                BankExtents {
                    left_half_width: top.width / 2.0,
                    right_half_width: top.width / 2.0,
                    left_elevation: top.height,
                    right_elevation: top.height,
                }
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    const TOL: f64 = 1e-10;

    #[test]
    fn lateral_banks_from_outer_points() {
        let cs = CrossSection::lateral(
            10.0,
            vec![
                ProfilePoint::new(-20.0, 8.0),
                ProfilePoint::new(-15.0, 0.0),
                ProfilePoint::new(10.0, 0.0),
                ProfilePoint::new(15.0, 9.5),
            ],
        )
        .unwrap();
        let banks = cs.bank_extents();
        assert!((banks.left_half_width - 20.0).abs() < TOL);
        assert!((banks.right_half_width - 15.0).abs() < TOL);
        assert!((banks.left_elevation - 8.0).abs() < TOL);
        assert!((banks.right_elevation - 9.5).abs() < TOL);
    }

    #[test]
    fn lateral_requires_two_points() {
        assert!(CrossSection::lateral(0.0, vec![ProfilePoint::new(0.0, 0.0)]).is_err());
    }

    #[test]
    fn height_width_banks_at_max_height() {
        let cs = CrossSection::height_width(
            5.0,
            vec![
                HeightWidthRow::new(0.0, 35.0),
                HeightWidthRow::new(10.0, 40.0),
                HeightWidthRow::new(4.0, 38.0),
            ],
        )
        .unwrap();
        let banks = cs.bank_extents();
        assert!((banks.left_half_width - 20.0).abs() < TOL);
        assert!((banks.right_half_width - 20.0).abs() < TOL);
        assert!((banks.left_elevation - 10.0).abs() < TOL);
        assert!((banks.right_elevation - 10.0).abs() < TOL);
    }

    #[test]
    fn height_width_requires_a_row() {
        assert!(CrossSection::height_width(0.0, vec![]).is_err());
    }
}
