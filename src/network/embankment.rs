use crate::error::{GeometryError, Result};
use crate::math::polyline_2d::dedup_consecutive;
use crate::math::Point3;

/// A generated embankment boundary line.
///
/// Holds a name and a polyline of at least two consecutive-distinct points.
/// Z carries the bank elevation for cross-section based generation and is
/// 0.0 otherwise. Embankments are never mutated after creation; a merge
/// produces a fresh instance and leaves its inputs untouched.
#[derive(Debug, Clone)]
pub struct Embankment {
    name: String,
    points: Vec<Point3>,
}

impl Embankment {
    /// Creates an embankment, dropping consecutive duplicate points.
    ///
    /// # Errors
    ///
    /// Returns an error if fewer than 2 distinct points remain.
    pub fn new(name: impl Into<String>, points: Vec<Point3>) -> Result<Self> {
        let points = dedup_consecutive(&points);
        if points.len() < 2 {
            return Err(GeometryError::Degenerate(
                "an embankment requires at least 2 distinct points".to_owned(),
            )
            .into());
        }
        Ok(Self {
            name: name.into(),
            points,
        })
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn points(&self) -> &[Point3] {
        &self.points
    }

    /// The first point of the line.
    #[must_use]
    pub fn start(&self) -> Point3 {
        self.points[0]
    }

    /// The last point of the line.
    #[must_use]
    pub fn end(&self) -> Point3 {
        self.points[self.points.len() - 1]
    }
}

/// Sequential name source for one generation or merge session.
///
/// Both counters start at 01 and are zero-padded to at least two digits.
/// Keeping them in an explicit value (rather than process-wide state) makes
/// repeated calls deterministic and side-effect free.
#[derive(Debug, Default)]
pub struct NameSequence {
    embankments: usize,
    merged: usize,
}

impl NameSequence {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Next `Embankment{NN}` name.
    pub fn next_embankment(&mut self) -> String {
        self.embankments += 1;
        format!("Embankment{:02}", self.embankments)
    }

    /// Next `MergedEmbankment{NN}` name.
    pub fn next_merged(&mut self) -> String {
        self.merged += 1;
        format!("MergedEmbankment{:02}", self.merged)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn consecutive_duplicates_are_dropped() {
        let e = Embankment::new(
            "Embankment01",
            vec![
                Point3::new(0.0, 0.0, 0.0),
                Point3::new(1.0, 0.0, 0.0),
                Point3::new(1.0, 0.0, 0.0),
                Point3::new(2.0, 0.0, 0.0),
            ],
        )
        .unwrap();
        assert_eq!(e.points().len(), 3);
    }

    #[test]
    fn degenerate_line_is_rejected() {
        let result = Embankment::new(
            "Embankment01",
            vec![Point3::new(1.0, 1.0, 0.0), Point3::new(1.0, 1.0, 0.0)],
        );
        assert!(result.is_err());
    }

    #[test]
    fn start_and_end_points() {
        let e = Embankment::new(
            "Embankment01",
            vec![
                Point3::new(0.0, 0.0, 1.0),
                Point3::new(5.0, 0.0, 2.0),
                Point3::new(5.0, 5.0, 3.0),
            ],
        )
        .unwrap();
        assert!((e.start().x).abs() < 1e-12);
        assert!((e.end().y - 5.0).abs() < 1e-12);
        assert!((e.end().z - 3.0).abs() < 1e-12);
    }

    #[test]
    fn names_are_zero_padded_and_independent() {
        let mut names = NameSequence::new();
        assert_eq!(names.next_embankment(), "Embankment01");
        assert_eq!(names.next_embankment(), "Embankment02");
        assert_eq!(names.next_merged(), "MergedEmbankment01");
        assert_eq!(names.next_embankment(), "Embankment03");
        assert_eq!(names.next_merged(), "MergedEmbankment02");
    }

    #[test]
    fn names_grow_past_two_digits() {
        let mut names = NameSequence::new();
        for _ in 0..99 {
            names.next_embankment();
        }
        assert_eq!(names.next_embankment(), "Embankment100");
    }
}
