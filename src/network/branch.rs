use std::cmp::Ordering;

use crate::error::{GeometryError, Result};
use crate::math::polyline_2d::{cumulative_lengths, point_at_arc_length, polyline_length};
use crate::math::{Point2, TOLERANCE};

use super::cross_section::CrossSection;
use super::NodeKey;

/// Which end of a branch attaches to a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BranchEnd {
    Source,
    Target,
}

/// A single open-channel reach between two network nodes.
///
/// The centerline is an ordered vertex list with at least two vertices and
/// no zero-length segments. Chainage along the branch is parameterized by
/// the *declared* length, which may differ slightly from the geometric
/// polyline length; a scale factor maps between the two.
#[derive(Debug, Clone)]
pub struct Branch {
    name: String,
    source: NodeKey,
    target: NodeKey,
    points: Vec<Point2>,
    length: f64,
    cross_sections: Vec<CrossSection>,
}

impl Branch {
    /// Creates a branch whose declared length is the geometric length.
    ///
    /// # Errors
    ///
    /// Returns an error if fewer than 2 vertices are given or any two
    /// consecutive vertices coincide.
    pub fn new(
        name: impl Into<String>,
        source: NodeKey,
        target: NodeKey,
        points: Vec<Point2>,
    ) -> Result<Self> {
        if points.len() < 2 {
            return Err(GeometryError::TooFewVertices(points.len()).into());
        }
        for w in points.windows(2) {
            if (w[1] - w[0]).norm() < TOLERANCE {
                return Err(GeometryError::ZeroLengthSegment {
                    x0: w[0].x,
                    y0: w[0].y,
                    x1: w[1].x,
                    y1: w[1].y,
                }
                .into());
            }
        }
        let length = polyline_length(&points);
        Ok(Self {
            name: name.into(),
            source,
            target,
            points,
            length,
            cross_sections: Vec::new(),
        })
    }

    /// Overrides the declared length defining the chainage parameterization.
    ///
    /// # Errors
    ///
    /// Returns an error if `length` is not strictly positive.
    pub fn with_declared_length(mut self, length: f64) -> Result<Self> {
        if length <= 0.0 {
            return Err(GeometryError::Degenerate(format!(
                "declared branch length must be positive, got {length}"
            ))
            .into());
        }
        self.length = length;
        Ok(self)
    }

    /// Attaches a cross-section. Attachment order is kept and breaks
    /// chainage ties when sorting.
    pub fn add_cross_section(&mut self, cross_section: CrossSection) {
        self.cross_sections.push(cross_section);
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn source(&self) -> NodeKey {
        self.source
    }

    #[must_use]
    pub fn target(&self) -> NodeKey {
        self.target
    }

    /// Centerline vertices in order.
    #[must_use]
    pub fn points(&self) -> &[Point2] {
        &self.points
    }

    /// The declared length defining the chainage parameterization.
    #[must_use]
    pub fn declared_length(&self) -> f64 {
        self.length
    }

    /// The geometric length of the centerline polyline.
    #[must_use]
    pub fn geometry_length(&self) -> f64 {
        polyline_length(&self.points)
    }

    /// Cross-sections in attachment order.
    #[must_use]
    pub fn cross_sections(&self) -> &[CrossSection] {
        &self.cross_sections
    }

    /// Cross-sections stably sorted by chainage (ties keep attachment order).
    #[must_use]
    pub fn cross_sections_by_chainage(&self) -> Vec<&CrossSection> {
        let mut sorted: Vec<&CrossSection> = self.cross_sections.iter().collect();
        sorted.sort_by(|a, b| {
            a.chainage()
                .partial_cmp(&b.chainage())
                .unwrap_or(Ordering::Equal)
        });
        sorted
    }

    /// Chainage value at every centerline vertex.
    ///
    /// Cumulative geometric lengths scaled so the last vertex lands exactly
    /// on the declared length.
    #[must_use]
    pub fn vertex_chainages(&self) -> Vec<f64> {
        let cumulative = cumulative_lengths(&self.points);
        let geometric = cumulative.last().copied().unwrap_or(0.0);
        if geometric < TOLERANCE {
            return vec![0.0; self.points.len()];
        }
        let scale = self.length / geometric;
        let mut chainages: Vec<f64> = cumulative.iter().map(|c| c * scale).collect();
        if let Some(last) = chainages.last_mut() {
            *last = self.length;
        }
        chainages
    }

    /// Maps a chainage value to a centerline point and its carrying segment.
    ///
    /// The chainage is clamped to `[0, declared length]`.
    #[must_use]
    pub fn locate_chainage(&self, chainage: f64) -> (Point2, usize) {
        let clamped = chainage.clamp(0.0, self.length);
        let arc = clamped * self.geometry_length() / self.length;
        point_at_arc_length(&self.points, arc).unwrap_or((self.points[0], 0))
    }
}
