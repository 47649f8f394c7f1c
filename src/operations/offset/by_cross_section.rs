use crate::error::{OperationError, Result};
use crate::math::{Point3, CHAINAGE_TOLERANCE};
use crate::network::{BankExtents, Branch, Embankment, NameSequence};

use super::{miter_offset, segment_tangents, Side, SideLine, Sides};

/// Offsets each branch centerline by half-widths interpolated from its
/// cross-sections, attaching the interpolated bank elevation as Z.
///
/// Output vertices sit at every centerline vertex chainage and every
/// cross-section chainage (duplicates merged), in chainage order. Between
/// cross-sections the half-width and elevation vary linearly; before the
/// first and after the last they are held constant. Branches without
/// cross-sections are skipped and logged, without failing the call.
#[derive(Debug)]
pub struct CrossSectionOffset<'a> {
    branches: &'a [Branch],
    sides: Sides,
}

/// Per-side bank values sampled along a branch, sorted by chainage.
struct BankSampler {
    chainages: Vec<f64>,
    banks: Vec<BankExtents>,
}

impl BankSampler {
    /// Builds a sampler from a branch's cross-sections, or `None` if it
    /// has none.
    fn from_branch(branch: &Branch) -> Option<Self> {
        let sorted = branch.cross_sections_by_chainage();
        if sorted.is_empty() {
            return None;
        }
        let chainages = sorted.iter().map(|cs| cs.chainage()).collect();
        let banks = sorted.iter().map(|cs| cs.bank_extents()).collect();
        Some(Self { chainages, banks })
    }

    /// Bank values at a chainage: linear between cross-sections, constant
    /// beyond the outermost ones.
    fn sample(&self, chainage: f64) -> BankExtents {
        let n = self.chainages.len();
        if chainage <= self.chainages[0] {
            return self.banks[0];
        }
        if chainage >= self.chainages[n - 1] {
            return self.banks[n - 1];
        }
        for i in 0..n - 1 {
            if chainage <= self.chainages[i + 1] {
                let span = self.chainages[i + 1] - self.chainages[i];
                let fraction = if span.abs() < CHAINAGE_TOLERANCE {
                    0.0
                } else {
                    (chainage - self.chainages[i]) / span
                };
                return lerp_banks(self.banks[i], self.banks[i + 1], fraction);
            }
        }
        self.banks[n - 1]
    }
}

fn lerp_banks(a: BankExtents, b: BankExtents, fraction: f64) -> BankExtents {
    let lerp = |x: f64, y: f64| x + fraction * (y - x);
    BankExtents {
        left_half_width: lerp(a.left_half_width, b.left_half_width),
        right_half_width: lerp(a.right_half_width, b.right_half_width),
        left_elevation: lerp(a.left_elevation, b.left_elevation),
        right_elevation: lerp(a.right_elevation, b.right_elevation),
    }
}

/// One output position along a branch: either a centerline vertex or a
/// mid-segment cross-section chainage.
#[derive(Debug, Clone, Copy)]
enum Station {
    Vertex { index: usize, chainage: f64 },
    Mid { chainage: f64 },
}

impl Station {
    fn chainage(self) -> f64 {
        match self {
            Station::Vertex { chainage, .. } | Station::Mid { chainage } => chainage,
        }
    }
}

impl<'a> CrossSectionOffset<'a> {
    #[must_use]
    pub fn new(branches: &'a [Branch], sides: Sides) -> Self {
        Self { branches, sides }
    }

    /// Executes the offset operation.
    ///
    /// # Errors
    ///
    /// Returns [`OperationError::NoOutput`] if no branch yielded an
    /// embankment (every branch lacked cross-sections, or no side was
    /// requested).
    pub fn execute(&self) -> Result<Vec<Embankment>> {
        Ok(self.build()?.into_iter().map(|l| l.embankment).collect())
    }

    /// Builds the offset lines keeping their branch/side association.
    pub(crate) fn build(&self) -> Result<Vec<SideLine>> {
        let mut names = NameSequence::new();
        let mut lines = Vec::new();

        for (branch_index, branch) in self.branches.iter().enumerate() {
            let Some(sampler) = BankSampler::from_branch(branch) else {
                log::warn!(
                    "branch '{}' has no cross-sections; no embankments created for this branch",
                    branch.name()
                );
                continue;
            };

            let stations = stations_for(branch);
            let tangents = segment_tangents(branch.points());
            let last_vertex = branch.points().len() - 1;

            for side in self.sides.iter() {
                let mut offset_points = Vec::with_capacity(stations.len());
                for station in &stations {
                    let banks = sampler.sample(station.chainage());
                    let (distance, elevation) = match side {
                        Side::Left => (banks.left_half_width, banks.left_elevation),
                        Side::Right => (banks.right_half_width, banks.right_elevation),
                    };

                    let pt = match *station {
                        Station::Vertex { index, .. } => {
                            let vertex = branch.points()[index];
                            if index == 0 {
                                vertex + side.normal(tangents[0]) * distance
                            } else if index == last_vertex {
                                vertex + side.normal(tangents[last_vertex - 1]) * distance
                            } else {
                                miter_offset(
                                    vertex,
                                    side.normal(tangents[index - 1]),
                                    side.normal(tangents[index]),
                                    distance,
                                )
                            }
                        }
                        Station::Mid { chainage } => {
                            let (point, segment) = branch.locate_chainage(chainage);
                            point + side.normal(tangents[segment]) * distance
                        }
                    };
                    offset_points.push(Point3::new(pt.x, pt.y, elevation));
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
                "no branch with cross-sections and a requested side".to_owned(),
            )
            .into());
        }
        Ok(lines)
    }
}

/// Output stations of a branch: every centerline vertex plus every
/// cross-section chainage not already on a vertex, sorted by chainage.
fn stations_for(branch: &Branch) -> Vec<Station> {
    let mut stations: Vec<Station> = branch
        .vertex_chainages()
        .into_iter()
        .enumerate()
        .map(|(index, chainage)| Station::Vertex { index, chainage })
        .collect();

    for cross_section in branch.cross_sections_by_chainage() {
        let chainage = cross_section
            .chainage()
            .clamp(0.0, branch.declared_length());
        let duplicate = stations
            .iter()
            .any(|s| (s.chainage() - chainage).abs() < CHAINAGE_TOLERANCE);
        if !duplicate {
            stations.push(Station::Mid { chainage });
        }
    }

    stations.sort_by(|a, b| {
        a.chainage()
            .partial_cmp(&b.chainage())
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    stations
}
