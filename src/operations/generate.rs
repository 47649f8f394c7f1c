use crate::error::Result;
use crate::network::{ChannelNetwork, Embankment};

use super::merge::auto::merge_network;
use super::offset::{ConstantDistanceOffset, CrossSectionOffset, Sides};

/// How embankment lateral placement is derived.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OffsetMode {
    /// A fixed perpendicular distance on every branch.
    ConstantDistance(f64),
    /// Half-widths and elevations interpolated from each branch's
    /// cross-sections.
    CrossSections,
}

/// Top-level embankment generation over a channel network.
///
/// Delegates to the constant-distance or cross-section builder, then
/// optionally consolidates embankments across shared nodes.
#[derive(Debug)]
pub struct EmbankmentGeneration<'a> {
    network: &'a ChannelNetwork,
    mode: OffsetMode,
    sides: Sides,
    auto_merge: bool,
}

impl<'a> EmbankmentGeneration<'a> {
    #[must_use]
    pub fn new(
        network: &'a ChannelNetwork,
        mode: OffsetMode,
        sides: Sides,
        auto_merge: bool,
    ) -> Self {
        Self {
            network,
            mode,
            sides,
            auto_merge,
        }
    }

    /// Executes generation and, when requested, auto-merging.
    ///
    /// # Errors
    ///
    /// Propagates the builder errors: invalid constant distance, or no
    /// embankment produced for the whole input.
    pub fn execute(&self) -> Result<Vec<Embankment>> {
        let branches = self.network.branches();
        let lines = match self.mode {
            OffsetMode::ConstantDistance(distance) => {
                ConstantDistanceOffset::new(branches, distance, self.sides).build()?
            }
            OffsetMode::CrossSections => CrossSectionOffset::new(branches, self.sides).build()?,
        };

        if self.auto_merge {
            Ok(merge_network(branches, lines))
        } else {
            Ok(lines.into_iter().map(|line| line.embankment).collect())
        }
    }
}
