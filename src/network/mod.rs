pub mod branch;
pub mod cross_section;
pub mod embankment;

pub use branch::{Branch, BranchEnd};
pub use cross_section::{BankExtents, CrossSection, HeightWidthRow, Profile, ProfilePoint};
pub use embankment::{Embankment, NameSequence};

use slotmap::{new_key_type, SlotMap};

new_key_type! {
    /// Generational key identifying a network node.
    pub struct NodeKey;
}

/// A connection point where branch ends meet.
#[derive(Debug, Clone)]
pub struct Node {
    pub name: String,
}

/// An ordered set of open-channel branches sharing a pool of nodes.
///
/// Nodes are owned in a slotmap arena and referenced from branches via
/// [`NodeKey`]; branch order is preserved because generation output and
/// naming follow it.
#[derive(Debug, Default)]
pub struct ChannelNetwork {
    nodes: SlotMap<NodeKey, Node>,
    branches: Vec<Branch>,
}

impl ChannelNetwork {
    /// Creates a new, empty network.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a node and returns its key.
    pub fn add_node(&mut self, name: impl Into<String>) -> NodeKey {
        self.nodes.insert(Node { name: name.into() })
    }

    /// Appends a branch. Branches keep insertion order.
    pub fn add_branch(&mut self, branch: Branch) {
        self.branches.push(branch);
    }

    /// Returns the node for a key, if it exists.
    #[must_use]
    pub fn node(&self, key: NodeKey) -> Option<&Node> {
        self.nodes.get(key)
    }

    /// Returns the branches in insertion order.
    #[must_use]
    pub fn branches(&self) -> &[Branch] {
        &self.branches
    }

    /// Returns a mutable view of the branches, e.g. to attach cross-sections.
    pub fn branches_mut(&mut self) -> &mut [Branch] {
        &mut self.branches
    }

    /// Returns the number of nodes.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }
}
