use slotmap::SecondaryMap;

use crate::math::Vector2;
use crate::network::{Branch, BranchEnd, Embankment, NameSequence, NodeKey};
use crate::operations::offset::{segment_tangents, Side, SideLine};

use super::merge_lines;

/// Cosine threshold for the continuation angle at a shared node. At or
/// below it the second branch doubles back on the first, which would swap
/// left and right; such junctions are left unmerged.
const REVERSAL_COS: f64 = -0.98;

/// Consolidates per-branch embankments across shared network nodes.
///
/// For every node attached to exactly two distinct branches with a
/// consistent continuation, the two embankments of matching sides are
/// merged (sides swap when the branches meet start-to-start or
/// end-to-end). Nodes with three or more attachments, inconsistent
/// tangents, or an ambiguous pairwise merge keep their embankments
/// separate. Passes repeat until none merges, so chains of any length
/// collapse to a single line per side.
///
/// Surviving embankments keep generation order; merged results are
/// appended in merge order and named `MergedEmbankment{NN}` within this
/// call.
pub(crate) fn merge_network(branches: &[Branch], lines: Vec<SideLine>) -> Vec<Embankment> {
    let mut left_slot: Vec<Option<usize>> = vec![None; branches.len()];
    let mut right_slot: Vec<Option<usize>> = vec![None; branches.len()];
    let mut slots: Vec<Option<Embankment>> = Vec::with_capacity(lines.len());

    for line in lines {
        let slot = slots.len();
        match line.side {
            Side::Left => left_slot[line.branch] = Some(slot),
            Side::Right => right_slot[line.branch] = Some(slot),
        }
        slots.push(Some(line.embankment));
    }

    let adjacency = node_attachments(branches);
    let mut names = NameSequence::new();

    loop {
        let mut merged_any = false;

        for (_node, attachments) in &adjacency {
            if attachments.len() != 2 {
                continue;
            }
            let (branch_a, end_a) = attachments[0];
            let (branch_b, end_b) = attachments[1];
            if branch_a == branch_b {
                continue;
            }
            if !continuation_is_consistent(branches, (branch_a, end_a), (branch_b, end_b)) {
                continue;
            }

            // Matching parameterizations join like sides; opposed ones swap.
            let pairs: [(Side, Side); 2] = if end_a == end_b {
                [(Side::Left, Side::Right), (Side::Right, Side::Left)]
            } else {
                [(Side::Left, Side::Left), (Side::Right, Side::Right)]
            };

            for (side_a, side_b) in pairs {
                let slot_a = side_slot(&left_slot, &right_slot, branch_a, side_a);
                let slot_b = side_slot(&left_slot, &right_slot, branch_b, side_b);
                let (Some(sa), Some(sb)) = (slot_a, slot_b) else {
                    continue;
                };
                if sa == sb {
                    continue;
                }

                let merged = {
                    let (Some(line_a), Some(line_b)) = (slots[sa].as_ref(), slots[sb].as_ref())
                    else {
                        continue;
                    };
                    merge_lines(line_a, line_b, &mut names)
                };
                let Some(merged) = merged else {
                    continue;
                };

                slots[sa] = None;
                slots[sb] = None;
                let new_slot = slots.len();
                slots.push(Some(merged));
                for entry in left_slot.iter_mut().chain(right_slot.iter_mut()) {
                    if *entry == Some(sa) || *entry == Some(sb) {
                        *entry = Some(new_slot);
                    }
                }
                merged_any = true;
            }
        }

        if !merged_any {
            break;
        }
    }

    slots.into_iter().flatten().collect()
}

/// Groups branch ends by the node they attach to, in branch order.
fn node_attachments(branches: &[Branch]) -> SecondaryMap<NodeKey, Vec<(usize, BranchEnd)>> {
    let mut adjacency: SecondaryMap<NodeKey, Vec<(usize, BranchEnd)>> = SecondaryMap::new();
    for (index, branch) in branches.iter().enumerate() {
        push_attachment(&mut adjacency, branch.source(), (index, BranchEnd::Source));
        push_attachment(&mut adjacency, branch.target(), (index, BranchEnd::Target));
    }
    adjacency
}

fn push_attachment(
    adjacency: &mut SecondaryMap<NodeKey, Vec<(usize, BranchEnd)>>,
    node: NodeKey,
    attachment: (usize, BranchEnd),
) {
    if let Some(list) = adjacency.get_mut(node) {
        list.push(attachment);
    } else {
        adjacency.insert(node, vec![attachment]);
    }
}

/// Unit tangent pointing from the node into the branch.
fn outgoing_tangent(branch: &Branch, end: BranchEnd) -> Vector2 {
    let tangents = segment_tangents(branch.points());
    match end {
        BranchEnd::Source => tangents[0],
        BranchEnd::Target => -tangents[tangents.len() - 1],
    }
}

/// Whether travelling through the node from one branch into the other
/// continues rather than reverses.
fn continuation_is_consistent(
    branches: &[Branch],
    (branch_a, end_a): (usize, BranchEnd),
    (branch_b, end_b): (usize, BranchEnd),
) -> bool {
    let into_a = outgoing_tangent(&branches[branch_a], end_a);
    let into_b = outgoing_tangent(&branches[branch_b], end_b);
    // Entering along A and leaving along B means following -into_a, then
    // into_b; a near-antiparallel pair of outgoing tangents is a hairpin.
    (-into_a).dot(&into_b) > REVERSAL_COS
}

fn side_slot(
    left_slot: &[Option<usize>],
    right_slot: &[Option<usize>],
    branch: usize,
    side: Side,
) -> Option<usize> {
    match side {
        Side::Left => left_slot[branch],
        Side::Right => right_slot[branch],
    }
}
