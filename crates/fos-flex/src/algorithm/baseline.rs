//! Baselines of laid-out nodes

use fos_style::{AlignItems, Display, PositionType};

use super::resolve::align_item;
use crate::{LayoutTree, NodeId};

/// Distance from the node's top edge to its first baseline.
///
/// That is the baseline of its first baseline-aligned child on the first
/// line, or else of its first in-flow child, shifted by where that child
/// sits. Nodes without such a child use their height.
pub(super) fn baseline(tree: &LayoutTree, id: NodeId) -> f32 {
    let node = tree.node(id);
    let mut chosen = None;

    for &child in &node.children {
        let child_node = tree.node(child);
        let style = &child_node.style;
        if style.display == Display::None || style.position_type == PositionType::Absolute {
            continue;
        }
        if child_node.state.line_index > 0 {
            break;
        }
        if align_item(&node.style, style) == AlignItems::Baseline {
            chosen = Some(child);
            break;
        }
        if chosen.is_none() {
            chosen = Some(child);
        }
    }

    match chosen {
        Some(child) => baseline(tree, child) + tree.node(child).state.position.top,
        None => node.state.measured.height,
    }
}

/// Items of this container are aligned to a shared baseline.
pub(super) fn is_baseline_layout(tree: &LayoutTree, id: NodeId) -> bool {
    let node = tree.node(id);
    if node.style.flex_direction.is_column() {
        return false;
    }
    if node.style.align_items == AlignItems::Baseline {
        return true;
    }
    node.children.iter().any(|&child| {
        let style = &tree.node(child).style;
        style.position_type == PositionType::Relative
            && style.display != Display::None
            && style.align_self == Some(AlignItems::Baseline)
    })
}
