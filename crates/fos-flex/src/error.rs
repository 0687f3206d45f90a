//! Layout errors

use fos_style::StyleError;

use crate::{MeasureError, NodeId};

/// Errors reported by the tree API and the layout pass
#[derive(Debug, thiserror::Error)]
pub enum LayoutError {
    #[error("node {0:?} does not exist in this tree")]
    InvalidNode(NodeId),

    #[error("invalid style: {0}")]
    InvalidStyle(#[from] StyleError),

    #[error("node {0:?} already has a parent; remove it first")]
    AlreadyParented(NodeId),

    #[error("adding {child:?} under {parent:?} would create a cycle")]
    WouldCycle { parent: NodeId, child: NodeId },

    #[error("node {child:?} is not a child of {parent:?}")]
    NotAChild { parent: NodeId, child: NodeId },

    /// A node measures its own content or lays out children, never both.
    #[error("node {0:?} cannot have both a measure function and children")]
    MeasuredNodeChildren(NodeId),

    /// The host measure capability failed; the pass was abandoned.
    #[error("measuring node {node:?} failed: {source}")]
    Measure {
        node: NodeId,
        #[source]
        source: MeasureError,
    },

    /// The node changed since the last pass, so its layout is stale.
    #[error("layout of node {0:?} is out of date; call calculate_layout first")]
    DirtyLayout(NodeId),
}
