//! Flexbox layout algorithm
//!
//! Entry point and the per-node driver. [`layout_node`] decides whether a
//! node must be visited or can be answered from its measurement cache;
//! [`flexbox::layout_impl`] does the actual work.

mod absolute;
mod align;
mod baseline;
mod flex_basis;
mod flexbox;
mod leaf;
mod lines;
mod resolve;
mod rounding;

pub(crate) use rounding::round_value_to_pixel_grid;

use fos_style::{Direction, FlexDirection, Size};

use crate::cache::{CachedMeasurement, LookupContext};
use crate::{AvailableSpace, LayoutConfig, LayoutError, LayoutTree, MeasureMode, NodeId};
use resolve::{BoxModel, is_style_dim_defined, relative_offset, resolved_dim};

/// Settings shared by every node visited in one pass
#[derive(Debug, Clone, Copy)]
pub(crate) struct Pass {
    pub config: LayoutConfig,
    pub generation: u32,
}

/// Constraints a node is laid out or measured under.
///
/// Available sizes include the node's own margins.
#[derive(Debug, Clone, Copy)]
pub(crate) struct LayoutRequest {
    pub available: Size<Option<f32>>,
    pub modes: Size<MeasureMode>,
    /// Size percentages of the node resolve against
    pub owner: Size<Option<f32>>,
    pub owner_direction: Direction,
    /// Compute final positions for the subtree, not only the node's size
    pub perform_layout: bool,
}

/// Why a node is being visited
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LayoutReason {
    Initial,
    Measure,
    Flex,
    Stretch,
    MultilineStretch,
    AbsMeasure,
    AbsLayout,
}

impl LayoutReason {
    pub fn as_str(self) -> &'static str {
        match self {
            LayoutReason::Initial => "initial",
            LayoutReason::Measure => "measure",
            LayoutReason::Flex => "flex",
            LayoutReason::Stretch => "stretch",
            LayoutReason::MultilineStretch => "multiline-stretch",
            LayoutReason::AbsMeasure => "abs-measure",
            LayoutReason::AbsLayout => "abs-layout",
        }
    }
}

impl LayoutTree {
    /// Lay out the subtree rooted at `root`.
    ///
    /// `width` and `height` are the space around the root; plain numbers
    /// are exact sizes. A root that fixes its own size in its style uses
    /// that instead, and a max size turns indefinite space into an upper
    /// bound.
    ///
    /// If a measure capability fails the pass stops and the error is
    /// returned. Every node under the root is left dirty, so no partial
    /// result can be read back.
    pub fn calculate_layout(
        &mut self,
        root: NodeId,
        width: impl Into<AvailableSpace>,
        height: impl Into<AvailableSpace>,
        direction: Direction,
    ) -> Result<(), LayoutError> {
        self.check(root)?;
        self.generation = self.generation.wrapping_add(1);
        let pass = Pass {
            config: self.config,
            generation: self.generation,
        };

        let (owner_width, width_space_mode) = width.into().into_parts();
        let (owner_height, height_space_mode) = height.into().into_parts();
        let owner = Size::new(owner_width, owner_height);

        let style = self.node(root).style;
        let model = BoxModel::resolve(&style, direction, owner_width);
        let (width, width_mode) = root_axis(
            &style,
            &model,
            FlexDirection::Row,
            owner_width,
            width_space_mode,
            owner_width,
        );
        let (height, height_mode) = root_axis(
            &style,
            &model,
            FlexDirection::Column,
            owner_height,
            height_space_mode,
            owner_height,
        );

        tracing::debug!(
            "Layout pass {} on {:?}: {:?} x {:?} ({} nodes)",
            pass.generation,
            root,
            width,
            height,
            self.nodes.len()
        );

        let request = LayoutRequest {
            available: Size::new(width, height),
            modes: Size::new(width_mode, height_mode),
            owner,
            owner_direction: direction,
            perform_layout: true,
        };
        if let Err(error) = layout_node(self, root, request, LayoutReason::Initial, pass) {
            abandon_pass(self, root);
            return Err(error);
        }

        // The root is positioned by its own margins and offsets.
        let root_direction = style.direction.resolve(direction);
        let position = &mut self.node_mut(root).state.position;
        position.left = model.margin.left
            + relative_offset(&style, root_direction, FlexDirection::Row, owner_width);
        position.top = model.margin.top
            + relative_offset(&style, root_direction, FlexDirection::Column, owner_height);

        rounding::round_to_pixel_grid(self, root, pass.config);

        let layout = self.node(root).layout;
        tracing::debug!(
            "Layout pass {} done: {:?} is {}x{}",
            pass.generation,
            root,
            layout.width,
            layout.height
        );
        Ok(())
    }
}

/// Mark the whole subtree dirty after a failed pass.
fn abandon_pass(tree: &mut LayoutTree, root: NodeId) {
    tracing::debug!("Layout pass abandoned; {:?} and its subtree stay dirty", root);
    let mut stack = vec![root];
    while let Some(id) = stack.pop() {
        let node = tree.node_mut(id);
        node.dirty = true;
        node.state.cache.clear();
        stack.extend(node.children.iter().copied());
    }
}

/// Constraint on one axis of the root
fn root_axis(
    style: &fos_style::Style,
    model: &BoxModel,
    axis: FlexDirection,
    space: Option<f32>,
    space_mode: MeasureMode,
    owner_size: Option<f32>,
) -> (Option<f32>, MeasureMode) {
    let margin = model.margin.axis(axis);
    if is_style_dim_defined(style, axis, owner_size) {
        let size = resolved_dim(style, axis, owner_size).map(|s| s + margin);
        return (size, MeasureMode::Exactly);
    }
    let max = style
        .max_size
        .get(axis.is_row())
        .resolve(owner_size)
        .filter(|m| *m >= 0.0);
    match (max, space, space_mode) {
        (Some(max), Some(space), MeasureMode::AtMost) => {
            (Some(space.min(max + margin)), MeasureMode::AtMost)
        }
        (Some(max), _, _) => (Some(max + margin), MeasureMode::AtMost),
        (None, space, mode) => (space, mode),
    }
}

/// Lay out or measure one node, reusing cached results where possible.
///
/// Returns whether the node was actually visited.
pub(crate) fn layout_node(
    tree: &mut LayoutTree,
    id: NodeId,
    request: LayoutRequest,
    reason: LayoutReason,
    pass: Pass,
) -> Result<bool, LayoutError> {
    let node = tree.node_mut(id);
    let need_to_visit = (node.dirty && node.state.generation != pass.generation)
        || node.state.last_owner_direction != Some(request.owner_direction);
    if need_to_visit {
        node.state.cache.clear();
    }

    let measured_leaf = node.measure.is_some();
    let margin = if measured_leaf {
        let model = BoxModel::resolve(&node.style, request.owner_direction, request.owner.width);
        Size::new(model.margin.horizontal(), model.margin.vertical())
    } else {
        Size::ZERO
    };
    let context = LookupContext {
        measured_leaf,
        perform_layout: request.perform_layout,
        owner: request.owner,
        margin,
        point_scale_factor: pass.config.point_scale_factor,
    };
    let cached = node.state.cache.get(request.available, request.modes, context);

    match cached {
        Some(computed) if !need_to_visit => {
            node.state.measured = computed;
            tracing::trace!(
                "{:?} {} cache hit: {}x{}",
                id,
                reason.as_str(),
                computed.width,
                computed.height
            );
        }
        _ => {
            flexbox::layout_impl(tree, id, request, pass)?;

            let node = tree.node_mut(id);
            node.state.last_owner_direction = Some(request.owner_direction);
            let measured = node.state.measured;
            node.state.cache.store(
                CachedMeasurement::new(request.available, request.modes, request.owner, measured),
                request.perform_layout,
            );
            tracing::trace!(
                "{:?} {} visited: {}x{} (available {:?} x {:?}, {:?} x {:?})",
                id,
                reason.as_str(),
                measured.width,
                measured.height,
                request.available.width,
                request.available.height,
                request.modes.width,
                request.modes.height
            );
        }
    }

    let node = tree.node_mut(id);
    if request.perform_layout {
        node.state.dimensions = node.state.measured;
        node.dirty = false;
    }
    node.state.generation = pass.generation;
    Ok(need_to_visit || cached.is_none())
}
