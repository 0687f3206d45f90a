//! Flex container layout
//!
//! One visit of one node. Leaves and containers whose size is already
//! known are handled up front; everything else goes through the full
//! flex algorithm:
//!
//! 1. resolve axes and the space available to children
//! 2. compute every in-flow child's flex basis
//! 3. break children into lines and distribute free space per line
//! 4. justify each line and align its items on the cross axis
//! 5. size the container, then align lines against that size
//! 6. place absolutely positioned children and mirror reversed axes

use fos_style::{Direction, Display, FlexDirection, FlexWrap, Overflow, PositionType, Size, Style};

use super::align;
use super::baseline::is_baseline_layout;
use super::flex_basis::{BasisContext, compute_flex_basis};
use super::leaf;
use super::lines;
use super::resolve::{
    BoxModel, bound_axis, bound_axis_maybe, bound_within_min_max, calculate_available_inner_dim,
    is_flexible, relative_offset,
};
use super::{LayoutRequest, Pass, absolute};
use crate::geometry::pick;
use crate::layout::LayoutState;
use crate::{Layout, LayoutError, LayoutTree, MeasureMode, NodeId};

/// Container-level values shared by the steps of one visit
#[derive(Debug, Clone, Copy)]
pub(super) struct FlexContainer {
    pub id: NodeId,
    pub style: Style,
    pub direction: Direction,
    pub model: BoxModel,
    pub main_axis: FlexDirection,
    pub cross_axis: FlexDirection,
    pub is_main_row: bool,
    pub is_wrap: bool,
    pub available_inner_width: Option<f32>,
    pub available_inner_height: Option<f32>,
    pub available_inner_main: Option<f32>,
    pub available_inner_cross: Option<f32>,
    pub main_mode: MeasureMode,
    pub cross_mode: MeasureMode,
    pub main_owner_size: Option<f32>,
    pub cross_owner_size: Option<f32>,
    /// Outer flex bases sum to more than the main axis offers
    pub flex_basis_overflows: bool,
    pub perform_layout: bool,
    /// Gap between items on a line
    pub main_gap: f32,
    /// Gap between lines
    pub cross_gap: f32,
}

/// Lay out or measure `id` under `request`, writing its measured size.
pub(super) fn layout_impl(
    tree: &mut LayoutTree,
    id: NodeId,
    request: LayoutRequest,
    pass: Pass,
) -> Result<(), LayoutError> {
    let style = tree.node(id).style;
    let direction = style.direction.resolve(request.owner_direction);
    let model = BoxModel::resolve(&style, request.owner_direction, request.owner.width);

    if request.perform_layout {
        let state = &mut tree.node_mut(id).state;
        state.direction = direction;
        state.margin = model.margin;
        state.border = model.border;
        state.padding = model.padding;
        state.had_overflow = false;
    }

    if tree.node(id).measure.is_some() {
        let size = leaf::measure_leaf(tree, id, &request, &model)?;
        tree.node_mut(id).state.measured = size;
        return Ok(());
    }
    if tree.node(id).children.is_empty() {
        let size = leaf::empty_container(tree, id, &request, &model);
        tree.node_mut(id).state.measured = size;
        return Ok(());
    }
    if !request.perform_layout {
        if let Some(size) = leaf::fixed_size(tree, id, &request, &model) {
            tree.node_mut(id).state.measured = size;
            return Ok(());
        }
    }

    let children = tree.node(id).children.clone();
    let web_defaults = pass.config.use_web_defaults;

    // Axes and available space
    let main_axis = style.flex_direction.resolve(direction);
    let cross_axis = main_axis.cross(direction);
    let is_main_row = main_axis.is_row();
    let owner = request.owner;
    let main_owner_size = pick(is_main_row, owner.width, owner.height);
    let cross_owner_size = pick(is_main_row, owner.height, owner.width);
    let main_mode = pick(is_main_row, request.modes.width, request.modes.height);
    let cross_mode = pick(is_main_row, request.modes.height, request.modes.width);
    let padding_border_main = model.padding_border_axis(main_axis);
    let padding_border_cross = model.padding_border_axis(cross_axis);

    let min_inner_main = style
        .min_size
        .get(is_main_row)
        .resolve(main_owner_size)
        .map(|min| min - padding_border_main);
    let max_inner_main = style
        .max_size
        .get(is_main_row)
        .resolve(main_owner_size)
        .map(|max| max - padding_border_main);

    let available_inner_width =
        calculate_available_inner_dim(&style, &model, FlexDirection::Row, request.available.width, owner.width);
    let available_inner_height =
        calculate_available_inner_dim(&style, &model, FlexDirection::Column, request.available.height, owner.height);
    let available_inner_main = pick(is_main_row, available_inner_width, available_inner_height);
    let available_inner_cross = pick(is_main_row, available_inner_height, available_inner_width);

    let mut container = FlexContainer {
        id,
        style,
        direction,
        model,
        main_axis,
        cross_axis,
        is_main_row,
        is_wrap: style.flex_wrap != FlexWrap::NoWrap,
        available_inner_width,
        available_inner_height,
        available_inner_main,
        available_inner_cross,
        main_mode,
        cross_mode,
        main_owner_size,
        cross_owner_size,
        flex_basis_overflows: false,
        perform_layout: request.perform_layout,
        main_gap: style.main_gap(is_main_row),
        cross_gap: style.main_gap(!is_main_row),
    };

    // Flex basis of every in-flow child
    let single_flex_child = if main_mode == MeasureMode::Exactly {
        single_flexible_child(tree, &children, web_defaults)
    } else {
        None
    };
    let basis_context = BasisContext {
        container: id,
        main_axis,
        direction,
        available: Size::new(available_inner_width, available_inner_height),
        modes: request.modes,
    };

    let mut total_outer_flex_basis = 0.0;
    let mut in_flow_count = 0usize;
    for &child in &children {
        let child_style = tree.node(child).style;
        if child_style.display == Display::None {
            zero_out_layout(tree, child);
            continue;
        }
        if request.perform_layout {
            set_initial_position(tree, &container, child);
        }
        if child_style.position_type == PositionType::Absolute {
            continue;
        }

        if Some(child) == single_flex_child {
            tree.node_mut(child).state.computed_flex_basis = 0.0;
        } else {
            compute_flex_basis(tree, child, &basis_context, pass)?;
        }
        let child_model = BoxModel::resolve(&child_style, direction, available_inner_width);
        total_outer_flex_basis +=
            tree.node(child).state.computed_flex_basis + child_model.margin.axis(main_axis);
        in_flow_count += 1;
    }
    total_outer_flex_basis += container.main_gap * in_flow_count.saturating_sub(1) as f32;

    container.flex_basis_overflows = main_mode != MeasureMode::Undefined
        && available_inner_main.is_some_and(|available| total_outer_flex_basis > available);
    if container.is_wrap && container.flex_basis_overflows && main_mode == MeasureMode::AtMost {
        container.main_mode = MeasureMode::Exactly;
    }

    // Lines
    let legacy_stretch = pass.config.use_legacy_stretch_behaviour;
    let mut start_index = 0;
    let mut line_index = 0;
    let mut total_line_cross = 0.0_f32;
    let mut max_line_main = 0.0_f32;
    let mut line_cross_sizes = Vec::new();

    while start_index < children.len() {
        let mut line = lines::collect_line(tree, &container, &children, start_index, line_index, pass);
        let can_skip_flex = !request.perform_layout && container.cross_mode == MeasureMode::Exactly;

        // A container not sized exactly on its main axis uses its content
        // size unless min/max say otherwise.
        let mut available_main = container.available_inner_main;
        let mut size_based_on_content = false;
        if container.main_mode != MeasureMode::Exactly {
            if let Some(min) = min_inner_main.filter(|min| line.size_consumed < *min) {
                available_main = Some(min);
            } else if let Some(max) = max_inner_main.filter(|max| line.size_consumed > *max) {
                available_main = Some(max);
            } else {
                if !legacy_stretch
                    && (line.total_flex_grow == 0.0 || style.flex_grow_factor() == 0.0)
                {
                    available_main = Some(line.size_consumed);
                }
                size_based_on_content = !legacy_stretch;
            }
        }

        line.remaining_free_space = match available_main {
            Some(available) if !size_based_on_content => available - line.size_consumed,
            _ if line.size_consumed < 0.0 => -line.size_consumed,
            _ => 0.0,
        };

        if !can_skip_flex {
            lines::resolve_flexible_lengths(tree, &container, &mut line, available_main, pass)?;
        }
        if request.perform_layout && line.overflows() {
            tree.node_mut(id).state.had_overflow = true;
        }

        // Main axis
        let extent = align::justify_line(tree, &container, &line, available_main, can_skip_flex);
        let mut cross_dim = extent.cross;

        let mut container_cross = container.available_inner_cross;
        if matches!(container.cross_mode, MeasureMode::Undefined | MeasureMode::AtMost) {
            container_cross = Some(
                bound_axis(&style, &model, cross_axis, cross_dim + padding_border_cross, cross_owner_size)
                    - padding_border_cross,
            );
        }
        // A single-line container's line fills its cross size. Lines of a
        // wrapping container keep their content size.
        if !container.is_wrap {
            if container.cross_mode == MeasureMode::Exactly {
                if let Some(available) = container.available_inner_cross {
                    cross_dim = available;
                }
            }
            cross_dim = bound_axis(&style, &model, cross_axis, cross_dim + padding_border_cross, cross_owner_size)
                - padding_border_cross;
        }

        if line_index > 0 {
            total_line_cross += container.cross_gap;
        }

        // Cross axis
        if request.perform_layout {
            align::align_line_items(
                tree,
                &container,
                &line,
                container_cross.unwrap_or(cross_dim),
                cross_dim,
                total_line_cross,
                pass,
            )?;
        }

        line_cross_sizes.push(cross_dim);
        total_line_cross += cross_dim;
        max_line_main = max_line_main.max(extent.main);
        line_index += 1;
        start_index = line.end_index;
    }

    // Final size of the container
    let mut measured = Size::new(
        bound_axis_maybe(
            &style,
            &model,
            FlexDirection::Row,
            request.available.width.map(|w| w - model.margin.horizontal()),
            owner.width,
        ),
        bound_axis_maybe(
            &style,
            &model,
            FlexDirection::Column,
            request.available.height.map(|h| h - model.margin.vertical()),
            owner.height,
        ),
    );
    let scrolls = style.overflow == Overflow::Scroll;

    let main_size = measured.get_mut(is_main_row);
    if container.main_mode == MeasureMode::Undefined || (!scrolls && container.main_mode == MeasureMode::AtMost) {
        *main_size = bound_axis(&style, &model, main_axis, max_line_main, main_owner_size);
    } else if container.main_mode == MeasureMode::AtMost && scrolls {
        let limit = available_inner_main.map_or(f32::MAX, |a| a + padding_border_main);
        *main_size = limit
            .min(bound_within_min_max(&style, main_axis, max_line_main, main_owner_size))
            .max(padding_border_main);
    }

    let cross_size = measured.get_mut(!is_main_row);
    if cross_mode == MeasureMode::Undefined || (!scrolls && cross_mode == MeasureMode::AtMost) {
        *cross_size = bound_axis(
            &style,
            &model,
            cross_axis,
            total_line_cross + padding_border_cross,
            cross_owner_size,
        );
    } else if cross_mode == MeasureMode::AtMost && scrolls {
        let limit = available_inner_cross.map_or(f32::MAX, |a| a + padding_border_cross);
        *cross_size = limit
            .min(bound_within_min_max(
                &style,
                cross_axis,
                total_line_cross + padding_border_cross,
                cross_owner_size,
            ))
            .max(padding_border_cross);
    }
    tree.node_mut(id).state.measured = measured;

    if !request.perform_layout {
        return Ok(());
    }

    // Lines against the final cross size
    if line_index > 1 || is_baseline_layout(tree, id) {
        let inner_cross = *measured.get(!is_main_row) - padding_border_cross;
        align::align_lines(
            tree,
            &container,
            &children,
            &line_cross_sizes,
            inner_cross - total_line_cross,
            pass,
        )?;
    }

    if style.flex_wrap == FlexWrap::WrapReverse {
        let container_cross = *measured.get(!is_main_row);
        for &child in &children {
            let node = tree.node_mut(child);
            if node.style.display == Display::None || node.style.position_type != PositionType::Relative {
                continue;
            }
            let edge = cross_axis.leading_edge();
            let child_cross = *node.state.measured.get(cross_axis.is_row());
            let flipped = container_cross - node.state.position.get(edge) - child_cross;
            node.state.position.set(edge, flipped);
        }
    }

    for &child in &children {
        let child_style = &tree.node(child).style;
        if child_style.display != Display::None && child_style.position_type == PositionType::Absolute {
            absolute::layout_absolute_child(tree, &container, child, pass)?;
        }
    }

    // Reversed axes were laid out from their far edge; derive left/top.
    let reversed_main = main_axis.is_reverse();
    let reversed_cross = cross_axis.is_reverse();
    let mut had_overflow = tree.node(id).state.had_overflow;
    for &child in &children {
        let node = tree.node_mut(child);
        if node.style.display == Display::None {
            continue;
        }
        if reversed_main {
            set_trailing_position(&mut node.state, measured, main_axis);
        }
        if reversed_cross {
            set_trailing_position(&mut node.state, measured, cross_axis);
        }
        had_overflow |= node.state.had_overflow;
    }
    tree.node_mut(id).state.had_overflow = had_overflow;
    Ok(())
}

/// The only child allowed to both grow and shrink, if there is exactly one
/// flexible child. It takes all the space without being measured first.
fn single_flexible_child(tree: &LayoutTree, children: &[NodeId], web_defaults: bool) -> Option<NodeId> {
    let mut single = None;
    for &child in children {
        let style = &tree.node(child).style;
        if style.display == Display::None || style.position_type == PositionType::Absolute {
            continue;
        }
        if single.is_some() {
            if is_flexible(style, web_defaults) {
                return None;
            }
        } else if style.flex_grow_factor() > 0.0 && style.flex_shrink_factor(web_defaults) > 0.0 {
            single = Some(child);
        }
    }
    single
}

/// Leading positions of a child before justification: its margins plus
/// its relative offsets, along both container axes.
fn set_initial_position(tree: &mut LayoutTree, container: &FlexContainer, child: NodeId) {
    let style = tree.node(child).style;
    let child_direction = style.direction.resolve(container.direction);
    let model = BoxModel::resolve(&style, container.direction, container.available_inner_width);

    let main_offset = relative_offset(
        &style,
        child_direction,
        container.main_axis,
        container.available_inner_main,
    );
    let cross_offset = relative_offset(
        &style,
        child_direction,
        container.cross_axis,
        container.available_inner_cross,
    );

    let position = &mut tree.node_mut(child).state.position;
    *position = crate::EdgeSizes::ZERO;
    position.set(
        container.main_axis.leading_edge(),
        model.margin.leading(container.main_axis) + main_offset,
    );
    position.set(
        container.cross_axis.leading_edge(),
        model.margin.leading(container.cross_axis) + cross_offset,
    );
}

fn set_trailing_position(state: &mut LayoutState, container_size: Size<f32>, axis: FlexDirection) {
    let row = axis.is_row();
    let value = *container_size.get(row) - *state.measured.get(row) - state.position.get(axis.leading_edge());
    state.position.set(axis.trailing_edge(), value);
}

/// Reset a hidden subtree to an empty layout at the origin.
fn zero_out_layout(tree: &mut LayoutTree, id: NodeId) {
    let mut stack = vec![id];
    while let Some(current) = stack.pop() {
        let node = tree.node_mut(current);
        node.state = LayoutState::default();
        node.layout = Layout::default();
        node.dirty = false;
        stack.extend(node.children.iter().copied());
    }
}
