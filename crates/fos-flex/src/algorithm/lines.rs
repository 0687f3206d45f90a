//! Flex lines and free space distribution

use fos_style::{AlignItems, Dimension, Display, PositionType, Size, Style};

use super::flexbox::FlexContainer;
use super::resolve::{
    BoxModel, align_item, bound_axis, bound_within_min_max, constrain_max_size_for_mode,
    is_flexible, is_style_dim_defined, margin_is_auto, resolved_dim,
};
use super::{LayoutReason, LayoutRequest, Pass, layout_node};
use crate::geometry::{approx_eq, pick};
use crate::{LayoutError, LayoutTree, MeasureMode, NodeId};

/// In-flow children placed on one line
#[derive(Debug, Clone, Default)]
pub(super) struct FlexLine {
    pub items: Vec<NodeId>,
    /// Index into the container's children where the next line starts
    pub end_index: usize,
    /// Outer bases after min/max, plus gaps
    pub size_consumed: f32,
    pub total_flex_grow: f32,
    pub total_flex_shrink_scaled: f32,
    pub remaining_free_space: f32,
}

impl FlexLine {
    /// Items still do not fit after shrinking
    pub fn overflows(&self) -> bool {
        self.remaining_free_space < 0.0 && !approx_eq(self.remaining_free_space, 0.0)
    }
}

/// Collect the children of the next line, starting at `start_index`.
///
/// A wrapping container breaks before the first child that would push the
/// line past the available main size; a line always takes at least one
/// child.
pub(super) fn collect_line(
    tree: &mut LayoutTree,
    container: &FlexContainer,
    children: &[NodeId],
    start_index: usize,
    line_index: usize,
    pass: Pass,
) -> FlexLine {
    let web_defaults = pass.config.use_web_defaults;
    let main_axis = container.main_axis;
    let mut line = FlexLine {
        end_index: children.len(),
        ..Default::default()
    };

    for (index, &child) in children.iter().enumerate().skip(start_index) {
        let node = tree.node(child);
        let style = node.style;
        if style.display == Display::None || style.position_type == PositionType::Absolute {
            continue;
        }

        let margin = BoxModel::resolve(&style, container.direction, container.available_inner_width)
            .margin
            .axis(main_axis);
        let basis = node.state.computed_flex_basis;
        let clamped = bound_within_min_max(&style, main_axis, basis, container.main_owner_size);
        let gap = if line.items.is_empty() { 0.0 } else { container.main_gap };
        let outer = clamped + margin + gap;

        if let Some(available) = container.available_inner_main {
            if container.is_wrap && !line.items.is_empty() && line.size_consumed + outer > available {
                line.end_index = index;
                break;
            }
        }

        line.size_consumed += outer;
        if is_flexible(&style, web_defaults) {
            line.total_flex_grow += style.flex_grow_factor();
            line.total_flex_shrink_scaled += -style.flex_shrink_factor(web_defaults) * basis;
        }
        line.items.push(child);
        tree.node_mut(child).state.line_index = line_index;
    }

    // Grow factors summing below one hand out only part of the space.
    if line.total_flex_grow > 0.0 && line.total_flex_grow < 1.0 {
        line.total_flex_grow = 1.0;
    }
    line
}

/// Distribute the line's free space and lay out every item at its final
/// main size.
///
/// Items whose share would break their min or max are frozen at that
/// bound and the rest of the space is shared out again, until no more
/// items freeze. `available_main` is the main size the line is laid out
/// against.
pub(super) fn resolve_flexible_lengths(
    tree: &mut LayoutTree,
    container: &FlexContainer,
    line: &mut FlexLine,
    available_main: Option<f32>,
    pass: Pass,
) -> Result<(), LayoutError> {
    let web_defaults = pass.config.use_web_defaults;
    let original_free_space = line.remaining_free_space;
    let growing = original_free_space > 0.0;
    let shrinking = original_free_space < 0.0;

    let mut frozen: Vec<Option<f32>> = vec![None; line.items.len()];
    let mut remaining = original_free_space;
    let mut total_grow = line.total_flex_grow;
    let mut total_shrink_scaled = line.total_flex_shrink_scaled;

    loop {
        let mut delta = 0.0;
        let mut froze_any = false;
        for (slot, &child) in frozen.iter_mut().zip(&line.items) {
            if slot.is_some() {
                continue;
            }
            let style = tree.node(child).style;
            let basis = clamped_basis(tree, container, child);

            if shrinking {
                let scaled = -style.flex_shrink_factor(web_defaults) * basis;
                if scaled != 0.0 && total_shrink_scaled != 0.0 {
                    let base = basis + remaining / total_shrink_scaled * scaled;
                    let bound = child_bound(tree, container, child, base, available_main);
                    if !approx_eq(base, bound) {
                        delta += bound - basis;
                        total_shrink_scaled -= scaled;
                        *slot = Some(bound);
                        froze_any = true;
                    }
                }
            } else if growing {
                let grow = style.flex_grow_factor();
                if grow != 0.0 && total_grow > 0.0 {
                    let base = basis + remaining / total_grow * grow;
                    let bound = child_bound(tree, container, child, base, available_main);
                    if !approx_eq(base, bound) {
                        delta += bound - basis;
                        total_grow -= grow;
                        *slot = Some(bound);
                        froze_any = true;
                    }
                }
            }
        }
        remaining -= delta;
        if !froze_any {
            break;
        }
    }

    let mut distributed = 0.0;
    for (index, &child) in line.items.iter().enumerate() {
        let style = tree.node(child).style;
        let basis = clamped_basis(tree, container, child);

        let size = if let Some(size) = frozen[index] {
            size
        } else if shrinking {
            let scaled = -style.flex_shrink_factor(web_defaults) * basis;
            if scaled != 0.0 && total_shrink_scaled != 0.0 {
                let base = basis + remaining / total_shrink_scaled * scaled;
                child_bound(tree, container, child, base, available_main)
            } else {
                basis
            }
        } else if growing {
            let grow = style.flex_grow_factor();
            if grow != 0.0 && total_grow > 0.0 {
                let base = basis + remaining / total_grow * grow;
                child_bound(tree, container, child, base, available_main)
            } else {
                basis
            }
        } else {
            basis
        };
        distributed += size - basis;

        layout_flexed_child(tree, container, child, size, pass)?;
    }

    line.remaining_free_space = original_free_space - distributed;
    tracing::trace!(
        "{:?} line of {} items: {} of {} free space left",
        container.id,
        line.items.len(),
        line.remaining_free_space,
        original_free_space
    );
    Ok(())
}

fn clamped_basis(tree: &LayoutTree, container: &FlexContainer, child: NodeId) -> f32 {
    let node = tree.node(child);
    bound_within_min_max(
        &node.style,
        container.main_axis,
        node.state.computed_flex_basis,
        container.main_owner_size,
    )
}

fn child_bound(
    tree: &LayoutTree,
    container: &FlexContainer,
    child: NodeId,
    value: f32,
    available_main: Option<f32>,
) -> f32 {
    let style = &tree.node(child).style;
    let model = BoxModel::resolve(style, container.direction, container.available_inner_width);
    bound_axis(style, &model, container.main_axis, value, available_main)
}

/// Lay out a child at its final main size. Its cross size is exact when
/// the child will be stretched anyway or is otherwise determined.
fn layout_flexed_child(
    tree: &mut LayoutTree,
    container: &FlexContainer,
    child: NodeId,
    main_size: f32,
    pass: Pass,
) -> Result<(), LayoutError> {
    let style = tree.node(child).style;
    let main_axis = container.main_axis;
    let cross_axis = container.cross_axis;
    let is_main_row = container.is_main_row;
    let owner_width = container.available_inner_width;
    let model = BoxModel::resolve(&style, container.direction, owner_width);
    let margin_main = model.margin.axis(main_axis);
    let margin_cross = model.margin.axis(cross_axis);

    let mut main = Some(main_size + margin_main);
    let mut main_mode = MeasureMode::Exactly;
    let mut cross;
    let mut cross_mode;

    let cross_defined = is_style_dim_defined(&style, cross_axis, container.available_inner_cross);
    let auto_cross_margins = has_auto_cross_margin(&style, container);
    let stretches = align_item(&container.style, &style) == AlignItems::Stretch;

    if let Some(ratio) = style.aspect_ratio {
        let content_main = main_size;
        let content_cross = if is_main_row { content_main / ratio } else { content_main * ratio };
        cross = Some(content_cross + margin_cross);
        cross_mode = MeasureMode::Exactly;
    } else if container.available_inner_cross.is_some()
        && !cross_defined
        && container.cross_mode == MeasureMode::Exactly
        && !(container.is_wrap && container.flex_basis_overflows)
        && stretches
        && !auto_cross_margins
    {
        cross = container.available_inner_cross;
        cross_mode = MeasureMode::Exactly;
    } else if !cross_defined {
        cross = container.available_inner_cross;
        cross_mode = if cross.is_some() { MeasureMode::AtMost } else { MeasureMode::Undefined };
    } else {
        cross = resolved_dim(&style, cross_axis, container.available_inner_cross).map(|c| c + margin_cross);
        let loose_percent = matches!(style.resolved_dimension(cross_axis.is_row()), Dimension::Percent(_))
            && container.cross_mode != MeasureMode::Exactly;
        cross_mode = if cross.is_none() || loose_percent {
            MeasureMode::Undefined
        } else {
            MeasureMode::Exactly
        };
    }

    constrain_max_size_for_mode(
        &style,
        margin_main,
        main_axis,
        container.available_inner_main,
        &mut main_mode,
        &mut main,
    );
    constrain_max_size_for_mode(
        &style,
        margin_cross,
        cross_axis,
        container.available_inner_cross,
        &mut cross_mode,
        &mut cross,
    );

    // A stretched child gets laid out again at its final cross size.
    let requires_stretch = !cross_defined && stretches && !auto_cross_margins;

    let request = LayoutRequest {
        available: Size::new(pick(is_main_row, main, cross), pick(is_main_row, cross, main)),
        modes: Size::new(
            pick(is_main_row, main_mode, cross_mode),
            pick(is_main_row, cross_mode, main_mode),
        ),
        owner: Size::new(container.available_inner_width, container.available_inner_height),
        owner_direction: container.direction,
        perform_layout: container.perform_layout && !requires_stretch,
    };
    layout_node(tree, child, request, LayoutReason::Flex, pass)?;
    Ok(())
}

/// Either cross-axis margin of the child is `auto`
pub(super) fn has_auto_cross_margin(style: &Style, container: &FlexContainer) -> bool {
    let axis = container.cross_axis;
    margin_is_auto(style, container.direction, axis.leading_edge())
        || margin_is_auto(style, container.direction, axis.trailing_edge())
}
