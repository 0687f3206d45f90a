//! Main-axis justification and cross-axis alignment

use fos_style::{AlignContent, AlignItems, Display, JustifyContent, PositionType, Size};

use super::baseline::{baseline, is_baseline_layout};
use super::flexbox::FlexContainer;
use super::lines::{FlexLine, has_auto_cross_margin};
use super::resolve::{
    BoxModel, align_item, constrain_max_size_for_mode, is_style_dim_defined, margin_is_auto,
    relative_offset,
};
use super::{LayoutReason, LayoutRequest, Pass, layout_node};
use crate::geometry::{float_eq, pick};
use crate::{LayoutError, LayoutTree, MeasureMode, NodeId};

/// Extent of one line once its items are placed along the main axis
#[derive(Debug, Clone, Copy, Default)]
pub(super) struct LineExtent {
    /// Main size including the container's padding and border
    pub main: f32,
    /// Largest outer cross size of the items
    pub cross: f32,
}

/// Place the line's items along the main axis.
///
/// Auto margins take the free space first; justify-content only applies
/// when there are none.
pub(super) fn justify_line(
    tree: &mut LayoutTree,
    container: &FlexContainer,
    line: &FlexLine,
    available_main: Option<f32>,
    can_skip_flex: bool,
) -> LineExtent {
    let style = &container.style;
    let main_axis = container.main_axis;
    let cross_axis = container.cross_axis;
    let mut remaining = line.remaining_free_space;

    if container.main_mode == MeasureMode::AtMost && remaining > 0.0 {
        let min_inner = style
            .min_size
            .get(container.is_main_row)
            .resolve(container.main_owner_size)
            .map(|min| min - container.model.padding_border_axis(main_axis));
        remaining = match (min_inner, available_main) {
            (Some(min), Some(available)) => (min - (available - remaining)).max(0.0),
            _ => 0.0,
        };
    }

    let auto_margins: usize = line
        .items
        .iter()
        .map(|&child| {
            let child_style = &tree.node(child).style;
            usize::from(margin_is_auto(child_style, container.direction, main_axis.leading_edge()))
                + usize::from(margin_is_auto(child_style, container.direction, main_axis.trailing_edge()))
        })
        .sum();
    let auto_margin_share = if auto_margins > 0 {
        remaining.max(0.0) / auto_margins as f32
    } else {
        0.0
    };

    let count = line.items.len();
    let mut leading = 0.0;
    let mut between = 0.0;
    if auto_margins == 0 && count > 0 {
        match style.justify_content {
            JustifyContent::FlexStart => {}
            JustifyContent::Center => leading = remaining / 2.0,
            JustifyContent::FlexEnd => leading = remaining,
            JustifyContent::SpaceBetween => {
                if count > 1 {
                    between = remaining.max(0.0) / (count - 1) as f32;
                }
            }
            JustifyContent::SpaceEvenly => {
                between = remaining / (count + 1) as f32;
                leading = between;
            }
            JustifyContent::SpaceAround => {
                between = remaining / count as f32;
                leading = between / 2.0;
            }
        }
    }
    between += container.main_gap;

    let baseline_layout = is_baseline_layout(tree, container.id);
    let mut main_dim = container.model.leading_padding_border(main_axis) + leading;
    let mut cross_dim = 0.0_f32;
    let mut max_ascent = 0.0_f32;
    let mut max_descent = 0.0_f32;

    for (index, &child) in line.items.iter().enumerate() {
        let child_style = tree.node(child).style;
        let model = BoxModel::resolve(&child_style, container.direction, container.available_inner_width);

        if margin_is_auto(&child_style, container.direction, main_axis.leading_edge()) {
            main_dim += auto_margin_share;
        }
        if container.perform_layout {
            let edge = main_axis.leading_edge();
            let position = &mut tree.node_mut(child).state.position;
            position.set(edge, position.get(edge) + main_dim);
        }
        if margin_is_auto(&child_style, container.direction, main_axis.trailing_edge()) {
            main_dim += auto_margin_share;
        }
        if index + 1 < count {
            main_dim += between;
        }

        let state = &tree.node(child).state;
        if can_skip_flex {
            // Measuring only, with an exact cross size: the basis is the
            // child's final main size.
            main_dim += model.margin.axis(main_axis) + state.computed_flex_basis;
            if let Some(available) = container.available_inner_cross {
                cross_dim = available;
            }
            continue;
        }

        main_dim += state.measured.get(container.is_main_row) + model.margin.axis(main_axis);
        if baseline_layout {
            let measured_height = state.measured.height;
            let ascent = baseline(tree, child) + model.margin.top;
            let descent = measured_height + model.margin.vertical() - ascent;
            max_ascent = max_ascent.max(ascent);
            max_descent = max_descent.max(descent);
        } else {
            let outer_cross = state.measured.get(cross_axis.is_row()) + model.margin.axis(cross_axis);
            cross_dim = cross_dim.max(outer_cross);
        }
    }
    main_dim += container.model.trailing_padding_border(main_axis);

    if baseline_layout {
        cross_dim = max_ascent + max_descent;
    }
    LineExtent { main: main_dim, cross: cross_dim }
}

/// Align the line's items on the cross axis, stretching those that ask
/// for it to `line_cross`.
///
/// `container_cross` is the inner cross size items are aligned against;
/// `line_offset` is where the line starts.
pub(super) fn align_line_items(
    tree: &mut LayoutTree,
    container: &FlexContainer,
    line: &FlexLine,
    container_cross: f32,
    line_cross: f32,
    line_offset: f32,
    pass: Pass,
) -> Result<(), LayoutError> {
    let main_axis = container.main_axis;
    let cross_axis = container.cross_axis;
    let is_main_row = container.is_main_row;

    for &child in &line.items {
        let child_style = tree.node(child).style;
        let model = BoxModel::resolve(&child_style, container.direction, container.available_inner_width);
        let align = align_item(&container.style, &child_style);
        let auto_margins = has_auto_cross_margin(&child_style, container);
        let mut leading_cross = container.model.leading_padding_border(cross_axis);

        if align == AlignItems::Stretch && !auto_margins {
            if !is_style_dim_defined(&child_style, cross_axis, container.available_inner_cross) {
                let measured = tree.node(child).state.measured;
                let margin_main = model.margin.axis(main_axis);
                let margin_cross = model.margin.axis(cross_axis);
                let content_main = *measured.get(is_main_row);

                let mut main = Some(content_main + margin_main);
                let mut cross = Some(match child_style.aspect_ratio {
                    Some(ratio) if is_main_row => margin_cross + content_main / ratio,
                    Some(ratio) => margin_cross + content_main * ratio,
                    None => line_cross,
                });
                let mut main_mode = MeasureMode::Exactly;
                let mut cross_mode = MeasureMode::Exactly;
                constrain_max_size_for_mode(
                    &child_style,
                    margin_main,
                    main_axis,
                    container.available_inner_main,
                    &mut main_mode,
                    &mut main,
                );
                constrain_max_size_for_mode(
                    &child_style,
                    margin_cross,
                    cross_axis,
                    container.available_inner_cross,
                    &mut cross_mode,
                    &mut cross,
                );

                let request = LayoutRequest {
                    available: Size::new(pick(is_main_row, main, cross), pick(is_main_row, cross, main)),
                    modes: Size::new(
                        pick(is_main_row, main_mode, cross_mode),
                        pick(is_main_row, cross_mode, main_mode),
                    ),
                    owner: Size::new(container.available_inner_width, container.available_inner_height),
                    owner_direction: container.direction,
                    perform_layout: true,
                };
                layout_node(tree, child, request, LayoutReason::Stretch, pass)?;
            }
        } else {
            let measured = tree.node(child).state.measured;
            let outer_cross = measured.get(cross_axis.is_row()) + model.margin.axis(cross_axis);
            let remaining = container_cross - outer_cross;
            let leading_auto = margin_is_auto(&child_style, container.direction, cross_axis.leading_edge());
            let trailing_auto = margin_is_auto(&child_style, container.direction, cross_axis.trailing_edge());

            leading_cross += match (leading_auto, trailing_auto) {
                (true, true) => (remaining / 2.0).max(0.0),
                (false, true) => 0.0,
                (true, false) => remaining.max(0.0),
                (false, false) => match align {
                    AlignItems::FlexStart | AlignItems::Baseline | AlignItems::Stretch => 0.0,
                    AlignItems::Center => remaining / 2.0,
                    AlignItems::FlexEnd => remaining,
                },
            };
        }

        let edge = cross_axis.leading_edge();
        let position = &mut tree.node_mut(child).state.position;
        position.set(edge, position.get(edge) + line_offset + leading_cross);
    }
    Ok(())
}

/// Distribute the container's spare cross space between lines and align
/// every item within its line.
///
/// `line_cross_sizes` holds the cross size of each line in order;
/// `remaining` is the inner cross size not taken by lines or gaps.
pub(super) fn align_lines(
    tree: &mut LayoutTree,
    container: &FlexContainer,
    children: &[NodeId],
    line_cross_sizes: &[f32],
    remaining: f32,
    pass: Pass,
) -> Result<(), LayoutError> {
    let cross_axis = container.cross_axis;
    let is_main_row = container.is_main_row;
    let line_count = line_cross_sizes.len();
    if line_count == 0 {
        return Ok(());
    }

    let mut current_lead = container.model.leading_padding_border(cross_axis);
    let mut extra_line_size = 0.0;
    let mut extra_between = 0.0;
    match container.style.align_content {
        AlignContent::FlexStart => {}
        AlignContent::FlexEnd => current_lead += remaining,
        AlignContent::Center => current_lead += remaining / 2.0,
        AlignContent::Stretch => {
            if remaining > 0.0 {
                extra_line_size = remaining / line_count as f32;
            }
        }
        AlignContent::SpaceBetween => {
            if remaining > 0.0 && line_count > 1 {
                extra_between = remaining / (line_count - 1) as f32;
            }
        }
        AlignContent::SpaceAround => {
            if remaining > 0.0 {
                extra_between = remaining / line_count as f32;
                current_lead += extra_between / 2.0;
            } else {
                current_lead += remaining / 2.0;
            }
        }
        AlignContent::SpaceEvenly => {
            if remaining > 0.0 {
                extra_between = remaining / (line_count + 1) as f32;
                current_lead += extra_between;
            } else {
                current_lead += remaining / 2.0;
            }
        }
    }

    let mut index = 0;
    for (line_index, &line_size) in line_cross_sizes.iter().enumerate() {
        let line_height = line_size + extra_line_size;

        // Children of this line; absolute and hidden ones are skipped.
        let mut items = Vec::new();
        while index < children.len() {
            let child = children[index];
            let style = &tree.node(child).style;
            if style.display == Display::None || style.position_type == PositionType::Absolute {
                index += 1;
                continue;
            }
            if tree.node(child).state.line_index != line_index {
                break;
            }
            items.push(child);
            index += 1;
        }

        let mut max_ascent = 0.0_f32;
        for &child in &items {
            if align_item(&container.style, &tree.node(child).style) == AlignItems::Baseline {
                let ascent = baseline(tree, child) + child_model(tree, container, child).margin.top;
                max_ascent = max_ascent.max(ascent);
            }
        }

        for &child in &items {
            let style = tree.node(child).style;
            let model = child_model(tree, container, child);
            let child_direction = style.direction.resolve(container.direction);
            let offset = relative_offset(&style, child_direction, cross_axis, container.available_inner_cross);
            let measured = tree.node(child).state.measured;
            let child_cross = *measured.get(cross_axis.is_row());
            let margin_leading = model.margin.leading(cross_axis);
            let margin_trailing = model.margin.trailing(cross_axis);

            let position = match align_item(&container.style, &style) {
                AlignItems::FlexStart => current_lead + margin_leading,
                AlignItems::FlexEnd => current_lead + line_height - margin_trailing - child_cross,
                AlignItems::Center => {
                    let outer = child_cross + margin_leading + margin_trailing;
                    current_lead + margin_leading + (line_height - outer) / 2.0
                }
                AlignItems::Stretch => {
                    if !is_style_dim_defined(&style, cross_axis, container.available_inner_cross) {
                        let stretched = line_height - margin_leading - margin_trailing;
                        if !float_eq(Some(stretched), Some(child_cross)) {
                            let main = measured.get(is_main_row) + model.margin.axis(container.main_axis);
                            let cross = line_height;
                            let request = LayoutRequest {
                                available: Size::new(
                                    Some(pick(is_main_row, main, cross)),
                                    Some(pick(is_main_row, cross, main)),
                                ),
                                modes: Size::new(MeasureMode::Exactly, MeasureMode::Exactly),
                                owner: Size::new(container.available_inner_width, container.available_inner_height),
                                owner_direction: container.direction,
                                perform_layout: true,
                            };
                            layout_node(tree, child, request, LayoutReason::MultilineStretch, pass)?;
                        }
                    }
                    current_lead + margin_leading
                }
                AlignItems::Baseline => current_lead + max_ascent - baseline(tree, child),
            };
            tree.node_mut(child)
                .state
                .position
                .set(cross_axis.leading_edge(), position + offset);
        }

        current_lead += line_height + extra_between;
        if line_index + 1 < line_count {
            current_lead += container.cross_gap;
        }
    }

    tracing::trace!(
        "{:?} aligned {} lines, {} cross space left",
        container.id,
        line_count,
        remaining
    );
    Ok(())
}

fn child_model(tree: &LayoutTree, container: &FlexContainer, child: NodeId) -> BoxModel {
    BoxModel::resolve(
        &tree.node(child).style,
        container.direction,
        container.available_inner_width,
    )
}
