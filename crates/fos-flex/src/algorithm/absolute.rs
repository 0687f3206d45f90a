//! Absolutely positioned children
//!
//! Laid out after the container's own size is final. Offsets and
//! percentages refer to the container's inner size; a child without
//! offsets on an axis sits where justify-content or align-items would put
//! a lone item.

use fos_style::{AlignItems, FlexDirection, FlexWrap, JustifyContent, Size};

use super::flexbox::FlexContainer;
use super::resolve::{
    BoxModel, align_item, bound_axis, is_style_dim_defined, leading_offset, resolved_dim,
    trailing_offset,
};
use super::{LayoutReason, LayoutRequest, Pass, layout_node};
use crate::{LayoutError, LayoutTree, MeasureMode, NodeId};

/// Size and place one absolutely positioned child of `container`.
pub(super) fn layout_absolute_child(
    tree: &mut LayoutTree,
    container: &FlexContainer,
    child: NodeId,
    pass: Pass,
) -> Result<(), LayoutError> {
    let container_size = tree.node(container.id).state.measured;
    let border = container.model.border;
    let inner = Size::new(
        container_size.width - container.model.padding_border_axis(FlexDirection::Row),
        container_size.height - container.model.padding_border_axis(FlexDirection::Column),
    );
    let owner = Size::new(Some(inner.width), Some(inner.height));

    let style = tree.node(child).style;
    let direction = style.direction.resolve(container.direction);
    let model = BoxModel::resolve(&style, container.direction, owner.width);
    let margin_row = model.margin.horizontal();
    let margin_column = model.margin.vertical();

    // Explicit size, or the space between two offsets
    let axis_size = |axis: FlexDirection, owner_size: Option<f32>, container_outer: f32, margin: f32| {
        if is_style_dim_defined(&style, axis, owner_size) {
            return resolved_dim(&style, axis, owner_size).map(|size| size + margin);
        }
        let leading = leading_offset(&style, direction, axis, owner_size)?;
        let trailing = trailing_offset(&style, direction, axis, owner_size)?;
        let outer = container_outer - border.axis(axis) - leading - trailing;
        Some(bound_axis(&style, &model, axis, outer - margin, owner_size) + margin)
    };
    let mut width = axis_size(FlexDirection::Row, owner.width, container_size.width, margin_row);
    let mut height = axis_size(FlexDirection::Column, owner.height, container_size.height, margin_column);

    if let Some(ratio) = style.aspect_ratio {
        match (width, height) {
            (None, Some(h)) => width = Some(margin_row + (h - margin_column) * ratio),
            (Some(w), None) => height = Some(margin_column + (w - margin_row) / ratio),
            _ => {}
        }
    }

    if width.is_none() || height.is_none() {
        let mut width_mode = if width.is_some() { MeasureMode::Exactly } else { MeasureMode::Undefined };
        let height_mode = if height.is_some() { MeasureMode::Exactly } else { MeasureMode::Undefined };

        // In a column an unsized child may not be wider than the container.
        let container_width_mode = if container.is_main_row { container.main_mode } else { container.cross_mode };
        if !container.is_main_row
            && width.is_none()
            && container_width_mode != MeasureMode::Undefined
            && inner.width > 0.0
        {
            width = Some(inner.width);
            width_mode = MeasureMode::AtMost;
        }

        let request = LayoutRequest {
            available: Size::new(width, height),
            modes: Size::new(width_mode, height_mode),
            owner,
            owner_direction: container.direction,
            perform_layout: false,
        };
        layout_node(tree, child, request, LayoutReason::AbsMeasure, pass)?;
        let measured = tree.node(child).state.measured;
        width = Some(measured.width + margin_row);
        height = Some(measured.height + margin_column);
    }

    let request = LayoutRequest {
        available: Size::new(width, height),
        modes: Size::new(MeasureMode::Exactly, MeasureMode::Exactly),
        owner,
        owner_direction: container.direction,
        perform_layout: true,
    };
    layout_node(tree, child, request, LayoutReason::AbsLayout, pass)?;

    let child_size = tree.node(child).state.measured;
    let justify = match container.style.justify_content {
        JustifyContent::Center => Placement::Center,
        JustifyContent::FlexEnd => Placement::End,
        _ => Placement::Start,
    };
    let align = match align_item(&container.style, &style) {
        AlignItems::Center => Placement::Center,
        AlignItems::FlexEnd => Placement::End,
        _ => Placement::Start,
    };
    let align = match (align, container.style.flex_wrap) {
        (Placement::Start, FlexWrap::WrapReverse) => Placement::End,
        (Placement::End, FlexWrap::WrapReverse) => Placement::Start,
        (placement, _) => placement,
    };

    for (axis, placement) in [(container.main_axis, justify), (container.cross_axis, align)] {
        let row = axis.is_row();
        let container_extent = *container_size.get(row);
        let child_extent = *child_size.get(row);
        let owner_size = *owner.get(row);

        let position = if let Some(offset) = leading_offset(&style, direction, axis, owner_size) {
            border.leading(axis) + offset + model.margin.leading(axis)
        } else if let Some(offset) = trailing_offset(&style, direction, axis, owner_size) {
            container_extent - child_extent - border.trailing(axis) - offset - model.margin.trailing(axis)
        } else {
            match placement {
                Placement::Start => {
                    container.model.leading_padding_border(axis) + model.margin.leading(axis)
                }
                Placement::Center => {
                    let free = *inner.get(row) - child_extent - model.margin.axis(axis);
                    container.model.leading_padding_border(axis) + model.margin.leading(axis) + free / 2.0
                }
                Placement::End => {
                    container_extent
                        - container.model.trailing_padding_border(axis)
                        - model.margin.trailing(axis)
                        - child_extent
                }
            }
        };
        tree.node_mut(child).state.position.set(axis.leading_edge(), position);
    }

    tracing::trace!(
        "{:?} absolute child {:?} at {}x{}",
        container.id,
        child,
        child_size.width,
        child_size.height
    );
    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Placement {
    Start,
    Center,
    End,
}
