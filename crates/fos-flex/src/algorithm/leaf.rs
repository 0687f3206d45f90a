//! Nodes sized without running flex distribution

use fos_style::{FlexDirection, Size};

use super::LayoutRequest;
use super::resolve::{BoxModel, bound_axis, bound_axis_maybe};
use crate::{LayoutError, LayoutTree, MeasureMode, NodeId};

/// Size a leaf through its measure capability.
pub(super) fn measure_leaf(
    tree: &mut LayoutTree,
    id: NodeId,
    request: &LayoutRequest,
    model: &BoxModel,
) -> Result<Size<f32>, LayoutError> {
    let style = tree.node(id).style;
    let row = FlexDirection::Row;
    let column = FlexDirection::Column;
    let padding_border_row = model.padding_border_axis(row);
    let padding_border_column = model.padding_border_axis(column);
    let margin_row = model.margin.horizontal();
    let margin_column = model.margin.vertical();
    let Size { width: available_width, height: available_height } = request.available;
    let Size { width: width_mode, height: height_mode } = request.modes;

    if width_mode == MeasureMode::Exactly && height_mode == MeasureMode::Exactly {
        // Both sides are fixed; the content cannot change the result.
        return Ok(Size::new(
            bound_axis_maybe(&style, model, row, available_width.map(|w| w - margin_row), request.owner.width),
            bound_axis_maybe(&style, model, column, available_height.map(|h| h - margin_column), request.owner.height),
        ));
    }

    // Never hand a negative size to the host.
    let inner_width = available_width.map(|w| (w - margin_row - padding_border_row).max(0.0));
    let inner_height = available_height.map(|h| (h - margin_column - padding_border_column).max(0.0));

    let Some(measure) = tree.node_mut(id).measure.as_mut() else {
        return Ok(Size::new(padding_border_row, padding_border_column));
    };
    let content = match measure.measure(id, inner_width, width_mode, inner_height, height_mode) {
        Ok(size) => size,
        Err(source) => {
            tracing::warn!("Measure function of {:?} failed: {}", id, source);
            return Err(LayoutError::Measure { node: id, source });
        }
    };

    let width = match width_mode {
        MeasureMode::Undefined | MeasureMode::AtMost => Some(content.width + padding_border_row),
        MeasureMode::Exactly => available_width.map(|w| w - margin_row),
    };
    let height = match height_mode {
        MeasureMode::Undefined | MeasureMode::AtMost => Some(content.height + padding_border_column),
        MeasureMode::Exactly => available_height.map(|h| h - margin_column),
    };
    Ok(Size::new(
        bound_axis_maybe(&style, model, row, width.filter(|w| !w.is_nan()), request.owner.width),
        bound_axis_maybe(&style, model, column, height.filter(|h| !h.is_nan()), request.owner.height),
    ))
}

/// Size a container without children: padding and border, or the exact
/// space it was given.
pub(super) fn empty_container(
    tree: &LayoutTree,
    id: NodeId,
    request: &LayoutRequest,
    model: &BoxModel,
) -> Size<f32> {
    let style = &tree.node(id).style;
    let axis_size = |axis: FlexDirection, available: Option<f32>, mode: MeasureMode, margin: f32, owner: Option<f32>| {
        match mode {
            MeasureMode::Exactly => bound_axis_maybe(style, model, axis, available.map(|a| a - margin), owner),
            MeasureMode::Undefined | MeasureMode::AtMost => {
                bound_axis(style, model, axis, model.padding_border_axis(axis), owner)
            }
        }
    };
    Size::new(
        axis_size(
            FlexDirection::Row,
            request.available.width,
            request.modes.width,
            model.margin.horizontal(),
            request.owner.width,
        ),
        axis_size(
            FlexDirection::Column,
            request.available.height,
            request.modes.height,
            model.margin.vertical(),
            request.owner.height,
        ),
    )
}

/// Size a node whose constraints already decide its size, if they do.
///
/// That is the case when both axes are exact, or when an at-most bound
/// leaves no room at all.
pub(super) fn fixed_size(
    tree: &LayoutTree,
    id: NodeId,
    request: &LayoutRequest,
    model: &BoxModel,
) -> Option<Size<f32>> {
    let Size { width: available_width, height: available_height } = request.available;
    let Size { width: width_mode, height: height_mode } = request.modes;
    let no_room = |available: Option<f32>, mode: MeasureMode| {
        mode == MeasureMode::AtMost && available.is_some_and(|a| a <= 0.0)
    };

    if !(no_room(available_width, width_mode)
        || no_room(available_height, height_mode)
        || (width_mode == MeasureMode::Exactly && height_mode == MeasureMode::Exactly))
    {
        return None;
    }

    let style = &tree.node(id).style;
    let axis_size = |axis: FlexDirection, available: Option<f32>, mode: MeasureMode, margin: f32, owner: Option<f32>| {
        let value = match available {
            None => 0.0,
            Some(a) if mode == MeasureMode::AtMost && a < 0.0 => 0.0,
            Some(a) => a - margin,
        };
        bound_axis(style, model, axis, value, owner)
    };
    Some(Size::new(
        axis_size(
            FlexDirection::Row,
            available_width,
            width_mode,
            model.margin.horizontal(),
            request.owner.width,
        ),
        axis_size(
            FlexDirection::Column,
            available_height,
            height_mode,
            model.margin.vertical(),
            request.owner.height,
        ),
    ))
}
