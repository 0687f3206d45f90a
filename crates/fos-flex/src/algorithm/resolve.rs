//! Style resolution helpers shared by the layout steps

use fos_style::{
    AlignItems, Dimension, Direction, FlexDirection, PhysicalEdge, PositionType, Style,
};

use crate::MeasureMode;
use crate::geometry::EdgeSizes;

/// Margin, padding and border of one node in absolute units
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct BoxModel {
    pub margin: EdgeSizes,
    pub padding: EdgeSizes,
    pub border: EdgeSizes,
}

impl BoxModel {
    /// Resolve a node's edges.
    ///
    /// `owner_direction` is resolved against the node's own direction for
    /// `start`/`end`. Percentages refer to the owner's width on every edge.
    /// Undefined and auto margins count as zero, and padding and border are
    /// never negative.
    pub fn resolve(style: &Style, owner_direction: Direction, owner_width: Option<f32>) -> Self {
        let direction = style.direction.resolve(owner_direction);
        let mut model = BoxModel::default();
        for edge in PhysicalEdge::ALL {
            let margin = style.margin.resolve(edge, direction).resolve(owner_width);
            model.margin.set(edge, margin.unwrap_or(0.0));

            let padding = style.padding.resolve(edge, direction).resolve(owner_width);
            model.padding.set(edge, padding.unwrap_or(0.0).max(0.0));

            let border = match style.border.resolve(edge, direction) {
                Dimension::Points(v) => v.max(0.0),
                _ => 0.0,
            };
            model.border.set(edge, border);
        }
        model
    }

    /// Padding plus border along an axis
    pub fn padding_border_axis(&self, axis: FlexDirection) -> f32 {
        self.padding.axis(axis) + self.border.axis(axis)
    }

    pub fn leading_padding_border(&self, axis: FlexDirection) -> f32 {
        self.padding.leading(axis) + self.border.leading(axis)
    }

    pub fn trailing_padding_border(&self, axis: FlexDirection) -> f32 {
        self.padding.trailing(axis) + self.border.trailing(axis)
    }
}

/// The margin on an edge is `auto`
pub(crate) fn margin_is_auto(style: &Style, owner_direction: Direction, edge: PhysicalEdge) -> bool {
    let direction = style.direction.resolve(owner_direction);
    style.margin.resolve(edge, direction).is_auto()
}

/// Clamp a size on an axis to the node's min and max. Min wins a conflict.
pub(crate) fn bound_within_min_max(
    style: &Style,
    axis: FlexDirection,
    value: f32,
    axis_size: Option<f32>,
) -> f32 {
    let row = axis.is_row();
    let min = style.min_size.get(row).resolve(axis_size);
    let max = style.max_size.get(row).resolve(axis_size);

    let mut bound = value;
    if let Some(max) = max.filter(|m| *m >= 0.0) {
        if bound > max {
            bound = max;
        }
    }
    if let Some(min) = min.filter(|m| *m >= 0.0) {
        if bound < min {
            bound = min;
        }
    }
    bound
}

/// Clamp to min and max, never below the node's padding and border
pub(crate) fn bound_axis(
    style: &Style,
    model: &BoxModel,
    axis: FlexDirection,
    value: f32,
    axis_size: Option<f32>,
) -> f32 {
    bound_within_min_max(style, axis, value, axis_size).max(model.padding_border_axis(axis))
}

/// [`bound_axis`] for a value that may be indefinite
pub(crate) fn bound_axis_maybe(
    style: &Style,
    model: &BoxModel,
    axis: FlexDirection,
    value: Option<f32>,
    axis_size: Option<f32>,
) -> f32 {
    match value {
        Some(v) => bound_axis(style, model, axis, v, axis_size),
        None => model.padding_border_axis(axis),
    }
}

/// The style fixes the node's size on an axis
pub(crate) fn is_style_dim_defined(style: &Style, axis: FlexDirection, owner_size: Option<f32>) -> bool {
    match style.resolved_dimension(axis.is_row()) {
        Dimension::Points(v) => v >= 0.0,
        Dimension::Percent(v) => v >= 0.0 && owner_size.is_some(),
        Dimension::Auto | Dimension::Undefined => false,
    }
}

/// Size the style fixes on an axis, if any
pub(crate) fn resolved_dim(style: &Style, axis: FlexDirection, owner_size: Option<f32>) -> Option<f32> {
    style.resolved_dimension(axis.is_row()).resolve(owner_size)
}

/// Tighten a request on one axis by the node's max size.
pub(crate) fn constrain_max_size_for_mode(
    style: &Style,
    margin_axis: f32,
    axis: FlexDirection,
    owner_axis_size: Option<f32>,
    mode: &mut MeasureMode,
    size: &mut Option<f32>,
) {
    let Some(max) = style
        .max_size
        .get(axis.is_row())
        .resolve(owner_axis_size)
        .map(|m| m + margin_axis)
    else {
        return;
    };

    match *mode {
        MeasureMode::Exactly | MeasureMode::AtMost => {
            *size = match *size {
                Some(s) if s < max => Some(s),
                _ => Some(max),
            };
        }
        MeasureMode::Undefined => {
            *mode = MeasureMode::AtMost;
            *size = Some(max);
        }
    }
}

/// Space left for children on one axis once margin, padding and border
/// are taken out, clamped to the node's own min and max.
pub(crate) fn calculate_available_inner_dim(
    style: &Style,
    model: &BoxModel,
    axis: FlexDirection,
    available: Option<f32>,
    owner_size: Option<f32>,
) -> Option<f32> {
    let padding_border = model.padding_border_axis(axis);
    let inner = available? - model.margin.axis(axis) - padding_border;

    let row = axis.is_row();
    let min_inner = style
        .min_size
        .get(row)
        .resolve(owner_size)
        .map_or(0.0, |min| min - padding_border);
    let max_inner = style
        .max_size
        .get(row)
        .resolve(owner_size)
        .map_or(f32::MAX, |max| max - padding_border);

    Some(inner.min(max_inner).max(min_inner))
}

/// Offset from the leading edge of an axis, if the style sets one
pub(crate) fn leading_offset(
    style: &Style,
    direction: Direction,
    axis: FlexDirection,
    axis_size: Option<f32>,
) -> Option<f32> {
    style.position.resolve(axis.leading_edge(), direction).resolve(axis_size)
}

/// Offset from the trailing edge of an axis, if the style sets one
pub(crate) fn trailing_offset(
    style: &Style,
    direction: Direction,
    axis: FlexDirection,
    axis_size: Option<f32>,
) -> Option<f32> {
    style.position.resolve(axis.trailing_edge(), direction).resolve(axis_size)
}

/// Shift applied to a relatively positioned node along an axis
pub(crate) fn relative_offset(
    style: &Style,
    direction: Direction,
    axis: FlexDirection,
    axis_size: Option<f32>,
) -> f32 {
    if style.position_type != PositionType::Relative {
        return 0.0;
    }
    leading_offset(style, direction, axis, axis_size)
        .or_else(|| trailing_offset(style, direction, axis, axis_size).map(|t| -t))
        .unwrap_or(0.0)
}

/// Cross-axis alignment of a child, with `align-self` applied.
///
/// Baseline alignment only exists along rows; column containers align
/// such children to the start.
pub(crate) fn align_item(container: &Style, child: &Style) -> AlignItems {
    let align = child.align_self.unwrap_or(container.align_items);
    if align == AlignItems::Baseline && container.flex_direction.is_column() {
        AlignItems::FlexStart
    } else {
        align
    }
}

/// The node takes part in grow or shrink distribution
pub(crate) fn is_flexible(style: &Style, web_defaults: bool) -> bool {
    style.position_type == PositionType::Relative
        && (style.flex_grow_factor() != 0.0 || style.flex_shrink_factor(web_defaults) != 0.0)
}
