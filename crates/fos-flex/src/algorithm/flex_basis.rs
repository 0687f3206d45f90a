//! Flex basis of in-flow children

use fos_style::{AlignItems, FlexDirection, Overflow, Size};

use super::resolve::{
    BoxModel, align_item, constrain_max_size_for_mode, is_style_dim_defined, resolved_dim,
};
use super::{LayoutReason, LayoutRequest, Pass, layout_node};
use crate::{LayoutError, LayoutTree, MeasureMode, NodeId};

/// Container-side inputs to a child's flex basis
#[derive(Debug, Clone, Copy)]
pub(super) struct BasisContext {
    pub container: NodeId,
    pub main_axis: FlexDirection,
    pub direction: fos_style::Direction,
    /// Available inner size of the container
    pub available: Size<Option<f32>>,
    pub modes: Size<MeasureMode>,
}

/// Compute and store a child's flex basis.
///
/// In priority order the basis is the child's definite `flex-basis`, its
/// definite size along the main axis, or its measured content size. It is
/// never smaller than the child's padding and border. The basis is
/// recomputed on every pass so a result from other constraints is never
/// reused.
pub(super) fn compute_flex_basis(
    tree: &mut LayoutTree,
    child: NodeId,
    context: &BasisContext,
    pass: Pass,
) -> Result<(), LayoutError> {
    let container_style = tree.node(context.container).style;
    let child_style = tree.node(child).style;
    let web_defaults = pass.config.use_web_defaults;
    let main_axis = context.main_axis;
    let is_main_row = main_axis.is_row();
    let Size { width, height } = context.available;
    let owner_width = width;
    let owner_height = height;
    let main_size = if is_main_row { width } else { height };

    let model = BoxModel::resolve(&child_style, context.direction, owner_width);
    let basis_dim = child_style
        .flex_basis_dimension(web_defaults)
        .resolve(main_size);
    let row_defined = is_style_dim_defined(&child_style, FlexDirection::Row, owner_width);
    let column_defined = is_style_dim_defined(&child_style, FlexDirection::Column, owner_height);

    let basis = if let Some(basis) = basis_dim {
        basis.max(model.padding_border_axis(main_axis))
    } else if is_main_row && row_defined {
        resolved_dim(&child_style, FlexDirection::Row, owner_width)
            .unwrap_or(0.0)
            .max(model.padding_border_axis(FlexDirection::Row))
    } else if !is_main_row && column_defined {
        resolved_dim(&child_style, FlexDirection::Column, owner_height)
            .unwrap_or(0.0)
            .max(model.padding_border_axis(FlexDirection::Column))
    } else {
        let margin_row = model.margin.horizontal();
        let margin_column = model.margin.vertical();
        let mut child_width = None;
        let mut child_height = None;
        let mut width_mode = MeasureMode::Undefined;
        let mut height_mode = MeasureMode::Undefined;

        if row_defined {
            child_width = resolved_dim(&child_style, FlexDirection::Row, owner_width).map(|w| w + margin_row);
            width_mode = MeasureMode::Exactly;
        }
        if column_defined {
            child_height = resolved_dim(&child_style, FlexDirection::Column, owner_height).map(|h| h + margin_column);
            height_mode = MeasureMode::Exactly;
        }

        // A scroll container leaves its children unbounded along the
        // scrolling axis.
        let scrolls = container_style.overflow == Overflow::Scroll;
        if !scrolls || !is_main_row {
            if child_width.is_none() && width.is_some() {
                child_width = width;
                width_mode = MeasureMode::AtMost;
            }
        }
        if !scrolls || is_main_row {
            if child_height.is_none() && height.is_some() {
                child_height = height;
                height_mode = MeasureMode::AtMost;
            }
        }

        if let Some(ratio) = child_style.aspect_ratio {
            if !is_main_row && width_mode == MeasureMode::Exactly {
                child_height = child_width.map(|w| margin_column + (w - margin_row) / ratio);
                height_mode = MeasureMode::Exactly;
            } else if is_main_row && height_mode == MeasureMode::Exactly {
                child_width = child_height.map(|h| margin_row + (h - margin_column) * ratio);
                width_mode = MeasureMode::Exactly;
            }
        }

        // Stretched children are measured at the container's exact cross size.
        let stretches = align_item(&container_style, &child_style) == AlignItems::Stretch;
        let has_exact_width = width.is_some() && context.modes.width == MeasureMode::Exactly;
        if !is_main_row && !row_defined && has_exact_width && stretches && width_mode != MeasureMode::Exactly {
            child_width = width;
            width_mode = MeasureMode::Exactly;
            if let Some(ratio) = child_style.aspect_ratio {
                child_height = child_width.map(|w| (w - margin_row) / ratio);
                height_mode = MeasureMode::Exactly;
            }
        }
        let has_exact_height = height.is_some() && context.modes.height == MeasureMode::Exactly;
        if is_main_row && !column_defined && has_exact_height && stretches && height_mode != MeasureMode::Exactly {
            child_height = height;
            height_mode = MeasureMode::Exactly;
            if let Some(ratio) = child_style.aspect_ratio {
                child_width = child_height.map(|h| (h - margin_column) * ratio);
                width_mode = MeasureMode::Exactly;
            }
        }

        constrain_max_size_for_mode(&child_style, margin_row, FlexDirection::Row, owner_width, &mut width_mode, &mut child_width);
        constrain_max_size_for_mode(&child_style, margin_column, FlexDirection::Column, owner_height, &mut height_mode, &mut child_height);

        let request = LayoutRequest {
            available: Size::new(child_width, child_height),
            modes: Size::new(width_mode, height_mode),
            owner: Size::new(owner_width, owner_height),
            owner_direction: context.direction,
            perform_layout: false,
        };
        layout_node(tree, child, request, LayoutReason::Measure, pass)?;

        let measured = tree.node(child).state.measured;
        let measured_main = if is_main_row { measured.width } else { measured.height };
        measured_main.max(model.padding_border_axis(main_axis))
    };

    tree.node_mut(child).state.computed_flex_basis = basis;
    Ok(())
}
