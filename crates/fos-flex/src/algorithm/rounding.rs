//! Pixel-grid rounding
//!
//! Runs over the whole subtree after every pass, reading the unrounded
//! geometry and writing the rounded [`Layout`](crate::Layout). Edges are
//! rounded in absolute coordinates and sizes derived from the rounded
//! edges, so neighbours never gain gaps or overlaps and a child stays
//! inside its parent.

use crate::geometry::approx_eq;
use crate::{LayoutConfig, LayoutTree, NodeId};

/// Snap a value to the grid of `1 / point_scale_factor`.
///
/// `force_ceil` and `force_floor` override round-half-up for values that
/// are not already on the grid.
pub(crate) fn round_value_to_pixel_grid(
    value: f32,
    point_scale_factor: f32,
    force_ceil: bool,
    force_floor: bool,
) -> f32 {
    let scaled = value * point_scale_factor;
    let fraction = scaled.rem_euclid(1.0);

    let rounded = if approx_eq(fraction, 0.0) {
        scaled - fraction
    } else if approx_eq(fraction, 1.0) {
        scaled - fraction + 1.0
    } else if force_ceil {
        scaled - fraction + 1.0
    } else if force_floor {
        scaled - fraction
    } else if fraction >= 0.5 || approx_eq(fraction, 0.5) {
        scaled - fraction + 1.0
    } else {
        scaled - fraction
    };
    rounded / point_scale_factor
}

fn has_fraction(value: f32, point_scale_factor: f32) -> bool {
    let fraction = (value * point_scale_factor).rem_euclid(1.0);
    !approx_eq(fraction, 0.0) && !approx_eq(fraction, 1.0)
}

/// Write the rounded layout of every node under `root`.
pub(crate) fn round_to_pixel_grid(tree: &mut LayoutTree, root: NodeId, config: LayoutConfig) {
    let mut stack = vec![(root, 0.0_f32, 0.0_f32)];

    while let Some((id, absolute_left, absolute_top)) = stack.pop() {
        let node = tree.node_mut(id);
        let state = &node.state;
        let mut layout = state.to_layout();

        let node_left = state.position.left;
        let node_top = state.position.top;
        let absolute_node_left = absolute_left + node_left;
        let absolute_node_top = absolute_top + node_top;

        if config.rounds() {
            let scale = config.point_scale_factor;
            let width = state.dimensions.width;
            let height = state.dimensions.height;
            let absolute_node_right = absolute_node_left + width;
            let absolute_node_bottom = absolute_node_top + height;

            // Measured content must not be cut by rounding its box down.
            let text_rounding = node.measure.is_some();
            let fractional_width = has_fraction(width, scale);
            let fractional_height = has_fraction(height, scale);

            // Offsets are taken between rounded absolute edges, so they add
            // up to the same grid position as the rounded size.
            let rounded_left = round_value_to_pixel_grid(absolute_node_left, scale, false, text_rounding);
            let rounded_top = round_value_to_pixel_grid(absolute_node_top, scale, false, text_rounding);
            layout.left = rounded_left - round_value_to_pixel_grid(absolute_left, scale, false, false);
            layout.top = rounded_top - round_value_to_pixel_grid(absolute_top, scale, false, false);
            layout.width = round_value_to_pixel_grid(
                absolute_node_right,
                scale,
                text_rounding && fractional_width,
                text_rounding && !fractional_width,
            ) - rounded_left;
            layout.height = round_value_to_pixel_grid(
                absolute_node_bottom,
                scale,
                text_rounding && fractional_height,
                text_rounding && !fractional_height,
            ) - rounded_top;
        }

        node.layout = layout;
        for &child in node.children.iter().rev() {
            stack.push((child, absolute_node_left, absolute_node_top));
        }
    }
}
