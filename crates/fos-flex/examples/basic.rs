//! Example: lay out a small toolbar
//!
//! Run with `RUST_LOG=fos_flex=trace` to watch every node being visited.

use fos_flex::{
    AlignItems, AvailableSpace, Dimension, Direction, Edge, Edges, FlexDirection, JustifyContent, LayoutError,
    LayoutTree, NodeId, Size, Style, measure_fn,
};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), LayoutError> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut tree = LayoutTree::new();

    let icon = tree.new_node(Style {
        size: Size::new(Dimension::Points(24.0), Dimension::Points(24.0)),
        ..Default::default()
    })?;
    // Roughly 7 points per character, one 16 point line
    let title = tree.new_leaf_with_measure(
        Style {
            flex_grow: Some(1.0),
            margin: Edges::UNDEFINED.with(Edge::Horizontal, 8.0),
            ..Default::default()
        },
        measure_fn(|_, width, _, _, _| {
            let natural = "fOS flex toolbar".len() as f32 * 7.0;
            Ok(Size::new(width.map_or(natural, |w| w.min(natural)), 16.0))
        }),
    )?;
    let close = tree.new_node(Style {
        size: Size::new(Dimension::Points(24.0), Dimension::Points(24.0)),
        ..Default::default()
    })?;
    let toolbar = tree.new_with_children(
        Style {
            flex_direction: FlexDirection::Row,
            justify_content: JustifyContent::SpaceBetween,
            align_items: AlignItems::Center,
            padding: Edges::uniform(8.0),
            size: Size::new(Dimension::Points(320.0), Dimension::Auto),
            ..Default::default()
        },
        &[icon, title, close],
    )?;

    tree.calculate_layout(toolbar, 320.0, AvailableSpace::Indefinite, Direction::Ltr)?;

    for (name, id) in [("toolbar", toolbar), ("icon", icon), ("title", title), ("close", close)] {
        print_node(&tree, name, id)?;
    }
    Ok(())
}

fn print_node(tree: &LayoutTree, name: &str, id: NodeId) -> Result<(), LayoutError> {
    let layout = tree.layout(id)?;
    println!(
        "{name:>8}: {}x{} at ({}, {})",
        layout.width, layout.height, layout.left, layout.top
    );
    Ok(())
}
