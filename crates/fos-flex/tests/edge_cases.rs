//! Edge case tests for fos-flex
//!
//! Indefinite space, hidden nodes, measured leaves and pixel rounding.

use fos_flex::*;

fn px(value: f32) -> Dimension {
    Dimension::Points(value)
}

fn sized(width: f32, height: f32) -> Style {
    Style {
        size: Size::new(px(width), px(height)),
        ..Default::default()
    }
}

fn row(width: f32, height: f32) -> Style {
    Style {
        flex_direction: FlexDirection::Row,
        ..sized(width, height)
    }
}

// ============================================================================
// INDEFINITE SPACE
// ============================================================================

#[test]
fn test_percent_of_indefinite_height_is_undefined() {
    let mut tree = LayoutTree::new();
    let content = tree.new_node(sized(20.0, 30.0)).unwrap();
    let half = tree
        .new_with_children(
            Style {
                size: Size::new(Dimension::Auto, Dimension::Percent(50.0)),
                ..Default::default()
            },
            &[content],
        )
        .unwrap();
    let empty_half = tree
        .new_node(Style {
            size: Size::new(Dimension::Auto, Dimension::Percent(50.0)),
            ..Default::default()
        })
        .unwrap();
    let root = tree.new_with_children(Style::default(), &[half, empty_half]).unwrap();

    tree.calculate_layout(root, 200.0, AvailableSpace::Indefinite, Direction::Ltr).unwrap();

    // Sized by content, not by half of nothing
    assert_eq!(tree.layout(half).unwrap().height, 30.0);
    assert_eq!(tree.layout(empty_half).unwrap().height, 0.0);
    assert_eq!(tree.layout(root).unwrap().height, 30.0);
    assert_eq!(tree.layout(root).unwrap().width, 200.0);
}

#[test]
fn test_percent_of_definite_height() {
    let mut tree = LayoutTree::new();
    let half = tree
        .new_node(Style {
            size: Size::new(Dimension::Auto, Dimension::Percent(50.0)),
            ..Default::default()
        })
        .unwrap();
    let root = tree.new_with_children(sized(200.0, 100.0), &[half]).unwrap();

    tree.calculate_layout(root, 200.0, 100.0, Direction::Ltr).unwrap();

    assert_eq!(tree.layout(half).unwrap().height, 50.0);
}

#[test]
fn test_root_max_size_bounds_indefinite_space() {
    let mut tree = LayoutTree::new();
    let items: Vec<NodeId> = (0..3).map(|_| tree.new_node(sized(10.0, 40.0)).unwrap()).collect();
    let root = tree
        .new_with_children(
            Style {
                max_size: Size::new(Dimension::Undefined, px(100.0)),
                ..Default::default()
            },
            &items,
        )
        .unwrap();

    tree.calculate_layout(root, 50.0, AvailableSpace::Indefinite, Direction::Ltr).unwrap();

    assert_eq!(tree.layout(root).unwrap().height, 100.0);
    assert_eq!(tree.layout(items[2]).unwrap().top, 80.0);
}

#[test]
fn test_min_size_wins_over_max() {
    let mut tree = LayoutTree::new();
    let item = tree
        .new_node(Style {
            size: Size::new(px(50.0), px(10.0)),
            min_size: Size::new(px(80.0), Dimension::Undefined),
            max_size: Size::new(px(60.0), Dimension::Undefined),
            ..Default::default()
        })
        .unwrap();
    let root = tree.new_with_children(row(200.0, 100.0), &[item]).unwrap();

    tree.calculate_layout(root, 200.0, 100.0, Direction::Ltr).unwrap();

    assert_eq!(tree.layout(item).unwrap().width, 80.0);
}

// ============================================================================
// DISPLAY NONE
// ============================================================================

#[test]
fn test_display_none_takes_no_space() {
    let mut tree = LayoutTree::new();
    let a = tree.new_node(sized(50.0, 50.0)).unwrap();
    let hidden_child = tree.new_node(sized(10.0, 10.0)).unwrap();
    let hidden = tree
        .new_with_children(
            Style {
                display: Display::None,
                ..sized(50.0, 50.0)
            },
            &[hidden_child],
        )
        .unwrap();
    let c = tree.new_node(sized(50.0, 50.0)).unwrap();
    let root = tree.new_with_children(row(300.0, 100.0), &[a, hidden, c]).unwrap();

    tree.calculate_layout(root, 300.0, 100.0, Direction::Ltr).unwrap();

    assert_eq!(tree.layout(c).unwrap().left, 50.0);
    assert_eq!(*tree.layout(hidden).unwrap(), Layout::default());
    assert_eq!(*tree.layout(hidden_child).unwrap(), Layout::default());
    assert!(!tree.is_dirty(hidden_child).unwrap());

    tree.update_style(hidden, |style| style.display = Display::Flex).unwrap();
    tree.calculate_layout(root, 300.0, 100.0, Direction::Ltr).unwrap();
    assert_eq!(tree.layout(c).unwrap().left, 100.0);
    assert_eq!(tree.layout(hidden_child).unwrap().width, 10.0);
}

// ============================================================================
// MEASURED LEAVES
// ============================================================================

#[test]
fn test_measured_text_wraps_to_available_width() {
    let mut tree = LayoutTree::new();
    // 600 units of text at 20 per line
    let text = tree
        .new_leaf_with_measure(
            Style::default(),
            measure_fn(|_, width, _, _, _| {
                let width = width.unwrap_or(600.0).min(600.0);
                let lines = (600.0 / width).ceil();
                Ok(Size::new(width, lines * 20.0))
            }),
        )
        .unwrap();
    let root = tree
        .new_with_children(
            Style {
                size: Size::new(px(200.0), Dimension::Auto),
                ..Default::default()
            },
            &[text],
        )
        .unwrap();

    tree.calculate_layout(root, 200.0, AvailableSpace::Indefinite, Direction::Ltr).unwrap();

    let layout = tree.layout(text).unwrap();
    assert_eq!((layout.width, layout.height), (200.0, 60.0));
    assert_eq!(tree.layout(root).unwrap().height, 60.0);
}

#[test]
fn test_measured_leaf_adds_padding() {
    let mut tree = LayoutTree::new();
    let text = tree
        .new_leaf_with_measure(
            Style {
                padding: Edges::UNDEFINED.with(Edge::Left, 4.0).with(Edge::Right, 6.0),
                ..Default::default()
            },
            measure_fn(|_, width, _, _, _| Ok(Size::new(width.unwrap_or(120.0).min(120.0), 20.0))),
        )
        .unwrap();
    let root = tree
        .new_with_children(
            Style {
                align_items: AlignItems::FlexStart,
                ..row(200.0, 100.0)
            },
            &[text],
        )
        .unwrap();

    tree.calculate_layout(root, 200.0, 100.0, Direction::Ltr).unwrap();

    let layout = tree.layout(text).unwrap();
    assert_eq!((layout.width, layout.height), (130.0, 20.0));
}

#[test]
fn test_scroll_container_leaves_main_axis_open() {
    let text_measure = || {
        measure_fn(|_, width: Option<f32>, _, _, _| Ok(Size::new(width.unwrap_or(300.0).min(300.0), 10.0)))
    };

    let mut tree = LayoutTree::new();
    let text = tree.new_leaf_with_measure(Style::default(), text_measure()).unwrap();
    let root = tree.new_with_children(row(100.0, 50.0), &[text]).unwrap();
    tree.calculate_layout(root, 100.0, 50.0, Direction::Ltr).unwrap();
    assert_eq!(tree.layout(text).unwrap().width, 100.0);

    let mut tree = LayoutTree::new();
    let text = tree.new_leaf_with_measure(Style::default(), text_measure()).unwrap();
    let root = tree
        .new_with_children(
            Style {
                overflow: Overflow::Scroll,
                ..row(100.0, 50.0)
            },
            &[text],
        )
        .unwrap();
    tree.calculate_layout(root, 100.0, 50.0, Direction::Ltr).unwrap();
    assert_eq!(tree.layout(text).unwrap().width, 300.0);
    assert_eq!(tree.layout(root).unwrap().width, 100.0);
}

// ============================================================================
// ASPECT RATIO
// ============================================================================

#[test]
fn test_aspect_ratio_from_width() {
    let mut tree = LayoutTree::new();
    let item = tree
        .new_node(Style {
            size: Size::new(px(50.0), Dimension::Auto),
            aspect_ratio: Some(2.0),
            ..Default::default()
        })
        .unwrap();
    let root = tree.new_with_children(row(300.0, 100.0), &[item]).unwrap();

    tree.calculate_layout(root, 300.0, 100.0, Direction::Ltr).unwrap();

    let layout = tree.layout(item).unwrap();
    assert_eq!((layout.width, layout.height), (50.0, 25.0));
}

#[test]
fn test_aspect_ratio_from_stretched_width() {
    let mut tree = LayoutTree::new();
    let item = tree
        .new_node(Style {
            aspect_ratio: Some(4.0),
            ..Default::default()
        })
        .unwrap();
    let root = tree.new_with_children(sized(200.0, 300.0), &[item]).unwrap();

    tree.calculate_layout(root, 200.0, 300.0, Direction::Ltr).unwrap();

    let layout = tree.layout(item).unwrap();
    assert_eq!((layout.width, layout.height), (200.0, 50.0));
}

// ============================================================================
// ROUNDING
// ============================================================================

#[test]
fn test_rounded_edges_do_not_leave_gaps() {
    let mut tree = LayoutTree::new();
    let items: Vec<NodeId> = (0..3)
        .map(|_| {
            tree.new_node(Style {
                flex_grow: Some(1.0),
                ..Default::default()
            })
            .unwrap()
        })
        .collect();
    let root = tree.new_with_children(row(100.0, 20.0), &items).unwrap();

    tree.calculate_layout(root, 100.0, 20.0, Direction::Ltr).unwrap();

    let rounded: Vec<(f32, f32)> = items
        .iter()
        .map(|&id| {
            let layout = tree.layout(id).unwrap();
            (layout.left, layout.width)
        })
        .collect();
    assert_eq!(rounded, vec![(0.0, 33.0), (33.0, 34.0), (67.0, 33.0)]);
}

#[test]
fn test_zero_scale_disables_rounding() {
    let mut tree = LayoutTree::with_config(LayoutConfig::default().with_point_scale_factor(0.0));
    let items: Vec<NodeId> = (0..3)
        .map(|_| {
            tree.new_node(Style {
                flex_grow: Some(1.0),
                ..Default::default()
            })
            .unwrap()
        })
        .collect();
    let root = tree.new_with_children(row(100.0, 20.0), &items).unwrap();

    tree.calculate_layout(root, 100.0, 20.0, Direction::Ltr).unwrap();

    for &id in &items {
        assert_eq!(*tree.layout(id).unwrap(), tree.unrounded_layout(id).unwrap());
    }
    assert!((tree.layout(items[1]).unwrap().left - 100.0 / 3.0).abs() < 1e-4);
}

#[test]
fn test_measured_content_is_never_rounded_down() {
    let mut tree = LayoutTree::new();
    let text = tree
        .new_leaf_with_measure(
            Style::default(),
            measure_fn(|_, _, _, _, _| Ok(Size::new(10.2, 10.2))),
        )
        .unwrap();
    let root = tree
        .new_with_children(
            Style {
                align_items: AlignItems::FlexStart,
                ..row(100.0, 100.0)
            },
            &[text],
        )
        .unwrap();

    tree.calculate_layout(root, 100.0, 100.0, Direction::Ltr).unwrap();

    let layout = tree.layout(text).unwrap();
    assert_eq!((layout.width, layout.height), (11.0, 11.0));
}

#[test]
fn test_half_point_grid() {
    let mut tree = LayoutTree::with_config(LayoutConfig::default().with_point_scale_factor(2.0));
    let item = tree.new_node(sized(10.3, 10.2)).unwrap();
    let root = tree.new_with_children(row(100.0, 100.0), &[item]).unwrap();

    tree.calculate_layout(root, 100.0, 100.0, Direction::Ltr).unwrap();

    let layout = tree.layout(item).unwrap();
    assert_eq!((layout.width, layout.height), (10.5, 10.0));
}

#[test]
fn test_offsets_follow_rounded_parent_edges() {
    let mut tree = LayoutTree::new();
    let nudged = |width: f32, height: f32| Style {
        margin: Edges::UNDEFINED.with(Edge::Left, px(0.4)),
        ..sized(width, height)
    };
    let icon = tree.new_node(nudged(10.0, 10.0)).unwrap();
    let card = tree.new_with_children(nudged(50.0, 20.0), &[icon]).unwrap();
    let root = tree.new_with_children(row(100.0, 20.0), &[card]).unwrap();

    tree.calculate_layout(root, 100.0, 20.0, Direction::Ltr).unwrap();

    // 0.4 + 0.4 lands on the 1.0 grid line even though each step rounds to 0
    let card_layout = tree.layout(card).unwrap();
    assert_eq!((card_layout.left, card_layout.width), (0.0, 50.0));
    let icon_layout = tree.layout(icon).unwrap();
    assert_eq!((icon_layout.left, icon_layout.width), (1.0, 10.0));
}

// ============================================================================
// STYLE VALIDATION
// ============================================================================

#[test]
fn test_invalid_styles_are_rejected() {
    let mut tree = LayoutTree::new();
    let negative = Style {
        size: Size::new(px(-1.0), Dimension::Auto),
        ..Default::default()
    };
    assert!(matches!(tree.new_node(negative), Err(LayoutError::InvalidStyle(_))));

    let node = tree.new_node(Style::default()).unwrap();
    let result = tree.update_style(node, |style| style.aspect_ratio = Some(0.0));
    assert!(matches!(result, Err(LayoutError::InvalidStyle(_))));
    assert_eq!(tree.style(node).unwrap().aspect_ratio, None);
}

#[test]
fn test_style_from_json() {
    let style: Style = serde_json::from_str(
        r#"{ "flexDirection": "row", "flexGrow": 2.0, "size": { "width": { "points": 50.0 }, "height": "auto" } }"#,
    )
    .unwrap();
    assert_eq!(style.flex_direction, FlexDirection::Row);
    assert_eq!(style.flex_grow, Some(2.0));
    assert_eq!(style.size, Size::new(px(50.0), Dimension::Auto));
    assert_eq!(style.align_items, AlignItems::Stretch);
}
