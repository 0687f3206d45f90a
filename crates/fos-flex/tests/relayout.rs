//! Repeated passes over the same tree

use fos_flex::*;

fn px(value: f32) -> Dimension {
    Dimension::Points(value)
}

#[test]
fn test_flex_basis_is_recomputed_between_passes() {
    let mut tree = LayoutTree::with_config(LayoutConfig::default().with_web_defaults(true));
    let child = tree
        .new_node(Style {
            flex_basis: Dimension::Percent(100.0),
            ..Default::default()
        })
        .unwrap();
    let root = tree
        .new_with_children(
            Style {
                size: Size::new(Dimension::Percent(100.0), Dimension::Percent(100.0)),
                ..Default::default()
            },
            &[child],
        )
        .unwrap();

    tree.calculate_layout(root, 100.0, AvailableSpace::Indefinite, Direction::Ltr).unwrap();
    assert_eq!(tree.layout(child).unwrap().height, 0.0);

    tree.calculate_layout(root, 100.0, 100.0, Direction::Ltr).unwrap();
    assert_eq!(tree.layout(child).unwrap().height, 100.0);
}

#[test]
fn test_equal_min_max_tracks_style_changes() {
    let mut tree = LayoutTree::new();
    let child = tree
        .new_node(Style {
            min_size: Size::new(Dimension::Undefined, px(10.0)),
            max_size: Size::new(Dimension::Undefined, px(10.0)),
            ..Default::default()
        })
        .unwrap();
    let root = tree.new_with_children(Style::default(), &[child]).unwrap();

    tree.calculate_layout(root, AvailableSpace::Indefinite, AvailableSpace::Indefinite, Direction::Ltr)
        .unwrap();
    assert_eq!(tree.layout(child).unwrap().height, 10.0);

    tree.update_style(child, |style| style.min_size.height = Dimension::Undefined).unwrap();
    tree.calculate_layout(root, AvailableSpace::Indefinite, AvailableSpace::Indefinite, Direction::Ltr)
        .unwrap();
    assert_eq!(tree.layout(child).unwrap().height, 0.0);
}

fn sample_tree(tree: &mut LayoutTree) -> (NodeId, Vec<NodeId>) {
    let text = tree
        .new_leaf_with_measure(
            Style::default(),
            measure_fn(|_, width, _, _, _| Ok(Size::new(width.unwrap_or(90.0).min(90.0), 17.3))),
        )
        .unwrap();
    let grow = tree
        .new_node(Style {
            flex_grow: Some(1.0),
            margin: Edges::uniform(3.3),
            ..Default::default()
        })
        .unwrap();
    let fixed = tree
        .new_node(Style {
            size: Size::new(px(33.3), Dimension::Percent(50.0)),
            ..Default::default()
        })
        .unwrap();
    let row = tree
        .new_with_children(
            Style {
                flex_direction: FlexDirection::Row,
                flex_wrap: FlexWrap::Wrap,
                padding: Edges::uniform(4.5),
                ..Default::default()
            },
            &[text, grow, fixed],
        )
        .unwrap();
    let root = tree.new_with_children(Style::default(), &[row]).unwrap();
    (root, vec![root, row, text, grow, fixed])
}

#[test]
fn test_repeated_pass_is_bit_identical() {
    let mut tree = LayoutTree::new();
    let (root, nodes) = sample_tree(&mut tree);

    tree.calculate_layout(root, 187.0, 211.0, Direction::Ltr).unwrap();
    let first: Vec<Layout> = nodes.iter().map(|&id| *tree.layout(id).unwrap()).collect();
    let first_unrounded: Vec<Layout> =
        nodes.iter().map(|&id| tree.unrounded_layout(id).unwrap()).collect();

    tree.calculate_layout(root, 187.0, 211.0, Direction::Ltr).unwrap();
    for (index, &id) in nodes.iter().enumerate() {
        let layout = tree.layout(id).unwrap();
        assert_eq!(layout.left.to_bits(), first[index].left.to_bits());
        assert_eq!(layout.top.to_bits(), first[index].top.to_bits());
        assert_eq!(layout.width.to_bits(), first[index].width.to_bits());
        assert_eq!(layout.height.to_bits(), first[index].height.to_bits());
        assert_eq!(tree.unrounded_layout(id).unwrap(), first_unrounded[index]);
    }
}

#[test]
fn test_pass_after_other_constraints_matches_fresh_tree() {
    let mut reused = LayoutTree::new();
    let (root, nodes) = sample_tree(&mut reused);
    reused.calculate_layout(root, 120.0, 90.0, Direction::Ltr).unwrap();
    reused.calculate_layout(root, 187.0, 211.0, Direction::Ltr).unwrap();

    let mut fresh = LayoutTree::new();
    let (fresh_root, fresh_nodes) = sample_tree(&mut fresh);
    fresh.calculate_layout(fresh_root, 187.0, 211.0, Direction::Ltr).unwrap();

    for (&id, &fresh_id) in nodes.iter().zip(&fresh_nodes) {
        assert_eq!(reused.layout(id).unwrap(), fresh.layout(fresh_id).unwrap());
    }
}

#[test]
fn test_identical_style_keeps_tree_clean() {
    let mut tree = LayoutTree::new();
    let (root, nodes) = sample_tree(&mut tree);
    tree.calculate_layout(root, 187.0, 211.0, Direction::Ltr).unwrap();

    let style = *tree.style(nodes[3]).unwrap();
    tree.set_style(nodes[3], style).unwrap();
    assert!(!tree.is_dirty(root).unwrap());

    tree.update_style(nodes[3], |style| style.flex_grow = Some(0.0)).unwrap();
    assert!(tree.is_dirty(nodes[3]).unwrap());
    assert!(tree.is_dirty(nodes[1]).unwrap());
    assert!(tree.is_dirty(root).unwrap());
    assert!(!tree.is_dirty(nodes[2]).unwrap());
}

#[test]
fn test_removed_child_frees_space() {
    let mut tree = LayoutTree::new();
    let a = tree.new_node(Style { flex_grow: Some(1.0), ..Default::default() }).unwrap();
    let b = tree.new_node(Style { flex_grow: Some(1.0), ..Default::default() }).unwrap();
    let root = tree
        .new_with_children(
            Style {
                flex_direction: FlexDirection::Row,
                ..Default::default()
            },
            &[a, b],
        )
        .unwrap();

    tree.calculate_layout(root, 200.0, 50.0, Direction::Ltr).unwrap();
    assert_eq!(tree.layout(a).unwrap().width, 100.0);

    tree.remove_child(root, b).unwrap();
    assert!(tree.is_dirty(root).unwrap());
    tree.calculate_layout(root, 200.0, 50.0, Direction::Ltr).unwrap();
    assert_eq!(tree.layout(a).unwrap().width, 200.0);
    assert_eq!(tree.parent(b).unwrap(), None);
}
