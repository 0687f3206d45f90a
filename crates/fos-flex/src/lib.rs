//! fOS Flex Layout Engine
//!
//! Flexbox layout over an arena of styled nodes.
//!
//! A [`LayoutTree`] owns every node: its [`Style`], its children, an
//! optional [`Measure`] capability for leaves whose content size comes from
//! the host (text, images), and the computed [`Layout`]. Calling
//! [`LayoutTree::calculate_layout`] on a root resolves every visible node in
//! its subtree to a position and size.
//!
//! Results are cached per node. Any style or tree mutation marks the node
//! and its ancestors dirty and drops their cached measurements, so a later
//! pass only revisits what changed.
//!
//! ```
//! use fos_flex::{Dimension, Direction, FlexDirection, LayoutTree, Size, Style};
//!
//! let mut tree = LayoutTree::new();
//! let item = tree.new_node(Style {
//!     flex_grow: Some(1.0),
//!     ..Default::default()
//! })?;
//! let root = tree.new_with_children(
//!     Style {
//!         flex_direction: FlexDirection::Row,
//!         size: Size::new(Dimension::Points(300.0), Dimension::Points(100.0)),
//!         ..Default::default()
//!     },
//!     &[item],
//! )?;
//!
//! tree.calculate_layout(root, 300.0, 100.0, Direction::Ltr)?;
//! assert_eq!(tree.layout(item)?.width, 300.0);
//! # Ok::<(), fos_flex::LayoutError>(())
//! ```

mod algorithm;
mod cache;
mod config;
mod error;
mod geometry;
mod layout;
mod measure;
mod tree;

pub use config::LayoutConfig;
pub use error::LayoutError;
pub use geometry::EdgeSizes;
pub use layout::Layout;
pub use measure::{AvailableSpace, Measure, MeasureError, MeasureFn, MeasureMode, measure_fn};
pub use tree::{LayoutTree, NodeId};

pub use fos_style::{
    AlignContent, AlignItems, Dimension, Direction, Display, Edge, Edges, FlexDirection, FlexWrap,
    JustifyContent, Overflow, PhysicalEdge, PositionType, Size, Style, StyleError,
};
