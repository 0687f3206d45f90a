//! fOS Flex Style
//!
//! Per-node style record consumed by the flexbox layout engine.
//!
//! This crate only holds data: lengths, edge sets, the flex enums and the
//! [`Style`] record itself. Nothing here performs layout. Invalid
//! combinations are rejected by [`Style::validate`] before a style reaches
//! the engine.

mod dimension;
mod edges;
mod geometry;
mod properties;
mod style;

pub use dimension::Dimension;
pub use edges::{Edge, Edges, PhysicalEdge};
pub use geometry::Size;
pub use properties::{
    AlignContent, AlignItems, Direction, Display, FlexDirection, FlexWrap, JustifyContent,
    Overflow, PositionType,
};
pub use style::Style;

/// Style validation error
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum StyleError {
    #[error("{property} must not be negative (got {value})")]
    Negative { property: &'static str, value: f32 },
    #[error("{property} must be a finite number")]
    NotFinite { property: &'static str },
    #[error("{property} does not accept percentages")]
    PercentNotAllowed { property: &'static str },
    #[error("aspect ratio must be a positive number (got {0})")]
    InvalidAspectRatio(f32),
}
