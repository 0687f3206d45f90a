//! Flex and positioning keywords

use serde::{Deserialize, Serialize};

use crate::PhysicalEdge;

/// Inline base direction
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Direction {
    /// Take the direction of the parent (LTR at the root).
    #[default]
    Inherit,
    Ltr,
    Rtl,
}

impl Direction {
    /// Resolve `Inherit` against the owner's direction.
    pub fn resolve(self, owner: Direction) -> Direction {
        match self {
            Direction::Inherit if owner == Direction::Inherit => Direction::Ltr,
            Direction::Inherit => owner,
            other => other,
        }
    }
}

/// Main axis direction
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FlexDirection {
    #[default]
    Column,
    ColumnReverse,
    Row,
    RowReverse,
}

impl FlexDirection {
    pub fn is_row(self) -> bool {
        matches!(self, Self::Row | Self::RowReverse)
    }

    pub fn is_column(self) -> bool {
        !self.is_row()
    }

    pub fn is_reverse(self) -> bool {
        matches!(self, Self::RowReverse | Self::ColumnReverse)
    }

    /// Flip row axes for right-to-left content.
    pub fn resolve(self, direction: Direction) -> FlexDirection {
        match (self, direction) {
            (Self::Row, Direction::Rtl) => Self::RowReverse,
            (Self::RowReverse, Direction::Rtl) => Self::Row,
            (axis, _) => axis,
        }
    }

    /// The axis perpendicular to this one.
    pub fn cross(self, direction: Direction) -> FlexDirection {
        if self.is_column() {
            Self::Row.resolve(direction)
        } else {
            Self::Column
        }
    }

    /// Physical edge where flow starts along this axis
    pub fn leading_edge(self) -> PhysicalEdge {
        match self {
            Self::Row => PhysicalEdge::Left,
            Self::RowReverse => PhysicalEdge::Right,
            Self::Column => PhysicalEdge::Top,
            Self::ColumnReverse => PhysicalEdge::Bottom,
        }
    }

    /// Physical edge where flow ends along this axis
    pub fn trailing_edge(self) -> PhysicalEdge {
        match self {
            Self::Row => PhysicalEdge::Right,
            Self::RowReverse => PhysicalEdge::Left,
            Self::Column => PhysicalEdge::Bottom,
            Self::ColumnReverse => PhysicalEdge::Top,
        }
    }
}

/// Flex wrap
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FlexWrap {
    #[default]
    NoWrap,
    Wrap,
    WrapReverse,
}

/// Justify content (main axis)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum JustifyContent {
    #[default]
    FlexStart,
    FlexEnd,
    Center,
    SpaceBetween,
    SpaceAround,
    SpaceEvenly,
}

/// Align items / align self (cross axis)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AlignItems {
    #[default]
    Stretch,
    FlexStart,
    FlexEnd,
    Center,
    Baseline,
}

/// Align content (multi-line)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AlignContent {
    #[default]
    FlexStart,
    FlexEnd,
    Center,
    Stretch,
    SpaceBetween,
    SpaceAround,
    SpaceEvenly,
}

/// Positioning scheme
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PositionType {
    /// In flow; offsets shift the final position.
    #[default]
    Relative,
    /// Out of flow; placed from offsets against the containing box.
    Absolute,
}

/// Overflow behaviour
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Overflow {
    #[default]
    Visible,
    Hidden,
    Scroll,
}

/// Display
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Display {
    #[default]
    Flex,
    None,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_inherit() {
        assert_eq!(Direction::Inherit.resolve(Direction::Rtl), Direction::Rtl);
        assert_eq!(Direction::Inherit.resolve(Direction::Inherit), Direction::Ltr);
        assert_eq!(Direction::Ltr.resolve(Direction::Rtl), Direction::Ltr);
    }

    #[test]
    fn test_rtl_flips_rows_only() {
        assert_eq!(FlexDirection::Row.resolve(Direction::Rtl), FlexDirection::RowReverse);
        assert_eq!(FlexDirection::RowReverse.resolve(Direction::Rtl), FlexDirection::Row);
        assert_eq!(FlexDirection::Column.resolve(Direction::Rtl), FlexDirection::Column);
    }

    #[test]
    fn test_cross_axis() {
        assert_eq!(FlexDirection::Column.cross(Direction::Ltr), FlexDirection::Row);
        assert_eq!(FlexDirection::Column.cross(Direction::Rtl), FlexDirection::RowReverse);
        assert_eq!(FlexDirection::RowReverse.cross(Direction::Ltr), FlexDirection::Column);
    }

    #[test]
    fn test_leading_trailing_edges() {
        assert_eq!(FlexDirection::RowReverse.leading_edge(), PhysicalEdge::Right);
        assert_eq!(FlexDirection::ColumnReverse.trailing_edge(), PhysicalEdge::Top);
    }
}
