//! Per-edge values (margin, padding, border, position offsets)

use serde::{Deserialize, Serialize};

use crate::{Dimension, Direction};

/// Edge selector, including logical and shorthand edges
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Edge {
    Left,
    Top,
    Right,
    Bottom,
    /// Left in LTR, right in RTL.
    Start,
    /// Right in LTR, left in RTL.
    End,
    /// Left and right.
    Horizontal,
    /// Top and bottom.
    Vertical,
    All,
}

/// One of the four physical box edges
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PhysicalEdge {
    Left,
    Top,
    Right,
    Bottom,
}

impl PhysicalEdge {
    pub const ALL: [PhysicalEdge; 4] = [
        PhysicalEdge::Left,
        PhysicalEdge::Top,
        PhysicalEdge::Right,
        PhysicalEdge::Bottom,
    ];

    pub fn is_horizontal(self) -> bool {
        matches!(self, PhysicalEdge::Left | PhysicalEdge::Right)
    }
}

/// A full set of edge values.
///
/// Specific edges win over logical ones, logical over the axis
/// shorthands, and the axis shorthands over `all`. `start` and `end` take
/// precedence over `left` and `right` once the direction is known.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Edges {
    pub left: Dimension,
    pub top: Dimension,
    pub right: Dimension,
    pub bottom: Dimension,
    pub start: Dimension,
    pub end: Dimension,
    pub horizontal: Dimension,
    pub vertical: Dimension,
    pub all: Dimension,
}

impl Edges {
    pub const UNDEFINED: Edges = Edges {
        left: Dimension::Undefined,
        top: Dimension::Undefined,
        right: Dimension::Undefined,
        bottom: Dimension::Undefined,
        start: Dimension::Undefined,
        end: Dimension::Undefined,
        horizontal: Dimension::Undefined,
        vertical: Dimension::Undefined,
        all: Dimension::Undefined,
    };

    /// Same value on every edge
    pub fn uniform(value: impl Into<Dimension>) -> Self {
        Edges {
            all: value.into(),
            ..Edges::UNDEFINED
        }
    }

    pub fn get(&self, edge: Edge) -> Dimension {
        match edge {
            Edge::Left => self.left,
            Edge::Top => self.top,
            Edge::Right => self.right,
            Edge::Bottom => self.bottom,
            Edge::Start => self.start,
            Edge::End => self.end,
            Edge::Horizontal => self.horizontal,
            Edge::Vertical => self.vertical,
            Edge::All => self.all,
        }
    }

    pub fn set(&mut self, edge: Edge, value: impl Into<Dimension>) {
        let value = value.into();
        match edge {
            Edge::Left => self.left = value,
            Edge::Top => self.top = value,
            Edge::Right => self.right = value,
            Edge::Bottom => self.bottom = value,
            Edge::Start => self.start = value,
            Edge::End => self.end = value,
            Edge::Horizontal => self.horizontal = value,
            Edge::Vertical => self.vertical = value,
            Edge::All => self.all = value,
        }
    }

    /// Builder form of [`Edges::set`]
    pub fn with(mut self, edge: Edge, value: impl Into<Dimension>) -> Self {
        self.set(edge, value);
        self
    }

    /// The value that applies to a physical edge under a direction.
    pub fn resolve(&self, edge: PhysicalEdge, direction: Direction) -> Dimension {
        let rtl = direction == Direction::Rtl;
        let logical = match edge {
            PhysicalEdge::Left if rtl => self.end,
            PhysicalEdge::Left => self.start,
            PhysicalEdge::Right if rtl => self.start,
            PhysicalEdge::Right => self.end,
            PhysicalEdge::Top | PhysicalEdge::Bottom => Dimension::Undefined,
        };
        if logical.is_defined() {
            return logical;
        }

        let (specific, shorthand) = match edge {
            PhysicalEdge::Left => (self.left, self.horizontal),
            PhysicalEdge::Right => (self.right, self.horizontal),
            PhysicalEdge::Top => (self.top, self.vertical),
            PhysicalEdge::Bottom => (self.bottom, self.vertical),
        };
        [specific, shorthand, self.all]
            .into_iter()
            .find(|value| value.is_defined())
            .unwrap_or(Dimension::Undefined)
    }

    /// Every stored value with the edge it belongs to
    pub(crate) fn entries(&self) -> [(Edge, Dimension); 9] {
        [
            (Edge::Left, self.left),
            (Edge::Top, self.top),
            (Edge::Right, self.right),
            (Edge::Bottom, self.bottom),
            (Edge::Start, self.start),
            (Edge::End, self.end),
            (Edge::Horizontal, self.horizontal),
            (Edge::Vertical, self.vertical),
            (Edge::All, self.all),
        ]
    }
}
