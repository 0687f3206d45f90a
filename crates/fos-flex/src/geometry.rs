//! Resolved edge sizes and float helpers

use fos_style::{FlexDirection, PhysicalEdge};
use serde::{Deserialize, Serialize};

/// Edge sizes (top, right, bottom, left)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct EdgeSizes {
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
    pub left: f32,
}

impl EdgeSizes {
    pub const ZERO: Self = Self {
        top: 0.0,
        right: 0.0,
        bottom: 0.0,
        left: 0.0,
    };

    pub fn get(&self, edge: PhysicalEdge) -> f32 {
        match edge {
            PhysicalEdge::Top => self.top,
            PhysicalEdge::Right => self.right,
            PhysicalEdge::Bottom => self.bottom,
            PhysicalEdge::Left => self.left,
        }
    }

    pub(crate) fn set(&mut self, edge: PhysicalEdge, value: f32) {
        match edge {
            PhysicalEdge::Top => self.top = value,
            PhysicalEdge::Right => self.right = value,
            PhysicalEdge::Bottom => self.bottom = value,
            PhysicalEdge::Left => self.left = value,
        }
    }

    /// Left plus right
    pub fn horizontal(&self) -> f32 {
        self.left + self.right
    }

    /// Top plus bottom
    pub fn vertical(&self) -> f32 {
        self.top + self.bottom
    }

    pub(crate) fn leading(&self, axis: FlexDirection) -> f32 {
        self.get(axis.leading_edge())
    }

    pub(crate) fn trailing(&self, axis: FlexDirection) -> f32 {
        self.get(axis.trailing_edge())
    }

    /// Both edges along an axis
    pub(crate) fn axis(&self, axis: FlexDirection) -> f32 {
        if axis.is_row() { self.horizontal() } else { self.vertical() }
    }
}

/// Tolerance-based comparison of possibly indefinite values.
///
/// Two indefinite values are equal; an indefinite and a definite value
/// never are.
pub(crate) fn float_eq(a: Option<f32>, b: Option<f32>) -> bool {
    match (a, b) {
        (Some(a), Some(b)) => (a - b).abs() < 0.0001,
        (None, None) => true,
        _ => false,
    }
}

pub(crate) fn approx_eq(a: f32, b: f32) -> bool {
    (a - b).abs() < 0.0001
}

/// Value along the row axis or the column axis
pub(crate) fn pick<T>(row: bool, row_value: T, column_value: T) -> T {
    if row { row_value } else { column_value }
}
