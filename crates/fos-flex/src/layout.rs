//! Layout Record
//!
//! [`Layout`] is what callers read back after a pass. [`LayoutState`] is
//! the engine's working record for a node: unrounded geometry, the sizes
//! measured during the current pass and the measurement cache.

use fos_style::{Direction, Size};
use serde::{Deserialize, Serialize};

use crate::EdgeSizes;
use crate::cache::MeasurementCache;

/// Computed geometry of one node
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Layout {
    /// Offset of the border box from the parent's border-box origin
    pub left: f32,
    pub top: f32,
    /// Border-box size
    pub width: f32,
    pub height: f32,
    pub margin: EdgeSizes,
    pub border: EdgeSizes,
    pub padding: EdgeSizes,
    /// Direction the node was laid out in
    pub direction: Direction,
    /// Children did not fit along the main axis of this node or of a
    /// descendant.
    pub had_overflow: bool,
}

impl Layout {
    pub fn size(&self) -> Size<f32> {
        Size::new(self.width, self.height)
    }

    /// Right edge of the border box in the parent's coordinates
    pub fn right(&self) -> f32 {
        self.left + self.width
    }

    /// Bottom edge of the border box in the parent's coordinates
    pub fn bottom(&self) -> f32 {
        self.top + self.height
    }

    /// Width of the content box
    pub fn content_width(&self) -> f32 {
        (self.width - self.padding.horizontal() - self.border.horizontal()).max(0.0)
    }

    /// Height of the content box
    pub fn content_height(&self) -> f32 {
        (self.height - self.padding.vertical() - self.border.vertical()).max(0.0)
    }
}

/// Working layout data of one node
#[derive(Debug, Clone, Default)]
pub(crate) struct LayoutState {
    /// Offsets per physical edge. The parent writes the leading edge of
    /// each of its axes and derives the trailing edge of reversed axes.
    pub position: EdgeSizes,
    /// Size from the last completed layout of this node
    pub dimensions: Size<f32>,
    /// Size from the most recent visit, layout or measurement
    pub measured: Size<f32>,
    pub margin: EdgeSizes,
    pub border: EdgeSizes,
    pub padding: EdgeSizes,
    pub direction: Direction,
    pub had_overflow: bool,

    /// Flex basis computed by the parent in the current pass
    pub computed_flex_basis: f32,
    /// Flex line this node was placed on by its parent
    pub line_index: usize,

    /// Pass in which the node was last visited
    pub generation: u32,
    /// Owner direction used on the last visit; `None` before the first
    pub last_owner_direction: Option<Direction>,
    pub cache: MeasurementCache,
}

impl LayoutState {
    /// Unrounded result as a [`Layout`]
    pub fn to_layout(&self) -> Layout {
        Layout {
            left: self.position.left,
            top: self.position.top,
            width: self.dimensions.width,
            height: self.dimensions.height,
            margin: self.margin,
            border: self.border,
            padding: self.padding,
            direction: self.direction,
            had_overflow: self.had_overflow,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_box() {
        let layout = Layout {
            width: 100.0,
            height: 50.0,
            padding: EdgeSizes { top: 5.0, right: 10.0, bottom: 5.0, left: 10.0 },
            border: EdgeSizes { top: 1.0, right: 1.0, bottom: 1.0, left: 1.0 },
            ..Default::default()
        };
        assert_eq!(layout.content_width(), 78.0);
        assert_eq!(layout.content_height(), 38.0);
    }

    #[test]
    fn test_state_exports_unrounded_geometry() {
        let mut state = LayoutState::default();
        state.position.left = 10.5;
        state.position.right = 99.0;
        state.dimensions = Size::new(20.25, 4.0);

        let layout = state.to_layout();
        assert_eq!(layout.left, 10.5);
        assert_eq!(layout.right(), 30.75);
        assert_eq!(layout.size(), Size::new(20.25, 4.0));
    }
}
