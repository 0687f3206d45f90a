//! Two-axis size container

use serde::{Deserialize, Serialize};

/// A width/height pair
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Size<T> {
    pub width: T,
    pub height: T,
}

impl<T> Size<T> {
    pub const fn new(width: T, height: T) -> Self {
        Self { width, height }
    }

    /// Pick the width for row axes and the height for column axes.
    pub fn get(&self, row: bool) -> &T {
        if row { &self.width } else { &self.height }
    }

    pub fn get_mut(&mut self, row: bool) -> &mut T {
        if row { &mut self.width } else { &mut self.height }
    }

    pub fn map<U>(self, mut f: impl FnMut(T) -> U) -> Size<U> {
        Size {
            width: f(self.width),
            height: f(self.height),
        }
    }
}

impl Size<f32> {
    pub const ZERO: Self = Size::new(0.0, 0.0);
}
