//! Layout Configuration

use serde::{Deserialize, Serialize};

/// Layout configuration options
///
/// Stored once per [`LayoutTree`](crate::LayoutTree) and copied into every
/// pass, so changing it between passes takes effect on the next one.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LayoutConfig {
    /// Physical pixels per layout unit used when snapping results to the
    /// pixel grid. `0.0` turns rounding off.
    pub point_scale_factor: f32,

    /// Follow the web defaults: `flex-shrink` defaults to 1 and the `flex`
    /// shorthand keeps an automatic basis.
    pub use_web_defaults: bool,

    /// Stretch containers that are not exactly sized on their main axis to
    /// the available space instead of sizing them to their content.
    pub use_legacy_stretch_behaviour: bool,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            point_scale_factor: 1.0,
            use_web_defaults: false,
            use_legacy_stretch_behaviour: false,
        }
    }
}

impl LayoutConfig {
    pub fn with_point_scale_factor(mut self, factor: f32) -> Self {
        self.point_scale_factor = factor;
        self
    }

    pub fn with_web_defaults(mut self, enabled: bool) -> Self {
        self.use_web_defaults = enabled;
        self
    }

    pub fn with_legacy_stretch_behaviour(mut self, enabled: bool) -> Self {
        self.use_legacy_stretch_behaviour = enabled;
        self
    }

    /// Rounding applies only to a positive, finite scale.
    pub(crate) fn rounds(&self) -> bool {
        self.point_scale_factor.is_finite() && self.point_scale_factor > 0.0
    }
}
