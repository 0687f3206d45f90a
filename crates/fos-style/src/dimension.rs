//! Length values

use serde::{Deserialize, Serialize};

/// A length that is points, a percentage, auto, or not set at all.
///
/// `Undefined` and `Auto` are distinct: an undefined margin contributes
/// nothing, while an auto margin absorbs free space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Dimension {
    #[default]
    Undefined,
    Auto,
    /// Absolute length in points.
    Points(f32),
    /// Percentage of the reference dimension (0-100).
    Percent(f32),
}

impl Dimension {
    pub const ZERO: Self = Dimension::Points(0.0);

    /// Resolve against a reference size.
    ///
    /// Percentages of an indefinite reference stay indefinite; they never
    /// collapse to zero.
    pub fn resolve(self, reference: Option<f32>) -> Option<f32> {
        match self {
            Dimension::Points(v) => Some(v),
            Dimension::Percent(p) => reference.map(|r| r * p / 100.0),
            Dimension::Auto | Dimension::Undefined => None,
        }
    }

    pub fn is_defined(self) -> bool {
        !matches!(self, Dimension::Undefined)
    }

    pub fn is_auto(self) -> bool {
        matches!(self, Dimension::Auto)
    }

    /// The raw number carried by points or percent values.
    pub(crate) fn number(self) -> Option<f32> {
        match self {
            Dimension::Points(v) | Dimension::Percent(v) => Some(v),
            Dimension::Auto | Dimension::Undefined => None,
        }
    }
}

impl From<f32> for Dimension {
    fn from(points: f32) -> Self {
        Dimension::Points(points)
    }
}
