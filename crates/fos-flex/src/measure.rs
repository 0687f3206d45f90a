//! Measure modes and the host measure capability

use fos_style::Size;
use serde::{Deserialize, Serialize};

use crate::NodeId;

/// How an available size constrains a measurement
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MeasureMode {
    /// No constraint; the size is ignored.
    #[default]
    Undefined,
    /// The result must be exactly the size.
    Exactly,
    /// The result may be anything up to the size.
    AtMost,
}

/// Space offered to a root node on one axis
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AvailableSpace {
    Exactly(f32),
    AtMost(f32),
    Indefinite,
}

impl AvailableSpace {
    pub(crate) fn into_parts(self) -> (Option<f32>, MeasureMode) {
        match self {
            AvailableSpace::Exactly(v) if v.is_finite() => (Some(v), MeasureMode::Exactly),
            AvailableSpace::AtMost(v) if v.is_finite() => (Some(v), MeasureMode::AtMost),
            _ => (None, MeasureMode::Undefined),
        }
    }
}

impl From<f32> for AvailableSpace {
    fn from(value: f32) -> Self {
        AvailableSpace::Exactly(value)
    }
}

impl From<Option<f32>> for AvailableSpace {
    fn from(value: Option<f32>) -> Self {
        value.map_or(AvailableSpace::Indefinite, AvailableSpace::Exactly)
    }
}

/// Error returned by a host measure capability
pub type MeasureError = Box<dyn std::error::Error + Send + Sync>;

/// Host-supplied content measurement for leaf nodes.
///
/// Called with the content-box space available on each axis and how it
/// constrains the result. The returned size is the content size; padding,
/// border and min/max clamps are applied by the engine.
pub trait Measure {
    fn measure(
        &mut self,
        node: NodeId,
        width: Option<f32>,
        width_mode: MeasureMode,
        height: Option<f32>,
        height_mode: MeasureMode,
    ) -> Result<Size<f32>, MeasureError>;
}

/// A [`Measure`] backed by a closure, see [`measure_fn`].
pub struct MeasureFn<F>(F);

/// Wrap a closure as a measure capability.
pub fn measure_fn<F>(f: F) -> MeasureFn<F>
where
    F: FnMut(NodeId, Option<f32>, MeasureMode, Option<f32>, MeasureMode) -> Result<Size<f32>, MeasureError>,
{
    MeasureFn(f)
}

impl<F> Measure for MeasureFn<F>
where
    F: FnMut(NodeId, Option<f32>, MeasureMode, Option<f32>, MeasureMode) -> Result<Size<f32>, MeasureError>,
{
    fn measure(
        &mut self,
        node: NodeId,
        width: Option<f32>,
        width_mode: MeasureMode,
        height: Option<f32>,
        height_mode: MeasureMode,
    ) -> Result<Size<f32>, MeasureError> {
        (self.0)(node, width, width_mode, height, height_mode)
    }
}

impl std::fmt::Debug for dyn Measure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Measure")
    }
}
