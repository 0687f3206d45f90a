//! Measurement Cache
//!
//! Every node remembers the result of its last full layout and of its
//! most recent measurements. A request is answered from the cache when
//! an entry was computed under the same constraints, or, for nodes that
//! measure their own content, under constraints that provably lead to
//! the same size.
//!
//! Available sizes handed to a node include its own margins; computed
//! sizes do not. The margin sums are passed in so both can be compared.
//!
//! The owner size is part of every key: percentages of margins, padding,
//! offsets and min/max resolve against it, so an entry computed for
//! another owner size is never reused.

use fos_style::Size;

use crate::MeasureMode;
use crate::algorithm::round_value_to_pixel_grid;
use crate::geometry::{approx_eq, float_eq};

/// Number of measurement entries kept per node
pub(crate) const MAX_CACHED_MEASUREMENTS: usize = 8;

/// Constraints of one request plus, once stored, its computed size
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct CachedMeasurement {
    pub available_width: Option<f32>,
    pub available_height: Option<f32>,
    pub width_mode: MeasureMode,
    pub height_mode: MeasureMode,
    /// Size percentages resolved against
    pub owner: Size<Option<f32>>,
    pub computed: Size<f32>,
}

impl CachedMeasurement {
    pub fn new(
        available: Size<Option<f32>>,
        modes: Size<MeasureMode>,
        owner: Size<Option<f32>>,
        computed: Size<f32>,
    ) -> Self {
        Self {
            available_width: available.width,
            available_height: available.height,
            width_mode: modes.width,
            height_mode: modes.height,
            owner,
            computed,
        }
    }

    fn same_owner(&self, owner: Size<Option<f32>>) -> bool {
        float_eq(self.owner.width, owner.width) && float_eq(self.owner.height, owner.height)
    }

    /// Same modes and equal sizes
    fn matches_exactly(&self, available: Size<Option<f32>>, modes: Size<MeasureMode>) -> bool {
        self.width_mode == modes.width
            && self.height_mode == modes.height
            && float_eq(self.available_width, available.width)
            && float_eq(self.available_height, available.height)
    }
}

/// Per-node cache with one final-layout slot and a FIFO measurement ring
#[derive(Debug, Clone, Default)]
pub(crate) struct MeasurementCache {
    layout: Option<CachedMeasurement>,
    measurements: [Option<CachedMeasurement>; MAX_CACHED_MEASUREMENTS],
    next_index: usize,
}

/// Inputs to a cache lookup beyond the request itself
#[derive(Debug, Clone, Copy)]
pub(crate) struct LookupContext {
    /// The node measures its own content
    pub measured_leaf: bool,
    pub perform_layout: bool,
    /// Owner size of the request
    pub owner: Size<Option<f32>>,
    /// Horizontal and vertical margin sums of the node
    pub margin: Size<f32>,
    pub point_scale_factor: f32,
}

impl MeasurementCache {
    /// Drop every entry
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn is_empty(&self) -> bool {
        self.layout.is_none() && self.measurements.iter().all(Option::is_none)
    }

    /// Find a reusable result for a request.
    pub fn get(
        &self,
        available: Size<Option<f32>>,
        modes: Size<MeasureMode>,
        context: LookupContext,
    ) -> Option<Size<f32>> {
        if context.measured_leaf {
            let reusable = |entry: &CachedMeasurement| {
                entry.same_owner(context.owner)
                    && can_use_cached_measurement(entry, available, modes, context.margin, context.point_scale_factor)
            };
            if let Some(entry) = self.layout.as_ref().filter(|e| reusable(e)) {
                return Some(entry.computed);
            }
            return self
                .measurements
                .iter()
                .flatten()
                .find(|e| reusable(e))
                .map(|e| e.computed);
        }

        if context.perform_layout {
            return self
                .layout
                .as_ref()
                .filter(|e| e.same_owner(context.owner) && e.matches_exactly(available, modes))
                .map(|e| e.computed);
        }

        self.measurements
            .iter()
            .flatten()
            .find(|e| e.same_owner(context.owner) && e.matches_exactly(available, modes))
            .map(|e| e.computed)
    }

    /// Record a freshly computed result.
    pub fn store(&mut self, entry: CachedMeasurement, perform_layout: bool) {
        if perform_layout {
            self.layout = Some(entry);
            return;
        }
        if self.next_index == MAX_CACHED_MEASUREMENTS {
            self.next_index = 0;
        }
        self.measurements[self.next_index] = Some(entry);
        self.next_index += 1;
    }

    #[cfg(test)]
    pub fn measurement_count(&self) -> usize {
        self.measurements.iter().flatten().count()
    }
}

/// Whether an entry computed under other constraints yields the same size.
///
/// Per axis, reuse is sound when the constraint is identical, when an
/// exact request equals the size the entry produced, when an at-most
/// request is loose enough for a result measured without constraint, or
/// when a tighter at-most bound still holds the result measured under a
/// looser one.
pub(crate) fn can_use_cached_measurement(
    entry: &CachedMeasurement,
    available: Size<Option<f32>>,
    modes: Size<MeasureMode>,
    margin: Size<f32>,
    point_scale_factor: f32,
) -> bool {
    if entry.computed.width < 0.0 || entry.computed.height < 0.0 {
        return false;
    }

    let rounded = point_scale_factor != 0.0;
    let effective = |value: Option<f32>| {
        if rounded {
            value.map(|v| round_value_to_pixel_grid(v, point_scale_factor, false, false))
        } else {
            value
        }
    };

    let width_compatible = axis_compatible(
        modes.width,
        available.width,
        effective(available.width),
        entry.width_mode,
        entry.available_width,
        effective(entry.available_width),
        entry.computed.width,
        margin.width,
    );
    let height_compatible = axis_compatible(
        modes.height,
        available.height,
        effective(available.height),
        entry.height_mode,
        entry.available_height,
        effective(entry.available_height),
        entry.computed.height,
        margin.height,
    );
    width_compatible && height_compatible
}

#[allow(clippy::too_many_arguments)]
fn axis_compatible(
    mode: MeasureMode,
    size: Option<f32>,
    effective_size: Option<f32>,
    last_mode: MeasureMode,
    last_size: Option<f32>,
    effective_last_size: Option<f32>,
    last_computed: f32,
    margin: f32,
) -> bool {
    if last_mode == mode && float_eq(effective_last_size, effective_size) {
        return true;
    }

    let Some(inner) = size.map(|s| s - margin) else {
        return false;
    };
    let fits = inner >= last_computed || approx_eq(inner, last_computed);

    match (mode, last_mode) {
        // Exact request matching the size produced last time
        (MeasureMode::Exactly, _) => approx_eq(inner, last_computed),
        // Measured without constraint and the result still fits
        (MeasureMode::AtMost, MeasureMode::Undefined) => fits,
        // Tighter bound than last time, result still inside it
        (MeasureMode::AtMost, MeasureMode::AtMost) => match last_size {
            Some(last) => last > inner + margin && (last_computed <= inner || approx_eq(inner, last_computed)),
            None => false,
        },
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const NO_MARGIN: Size<f32> = Size::ZERO;
    const OWNER: Size<Option<f32>> = Size::new(Some(200.0), None);

    fn entry(width: Option<f32>, width_mode: MeasureMode, computed_width: f32) -> CachedMeasurement {
        CachedMeasurement::new(
            Size::new(width, None),
            Size::new(width_mode, MeasureMode::Undefined),
            OWNER,
            Size::new(computed_width, 20.0),
        )
    }

    fn reusable(entry: &CachedMeasurement, width: Option<f32>, mode: MeasureMode) -> bool {
        can_use_cached_measurement(
            entry,
            Size::new(width, None),
            Size::new(mode, MeasureMode::Undefined),
            NO_MARGIN,
            0.0,
        )
    }

    #[test]
    fn test_identical_request_is_reused() {
        let e = entry(Some(100.0), MeasureMode::AtMost, 80.0);
        assert!(reusable(&e, Some(100.0), MeasureMode::AtMost));
        assert!(reusable(&e, Some(100.00001), MeasureMode::AtMost));
    }

    #[test]
    fn test_exact_request_matching_computed_size() {
        let e = entry(Some(100.0), MeasureMode::AtMost, 80.0);
        assert!(reusable(&e, Some(80.0), MeasureMode::Exactly));
        assert!(!reusable(&e, Some(90.0), MeasureMode::Exactly));
    }

    #[test]
    fn test_unconstrained_result_that_fits() {
        let e = entry(None, MeasureMode::Undefined, 80.0);
        assert!(reusable(&e, Some(120.0), MeasureMode::AtMost));
        assert!(!reusable(&e, Some(60.0), MeasureMode::AtMost));
    }

    #[test]
    fn test_stricter_bound_still_valid() {
        let e = entry(Some(200.0), MeasureMode::AtMost, 80.0);
        assert!(reusable(&e, Some(100.0), MeasureMode::AtMost));
        assert!(!reusable(&e, Some(70.0), MeasureMode::AtMost));
        // A looser bound could produce a wider result.
        assert!(!reusable(&e, Some(300.0), MeasureMode::AtMost));
    }

    #[test]
    fn test_exact_entry_is_not_reused_for_looser_at_most() {
        // Text laid out at exactly 100 may come out narrower when allowed 150.
        let e = entry(Some(100.0), MeasureMode::Exactly, 100.0);
        assert!(!reusable(&e, Some(150.0), MeasureMode::AtMost));
    }

    #[test]
    fn test_negative_results_are_never_reused() {
        let e = entry(Some(100.0), MeasureMode::Exactly, -1.0);
        assert!(!reusable(&e, Some(100.0), MeasureMode::Exactly));
    }

    #[test]
    fn test_margins_are_subtracted() {
        let e = entry(Some(100.0), MeasureMode::AtMost, 80.0);
        let margin = Size::new(10.0, 0.0);
        assert!(can_use_cached_measurement(
            &e,
            Size::new(Some(90.0), None),
            Size::new(MeasureMode::Exactly, MeasureMode::Undefined),
            margin,
            0.0,
        ));
    }

    #[test]
    fn test_container_entries_need_identical_keys() {
        let mut cache = MeasurementCache::default();
        cache.store(entry(Some(100.0), MeasureMode::AtMost, 80.0), false);
        let context = LookupContext {
            measured_leaf: false,
            perform_layout: false,
            owner: OWNER,
            margin: NO_MARGIN,
            point_scale_factor: 1.0,
        };

        let modes = Size::new(MeasureMode::AtMost, MeasureMode::Undefined);
        assert!(cache.get(Size::new(Some(100.0), None), modes, context).is_some());
        assert!(cache.get(Size::new(Some(90.0), None), modes, context).is_none());
        assert!(cache.get(Size::new(Some(100.0), None), modes, LookupContext { perform_layout: true, ..context }).is_none());
    }

    #[test]
    fn test_other_owner_size_misses() {
        let mut cache = MeasurementCache::default();
        cache.store(entry(Some(50.0), MeasureMode::Exactly, 50.0), true);
        cache.store(entry(Some(50.0), MeasureMode::Exactly, 50.0), false);
        let modes = Size::new(MeasureMode::Exactly, MeasureMode::Undefined);
        let available = Size::new(Some(50.0), None);

        for (measured_leaf, perform_layout) in [(false, true), (false, false), (true, false)] {
            let context = LookupContext {
                measured_leaf,
                perform_layout,
                owner: OWNER,
                margin: NO_MARGIN,
                point_scale_factor: 1.0,
            };
            assert!(cache.get(available, modes, context).is_some());
            let wider = LookupContext {
                owner: Size::new(Some(400.0), None),
                ..context
            };
            assert!(cache.get(available, modes, wider).is_none());
        }
    }

    #[test]
    fn test_ring_evicts_oldest() {
        let mut cache = MeasurementCache::default();
        for i in 0..=MAX_CACHED_MEASUREMENTS {
            cache.store(entry(Some(i as f32), MeasureMode::Exactly, i as f32), false);
        }
        assert_eq!(cache.measurement_count(), MAX_CACHED_MEASUREMENTS);

        let context = LookupContext {
            measured_leaf: false,
            perform_layout: false,
            owner: OWNER,
            margin: NO_MARGIN,
            point_scale_factor: 0.0,
        };
        let modes = Size::new(MeasureMode::Exactly, MeasureMode::Undefined);
        assert!(cache.get(Size::new(Some(0.0), None), modes, context).is_none());
        assert!(cache.get(Size::new(Some(8.0), None), modes, context).is_some());

        cache.clear();
        assert!(cache.is_empty());
    }
}
