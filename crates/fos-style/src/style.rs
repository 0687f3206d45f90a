//! The per-node style record

use serde::{Deserialize, Serialize};

use crate::{
    AlignContent, AlignItems, Dimension, Direction, Display, Edge, Edges, FlexDirection, FlexWrap,
    JustifyContent, Overflow, PositionType, Size, StyleError,
};

/// All layout-relevant properties of one node.
///
/// Defaults follow the non-web flexbox profile: column direction, no
/// shrinking unless asked for, `align-content: flex-start`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Style {
    // ── Flow ───────────────────────────────────────────────────
    pub direction: Direction,
    pub flex_direction: FlexDirection,
    pub flex_wrap: FlexWrap,
    pub justify_content: JustifyContent,
    pub align_items: AlignItems,
    /// Overrides the container's `align_items` for this item; `None` is auto.
    pub align_self: Option<AlignItems>,
    pub align_content: AlignContent,
    pub position_type: PositionType,
    pub overflow: Overflow,
    pub display: Display,

    // ── Flex factors ───────────────────────────────────────────
    /// The `flex` shorthand; explicit grow/shrink/basis take precedence.
    pub flex: Option<f32>,
    pub flex_grow: Option<f32>,
    pub flex_shrink: Option<f32>,
    pub flex_basis: Dimension,

    // ── Box model ──────────────────────────────────────────────
    pub margin: Edges,
    pub padding: Edges,
    /// Border widths; points only.
    pub border: Edges,
    /// Offsets for relative and absolute positioning.
    pub position: Edges,

    pub size: Size<Dimension>,
    pub min_size: Size<Dimension>,
    pub max_size: Size<Dimension>,
    /// Width divided by height.
    pub aspect_ratio: Option<f32>,

    /// Space between items along a row.
    pub column_gap: f32,
    /// Space between items along a column.
    pub row_gap: f32,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            direction: Direction::Inherit,
            flex_direction: FlexDirection::Column,
            flex_wrap: FlexWrap::NoWrap,
            justify_content: JustifyContent::FlexStart,
            align_items: AlignItems::Stretch,
            align_self: None,
            align_content: AlignContent::FlexStart,
            position_type: PositionType::Relative,
            overflow: Overflow::Visible,
            display: Display::Flex,
            flex: None,
            flex_grow: None,
            flex_shrink: None,
            flex_basis: Dimension::Auto,
            margin: Edges::UNDEFINED,
            padding: Edges::UNDEFINED,
            border: Edges::UNDEFINED,
            position: Edges::UNDEFINED,
            size: Size::new(Dimension::Auto, Dimension::Auto),
            min_size: Size::new(Dimension::Undefined, Dimension::Undefined),
            max_size: Size::new(Dimension::Undefined, Dimension::Undefined),
            aspect_ratio: None,
            column_gap: 0.0,
            row_gap: 0.0,
        }
    }
}

impl Style {
    /// Effective grow factor after the `flex` shorthand.
    pub fn flex_grow_factor(&self) -> f32 {
        match (self.flex_grow, self.flex) {
            (Some(grow), _) => grow,
            (None, Some(flex)) if flex > 0.0 => flex,
            _ => 0.0,
        }
    }

    /// Effective shrink factor after the `flex` shorthand.
    pub fn flex_shrink_factor(&self, web_defaults: bool) -> f32 {
        match (self.flex_shrink, self.flex) {
            (Some(shrink), _) => shrink,
            (None, Some(flex)) if !web_defaults && flex < 0.0 => -flex,
            _ if web_defaults => 1.0,
            _ => 0.0,
        }
    }

    /// Effective flex basis after the `flex` shorthand.
    pub fn flex_basis_dimension(&self, web_defaults: bool) -> Dimension {
        match self.flex_basis {
            Dimension::Auto | Dimension::Undefined => match self.flex {
                Some(flex) if flex > 0.0 && !web_defaults => Dimension::ZERO,
                _ => Dimension::Auto,
            },
            basis => basis,
        }
    }

    /// Width (row) or height (column), with equal min and max standing in
    /// for the dimension itself.
    pub fn resolved_dimension(&self, row: bool) -> Dimension {
        let min = *self.min_size.get(row);
        let max = *self.max_size.get(row);
        if max.number().is_some() && max == min {
            max
        } else {
            *self.size.get(row)
        }
    }

    /// Gap between neighbouring items when `row` is the main axis.
    pub fn main_gap(&self, row: bool) -> f32 {
        if row { self.column_gap } else { self.row_gap }
    }

    /// Check the style for values the engine cannot honour.
    pub fn validate(&self) -> Result<(), StyleError> {
        check_non_negative_dimension("width", self.size.width)?;
        check_non_negative_dimension("height", self.size.height)?;
        check_non_negative_dimension("min-width", self.min_size.width)?;
        check_non_negative_dimension("min-height", self.min_size.height)?;
        check_non_negative_dimension("max-width", self.max_size.width)?;
        check_non_negative_dimension("max-height", self.max_size.height)?;
        check_non_negative_dimension("flex-basis", self.flex_basis)?;

        for (edge, value) in self.margin.entries() {
            check_finite_dimension(edge_property("margin", edge), value)?;
        }
        for (edge, value) in self.position.entries() {
            check_finite_dimension(edge_property("position", edge), value)?;
        }
        for (edge, value) in self.padding.entries() {
            check_non_negative_dimension(edge_property("padding", edge), value)?;
        }
        for (edge, value) in self.border.entries() {
            let property = edge_property("border", edge);
            if matches!(value, Dimension::Percent(_)) {
                return Err(StyleError::PercentNotAllowed { property });
            }
            check_non_negative_dimension(property, value)?;
        }

        check_factor("flex", self.flex, false)?;
        check_factor("flex-grow", self.flex_grow, true)?;
        check_factor("flex-shrink", self.flex_shrink, true)?;
        check_non_negative("column-gap", self.column_gap)?;
        check_non_negative("row-gap", self.row_gap)?;

        if let Some(ratio) = self.aspect_ratio {
            if !ratio.is_finite() || ratio <= 0.0 {
                return Err(StyleError::InvalidAspectRatio(ratio));
            }
        }
        Ok(())
    }
}

fn edge_property(prefix: &'static str, edge: Edge) -> &'static str {
    macro_rules! names {
        ($($p:literal),*) => {
            match (prefix, edge) {
                $(
                    ($p, Edge::Left) => concat!($p, "-left"),
                    ($p, Edge::Top) => concat!($p, "-top"),
                    ($p, Edge::Right) => concat!($p, "-right"),
                    ($p, Edge::Bottom) => concat!($p, "-bottom"),
                    ($p, Edge::Start) => concat!($p, "-start"),
                    ($p, Edge::End) => concat!($p, "-end"),
                    ($p, Edge::Horizontal) => concat!($p, "-horizontal"),
                    ($p, Edge::Vertical) => concat!($p, "-vertical"),
                    ($p, Edge::All) => $p,
                )*
                _ => prefix,
            }
        };
    }
    names!("margin", "padding", "border", "position")
}

fn check_finite_dimension(property: &'static str, value: Dimension) -> Result<(), StyleError> {
    match value.number() {
        Some(v) if !v.is_finite() => Err(StyleError::NotFinite { property }),
        _ => Ok(()),
    }
}

fn check_non_negative_dimension(property: &'static str, value: Dimension) -> Result<(), StyleError> {
    check_finite_dimension(property, value)?;
    match value.number() {
        Some(v) => check_non_negative(property, v),
        None => Ok(()),
    }
}

fn check_non_negative(property: &'static str, value: f32) -> Result<(), StyleError> {
    if !value.is_finite() {
        return Err(StyleError::NotFinite { property });
    }
    if value < 0.0 {
        return Err(StyleError::Negative { property, value });
    }
    Ok(())
}

fn check_factor(property: &'static str, value: Option<f32>, non_negative: bool) -> Result<(), StyleError> {
    match value {
        Some(v) if non_negative => check_non_negative(property, v),
        Some(v) if !v.is_finite() => Err(StyleError::NotFinite { property }),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let style = Style::default();
        assert_eq!(style.flex_direction, FlexDirection::Column);
        assert_eq!(style.size.width, Dimension::Auto);
        assert_eq!(style.min_size.width, Dimension::Undefined);
        assert_eq!(style.flex_grow_factor(), 0.0);
        assert_eq!(style.flex_shrink_factor(false), 0.0);
        assert_eq!(style.flex_shrink_factor(true), 1.0);
        assert!(style.validate().is_ok());
    }

    #[test]
    fn test_flex_shorthand() {
        let style = Style { flex: Some(2.0), ..Default::default() };
        assert_eq!(style.flex_grow_factor(), 2.0);
        assert_eq!(style.flex_shrink_factor(false), 0.0);
        assert_eq!(style.flex_basis_dimension(false), Dimension::ZERO);
        assert_eq!(style.flex_basis_dimension(true), Dimension::Auto);

        let negative = Style { flex: Some(-1.0), ..Default::default() };
        assert_eq!(negative.flex_grow_factor(), 0.0);
        assert_eq!(negative.flex_shrink_factor(false), 1.0);

        let explicit = Style { flex: Some(2.0), flex_grow: Some(0.5), ..Default::default() };
        assert_eq!(explicit.flex_grow_factor(), 0.5);
    }

    #[test]
    fn test_equal_min_max_is_the_dimension() {
        let mut style = Style::default();
        style.min_size.height = Dimension::Points(10.0);
        style.max_size.height = Dimension::Points(10.0);
        assert_eq!(style.resolved_dimension(false), Dimension::Points(10.0));

        style.min_size.height = Dimension::Undefined;
        assert_eq!(style.resolved_dimension(false), Dimension::Auto);
    }

    #[test]
    fn test_rejects_negative_width() {
        let style = Style {
            size: Size::new(Dimension::Points(-1.0), Dimension::Auto),
            ..Default::default()
        };
        assert_eq!(
            style.validate(),
            Err(StyleError::Negative { property: "width", value: -1.0 })
        );
    }

    #[test]
    fn test_rejects_percent_border() {
        let style = Style {
            border: Edges::UNDEFINED.with(Edge::Top, Dimension::Percent(10.0)),
            ..Default::default()
        };
        assert_eq!(
            style.validate(),
            Err(StyleError::PercentNotAllowed { property: "border-top" })
        );
    }

    #[test]
    fn test_negative_margin_is_allowed() {
        let style = Style {
            margin: Edges::uniform(-10.0),
            ..Default::default()
        };
        assert!(style.validate().is_ok());
    }

    #[test]
    fn test_rejects_nan_and_bad_ratio() {
        let style = Style { flex_grow: Some(f32::NAN), ..Default::default() };
        assert_eq!(style.validate(), Err(StyleError::NotFinite { property: "flex-grow" }));

        let style = Style { aspect_ratio: Some(0.0), ..Default::default() };
        assert_eq!(style.validate(), Err(StyleError::InvalidAspectRatio(0.0)));
    }

    #[test]
    fn test_deserialize_from_json() {
        let json = r#"{
            "flexDirection": "row",
            "flexShrink": 1.0,
            "size": { "width": { "points": 80.0 }, "height": { "percent": 50.0 } },
            "margin": { "top": { "points": 10.0 } }
        }"#;
        let style: Style = serde_json::from_str(json).unwrap();

        assert_eq!(style.flex_direction, FlexDirection::Row);
        assert_eq!(style.flex_shrink, Some(1.0));
        assert_eq!(style.size.width, Dimension::Points(80.0));
        assert_eq!(style.size.height, Dimension::Percent(50.0));
        assert_eq!(style.margin.top, Dimension::Points(10.0));
        assert_eq!(style.min_size.width, Dimension::Undefined);
    }
}
