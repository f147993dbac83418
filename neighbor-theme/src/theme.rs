//! The aggregate theme and its composer.
//!
//! [`create_theme`] runs every sub-theme factory over its slice of
//! [`ThemeOptions`] and assembles the result. Construction never fails:
//! factories report problems through `tracing` and fall back to defaults.
//!
//! ```
//! use neighbor_theme::{PaletteMode, PaletteOptionsBuilder, ThemeOptionsBuilder, create_theme};
//!
//! let theme = create_theme(
//!     ThemeOptionsBuilder::default()
//!         .palette(PaletteOptionsBuilder::default().mode(PaletteMode::Dark).build().unwrap())
//!         .build()
//!         .unwrap(),
//! );
//! assert_eq!(theme.palette.text.primary, "#fff");
//! ```

use derive_builder::Builder;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    breakpoints::{Breakpoints, BreakpointsOptions, create_breakpoints},
    merge::{merge_fields, merge_into, replace_on_merge},
    palette::{Palette, PaletteOptions, create_palette},
    shadows::{Shadows, create_shadows},
    shape::{Shape, ShapeOptions, create_shape},
    spacing::{Spacing, create_spacing},
    transitions::{Transitions, TransitionsOptions, create_transitions},
    typography::{Typography, TypographyOptions, create_typography},
    z_index::{ZIndex, ZIndexOptions, create_z_index},
};

/// Text direction.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Left to right.
    #[default]
    Ltr,
    /// Right to left.
    Rtl,
}

replace_on_merge!(Direction);

/// Caller supplied theme options. Every field is independently optional.
#[derive(Builder, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[builder(pattern = "owned", default, setter(into, strip_option))]
#[serde(rename_all = "camelCase", default)]
pub struct ThemeOptions {
    /// Breakpoint tiers.
    pub breakpoints: Option<BreakpointsOptions>,
    /// Text direction; left to right when absent.
    pub direction: Option<Direction>,
    /// Color palette.
    pub palette: Option<PaletteOptions>,
    /// Elevation shadows, replacing the default table wholesale.
    pub shadows: Option<Vec<String>>,
    /// Corner rounding.
    pub shape: Option<ShapeOptions>,
    /// Spacing grid unit in pixels.
    pub spacing: Option<f64>,
    /// Motion tokens.
    pub transitions: Option<TransitionsOptions>,
    /// Typography scale.
    pub typography: Option<TypographyOptions>,
    /// Stacking order.
    pub z_index: Option<ZIndexOptions>,
}

merge_fields!(ThemeOptions {
    breakpoints,
    direction,
    palette,
    shadows,
    shape,
    spacing,
    transitions,
    typography,
    z_index,
});

/// A fully resolved theme.
///
/// Treated as read-only once built; share it behind an `Arc` (see
/// [`crate::context`]) rather than mutating it.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Theme {
    /// Breakpoint tiers and media query builders.
    pub breakpoints: Breakpoints,
    /// Text direction.
    pub direction: Direction,
    /// Color palette.
    pub palette: Palette,
    /// Elevation shadows.
    pub shadows: Shadows,
    /// Corner rounding.
    pub shape: Shape,
    /// Spacing scale.
    pub spacing: Spacing,
    /// Motion tokens.
    pub transitions: Transitions,
    /// Typography scale.
    pub typography: Typography,
    /// Stacking order.
    pub z_index: ZIndex,
}

/// Builds a theme from partial options.
pub fn create_theme(options: ThemeOptions) -> Theme {
    let theme = Theme {
        breakpoints: create_breakpoints(options.breakpoints.unwrap_or_default()),
        direction: options.direction.unwrap_or_default(),
        palette: create_palette(options.palette.unwrap_or_default()),
        shadows: create_shadows(options.shadows),
        shape: create_shape(options.shape.unwrap_or_default()),
        spacing: create_spacing(options.spacing),
        transitions: create_transitions(options.transitions.unwrap_or_default()),
        typography: create_typography(options.typography.unwrap_or_default()),
        z_index: create_z_index(options.z_index.unwrap_or_default()),
    };
    debug!(
        mode = %theme.palette.mode,
        direction = ?theme.direction,
        "theme created"
    );
    theme
}

impl Default for Theme {
    fn default() -> Self {
        create_theme(ThemeOptions::default())
    }
}

impl Theme {
    /// Converts the theme back into options that rebuild it exactly.
    pub fn to_options(&self) -> ThemeOptions {
        ThemeOptions {
            breakpoints: Some(BreakpointsOptions {
                values: Some(self.breakpoints.values.clone()),
                unit: Some(self.breakpoints.unit.clone()),
                step: Some(self.breakpoints.step),
            }),
            direction: Some(self.direction),
            palette: Some(self.palette.to_options()),
            shadows: Some(self.shadows.to_options()),
            shape: Some(self.shape.to_options()),
            spacing: Some(self.spacing.unit),
            transitions: Some(self.transitions.to_options()),
            typography: Some(self.typography.to_options()),
            z_index: Some(self.z_index.to_options()),
        }
    }

    /// Builds a new theme from this one with `overlay` deep-merged on top.
    ///
    /// Values resolved in this theme are kept unless the overlay sets them,
    /// so switching `palette.mode` alone keeps the current text and
    /// background colors.
    pub fn extend(&self, overlay: ThemeOptions) -> Theme {
        let mut options = self.to_options();
        merge_into(&mut options, overlay);
        create_theme(options)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;
    use crate::{
        palette::{PaletteMode, PaletteOptionsBuilder},
        shape::ShapeOptionsBuilder,
        typography::TypographyOptionsBuilder,
    };

    fn dark() -> ThemeOptions {
        ThemeOptionsBuilder::default()
            .palette(
                PaletteOptionsBuilder::default()
                    .mode(PaletteMode::Dark)
                    .build()
                    .unwrap(),
            )
            .build()
            .unwrap()
    }

    #[test]
    fn test_default_theme_is_light() {
        let theme = create_theme(ThemeOptions::default());
        assert_eq!(theme.palette.mode, PaletteMode::Light);
        assert_eq!(theme.direction, Direction::Ltr);
        assert_eq!(theme.spacing.apply([2]), "8px");
        assert_eq!(theme.shadows.len(), 25);
    }

    #[test]
    fn test_dark_mode_text() {
        let theme = create_theme(dark());
        assert_eq!(theme.palette.mode, PaletteMode::Dark);
        assert_eq!(theme.palette.text.primary, "#fff");
    }

    #[test]
    fn test_rebuilding_from_own_options_is_stable() {
        for options in [ThemeOptions::default(), dark()] {
            let theme = create_theme(options);
            let rebuilt = create_theme(theme.to_options());
            assert_eq!(rebuilt, theme);
            assert_eq!(create_theme(rebuilt.to_options()), theme);
        }
    }

    #[test]
    fn test_custom_values_survive_rebuild() {
        let options = ThemeOptionsBuilder::default()
            .spacing(8.0)
            .direction(Direction::Rtl)
            .shape(ShapeOptionsBuilder::default().border_radius(0.0).build().unwrap())
            .typography(
                TypographyOptionsBuilder::default()
                    .font_family("Inter")
                    .build()
                    .unwrap(),
            )
            .breakpoints(BreakpointsOptions {
                values: Some(BTreeMap::from([("phone".into(), 0.0), ("desk".into(), 1024.0)])),
                ..BreakpointsOptions::default()
            })
            .build()
            .unwrap();
        let theme = create_theme(options);
        assert_eq!(create_theme(theme.to_options()), theme);
        assert_eq!(theme.breakpoints.keys, ["phone", "desk"]);
    }

    #[test]
    fn test_extend_overrides_one_slice() {
        let base = Theme::default();
        let extended = base.extend(
            ThemeOptionsBuilder::default()
                .z_index(ZIndexOptions {
                    modal: Some(10),
                    ..ZIndexOptions::default()
                })
                .build()
                .unwrap(),
        );
        assert_eq!(extended.z_index.modal, 10);
        assert_eq!(extended.z_index.tooltip, base.z_index.tooltip);
        assert_eq!(extended.palette, base.palette);
    }

    #[test]
    fn test_wire_shape() {
        let json = serde_json::to_value(Theme::default()).unwrap();
        for key in [
            "breakpoints",
            "direction",
            "palette",
            "shadows",
            "shape",
            "spacing",
            "transitions",
            "typography",
            "zIndex",
        ] {
            assert!(json.get(key).is_some(), "missing `{key}`");
        }
        assert_eq!(json["direction"], "ltr");
        assert_eq!(json["palette"]["mode"], "light");
        assert!(json["palette"]["primary"]["contrastText"].is_string());
        assert_eq!(json["spacing"], 4.0);
    }

    #[test]
    fn test_options_from_json() {
        let options: ThemeOptions = serde_json::from_value(serde_json::json!({
            "palette": {"mode": "dark", "primary": {"main": "#ff0000"}},
            "zIndex": {"modal": 5},
            "spacing": 2
        }))
        .unwrap();
        let theme = create_theme(options);
        assert_eq!(theme.palette.primary.main, "#ff0000");
        assert_eq!(theme.z_index.modal, 5);
        assert_eq!(theme.spacing.apply([3]), "6px");
    }
}
