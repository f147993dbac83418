//! Palette construction.
//!
//! [`create_palette`] resolves the six intent colors, derives missing
//! `light`/`dark` shades from `main` using the tonal offset, picks a
//! readable `contrast_text` for every intent and layers caller overrides
//! on top of the mode defaults for text, background, divider and action
//! colors.
//!
//! ```
//! use neighbor_theme::palette::{PaletteMode, PaletteOptionsBuilder, create_palette};
//!
//! let palette = create_palette(
//!     PaletteOptionsBuilder::default()
//!         .mode(PaletteMode::Dark)
//!         .build()
//!         .unwrap(),
//! );
//! assert_eq!(palette.text.primary, "#fff");
//! ```

use std::{fmt, str::FromStr};

use derive_builder::Builder;
use serde::{Deserialize, Deserializer, Serialize};
use tracing::{error, warn};

use crate::{
    color::Color,
    colors::{self, BLUE, ColorScale, GREEN, GREY, ORANGE, PURPLE, RED, Stop},
    error::ThemeError,
    merge::{Merge, merge_fields, replace_on_merge},
};

/// Text color used on dark backgrounds.
pub const LIGHT_TEXT: &str = colors::WHITE;
/// Text color used on light backgrounds.
pub const DARK_TEXT: &str = "rgba(0, 0, 0, 0.87)";

/// Tonal offset used when none is configured.
pub const DEFAULT_TONAL_OFFSET: f64 = 0.2;
/// Contrast ratio text colors should reach when none is configured.
pub const DEFAULT_CONTRAST_THRESHOLD: f64 = 3.0;

/// Light or dark palette mode.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PaletteMode {
    /// Dark text on light surfaces.
    #[default]
    Light,
    /// Light text on dark surfaces.
    Dark,
}

impl PaletteMode {
    /// Resolves a mode name leniently.
    ///
    /// Unsupported names are reported and resolve to [`PaletteMode::Light`].
    pub fn from_name(name: &str) -> Self {
        name.parse().unwrap_or_else(|err: ThemeError| {
            warn!("{err}; falling back to light mode");
            PaletteMode::Light
        })
    }

    /// The lowercase name of the mode.
    pub const fn as_str(self) -> &'static str {
        match self {
            PaletteMode::Light => "light",
            PaletteMode::Dark => "dark",
        }
    }
}

impl FromStr for PaletteMode {
    type Err = ThemeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "light" => Ok(PaletteMode::Light),
            "dark" => Ok(PaletteMode::Dark),
            other => Err(ThemeError::UnsupportedMode(other.to_string())),
        }
    }
}

impl fmt::Display for PaletteMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for PaletteMode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        Ok(PaletteMode::from_name(&name))
    }
}

/// Coefficient used to derive `light` and `dark` shades from `main`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TonalOffset {
    /// One coefficient; the dark shade uses 1.5 times it.
    Uniform(f64),
    /// Separate coefficients for each direction.
    Split {
        /// Coefficient for the light shade.
        light: f64,
        /// Coefficient for the dark shade.
        dark: f64,
    },
}

impl TonalOffset {
    /// Coefficient applied when lightening.
    pub fn light(self) -> f64 {
        match self {
            TonalOffset::Uniform(offset) => offset,
            TonalOffset::Split { light, .. } => light,
        }
    }

    /// Coefficient applied when darkening.
    pub fn dark(self) -> f64 {
        match self {
            TonalOffset::Uniform(offset) => offset * 1.5,
            TonalOffset::Split { dark, .. } => dark,
        }
    }
}

impl Default for TonalOffset {
    fn default() -> Self {
        TonalOffset::Uniform(DEFAULT_TONAL_OFFSET)
    }
}

impl From<f64> for TonalOffset {
    fn from(offset: f64) -> Self {
        TonalOffset::Uniform(offset)
    }
}

/// The six intent colors of a palette.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Intent {
    /// Primary interface elements.
    Primary,
    /// Secondary interface elements.
    Secondary,
    /// Elements the user should be made aware of.
    Error,
    /// Potentially dangerous actions or important messages.
    Warning,
    /// Neutral information.
    Info,
    /// Successful completion of an action.
    Success,
}

impl Intent {
    /// All intents in declaration order.
    pub const ALL: [Intent; 6] = [
        Intent::Primary,
        Intent::Secondary,
        Intent::Error,
        Intent::Warning,
        Intent::Info,
        Intent::Success,
    ];

    /// Lowercase name of the intent.
    pub const fn name(self) -> &'static str {
        match self {
            Intent::Primary => "primary",
            Intent::Secondary => "secondary",
            Intent::Error => "error",
            Intent::Warning => "warning",
            Intent::Info => "info",
            Intent::Success => "success",
        }
    }

    /// The `(main, light, dark)` shades used when the caller supplies no
    /// color for this intent.
    pub fn default_shades(self, mode: PaletteMode) -> (&'static str, &'static str, &'static str) {
        let (scale, [main, light, dark]) = match (self, mode) {
            (Intent::Primary, PaletteMode::Light) => (BLUE, [Stop::S60, Stop::S40, Stop::S80]),
            (Intent::Primary, PaletteMode::Dark) => (BLUE, [Stop::S20, Stop::S5, Stop::S40]),
            (Intent::Secondary, PaletteMode::Light) => {
                (PURPLE, [Stop::S50, Stop::S30, Stop::S70])
            }
            (Intent::Secondary, PaletteMode::Dark) => (PURPLE, [Stop::S20, Stop::S5, Stop::S40]),
            (Intent::Error, PaletteMode::Light) => (RED, [Stop::S70, Stop::S40, Stop::S80]),
            (Intent::Error, PaletteMode::Dark) => (RED, [Stop::S50, Stop::S30, Stop::S70]),
            (Intent::Warning, PaletteMode::Light) => (ORANGE, [Stop::S70, Stop::S50, Stop::S90]),
            (Intent::Warning, PaletteMode::Dark) => (ORANGE, [Stop::S40, Stop::S30, Stop::S70]),
            (Intent::Info, PaletteMode::Light) => (BLUE, [Stop::S20, Stop::S10, Stop::S30]),
            (Intent::Info, PaletteMode::Dark) => (BLUE, [Stop::S40, Stop::S30, Stop::S70]),
            (Intent::Success, PaletteMode::Light) => (GREEN, [Stop::S80, Stop::S50, Stop::S90]),
            (Intent::Success, PaletteMode::Dark) => (GREEN, [Stop::S40, Stop::S30, Stop::S70]),
        };
        (scale.shade(main), scale.shade(light), scale.shade(dark))
    }
}

/// A fully resolved intent color.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaletteColor {
    /// The base shade.
    pub main: String,
    /// A lighter shade of `main`.
    pub light: String,
    /// A darker shade of `main`.
    pub dark: String,
    /// Text color readable on top of `main`.
    pub contrast_text: String,
}

impl PaletteColor {
    /// Converts back into options with every field set.
    pub fn to_options(&self) -> PaletteColorOptions {
        PaletteColorOptions {
            main: Some(self.main.clone()),
            light: Some(self.light.clone()),
            dark: Some(self.dark.clone()),
            contrast_text: Some(self.contrast_text.clone()),
        }
    }
}

/// A partially specified intent color.
///
/// When `main` is missing the intent's default shades fill the gaps.
#[derive(Builder, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[builder(pattern = "owned", default, setter(into, strip_option))]
#[serde(rename_all = "camelCase", default)]
pub struct PaletteColorOptions {
    /// The base shade.
    pub main: Option<String>,
    /// A lighter shade; derived from `main` when absent.
    pub light: Option<String>,
    /// A darker shade; derived from `main` when absent.
    pub dark: Option<String>,
    /// Text color on `main`; chosen by contrast when absent.
    pub contrast_text: Option<String>,
}

impl PaletteColorOptions {
    /// Options carrying only a main color.
    pub fn main(main: impl Into<String>) -> Self {
        Self {
            main: Some(main.into()),
            ..Self::default()
        }
    }
}

impl From<&str> for PaletteColorOptions {
    fn from(main: &str) -> Self {
        Self::main(main)
    }
}

/// Text colors.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeText {
    /// The most important text.
    pub primary: String,
    /// Secondary text.
    pub secondary: String,
    /// Disabled text.
    pub disabled: String,
    /// Icon color, only defined by the dark defaults.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

/// Partial [`TypeText`].
#[derive(Builder, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[builder(pattern = "owned", default, setter(into, strip_option))]
#[serde(rename_all = "camelCase", default)]
pub struct TypeTextOptions {
    /// The most important text.
    pub primary: Option<String>,
    /// Secondary text.
    pub secondary: Option<String>,
    /// Disabled text.
    pub disabled: Option<String>,
    /// Icon color.
    pub icon: Option<String>,
}

/// Surface background colors.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeBackground {
    /// Page background.
    pub default: String,
    /// Paper surface background.
    pub paper: String,
}

/// Partial [`TypeBackground`].
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TypeBackgroundOptions {
    /// Page background.
    pub default: Option<String>,
    /// Paper surface background.
    pub paper: Option<String>,
}

/// Colors and opacities for interactive elements.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeAction {
    /// An active action, like an icon button.
    pub active: String,
    /// A hovered action.
    pub hover: String,
    /// Opacity of the hover overlay.
    pub hover_opacity: f64,
    /// A selected action.
    pub selected: String,
    /// Opacity of the selected overlay.
    pub selected_opacity: f64,
    /// A disabled action.
    pub disabled: String,
    /// Background of a disabled action.
    pub disabled_background: String,
    /// Opacity of disabled content.
    pub disabled_opacity: f64,
    /// A focused action.
    pub focus: String,
    /// Opacity of the focus overlay.
    pub focus_opacity: f64,
    /// Opacity of the activated overlay.
    pub activated_opacity: f64,
}

/// Partial [`TypeAction`].
#[derive(Builder, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[builder(pattern = "owned", default, setter(into, strip_option))]
#[serde(rename_all = "camelCase", default)]
#[allow(missing_docs)]
pub struct TypeActionOptions {
    pub active: Option<String>,
    pub hover: Option<String>,
    pub hover_opacity: Option<f64>,
    pub selected: Option<String>,
    pub selected_opacity: Option<f64>,
    pub disabled: Option<String>,
    pub disabled_background: Option<String>,
    pub disabled_opacity: Option<f64>,
    pub focus: Option<String>,
    pub focus_opacity: Option<f64>,
    pub activated_opacity: Option<f64>,
}

/// Plain black and white.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommonColors {
    /// Black.
    pub black: String,
    /// White.
    pub white: String,
}

impl Default for CommonColors {
    fn default() -> Self {
        Self {
            black: colors::BLACK.to_string(),
            white: colors::WHITE.to_string(),
        }
    }
}

/// Partial [`CommonColors`].
#[derive(Builder, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[builder(pattern = "owned", default, setter(into, strip_option))]
#[serde(default)]
pub struct CommonColorsOptions {
    /// Black.
    pub black: Option<String>,
    /// White.
    pub white: Option<String>,
}

/// Caller supplied palette options. Every field is optional.
#[derive(Builder, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[builder(pattern = "owned", default, setter(into, strip_option))]
#[serde(rename_all = "camelCase", default)]
pub struct PaletteOptions {
    /// Light or dark mode; light when absent.
    pub mode: Option<PaletteMode>,
    /// Primary intent.
    pub primary: Option<PaletteColorOptions>,
    /// Secondary intent.
    pub secondary: Option<PaletteColorOptions>,
    /// Error intent.
    pub error: Option<PaletteColorOptions>,
    /// Warning intent.
    pub warning: Option<PaletteColorOptions>,
    /// Info intent.
    pub info: Option<PaletteColorOptions>,
    /// Success intent.
    pub success: Option<PaletteColorOptions>,
    /// Offset used to derive light/dark shades; 0.2 when absent.
    pub tonal_offset: Option<TonalOffset>,
    /// Contrast a text color should reach; 3 when absent.
    pub contrast_threshold: Option<f64>,
    /// Black and white overrides.
    pub common: Option<CommonColorsOptions>,
    /// Text color overrides.
    pub text: Option<TypeTextOptions>,
    /// Divider color override.
    pub divider: Option<String>,
    /// Background overrides.
    pub background: Option<TypeBackgroundOptions>,
    /// Action color overrides.
    pub action: Option<TypeActionOptions>,
}

impl PaletteOptions {
    fn intent(&self, intent: Intent) -> Option<&PaletteColorOptions> {
        match intent {
            Intent::Primary => self.primary.as_ref(),
            Intent::Secondary => self.secondary.as_ref(),
            Intent::Error => self.error.as_ref(),
            Intent::Warning => self.warning.as_ref(),
            Intent::Info => self.info.as_ref(),
            Intent::Success => self.success.as_ref(),
        }
    }
}

replace_on_merge!(PaletteMode, TonalOffset);
merge_fields!(PaletteColorOptions {
    main,
    light,
    dark,
    contrast_text
});
merge_fields!(TypeTextOptions {
    primary,
    secondary,
    disabled,
    icon
});
merge_fields!(TypeBackgroundOptions { default, paper });
merge_fields!(TypeActionOptions {
    active,
    hover,
    hover_opacity,
    selected,
    selected_opacity,
    disabled,
    disabled_background,
    disabled_opacity,
    focus,
    focus_opacity,
    activated_opacity,
});
merge_fields!(CommonColorsOptions { black, white });
merge_fields!(PaletteOptions {
    mode,
    primary,
    secondary,
    error,
    warning,
    info,
    success,
    tonal_offset,
    contrast_threshold,
    common,
    text,
    divider,
    background,
    action,
});

fn overwrite<T>(slot: &mut T, value: Option<T>) {
    if let Some(value) = value {
        *slot = value;
    }
}

impl Merge<TypeTextOptions> for TypeText {
    fn merge_from(&mut self, overlay: TypeTextOptions) {
        overwrite(&mut self.primary, overlay.primary);
        overwrite(&mut self.secondary, overlay.secondary);
        overwrite(&mut self.disabled, overlay.disabled);
        if overlay.icon.is_some() {
            self.icon = overlay.icon;
        }
    }
}

impl Merge<TypeBackgroundOptions> for TypeBackground {
    fn merge_from(&mut self, overlay: TypeBackgroundOptions) {
        overwrite(&mut self.default, overlay.default);
        overwrite(&mut self.paper, overlay.paper);
    }
}

impl Merge<TypeActionOptions> for TypeAction {
    fn merge_from(&mut self, overlay: TypeActionOptions) {
        overwrite(&mut self.active, overlay.active);
        overwrite(&mut self.hover, overlay.hover);
        overwrite(&mut self.hover_opacity, overlay.hover_opacity);
        overwrite(&mut self.selected, overlay.selected);
        overwrite(&mut self.selected_opacity, overlay.selected_opacity);
        overwrite(&mut self.disabled, overlay.disabled);
        overwrite(&mut self.disabled_background, overlay.disabled_background);
        overwrite(&mut self.disabled_opacity, overlay.disabled_opacity);
        overwrite(&mut self.focus, overlay.focus);
        overwrite(&mut self.focus_opacity, overlay.focus_opacity);
        overwrite(&mut self.activated_opacity, overlay.activated_opacity);
    }
}

impl Merge<CommonColorsOptions> for CommonColors {
    fn merge_from(&mut self, overlay: CommonColorsOptions) {
        overwrite(&mut self.black, overlay.black);
        overwrite(&mut self.white, overlay.white);
    }
}

/// Text, divider, background and action defaults for one mode.
struct ModeDefaults {
    text: TypeText,
    divider: String,
    background: TypeBackground,
    action: TypeAction,
}

impl ModeDefaults {
    fn for_mode(mode: PaletteMode) -> Self {
        match mode {
            PaletteMode::Light => Self {
                text: TypeText {
                    primary: DARK_TEXT.into(),
                    secondary: "rgba(0, 0, 0, 0.6)".into(),
                    disabled: "rgba(0, 0, 0, 0.38)".into(),
                    icon: None,
                },
                divider: "rgba(0, 0, 0, 0.12)".into(),
                background: TypeBackground {
                    default: colors::WHITE.into(),
                    paper: colors::WHITE.into(),
                },
                action: TypeAction {
                    active: "rgba(0, 0, 0, 0.54)".into(),
                    hover: "rgba(0, 0, 0, 0.04)".into(),
                    hover_opacity: 0.04,
                    selected: "rgba(0, 0, 0, 0.08)".into(),
                    selected_opacity: 0.08,
                    disabled: "rgba(0, 0, 0, 0.26)".into(),
                    disabled_background: "rgba(0, 0, 0, 0.12)".into(),
                    disabled_opacity: 0.38,
                    focus: "rgba(0, 0, 0, 0.12)".into(),
                    focus_opacity: 0.12,
                    activated_opacity: 0.12,
                },
            },
            PaletteMode::Dark => Self {
                text: TypeText {
                    primary: LIGHT_TEXT.into(),
                    secondary: "rgba(255, 255, 255, 0.7)".into(),
                    disabled: "rgba(255, 255, 255, 0.5)".into(),
                    icon: Some("rgba(255, 255, 255, 0.5)".into()),
                },
                divider: "rgba(255, 255, 255, 0.12)".into(),
                background: TypeBackground {
                    default: "#121212".into(),
                    paper: "#121212".into(),
                },
                action: TypeAction {
                    active: colors::WHITE.into(),
                    hover: "rgba(255, 255, 255, 0.08)".into(),
                    hover_opacity: 0.08,
                    selected: "rgba(255, 255, 255, 0.16)".into(),
                    selected_opacity: 0.16,
                    disabled: "rgba(255, 255, 255, 0.3)".into(),
                    disabled_background: "rgba(255, 255, 255, 0.12)".into(),
                    disabled_opacity: 0.38,
                    focus: "rgba(255, 255, 255, 0.12)".into(),
                    focus_opacity: 0.12,
                    activated_opacity: 0.24,
                },
            },
        }
    }
}

/// A fully resolved palette.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Palette {
    /// Light or dark.
    pub mode: PaletteMode,
    /// Plain black and white.
    pub common: CommonColors,
    /// Primary intent.
    pub primary: PaletteColor,
    /// Secondary intent.
    pub secondary: PaletteColor,
    /// Error intent.
    pub error: PaletteColor,
    /// Warning intent.
    pub warning: PaletteColor,
    /// Info intent.
    pub info: PaletteColor,
    /// Success intent.
    pub success: PaletteColor,
    /// The grey scale.
    pub grey: ColorScale,
    /// Contrast a text color should reach.
    pub contrast_threshold: f64,
    /// Offset used to derive light/dark shades.
    pub tonal_offset: TonalOffset,
    /// Text colors.
    pub text: TypeText,
    /// Divider color.
    pub divider: String,
    /// Background colors.
    pub background: TypeBackground,
    /// Action colors.
    pub action: TypeAction,
}

impl Palette {
    /// Returns the resolved color of an intent.
    pub fn intent(&self, intent: Intent) -> &PaletteColor {
        match intent {
            Intent::Primary => &self.primary,
            Intent::Secondary => &self.secondary,
            Intent::Error => &self.error,
            Intent::Warning => &self.warning,
            Intent::Info => &self.info,
            Intent::Success => &self.success,
        }
    }

    /// Picks the text color that reads best on `background`.
    pub fn contrast_text(&self, background: &str) -> Result<&'static str, ThemeError> {
        contrast_text(background, self.contrast_threshold)
    }

    /// Fills in the missing shades of a caller supplied color using this
    /// palette's tonal offset and contrast threshold.
    pub fn augment_color(&self, color: &PaletteColorOptions) -> Result<PaletteColor, ThemeError> {
        augment_color(color, self.tonal_offset, self.contrast_threshold)
    }

    /// Converts back into options with every field set.
    pub fn to_options(&self) -> PaletteOptions {
        PaletteOptions {
            mode: Some(self.mode),
            primary: Some(self.primary.to_options()),
            secondary: Some(self.secondary.to_options()),
            error: Some(self.error.to_options()),
            warning: Some(self.warning.to_options()),
            info: Some(self.info.to_options()),
            success: Some(self.success.to_options()),
            tonal_offset: Some(self.tonal_offset),
            contrast_threshold: Some(self.contrast_threshold),
            common: Some(CommonColorsOptions {
                black: Some(self.common.black.clone()),
                white: Some(self.common.white.clone()),
            }),
            text: Some(TypeTextOptions {
                primary: Some(self.text.primary.clone()),
                secondary: Some(self.text.secondary.clone()),
                disabled: Some(self.text.disabled.clone()),
                icon: self.text.icon.clone(),
            }),
            divider: Some(self.divider.clone()),
            background: Some(TypeBackgroundOptions {
                default: Some(self.background.default.clone()),
                paper: Some(self.background.paper.clone()),
            }),
            action: Some(TypeActionOptions {
                active: Some(self.action.active.clone()),
                hover: Some(self.action.hover.clone()),
                hover_opacity: Some(self.action.hover_opacity),
                selected: Some(self.action.selected.clone()),
                selected_opacity: Some(self.action.selected_opacity),
                disabled: Some(self.action.disabled.clone()),
                disabled_background: Some(self.action.disabled_background.clone()),
                disabled_opacity: Some(self.action.disabled_opacity),
                focus: Some(self.action.focus.clone()),
                focus_opacity: Some(self.action.focus_opacity),
                activated_opacity: Some(self.action.activated_opacity),
            }),
        }
    }
}

impl Default for Palette {
    fn default() -> Self {
        create_palette(PaletteOptions::default())
    }
}

/// Picks whichever of [`LIGHT_TEXT`] and [`DARK_TEXT`] contrasts more with
/// `background`.
///
/// The choice is best effort: when even the better candidate stays below
/// `threshold` it is still returned and a warning is logged.
pub fn contrast_text(background: &str, threshold: f64) -> Result<&'static str, ThemeError> {
    let background_color = Color::parse(background)?;
    let light = background_color.contrast_ratio(Color::parse(LIGHT_TEXT)?);
    let dark = background_color.contrast_ratio(Color::parse(DARK_TEXT)?);
    let (text, ratio) = if light >= dark {
        (LIGHT_TEXT, light)
    } else {
        (DARK_TEXT, dark)
    };

    if ratio < threshold {
        warn!(
            "the contrast ratio of {ratio:.2}:1 for {text} on {background} falls below the \
             recommended minimum of {threshold}:1"
        );
    }
    Ok(text)
}

/// Fills in `light`, `dark` and `contrast_text` for a color that only
/// defines some of them.
///
/// Missing shades are derived from `main`: `light` is lightened by
/// [`TonalOffset::light`], `dark` darkened by [`TonalOffset::dark`].
pub fn augment_color(
    color: &PaletteColorOptions,
    tonal_offset: TonalOffset,
    contrast_threshold: f64,
) -> Result<PaletteColor, ThemeError> {
    let Some(main) = color.main.clone() else {
        return Err(ThemeError::invalid_color("", "a palette color needs a main shade"));
    };
    let main_color = Color::parse(&main)?;

    let light = match &color.light {
        Some(light) => light.clone(),
        None => main_color.lighten(tonal_offset.light()).to_string(),
    };
    let dark = match &color.dark {
        Some(dark) => dark.clone(),
        None => main_color.darken(tonal_offset.dark()).to_string(),
    };
    let contrast_text = match &color.contrast_text {
        Some(text) => text.clone(),
        None => contrast_text(&main, contrast_threshold)?.to_string(),
    };

    Ok(PaletteColor {
        main,
        light,
        dark,
        contrast_text,
    })
}

fn default_intent_options(intent: Intent, mode: PaletteMode) -> PaletteColorOptions {
    let (main, light, dark) = intent.default_shades(mode);
    PaletteColorOptions {
        main: Some(main.into()),
        light: Some(light.into()),
        dark: Some(dark.into()),
        contrast_text: None,
    }
}

fn resolve_intent(
    intent: Intent,
    supplied: Option<&PaletteColorOptions>,
    mode: PaletteMode,
    tonal_offset: TonalOffset,
    contrast_threshold: f64,
) -> PaletteColor {
    let defaults = default_intent_options(intent, mode);
    let options = match supplied {
        Some(supplied) if supplied.main.is_some() => supplied.clone(),
        Some(supplied) => {
            let mut options = defaults.clone();
            options.merge_from(supplied.clone());
            options
        }
        None => defaults.clone(),
    };

    augment_color(&options, tonal_offset, contrast_threshold).unwrap_or_else(|err| {
        error!("{} palette color is unusable ({err}); using the default", intent.name());
        let (main, light, dark) = intent.default_shades(mode);
        PaletteColor {
            main: main.into(),
            light: light.into(),
            dark: dark.into(),
            contrast_text: contrast_text(main, contrast_threshold)
                .unwrap_or(DARK_TEXT)
                .into(),
        }
    })
}

/// Builds a palette from partial options.
///
/// Never fails: unusable caller colors are reported and replaced by the
/// mode defaults, and low contrast text is reported but kept.
pub fn create_palette(options: PaletteOptions) -> Palette {
    let mode = options.mode.unwrap_or_default();
    let tonal_offset = options.tonal_offset.unwrap_or_default();
    let contrast_threshold = options
        .contrast_threshold
        .unwrap_or(DEFAULT_CONTRAST_THRESHOLD);

    let resolve = |intent| {
        resolve_intent(
            intent,
            options.intent(intent),
            mode,
            tonal_offset,
            contrast_threshold,
        )
    };
    let primary = resolve(Intent::Primary);
    let secondary = resolve(Intent::Secondary);
    let error = resolve(Intent::Error);
    let warning = resolve(Intent::Warning);
    let info = resolve(Intent::Info);
    let success = resolve(Intent::Success);

    let ModeDefaults {
        mut text,
        mut divider,
        mut background,
        mut action,
    } = ModeDefaults::for_mode(mode);
    let mut common = CommonColors::default();

    if let Some(overrides) = options.text {
        text.merge_from(overrides);
    }
    overwrite(&mut divider, options.divider);
    if let Some(overrides) = options.background {
        background.merge_from(overrides);
    }
    if let Some(overrides) = options.action {
        action.merge_from(overrides);
    }
    if let Some(overrides) = options.common {
        common.merge_from(overrides);
    }

    Palette {
        mode,
        common,
        primary,
        secondary,
        error,
        warning,
        info,
        success,
        grey: GREY,
        contrast_threshold,
        tonal_offset,
        text,
        divider,
        background,
        action,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::contrast_ratio;

    fn palette(mode: PaletteMode) -> Palette {
        create_palette(PaletteOptionsBuilder::default().mode(mode).build().unwrap())
    }

    #[test]
    fn test_defaults_are_light() {
        let palette = create_palette(PaletteOptions::default());
        assert_eq!(palette.mode, PaletteMode::Light);
        assert_eq!(palette.primary.main, "#0079E1");
        assert_eq!(palette.primary.light, "#2EA4FF");
        assert_eq!(palette.primary.dark, "#00559E");
        assert_eq!(palette.text.primary, DARK_TEXT);
        assert_eq!(palette.background.paper, "#fff");
        assert_eq!(palette.grey, GREY);
    }

    #[test]
    fn test_dark_mode_defaults() {
        let palette = palette(PaletteMode::Dark);
        assert_eq!(palette.text.primary, "#fff");
        assert_eq!(palette.background.default, "#121212");
        assert_eq!(palette.primary.main, "#95D5FF");
        assert_eq!(palette.action.activated_opacity, 0.24);
        assert!(palette.text.icon.is_some());
    }

    #[test]
    fn test_contrast_text_picks_better_candidate() {
        for mode in [PaletteMode::Light, PaletteMode::Dark] {
            let palette = palette(mode);
            for intent in Intent::ALL {
                let color = palette.intent(intent);
                let chosen = color.contrast_text.as_str();
                assert!(chosen == LIGHT_TEXT || chosen == DARK_TEXT);
                let other = if chosen == LIGHT_TEXT { DARK_TEXT } else { LIGHT_TEXT };
                let chosen_ratio = contrast_ratio(&color.main, chosen).unwrap();
                let other_ratio = contrast_ratio(&color.main, other).unwrap();
                assert!(chosen_ratio >= other_ratio, "{mode} {}", intent.name());
            }
        }
    }

    #[test]
    fn test_low_contrast_still_returns_best_effort() {
        let text = contrast_text("#777", 21.0).unwrap();
        assert!(text == LIGHT_TEXT || text == DARK_TEXT);
    }

    #[test]
    fn test_augment_derives_missing_shades() {
        let palette = create_palette(
            PaletteOptionsBuilder::default()
                .primary(PaletteColorOptions::main("#000"))
                .build()
                .unwrap(),
        );
        assert_eq!(palette.primary.main, "#000");
        assert_eq!(palette.primary.light, "rgb(51, 51, 51)");
        assert_eq!(palette.primary.dark, "rgb(0, 0, 0)");
        assert_eq!(palette.primary.contrast_text, LIGHT_TEXT);
    }

    #[test]
    fn test_split_tonal_offset() {
        let palette = create_palette(
            PaletteOptionsBuilder::default()
                .primary(PaletteColorOptions::main("#808080"))
                .tonal_offset(TonalOffset::Split {
                    light: 0.25,
                    dark: 0.5,
                })
                .build()
                .unwrap(),
        );
        assert_eq!(palette.primary.light, "rgb(160, 160, 160)");
        assert_eq!(palette.primary.dark, "rgb(64, 64, 64)");
    }

    #[test]
    fn test_uniform_tonal_offset_darkens_more() {
        let offset = TonalOffset::Uniform(0.2);
        assert_eq!(offset.light(), 0.2);
        assert!((offset.dark() - 0.3).abs() < 1e-12);
    }

    #[test]
    fn test_supplied_shades_are_kept() {
        let palette = create_palette(
            PaletteOptionsBuilder::default()
                .secondary(
                    PaletteColorOptionsBuilder::default()
                        .main("#123456")
                        .light("#abcdef")
                        .contrast_text("#fff")
                        .build()
                        .unwrap(),
                )
                .build()
                .unwrap(),
        );
        assert_eq!(palette.secondary.light, "#abcdef");
        assert_eq!(palette.secondary.contrast_text, "#fff");
        assert_ne!(palette.secondary.dark, "#59209B");
    }

    #[test]
    fn test_partial_intent_without_main_keeps_defaults() {
        let palette = create_palette(
            PaletteOptionsBuilder::default()
                .error(
                    PaletteColorOptionsBuilder::default()
                        .light("#ffeeee")
                        .build()
                        .unwrap(),
                )
                .build()
                .unwrap(),
        );
        assert_eq!(palette.error.main, "#BD320E");
        assert_eq!(palette.error.light, "#ffeeee");
        assert_eq!(palette.error.dark, "#9F2505");
    }

    #[test]
    fn test_invalid_intent_falls_back_to_default() {
        let palette = create_palette(
            PaletteOptionsBuilder::default()
                .warning(PaletteColorOptions::main("not-a-color"))
                .build()
                .unwrap(),
        );
        assert_eq!(palette.warning.main, "#AC5B00");
    }

    #[test]
    fn test_overrides_win_over_mode_defaults() {
        let palette = create_palette(
            PaletteOptionsBuilder::default()
                .text(
                    TypeTextOptionsBuilder::default()
                        .secondary("#333")
                        .build()
                        .unwrap(),
                )
                .divider("#eee")
                .background(TypeBackgroundOptions {
                    paper: Some("#fafafa".into()),
                    ..TypeBackgroundOptions::default()
                })
                .action(
                    TypeActionOptionsBuilder::default()
                        .hover_opacity(0.1)
                        .build()
                        .unwrap(),
                )
                .build()
                .unwrap(),
        );
        assert_eq!(palette.text.secondary, "#333");
        assert_eq!(palette.text.primary, DARK_TEXT);
        assert_eq!(palette.divider, "#eee");
        assert_eq!(palette.background.paper, "#fafafa");
        assert_eq!(palette.background.default, "#fff");
        assert_eq!(palette.action.hover_opacity, 0.1);
        assert_eq!(palette.action.hover, "rgba(0, 0, 0, 0.04)");
    }

    #[test]
    fn test_create_palette_is_deterministic() {
        let options = PaletteOptionsBuilder::default()
            .mode(PaletteMode::Dark)
            .primary(PaletteColorOptions::main("#3366cc"))
            .build()
            .unwrap();
        assert_eq!(create_palette(options.clone()), create_palette(options));
    }

    #[test]
    fn test_mode_parsing() {
        assert_eq!("dark".parse::<PaletteMode>().unwrap(), PaletteMode::Dark);
        assert!(matches!(
            "sepia".parse::<PaletteMode>(),
            Err(ThemeError::UnsupportedMode(_))
        ));
        assert_eq!(PaletteMode::from_name("sepia"), PaletteMode::Light);
    }

    #[test]
    fn test_unsupported_mode_in_config_uses_light() {
        let options: PaletteOptions = serde_json::from_str(r#"{"mode": "sepia"}"#).unwrap();
        assert_eq!(options.mode, Some(PaletteMode::Light));
        assert_eq!(create_palette(options).text.primary, DARK_TEXT);
    }

    #[test]
    fn test_tonal_offset_deserializes_both_forms() {
        let uniform: TonalOffset = serde_json::from_str("0.3").unwrap();
        assert_eq!(uniform, TonalOffset::Uniform(0.3));
        let split: TonalOffset = serde_json::from_str(r#"{"light": 0.1, "dark": 0.4}"#).unwrap();
        assert_eq!(split.dark(), 0.4);
    }

    #[test]
    fn test_palette_roundtrips_through_options() {
        let palette = palette(PaletteMode::Dark);
        assert_eq!(create_palette(palette.to_options()), palette);
    }

    #[test]
    fn test_wire_names_are_camel_case() {
        let json = serde_json::to_value(Palette::default()).unwrap();
        assert!(json["primary"]["contrastText"].is_string());
        assert_eq!(json["mode"], "light");
        assert_eq!(json["action"]["hoverOpacity"], 0.04);
    }
}
