//! Typography scale.
//!
//! Thirteen text variants are derived from a base font size, the root
//! (`html`) font size and the font weights. Sizes are emitted in `rem`:
//! `(px / html_font_size) * (font_size / 14)`.

use std::{collections::BTreeMap, fmt, sync::Arc};

use derive_builder::Builder;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::merge::{Merge, merge_fields, replace_on_merge};

/// The font stack the letter spacing table is calibrated for.
pub const DEFAULT_FONT_FAMILY: &str = r#""Roboto", "Helvetica", "Arial", sans-serif"#;

const DEFAULT_FONT_SIZE: f64 = 14.0;
const DEFAULT_HTML_FONT_SIZE: f64 = 16.0;

/// Converts a pixel size into a CSS length.
pub trait PxToRem: Send + Sync {
    /// Returns the CSS length for `px`.
    fn px_to_rem(&self, px: f64) -> String;
}

impl<F> PxToRem for F
where
    F: Fn(f64) -> String + Send + Sync,
{
    fn px_to_rem(&self, px: f64) -> String {
        self(px)
    }
}

/// The `px` to `rem` conversion used by a typography scale.
#[derive(Clone)]
pub enum RemConverter {
    /// `(px / html_font_size) * coefficient` rem.
    RootRelative {
        /// Font size of the root element, in pixels.
        html_font_size: f64,
        /// `font_size / 14`.
        coefficient: f64,
    },
    /// A caller supplied conversion.
    Custom(Arc<dyn PxToRem>),
}

impl RemConverter {
    /// Wraps a custom conversion.
    pub fn custom(converter: impl PxToRem + 'static) -> Self {
        RemConverter::Custom(Arc::new(converter))
    }

    /// Converts `px` into a CSS length.
    pub fn convert(&self, px: f64) -> String {
        match self {
            RemConverter::RootRelative {
                html_font_size,
                coefficient,
            } => format!("{}rem", (px / html_font_size) * coefficient),
            RemConverter::Custom(converter) => converter.px_to_rem(px),
        }
    }
}

impl fmt::Debug for RemConverter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RemConverter::RootRelative {
                html_font_size,
                coefficient,
            } => f
                .debug_struct("RootRelative")
                .field("html_font_size", html_font_size)
                .field("coefficient", coefficient)
                .finish(),
            RemConverter::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

impl PartialEq for RemConverter {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (
                RemConverter::RootRelative {
                    html_font_size: a,
                    coefficient: b,
                },
                RemConverter::RootRelative {
                    html_font_size: c,
                    coefficient: d,
                },
            ) => a == c && b == d,
            (RemConverter::Custom(a), RemConverter::Custom(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

/// CSS `text-transform`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextTransform {
    /// `none`
    None,
    /// `uppercase`
    Uppercase,
    /// `lowercase`
    Lowercase,
    /// `capitalize`
    Capitalize,
}

/// The named text variants.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[allow(missing_docs)]
pub enum Variant {
    H1,
    H2,
    H3,
    H4,
    H5,
    H6,
    Subtitle1,
    Subtitle2,
    Body1,
    Body2,
    Button,
    Caption,
    Overline,
}

#[derive(Clone, Copy)]
enum WeightRole {
    Light,
    Regular,
    Medium,
}

struct VariantSpec {
    weight: WeightRole,
    size: f64,
    line_height: f64,
    letter_spacing: f64,
    uppercase: bool,
}

impl Variant {
    /// All variants, largest heading first.
    pub const ALL: [Variant; 13] = [
        Variant::H1,
        Variant::H2,
        Variant::H3,
        Variant::H4,
        Variant::H5,
        Variant::H6,
        Variant::Subtitle1,
        Variant::Subtitle2,
        Variant::Body1,
        Variant::Body2,
        Variant::Button,
        Variant::Caption,
        Variant::Overline,
    ];

    fn spec(self) -> VariantSpec {
        use WeightRole::{Light, Medium, Regular};

        let (weight, size, line_height, letter_spacing, uppercase) = match self {
            Variant::H1 => (Light, 96.0, 1.167, -1.5, false),
            Variant::H2 => (Light, 60.0, 1.2, -0.5, false),
            Variant::H3 => (Regular, 48.0, 1.167, 0.0, false),
            Variant::H4 => (Regular, 34.0, 1.235, 0.25, false),
            Variant::H5 => (Regular, 24.0, 1.334, 0.0, false),
            Variant::H6 => (Medium, 20.0, 1.6, 0.15, false),
            Variant::Subtitle1 => (Regular, 16.0, 1.75, 0.15, false),
            Variant::Subtitle2 => (Medium, 14.0, 1.57, 0.1, false),
            Variant::Body1 => (Regular, 16.0, 1.5, 0.15, false),
            Variant::Body2 => (Regular, 14.0, 1.43, 0.15, false),
            Variant::Button => (Medium, 14.0, 1.75, 0.4, true),
            Variant::Caption => (Regular, 12.0, 1.66, 0.4, false),
            Variant::Overline => (Regular, 12.0, 2.66, 1.0, true),
        };
        VariantSpec {
            weight,
            size,
            line_height,
            letter_spacing,
            uppercase,
        }
    }
}

/// A resolved text style.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypographyStyle {
    /// Font stack.
    pub font_family: String,
    /// Numeric font weight.
    pub font_weight: u16,
    /// CSS length, normally in `rem`.
    pub font_size: String,
    /// Unitless line height.
    pub line_height: f64,
    /// Letter spacing in `em`, only set for the default font family.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub letter_spacing: Option<String>,
    /// Optional case transform.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_transform: Option<TextTransform>,
}

/// Partial [`TypographyStyle`], applied on top of a computed style.
#[derive(Builder, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[builder(pattern = "owned", default, setter(into, strip_option))]
#[serde(rename_all = "camelCase", default)]
pub struct TypographyStyleOptions {
    /// Font stack.
    pub font_family: Option<String>,
    /// Numeric font weight.
    pub font_weight: Option<u16>,
    /// CSS length.
    pub font_size: Option<String>,
    /// Unitless line height.
    pub line_height: Option<f64>,
    /// Letter spacing.
    pub letter_spacing: Option<String>,
    /// Case transform.
    pub text_transform: Option<TextTransform>,
}

impl Merge<TypographyStyleOptions> for TypographyStyle {
    fn merge_from(&mut self, overlay: TypographyStyleOptions) {
        if let Some(font_family) = overlay.font_family {
            self.font_family = font_family;
        }
        if let Some(font_weight) = overlay.font_weight {
            self.font_weight = font_weight;
        }
        if let Some(font_size) = overlay.font_size {
            self.font_size = font_size;
        }
        if let Some(line_height) = overlay.line_height {
            self.line_height = line_height;
        }
        if overlay.letter_spacing.is_some() {
            self.letter_spacing = overlay.letter_spacing;
        }
        if overlay.text_transform.is_some() {
            self.text_transform = overlay.text_transform;
        }
    }
}

/// Caller supplied typography options.
#[derive(Builder, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[builder(pattern = "owned", default, setter(into, strip_option))]
#[serde(rename_all = "camelCase", default)]
pub struct TypographyOptions {
    /// Font stack; [`DEFAULT_FONT_FAMILY`] when absent.
    pub font_family: Option<String>,
    /// Base font size in pixels; 14 when absent.
    pub font_size: Option<f64>,
    /// Light weight; 300 when absent.
    pub font_weight_light: Option<u16>,
    /// Regular weight; 400 when absent.
    pub font_weight_regular: Option<u16>,
    /// Medium weight; 500 when absent.
    pub font_weight_medium: Option<u16>,
    /// Bold weight; 700 when absent.
    pub font_weight_bold: Option<u16>,
    /// Root element font size in pixels; 16 when absent.
    pub html_font_size: Option<f64>,
    /// Applied to every variant after its computed style.
    pub all_variants: Option<TypographyStyleOptions>,
    /// Replaces the root-relative `px` to `rem` conversion.
    #[serde(skip)]
    pub px_to_rem: Option<RemConverter>,
    /// Per-variant overrides, applied last.
    pub variants: Option<BTreeMap<Variant, TypographyStyleOptions>>,
}

replace_on_merge!(TextTransform, RemConverter);
merge_fields!(TypographyStyleOptions {
    font_family,
    font_weight,
    font_size,
    line_height,
    letter_spacing,
    text_transform,
});
merge_fields!(TypographyOptions {
    font_family,
    font_size,
    font_weight_light,
    font_weight_regular,
    font_weight_medium,
    font_weight_bold,
    html_font_size,
    all_variants,
    px_to_rem,
    variants,
});

/// A resolved typography scale.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Typography {
    /// Root element font size in pixels.
    pub html_font_size: f64,
    /// Font stack.
    pub font_family: String,
    /// Base font size in pixels.
    pub font_size: f64,
    /// Light weight.
    pub font_weight_light: u16,
    /// Regular weight.
    pub font_weight_regular: u16,
    /// Medium weight.
    pub font_weight_medium: u16,
    /// Bold weight.
    pub font_weight_bold: u16,
    #[serde(skip)]
    converter: RemConverter,
    #[serde(skip)]
    all_variants: Option<TypographyStyleOptions>,
    #[serde(skip)]
    overrides: Option<BTreeMap<Variant, TypographyStyleOptions>>,
    /// The `h1` style.
    pub h1: TypographyStyle,
    /// The `h2` style.
    pub h2: TypographyStyle,
    /// The `h3` style.
    pub h3: TypographyStyle,
    /// The `h4` style.
    pub h4: TypographyStyle,
    /// The `h5` style.
    pub h5: TypographyStyle,
    /// The `h6` style.
    pub h6: TypographyStyle,
    /// The `subtitle1` style.
    pub subtitle1: TypographyStyle,
    /// The `subtitle2` style.
    pub subtitle2: TypographyStyle,
    /// The `body1` style.
    pub body1: TypographyStyle,
    /// The `body2` style.
    pub body2: TypographyStyle,
    /// The `button` style.
    pub button: TypographyStyle,
    /// The `caption` style.
    pub caption: TypographyStyle,
    /// The `overline` style.
    pub overline: TypographyStyle,
}

impl Typography {
    /// Converts a pixel size with this scale's conversion.
    pub fn px_to_rem(&self, px: f64) -> String {
        self.converter.convert(px)
    }

    /// Returns the style of `variant`.
    pub fn variant(&self, variant: Variant) -> &TypographyStyle {
        match variant {
            Variant::H1 => &self.h1,
            Variant::H2 => &self.h2,
            Variant::H3 => &self.h3,
            Variant::H4 => &self.h4,
            Variant::H5 => &self.h5,
            Variant::H6 => &self.h6,
            Variant::Subtitle1 => &self.subtitle1,
            Variant::Subtitle2 => &self.subtitle2,
            Variant::Body1 => &self.body1,
            Variant::Body2 => &self.body2,
            Variant::Button => &self.button,
            Variant::Caption => &self.caption,
            Variant::Overline => &self.overline,
        }
    }

    fn variant_mut(&mut self, variant: Variant) -> &mut TypographyStyle {
        match variant {
            Variant::H1 => &mut self.h1,
            Variant::H2 => &mut self.h2,
            Variant::H3 => &mut self.h3,
            Variant::H4 => &mut self.h4,
            Variant::H5 => &mut self.h5,
            Variant::H6 => &mut self.h6,
            Variant::Subtitle1 => &mut self.subtitle1,
            Variant::Subtitle2 => &mut self.subtitle2,
            Variant::Body1 => &mut self.body1,
            Variant::Body2 => &mut self.body2,
            Variant::Button => &mut self.button,
            Variant::Caption => &mut self.caption,
            Variant::Overline => &mut self.overline,
        }
    }

    /// Converts back into the options that produce this scale.
    pub fn to_options(&self) -> TypographyOptions {
        let px_to_rem = match &self.converter {
            RemConverter::RootRelative { .. } => None,
            custom => Some(custom.clone()),
        };
        TypographyOptions {
            font_family: Some(self.font_family.clone()),
            font_size: Some(self.font_size),
            font_weight_light: Some(self.font_weight_light),
            font_weight_regular: Some(self.font_weight_regular),
            font_weight_medium: Some(self.font_weight_medium),
            font_weight_bold: Some(self.font_weight_bold),
            html_font_size: Some(self.html_font_size),
            all_variants: self.all_variants.clone(),
            px_to_rem,
            variants: self.overrides.clone(),
        }
    }
}

impl Default for Typography {
    fn default() -> Self {
        create_typography(TypographyOptions::default())
    }
}

/// Rounds half up at five decimals.
fn round5(value: f64) -> f64 {
    (value * 1e5 + 0.5).floor() / 1e5
}

/// Builds a typography scale from partial options.
pub fn create_typography(options: TypographyOptions) -> Typography {
    let font_family = options
        .font_family
        .unwrap_or_else(|| DEFAULT_FONT_FAMILY.to_string());
    let font_size = options.font_size.unwrap_or(DEFAULT_FONT_SIZE);
    let html_font_size = options.html_font_size.unwrap_or(DEFAULT_HTML_FONT_SIZE);
    let font_weight_light = options.font_weight_light.unwrap_or(300);
    let font_weight_regular = options.font_weight_regular.unwrap_or(400);
    let font_weight_medium = options.font_weight_medium.unwrap_or(500);
    let font_weight_bold = options.font_weight_bold.unwrap_or(700);

    if !(font_size.is_finite() && font_size > 0.0) {
        warn!("typography font size {font_size} should be a positive number");
    }
    if !(html_font_size.is_finite() && html_font_size > 0.0) {
        warn!("typography html font size {html_font_size} should be a positive number");
    }

    let converter = options
        .px_to_rem
        .unwrap_or(RemConverter::RootRelative {
            html_font_size,
            coefficient: font_size / DEFAULT_FONT_SIZE,
        });
    let calibrated = font_family == DEFAULT_FONT_FAMILY;

    let build = |variant: Variant| {
        let spec = variant.spec();
        let font_weight = match spec.weight {
            WeightRole::Light => font_weight_light,
            WeightRole::Regular => font_weight_regular,
            WeightRole::Medium => font_weight_medium,
        };
        let mut style = TypographyStyle {
            font_family: font_family.clone(),
            font_weight,
            font_size: converter.convert(spec.size),
            line_height: spec.line_height,
            // Letter spacing is calibrated for the default font stack.
            letter_spacing: calibrated
                .then(|| format!("{}em", round5(spec.letter_spacing / spec.size))),
            text_transform: spec.uppercase.then_some(TextTransform::Uppercase),
        };
        if let Some(all_variants) = &options.all_variants {
            style.merge_from(all_variants.clone());
        }
        style
    };

    let mut typography = Typography {
        html_font_size,
        font_family: font_family.clone(),
        font_size,
        font_weight_light,
        font_weight_regular,
        font_weight_medium,
        font_weight_bold,
        converter: converter.clone(),
        all_variants: options.all_variants.clone(),
        overrides: options.variants.clone(),
        h1: build(Variant::H1),
        h2: build(Variant::H2),
        h3: build(Variant::H3),
        h4: build(Variant::H4),
        h5: build(Variant::H5),
        h6: build(Variant::H6),
        subtitle1: build(Variant::Subtitle1),
        subtitle2: build(Variant::Subtitle2),
        body1: build(Variant::Body1),
        body2: build(Variant::Body2),
        button: build(Variant::Button),
        caption: build(Variant::Caption),
        overline: build(Variant::Overline),
    };

    if let Some(variants) = options.variants {
        for (variant, overrides) in variants {
            typography.variant_mut(variant).merge_from(overrides);
        }
    }
    typography
}
