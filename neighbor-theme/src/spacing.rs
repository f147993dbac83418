//! Spacing scale.
//!
//! Layout measurements align to a grid of `unit` pixels (4 by default).
//! [`Spacing::apply`] resolves up to four arguments in CSS shorthand order:
//! all sides, vertical/horizontal, top/horizontal/bottom, or
//! top/right/bottom/left.
//!
//! ```
//! use neighbor_theme::spacing::{Spacing, SpacingArg};
//!
//! let spacing = Spacing::default();
//! assert_eq!(spacing.apply([2]), "8px");
//! assert_eq!(spacing.apply([SpacingArg::from(1), "auto".into()]), "4px auto");
//! ```

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use tracing::warn;

/// Default grid unit in pixels.
pub const DEFAULT_UNIT: f64 = 4.0;

/// One argument to [`Spacing::apply`].
#[derive(Clone, Debug, PartialEq)]
pub enum SpacingArg {
    /// A multiple of the grid unit.
    Factor(f64),
    /// A length string. Numeric strings such as `"3"` are treated as
    /// factors, anything else (`"7rem"`, `"auto"`) passes through.
    Length(String),
}

impl From<f64> for SpacingArg {
    fn from(value: f64) -> Self {
        SpacingArg::Factor(value)
    }
}

impl From<i32> for SpacingArg {
    fn from(value: i32) -> Self {
        SpacingArg::Factor(f64::from(value))
    }
}

impl From<&str> for SpacingArg {
    fn from(value: &str) -> Self {
        SpacingArg::Length(value.to_string())
    }
}

impl From<String> for SpacingArg {
    fn from(value: String) -> Self {
        SpacingArg::Length(value)
    }
}

/// Resolves a single spacing argument into a CSS length.
pub trait LengthResolver {
    /// Returns the CSS length for `arg`.
    fn resolve(&self, arg: &SpacingArg) -> String;
}

/// The spacing scale of a theme.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Spacing {
    /// Grid unit in pixels.
    pub unit: f64,
}

impl Default for Spacing {
    fn default() -> Self {
        Self { unit: DEFAULT_UNIT }
    }
}

/// Builds a spacing scale, using [`DEFAULT_UNIT`] when `unit` is absent.
pub fn create_spacing(unit: Option<f64>) -> Spacing {
    let unit = unit.unwrap_or(DEFAULT_UNIT);
    if !unit.is_finite() {
        warn!("spacing unit {unit} is not a finite number");
    }
    Spacing { unit }
}

impl LengthResolver for Spacing {
    fn resolve(&self, arg: &SpacingArg) -> String {
        let factor = match arg {
            SpacingArg::Factor(factor) => *factor,
            SpacingArg::Length(length) => match length.trim().parse::<f64>() {
                Ok(factor) => factor,
                Err(_) => return length.clone(),
            },
        };
        format!("{}px", factor * self.unit)
    }
}

impl Spacing {
    /// Resolves `args` and joins them with single spaces.
    ///
    /// No arguments is shorthand for a single factor of `1`. More than four
    /// arguments are reported but still joined.
    pub fn apply<I>(&self, args: I) -> String
    where
        I: IntoIterator,
        I::Item: Into<SpacingArg>,
    {
        let lengths: SmallVec<[String; 4]> = args
            .into_iter()
            .map(|arg| self.resolve(&arg.into()))
            .collect();
        if lengths.len() > 4 {
            warn!(
                "too many spacing arguments, expected between 0 and 4, got {}",
                lengths.len()
            );
        }
        if lengths.is_empty() {
            return self.resolve(&SpacingArg::Factor(1.0));
        }
        lengths.join(" ")
    }
}
