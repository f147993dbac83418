//! Error types shared by the theme factories.

use thiserror::Error;

/// Errors produced by fallible theme operations.
///
/// Theme construction itself never fails; these surface from the utilities
/// that factories and components call directly (color math, breakpoint
/// queries, strict mode parsing).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ThemeError {
    /// The input could not be parsed as a hex, `rgb()`/`rgba()` or
    /// `hsl()`/`hsla()` color.
    #[error("invalid color `{input}`: {reason}")]
    InvalidColor {
        /// The offending input, as given.
        input: String,
        /// What went wrong while parsing it.
        reason: &'static str,
    },
    /// A palette mode other than `light` or `dark`.
    #[error("the palette mode `{0}` is not supported")]
    UnsupportedMode(String),
    /// A breakpoint tier that is neither configured nor a numeric literal.
    #[error("unknown breakpoint `{0}`")]
    UnknownBreakpoint(String),
}

impl ThemeError {
    pub(crate) fn invalid_color(input: &str, reason: &'static str) -> Self {
        Self::InvalidColor {
            input: input.to_string(),
            reason,
        }
    }
}
