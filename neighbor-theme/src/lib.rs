//! Theme construction for the Neighbor component library.
//!
//! A [`Theme`] bundles everything visual components read to style
//! themselves: the color [`palette`], the [`typography`] scale, [`spacing`],
//! [`breakpoints`], [`transitions`], [`shadows`], [`shape`] and [`z_index`]
//! layers.
//!
//! # Building a theme
//!
//! Every sub-theme has a factory that takes a partial options record and
//! fills in the rest. [`create_theme`] runs all of them:
//!
//! ```
//! use neighbor_theme::{Theme, ThemeOptions, create_theme};
//!
//! let theme = create_theme(ThemeOptions::default());
//! assert_eq!(theme, Theme::default());
//! assert_eq!(theme.spacing.apply([1, 2]), "4px 8px");
//! assert_eq!(theme.breakpoints.up("md").unwrap(), "@media (min-width: 900px)");
//! ```
//!
//! Options can also be loaded from JSON or TOML, see [`config`].
//!
//! # Overriding
//!
//! Options records are trees of `Option` fields and implement
//! [`merge::Merge`]; unset fields never overwrite. [`Theme::extend`] merges
//! partial options onto an existing theme and rebuilds it.
//!
//! # Sharing
//!
//! Themes are immutable once built. [`context::Environment`] carries one
//! down a call tree explicitly, [`provide_theme`] and [`use_theme`] do the
//! same through a thread-local scope, and [`default_theme`] is the fallback
//! shared by the whole process.
//!
//! # Diagnostics
//!
//! Construction never fails. Unsupported modes, unreadable colors, low
//! contrast and malformed spacing calls are reported as `tracing` events;
//! install a subscriber to see them.

#![warn(missing_docs)]
#![cfg_attr(not(test), deny(clippy::unwrap_used))]

pub mod breakpoints;
pub mod color;
pub mod colors;
pub mod config;
pub mod context;
mod error;
pub mod merge;
pub mod palette;
pub mod shadows;
pub mod shape;
pub mod spacing;
pub mod theme;
pub mod transitions;
pub mod typography;
pub mod z_index;

pub use crate::{
    breakpoints::{Breakpoints, BreakpointsOptions, BreakpointsOptionsBuilder, create_breakpoints},
    color::{Color, contrast_ratio, darken, lighten, relative_luminance},
    config::ConfigError,
    context::{Environment, default_theme, provide_theme, use_theme},
    error::ThemeError,
    merge::{Merge, deep_merge, merge_into},
    palette::{
        Intent, Palette, PaletteColor, PaletteColorOptions, PaletteColorOptionsBuilder,
        PaletteMode, PaletteOptions, PaletteOptionsBuilder, TonalOffset, augment_color,
        contrast_text, create_palette,
    },
    shadows::{Shadows, create_shadows},
    shape::{Shape, ShapeOptions, ShapeOptionsBuilder, create_shape},
    spacing::{LengthResolver, Spacing, SpacingArg, create_spacing},
    theme::{Direction, Theme, ThemeOptions, ThemeOptionsBuilder, create_theme},
    transitions::{
        TransitionOptions, TransitionOptionsBuilder, Transitions, TransitionsOptions,
        TransitionsOptionsBuilder, create_transitions, get_auto_height_duration,
    },
    typography::{
        PxToRem, RemConverter, Typography, TypographyOptions, TypographyOptionsBuilder,
        TypographyStyle, TypographyStyleOptions, Variant, create_typography,
    },
    z_index::{ZIndex, ZIndexOptions, ZIndexOptionsBuilder, create_z_index},
};
