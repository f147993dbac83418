//! Corner rounding.

use derive_builder::Builder;
use serde::{Deserialize, Serialize};

use crate::merge::{Merge, merge_fields};

/// Default corner radius in pixels.
pub const DEFAULT_BORDER_RADIUS: f64 = 4.0;

/// Caller supplied shape options.
#[derive(Builder, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[builder(pattern = "owned", default, setter(into, strip_option))]
#[serde(rename_all = "camelCase", default)]
pub struct ShapeOptions {
    /// Corner radius in pixels.
    pub border_radius: Option<f64>,
}

merge_fields!(ShapeOptions { border_radius });

/// Resolved shape tokens.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Shape {
    /// Corner radius in pixels.
    pub border_radius: f64,
}

impl Default for Shape {
    fn default() -> Self {
        Self {
            border_radius: DEFAULT_BORDER_RADIUS,
        }
    }
}

impl Merge<ShapeOptions> for Shape {
    fn merge_from(&mut self, overlay: ShapeOptions) {
        if let Some(border_radius) = overlay.border_radius {
            self.border_radius = border_radius;
        }
    }
}

impl Shape {
    /// Converts back into options.
    pub fn to_options(&self) -> ShapeOptions {
        ShapeOptions {
            border_radius: Some(self.border_radius),
        }
    }
}

/// Builds shape tokens from partial options.
pub fn create_shape(options: ShapeOptions) -> Shape {
    let mut shape = Shape::default();
    shape.merge_from(options);
    shape
}
