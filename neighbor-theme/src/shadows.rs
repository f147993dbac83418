//! Elevation shadows.
//!
//! Index `n` is the shadow for elevation `n`. Elevation 0 is `"none"`;
//! every other entry stacks an umbra, a penumbra and an ambient layer.

use serde::{Deserialize, Serialize};
use tracing::warn;

/// Number of elevation levels, including elevation 0.
pub const ELEVATIONS: usize = 25;

const UMBRA_OPACITY: f64 = 0.2;
const PENUMBRA_OPACITY: f64 = 0.14;
const AMBIENT_OPACITY: f64 = 0.12;

/// Offsets for the umbra, penumbra and ambient layers of elevations 1..=24:
/// `[x, y, blur, spread]` for each layer.
const LAYERS: [[i8; 12]; ELEVATIONS - 1] = [
    [0, 2, 1, -1, 0, 1, 1, 0, 0, 1, 3, 0],
    [0, 3, 1, -2, 0, 2, 2, 0, 0, 1, 5, 0],
    [0, 3, 3, -2, 0, 3, 4, 0, 0, 1, 8, 0],
    [0, 2, 4, -1, 0, 4, 5, 0, 0, 1, 10, 0],
    [0, 3, 5, -1, 0, 5, 8, 0, 0, 1, 14, 0],
    [0, 3, 5, -1, 0, 6, 10, 0, 0, 1, 18, 0],
    [0, 4, 5, -2, 0, 7, 10, 1, 0, 2, 16, 1],
    [0, 5, 5, -3, 0, 8, 10, 1, 0, 3, 14, 2],
    [0, 5, 6, -3, 0, 9, 12, 1, 0, 3, 16, 2],
    [0, 6, 6, -3, 0, 10, 14, 1, 0, 4, 18, 3],
    [0, 6, 7, -4, 0, 11, 15, 1, 0, 4, 20, 3],
    [0, 7, 8, -4, 0, 12, 17, 2, 0, 5, 22, 4],
    [0, 7, 8, -4, 0, 13, 19, 2, 0, 5, 24, 4],
    [0, 7, 9, -4, 0, 14, 21, 2, 0, 5, 26, 4],
    [0, 8, 9, -5, 0, 15, 22, 2, 0, 6, 28, 5],
    [0, 8, 10, -5, 0, 16, 24, 2, 0, 6, 30, 5],
    [0, 8, 11, -5, 0, 17, 26, 2, 0, 6, 32, 5],
    [0, 9, 11, -5, 0, 18, 28, 2, 0, 7, 34, 6],
    [0, 9, 12, -6, 0, 19, 29, 2, 0, 7, 36, 6],
    [0, 10, 13, -6, 0, 20, 31, 3, 0, 8, 38, 7],
    [0, 10, 13, -6, 0, 21, 33, 3, 0, 8, 40, 7],
    [0, 10, 14, -6, 0, 22, 35, 3, 0, 8, 42, 7],
    [0, 11, 14, -7, 0, 23, 36, 3, 0, 9, 44, 8],
    [0, 11, 15, -7, 0, 24, 38, 3, 0, 9, 46, 8],
];

fn layer(offsets: &[i8], opacity: f64) -> String {
    format!(
        "{}px {}px {}px {}px rgba(0,0,0,{opacity})",
        offsets[0], offsets[1], offsets[2], offsets[3]
    )
}

fn create_shadow(offsets: &[i8; 12]) -> String {
    [
        layer(&offsets[0..4], UMBRA_OPACITY),
        layer(&offsets[4..8], PENUMBRA_OPACITY),
        layer(&offsets[8..12], AMBIENT_OPACITY),
    ]
    .join(",")
}

/// Box shadows indexed by elevation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Shadows(Vec<String>);

impl Default for Shadows {
    fn default() -> Self {
        let mut shadows = Vec::with_capacity(ELEVATIONS);
        shadows.push("none".to_string());
        shadows.extend(LAYERS.iter().map(create_shadow));
        Self(shadows)
    }
}

impl Shadows {
    /// Shadow for `elevation`, if the list has that many levels.
    pub fn get(&self, elevation: usize) -> Option<&str> {
        self.0.get(elevation).map(String::as_str)
    }

    /// All levels, elevation 0 first.
    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    /// Number of levels.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the list is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Converts back into options.
    pub fn to_options(&self) -> Vec<String> {
        self.0.clone()
    }
}

/// Uses `shadows` as given, or the default elevation table when absent.
pub fn create_shadows(shadows: Option<Vec<String>>) -> Shadows {
    match shadows {
        Some(shadows) => {
            if shadows.len() != ELEVATIONS {
                warn!(
                    "expected {ELEVATIONS} shadows, one per elevation, got {}",
                    shadows.len()
                );
            }
            Shadows(shadows)
        }
        None => Shadows::default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_table() {
        let shadows = Shadows::default();
        assert_eq!(shadows.len(), ELEVATIONS);
        assert_eq!(shadows.get(0), Some("none"));
        assert_eq!(
            shadows.get(1),
            Some(
                "0px 2px 1px -1px rgba(0,0,0,0.2),0px 1px 1px 0px rgba(0,0,0,0.14),0px 1px 3px 0px rgba(0,0,0,0.12)"
            )
        );
        assert!(shadows.get(24).unwrap().starts_with("0px 11px 15px -7px"));
        assert_eq!(shadows.get(25), None);
    }

    #[test]
    fn test_supplied_list_replaces_defaults() {
        let shadows = create_shadows(Some(vec!["none".into(), "0 1px red".into()]));
        assert_eq!(shadows.len(), 2);
        assert_eq!(shadows.get(1), Some("0 1px red"));
    }
}
