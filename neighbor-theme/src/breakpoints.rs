//! Responsive breakpoints and media query builders.
//!
//! A breakpoint tier *starts* at its value: with the default tiers, `xs`
//! covers `[0, 600)` and `sm` covers `[600, 900)`. Media queries are
//! inclusive, so upper bounds are pulled down by `step / 100` units to keep
//! adjacent ranges from overlapping.
//!
//! ```
//! use neighbor_theme::breakpoints::Breakpoints;
//!
//! let breakpoints = Breakpoints::default();
//! assert_eq!(breakpoints.up("sm").unwrap(), "@media (min-width: 600px)");
//! assert_eq!(breakpoints.down("md").unwrap(), "@media (max-width: 899.95px)");
//! ```

use std::collections::BTreeMap;

use derive_builder::Builder;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::{ThemeError, merge::merge_fields};

/// The default tier names, ascending.
pub const DEFAULT_KEYS: [&str; 5] = ["xs", "sm", "md", "lg", "xl"];
const DEFAULT_VALUES: [f64; 5] = [0.0, 600.0, 900.0, 1200.0, 1536.0];
const DEFAULT_UNIT: &str = "px";
const DEFAULT_STEP: f64 = 5.0;

/// Caller supplied breakpoint options.
#[derive(Builder, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[builder(pattern = "owned", default, setter(into, strip_option))]
#[serde(rename_all = "camelCase", default)]
pub struct BreakpointsOptions {
    /// Tier thresholds. Replaces the default tiers entirely when present.
    pub values: Option<BTreeMap<String, f64>>,
    /// CSS unit appended to every value; `px` when absent.
    pub unit: Option<String>,
    /// Gap subtracted from upper bounds, in hundredths of a unit; 5 when
    /// absent.
    pub step: Option<f64>,
}

merge_fields!(BreakpointsOptions { values, unit, step });

/// Resolved breakpoints.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Breakpoints {
    /// Tier names sorted by ascending value.
    pub keys: Vec<String>,
    /// Tier thresholds.
    pub values: BTreeMap<String, f64>,
    /// CSS unit.
    pub unit: String,
    /// Upper bound gap, in hundredths of a unit.
    pub step: f64,
}

impl Default for Breakpoints {
    fn default() -> Self {
        create_breakpoints(BreakpointsOptions::default())
    }
}

fn default_values() -> BTreeMap<String, f64> {
    DEFAULT_KEYS
        .into_iter()
        .map(String::from)
        .zip(DEFAULT_VALUES)
        .collect()
}

/// Builds breakpoints from partial options.
pub fn create_breakpoints(options: BreakpointsOptions) -> Breakpoints {
    let values = options.values.unwrap_or_else(default_values);
    let unit = options.unit.unwrap_or_else(|| DEFAULT_UNIT.to_string());
    let step = options.step.unwrap_or(DEFAULT_STEP);

    let mut sorted: Vec<(&String, f64)> = values.iter().map(|(key, value)| (key, *value)).collect();
    sorted.sort_by(|a, b| a.1.total_cmp(&b.1));
    let keys = sorted.into_iter().map(|(key, _)| key.clone()).collect();

    if values.is_empty() {
        warn!("breakpoints were configured without any tiers");
    }

    Breakpoints {
        keys,
        values,
        unit,
        step,
    }
}

impl Breakpoints {
    /// Threshold of a tier. A tier name that is not configured but parses
    /// as a number is taken literally.
    pub fn value(&self, tier: &str) -> Result<f64, ThemeError> {
        if let Some(value) = self.values.get(tier) {
            return Ok(*value);
        }
        tier.trim()
            .parse::<f64>()
            .map_err(|_| ThemeError::UnknownBreakpoint(tier.to_string()))
    }

    fn position(&self, tier: &str) -> Result<usize, ThemeError> {
        self.keys
            .iter()
            .position(|key| key == tier)
            .ok_or_else(|| ThemeError::UnknownBreakpoint(tier.to_string()))
    }

    fn upper_bound(&self, value: f64) -> f64 {
        value - self.step / 100.0
    }

    /// Matches widths from `tier` upwards.
    pub fn up(&self, tier: &str) -> Result<String, ThemeError> {
        Ok(format!(
            "@media (min-width: {}{})",
            self.value(tier)?,
            self.unit
        ))
    }

    /// Matches widths below `tier`.
    pub fn down(&self, tier: &str) -> Result<String, ThemeError> {
        Ok(format!(
            "@media (max-width: {}{})",
            self.upper_bound(self.value(tier)?),
            self.unit
        ))
    }

    /// Matches widths from `start` up to, but excluding, `end`.
    pub fn between(&self, start: &str, end: &str) -> Result<String, ThemeError> {
        Ok(format!(
            "@media (min-width: {start}{unit}) and (max-width: {end}{unit})",
            start = self.value(start)?,
            end = self.upper_bound(self.value(end)?),
            unit = self.unit,
        ))
    }

    /// Matches only the range covered by `tier`.
    pub fn only(&self, tier: &str) -> Result<String, ThemeError> {
        let index = self.position(tier)?;
        match self.keys.get(index + 1) {
            Some(next) => self.between(tier, next),
            None => self.up(tier),
        }
    }

    /// Matches everything outside the range covered by `tier`.
    pub fn not(&self, tier: &str) -> Result<String, ThemeError> {
        let index = self.position(tier)?;
        let last = self.keys.len() - 1;
        if last == 0 {
            return Ok("@media not all".to_string());
        }
        if index == 0 {
            return self.up(&self.keys[1]);
        }
        if index == last {
            return self.down(tier);
        }
        Ok(self
            .between(tier, &self.keys[index + 1])?
            .replacen("@media", "@media not all and", 1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn custom(values: &[(&str, f64)]) -> Breakpoints {
        let values = values
            .iter()
            .map(|(key, value)| (key.to_string(), *value))
            .collect::<BTreeMap<_, _>>();
        create_breakpoints(
            BreakpointsOptionsBuilder::default()
                .values(values)
                .build()
                .unwrap(),
        )
    }

    #[test]
    fn test_default_keys_are_ascending() {
        let breakpoints = Breakpoints::default();
        assert_eq!(breakpoints.keys, ["xs", "sm", "md", "lg", "xl"]);
        assert_eq!(breakpoints.values["xl"], 1536.0);
        assert_eq!(breakpoints.unit, "px");
    }

    #[test]
    fn test_keys_follow_values_not_input_order() {
        let breakpoints = custom(&[("xl", 10.0), ("xs", 1.0), ("md", 5.0)]);
        assert_eq!(breakpoints.keys, ["xs", "md", "xl"]);
    }

    #[test]
    fn test_up_and_down() {
        let breakpoints = Breakpoints::default();
        assert_eq!(breakpoints.up("xs").unwrap(), "@media (min-width: 0px)");
        assert_eq!(breakpoints.down("sm").unwrap(), "@media (max-width: 599.95px)");
        assert_eq!(breakpoints.up("720").unwrap(), "@media (min-width: 720px)");
    }

    #[test]
    fn test_between_accepts_literal_end() {
        let breakpoints = Breakpoints::default();
        assert_eq!(
            breakpoints.between("sm", "md").unwrap(),
            "@media (min-width: 600px) and (max-width: 899.95px)"
        );
        assert_eq!(
            breakpoints.between("sm", "1000").unwrap(),
            "@media (min-width: 600px) and (max-width: 999.95px)"
        );
    }

    #[test]
    fn test_only() {
        let breakpoints = Breakpoints::default();
        assert_eq!(
            breakpoints.only("md").unwrap(),
            "@media (min-width: 900px) and (max-width: 1199.95px)"
        );
        assert_eq!(breakpoints.only("xl").unwrap(), "@media (min-width: 1536px)");
    }

    #[test]
    fn test_not_special_cases_edges() {
        let breakpoints = Breakpoints::default();
        assert_eq!(breakpoints.not("xs").unwrap(), "@media (min-width: 600px)");
        assert_eq!(breakpoints.not("xl").unwrap(), "@media (max-width: 1535.95px)");
        assert_eq!(
            breakpoints.not("md").unwrap(),
            "@media not all and (min-width: 900px) and (max-width: 1199.95px)"
        );
        assert_eq!(custom(&[("only", 0.0)]).not("only").unwrap(), "@media not all");
    }

    #[test]
    fn test_unknown_tier() {
        let breakpoints = Breakpoints::default();
        assert_eq!(
            breakpoints.up("tablet"),
            Err(ThemeError::UnknownBreakpoint("tablet".into()))
        );
        assert!(breakpoints.only("700").is_err());
    }

    #[test]
    fn test_unit_and_step_are_configurable() {
        let breakpoints = create_breakpoints(
            BreakpointsOptionsBuilder::default()
                .unit("em")
                .step(10.0)
                .build()
                .unwrap(),
        );
        assert_eq!(breakpoints.down("sm").unwrap(), "@media (max-width: 599.9em)");
    }
}
