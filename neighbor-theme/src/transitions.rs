//! Motion tokens: easing curves, durations and CSS transition strings.

use derive_builder::Builder;
use serde::{Deserialize, Serialize};

use crate::merge::{Merge, merge_fields};

/// Named easing curves.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Easing {
    /// The most common curve.
    pub ease_in_out: String,
    /// Enters at full velocity and decelerates to rest.
    pub ease_out: String,
    /// Leaves at full velocity without decelerating.
    pub ease_in: String,
    /// For surfaces that may return to the screen at any time.
    pub sharp: String,
}

impl Default for Easing {
    fn default() -> Self {
        Self {
            ease_in_out: "cubic-bezier(0.4, 0, 0.2, 1)".into(),
            ease_out: "cubic-bezier(0.0, 0, 0.2, 1)".into(),
            ease_in: "cubic-bezier(0.4, 0, 1, 1)".into(),
            sharp: "cubic-bezier(0.4, 0, 0.6, 1)".into(),
        }
    }
}

/// Named durations in milliseconds.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[allow(missing_docs)]
pub struct Duration {
    pub shortest: f64,
    pub shorter: f64,
    pub short: f64,
    pub standard: f64,
    pub complex: f64,
    pub entering_screen: f64,
    pub leaving_screen: f64,
}

impl Default for Duration {
    fn default() -> Self {
        Self {
            shortest: 150.0,
            shorter: 200.0,
            short: 250.0,
            standard: 300.0,
            complex: 375.0,
            entering_screen: 225.0,
            leaving_screen: 195.0,
        }
    }
}

/// Partial [`Easing`].
#[derive(Builder, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[builder(pattern = "owned", default, setter(into, strip_option))]
#[serde(rename_all = "camelCase", default)]
#[allow(missing_docs)]
pub struct EasingOptions {
    pub ease_in_out: Option<String>,
    pub ease_out: Option<String>,
    pub ease_in: Option<String>,
    pub sharp: Option<String>,
}

/// Partial [`Duration`].
#[derive(Builder, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[builder(pattern = "owned", default, setter(into, strip_option))]
#[serde(rename_all = "camelCase", default)]
#[allow(missing_docs)]
pub struct DurationOptions {
    pub shortest: Option<f64>,
    pub shorter: Option<f64>,
    pub short: Option<f64>,
    pub standard: Option<f64>,
    pub complex: Option<f64>,
    pub entering_screen: Option<f64>,
    pub leaving_screen: Option<f64>,
}

/// Caller supplied transition options.
#[derive(Builder, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[builder(pattern = "owned", default, setter(into, strip_option))]
#[serde(rename_all = "camelCase", default)]
pub struct TransitionsOptions {
    /// Easing overrides, per curve.
    pub easing: Option<EasingOptions>,
    /// Duration overrides, per name.
    pub duration: Option<DurationOptions>,
}

merge_fields!(EasingOptions {
    ease_in_out,
    ease_out,
    ease_in,
    sharp,
});
merge_fields!(DurationOptions {
    shortest,
    shorter,
    short,
    standard,
    complex,
    entering_screen,
    leaving_screen,
});
merge_fields!(TransitionsOptions { easing, duration });

fn overwrite<T>(slot: &mut T, value: Option<T>) {
    if let Some(value) = value {
        *slot = value;
    }
}

impl Merge<EasingOptions> for Easing {
    fn merge_from(&mut self, overlay: EasingOptions) {
        overwrite(&mut self.ease_in_out, overlay.ease_in_out);
        overwrite(&mut self.ease_out, overlay.ease_out);
        overwrite(&mut self.ease_in, overlay.ease_in);
        overwrite(&mut self.sharp, overlay.sharp);
    }
}

impl Merge<DurationOptions> for Duration {
    fn merge_from(&mut self, overlay: DurationOptions) {
        overwrite(&mut self.shortest, overlay.shortest);
        overwrite(&mut self.shorter, overlay.shorter);
        overwrite(&mut self.short, overlay.short);
        overwrite(&mut self.standard, overlay.standard);
        overwrite(&mut self.complex, overlay.complex);
        overwrite(&mut self.entering_screen, overlay.entering_screen);
        overwrite(&mut self.leaving_screen, overlay.leaving_screen);
    }
}

/// A duration or delay: milliseconds, or a CSS time string used verbatim.
#[derive(Clone, Debug, PartialEq)]
pub enum Time {
    /// Milliseconds, rounded when formatted.
    Millis(f64),
    /// A CSS time such as `"0.3s"`.
    Css(String),
}

impl Time {
    fn to_css(&self) -> String {
        match self {
            Time::Millis(ms) => format_ms(*ms),
            Time::Css(css) => css.clone(),
        }
    }
}

impl From<f64> for Time {
    fn from(ms: f64) -> Self {
        Time::Millis(ms)
    }
}

impl From<u32> for Time {
    fn from(ms: u32) -> Self {
        Time::Millis(f64::from(ms))
    }
}

impl From<&str> for Time {
    fn from(css: &str) -> Self {
        Time::Css(css.to_string())
    }
}

/// Per-call options for [`Transitions::create`].
#[derive(Builder, Clone, Debug, Default, PartialEq)]
#[builder(pattern = "owned", default, setter(into, strip_option))]
pub struct TransitionOptions {
    /// Defaults to the `standard` duration.
    pub duration: Option<Time>,
    /// Defaults to the `easeInOut` curve.
    pub easing: Option<String>,
    /// Defaults to no delay.
    pub delay: Option<Time>,
}

/// Resolved motion tokens.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Transitions {
    /// Easing curves.
    pub easing: Easing,
    /// Durations in milliseconds.
    pub duration: Duration,
}

fn format_ms(ms: f64) -> String {
    format!("{}ms", ms.round())
}

/// Duration in milliseconds for animating to an automatic height of
/// `height` pixels. Taller surfaces animate longer, sublinearly.
pub fn get_auto_height_duration(height: f64) -> f64 {
    if height == 0.0 {
        return 0.0;
    }
    let constant = height / 36.0;
    ((4.0 + 15.0 * constant.powf(0.25) + constant / 5.0) * 10.0).round()
}

impl Transitions {
    /// Builds a CSS `transition` value animating each of `props`, or `all`
    /// when `props` is empty.
    pub fn create(&self, props: &[&str], options: TransitionOptions) -> String {
        let duration = options
            .duration
            .unwrap_or(Time::Millis(self.duration.standard))
            .to_css();
        let easing = options
            .easing
            .unwrap_or_else(|| self.easing.ease_in_out.clone());
        let delay = options.delay.unwrap_or(Time::Millis(0.0)).to_css();

        let props = if props.is_empty() { &["all"][..] } else { props };
        props
            .iter()
            .map(|prop| format!("{prop} {duration} {easing} {delay}"))
            .collect::<Vec<_>>()
            .join(",")
    }

    /// See [`get_auto_height_duration`].
    pub fn get_auto_height_duration(&self, height: f64) -> f64 {
        get_auto_height_duration(height)
    }

    /// Converts back into options.
    pub fn to_options(&self) -> TransitionsOptions {
        TransitionsOptions {
            easing: Some(EasingOptions {
                ease_in_out: Some(self.easing.ease_in_out.clone()),
                ease_out: Some(self.easing.ease_out.clone()),
                ease_in: Some(self.easing.ease_in.clone()),
                sharp: Some(self.easing.sharp.clone()),
            }),
            duration: Some(DurationOptions {
                shortest: Some(self.duration.shortest),
                shorter: Some(self.duration.shorter),
                short: Some(self.duration.short),
                standard: Some(self.duration.standard),
                complex: Some(self.duration.complex),
                entering_screen: Some(self.duration.entering_screen),
                leaving_screen: Some(self.duration.leaving_screen),
            }),
        }
    }
}

/// Builds motion tokens from partial options.
pub fn create_transitions(options: TransitionsOptions) -> Transitions {
    let mut transitions = Transitions::default();
    if let Some(easing) = options.easing {
        transitions.easing.merge_from(easing);
    }
    if let Some(duration) = options.duration {
        transitions.duration.merge_from(duration);
    }
    transitions
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_defaults() {
        let transitions = Transitions::default();
        assert_eq!(
            transitions.create(&[], TransitionOptions::default()),
            "all 300ms cubic-bezier(0.4, 0, 0.2, 1) 0ms"
        );
    }

    #[test]
    fn test_create_multiple_props() {
        let transitions = Transitions::default();
        let options = TransitionOptionsBuilder::default()
            .duration(transitions.duration.shortest)
            .easing(transitions.easing.sharp.clone())
            .delay("0.1s")
            .build()
            .unwrap();
        assert_eq!(
            transitions.create(&["opacity", "transform"], options),
            "opacity 150ms cubic-bezier(0.4, 0, 0.6, 1) 0.1s,transform 150ms cubic-bezier(0.4, 0, 0.6, 1) 0.1s"
        );
    }

    #[test]
    fn test_milliseconds_are_rounded() {
        let transitions = Transitions::default();
        let options = TransitionOptionsBuilder::default()
            .duration(120.6)
            .build()
            .unwrap();
        assert!(transitions.create(&["width"], options).starts_with("width 121ms "));
    }

    #[test]
    fn test_auto_height_duration() {
        assert_eq!(get_auto_height_duration(0.0), 0.0);
        assert_eq!(get_auto_height_duration(36.0), 192.0);
        assert!(get_auto_height_duration(500.0) > get_auto_height_duration(100.0));
    }

    #[test]
    fn test_overrides_are_per_key() {
        let transitions = create_transitions(
            TransitionsOptionsBuilder::default()
                .duration(DurationOptionsBuilder::default().standard(400.0).build().unwrap())
                .build()
                .unwrap(),
        );
        assert_eq!(transitions.duration.standard, 400.0);
        assert_eq!(transitions.duration.complex, 375.0);
        assert_eq!(transitions.easing, Easing::default());
    }

    #[test]
    fn test_wire_names() {
        let json = serde_json::to_value(Transitions::default()).unwrap();
        assert_eq!(json["duration"]["enteringScreen"], 225.0);
        assert_eq!(json["easing"]["easeInOut"], "cubic-bezier(0.4, 0, 0.2, 1)");
    }
}
