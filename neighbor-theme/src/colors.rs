//! Static color scales.
//!
//! Every hue is a twelve-step scale from stop `0` (lightest) to stop `100`
//! (darkest). Relative luminance never increases as the stop number grows.
//!
//! ```
//! use neighbor_theme::colors::{BLUE, Stop};
//!
//! assert_eq!(&BLUE[Stop::S60], "#0079E1");
//! assert_eq!(BLUE.get(60), Some("#0079E1"));
//! ```

use std::ops::Index;

use serde::{Serialize, Serializer, ser::SerializeMap};

/// A named stop on a [`ColorScale`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Stop {
    /// Stop 0, the lightest shade.
    S0,
    /// Stop 5.
    S5,
    /// Stop 10.
    S10,
    /// Stop 20.
    S20,
    /// Stop 30.
    S30,
    /// Stop 40.
    S40,
    /// Stop 50.
    S50,
    /// Stop 60.
    S60,
    /// Stop 70.
    S70,
    /// Stop 80.
    S80,
    /// Stop 90.
    S90,
    /// Stop 100, the darkest shade.
    S100,
}

impl Stop {
    /// All stops in ascending order.
    pub const ALL: [Stop; 12] = [
        Stop::S0,
        Stop::S5,
        Stop::S10,
        Stop::S20,
        Stop::S30,
        Stop::S40,
        Stop::S50,
        Stop::S60,
        Stop::S70,
        Stop::S80,
        Stop::S90,
        Stop::S100,
    ];

    /// The numeric label of the stop.
    pub const fn value(self) -> u8 {
        match self {
            Stop::S0 => 0,
            Stop::S5 => 5,
            Stop::S10 => 10,
            Stop::S20 => 20,
            Stop::S30 => 30,
            Stop::S40 => 40,
            Stop::S50 => 50,
            Stop::S60 => 60,
            Stop::S70 => 70,
            Stop::S80 => 80,
            Stop::S90 => 90,
            Stop::S100 => 100,
        }
    }

    /// Looks a stop up by its numeric label.
    pub fn from_value(value: u8) -> Option<Self> {
        Self::ALL.into_iter().find(|stop| stop.value() == value)
    }

    const fn index(self) -> usize {
        self as usize
    }
}

/// A twelve-step color scale for one hue.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ColorScale {
    /// Name of the hue, e.g. `"blue"`.
    pub name: &'static str,
    shades: [&'static str; 12],
}

impl ColorScale {
    const fn new(name: &'static str, shades: [&'static str; 12]) -> Self {
        Self { name, shades }
    }

    /// Returns the shade at a numeric stop label, if it is one of the
    /// twelve stops.
    pub fn get(&self, stop: u8) -> Option<&'static str> {
        Stop::from_value(stop).map(|stop| self.shades[stop.index()])
    }

    /// Returns the shade at `stop`.
    pub const fn shade(&self, stop: Stop) -> &'static str {
        self.shades[stop.index()]
    }

    /// Iterates `(stop, shade)` pairs from lightest to darkest.
    pub fn iter(&self) -> impl Iterator<Item = (Stop, &'static str)> + '_ {
        Stop::ALL
            .into_iter()
            .map(move |stop| (stop, self.shades[stop.index()]))
    }
}

impl Index<Stop> for ColorScale {
    type Output = str;

    fn index(&self, stop: Stop) -> &Self::Output {
        self.shades[stop.index()]
    }
}

impl Serialize for ColorScale {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.shades.len()))?;
        for (stop, shade) in self.iter() {
            map.serialize_entry(&stop.value().to_string(), shade)?;
        }
        map.end()
    }
}

/// Pure black.
pub const BLACK: &str = "#000";
/// Pure white.
pub const WHITE: &str = "#fff";

/// The blue scale.
pub const BLUE: ColorScale = ColorScale::new(
    "blue",
    [
        "#F7FBFF", "#E0F3FF", "#C7EBFF", "#95D5FF", "#61BDFF", "#2EA4FF", "#028BFF", "#0079E1",
        "#0067C0", "#00559E", "#00427B", "#013059",
    ],
);

/// The green scale.
pub const GREEN: ColorScale = ColorScale::new(
    "green",
    [
        "#EDFCF9", "#D4FAF0", "#BBF7E8", "#91EAD5", "#62DDC1", "#30D0AC", "#19B693", "#079C7B",
        "#008265", "#006751", "#004D3C", "#003328",
    ],
);

/// The grey scale.
pub const GREY: ColorScale = ColorScale::new(
    "grey",
    [
        "#FAFAFC", "#F4F4F7", "#EBECF0", "#DFE1E6", "#C3C7CE", "#B5BAC1", "#9BA0A8", "#7E858F",
        "#656A72", "#4C5057", "#343639", "#1E1F21",
    ],
);

/// The orange scale.
pub const ORANGE: ColorScale = ColorScale::new(
    "orange",
    [
        "#FFF8EA", "#FFECBF", "#FFE193", "#FFC949", "#FFAE00", "#F09B00", "#DD8600", "#C67000",
        "#AC5B00", "#904700", "#743500", "#592500",
    ],
);

/// The pink scale.
pub const PINK: ColorScale = ColorScale::new(
    "pink",
    [
        "#FFF5FE", "#FADCF7", "#F5C5F0", "#E79CDF", "#D977CF", "#C45CB9", "#AF44A4", "#9B2F8F",
        "#861E7A", "#711066", "#5C0652", "#47003F",
    ],
);

/// The purple scale.
pub const PURPLE: ColorScale = ColorScale::new(
    "purple",
    [
        "#F7F5FF", "#EEE9FC", "#E3DEFA", "#CEC5F5", "#B8ABEF", "#A091E6", "#8777D9", "#7759CD",
        "#693BB9", "#59209B", "#450B72", "#2B0040",
    ],
);

/// The red scale.
pub const RED: ColorScale = ColorScale::new(
    "red",
    [
        "#FFF3F1", "#FFE5DE", "#FFD6CA", "#FFB29D", "#FF9174", "#FF7452", "#ED5933", "#D8431D",
        "#BD320E", "#9F2505", "#7C1B00", "#591300",
    ],
);

/// The yellow scale.
pub const YELLOW: ColorScale = ColorScale::new(
    "yellow",
    [
        "#FFF8D1", "#FFF18F", "#FFEB4B", "#FFD600", "#E5B70E", "#CC9C19", "#B38422", "#996F28",
        "#805C2B", "#664A2B", "#4D3927", "#33271F",
    ],
);

/// Every built-in hue.
pub const ALL: [ColorScale; 8] = [BLUE, GREEN, GREY, ORANGE, PINK, PURPLE, RED, YELLOW];
