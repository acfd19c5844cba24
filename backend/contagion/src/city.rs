use serde::Serialize;
use serde_repr::{Deserialize_repr, Serialize_repr};
#[allow(unused_imports)]
use strum::EnumCount;
use strum_macros::{Display, EnumCount as EnumCountMacro, EnumIter};

/// All the different cities on the board.
///
/// # JSON
/// Cities are serialized as an 8-bit unsigned integer.
#[derive(
    Clone,
    Copy,
    Debug,
    Deserialize_repr,
    Display,
    EnumCountMacro,
    EnumIter,
    Eq,
    Hash,
    PartialEq,
    PartialOrd,
    Ord,
    Serialize_repr,
)]
#[repr(u8)]
pub enum City {
    Atlanta = 0,
    Chicago = 1,
    Paris = 2,
    Madrid = 3,
    #[strum(serialize = "San Diego")]
    SanDiego = 4,
}

/// Number of cities on the board.
pub const NUM_CITIES: usize = City::COUNT;

/// Every city, ordered by their 8-bit representation.
pub const ALL_CITIES: [City; NUM_CITIES] = [
    City::Atlanta,
    City::Chicago,
    City::Paris,
    City::Madrid,
    City::SanDiego,
];

/// Top-level representation of a connection between two cities.
pub type CityToCity = (City, City);

/// Where a city sits on the board, in percent of the viewport.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Position {
    pub x: u8,
    pub y: u8,
}

impl City {
    /// Index of the city in per-city arrays, such as [`ALL_CITIES`].
    #[inline]
    pub fn index(&self) -> usize {
        *self as usize
    }

    /// Whether the city hosts a research station, where the disease can be cured.
    ///
    /// # Examples:
    /// ```
    /// use contagion::city::City;
    ///
    /// assert!(City::Atlanta.has_research_station());
    /// assert!(!City::Paris.has_research_station());
    /// ```
    #[inline]
    pub fn has_research_station(&self) -> bool {
        *self == City::Atlanta
    }

    pub fn position(&self) -> Position {
        let (x, y) = match self {
            City::Atlanta => (20, 70),
            City::Chicago => (28, 55),
            City::Paris => (62, 50),
            City::Madrid => (58, 62),
            City::SanDiego => (40, 62),
        };

        Position { x, y }
    }
}
