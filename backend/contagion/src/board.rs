use crate::city::{City, CityToCity, Position, ALL_CITIES, NUM_CITIES};

use array_init::array_init;
use log::debug;
use serde::Serialize;
use smallvec::SmallVec;
use std::collections::BTreeSet;
use std::ops::RangeInclusive;

lazy_static! {
    /// Every link of the board, stored in both directions.
    static ref LINKS: BTreeSet<CityToCity> = Board::build_links();
}

// Atlanta and Chicago have the highest number of neighbors, which is 3 adjacent cities.
const MAX_NEIGHBORS_PER_CITY: usize = 3;

/// All cities adjacent to a given city.
pub type Neighbors = SmallVec<[City; MAX_NEIGHBORS_PER_CITY]>;

/// What happened when an infection card was applied to the board.
#[derive(Clone, Debug, PartialEq)]
pub enum Infection {
    /// The city was below its limit, and received a cube.
    CubeAdded(City),
    /// The city was already full. Every neighbor below its limit received a cube.
    ///
    /// Outbreaks never cascade: a neighbor that is full is left untouched.
    Outbreak { city: City, spread_to: Neighbors },
}

/// Public information about a city, returned by [`Board::get_state`].
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CityState {
    pub city: City,
    pub name: String,
    pub position: Position,
    pub research_station: bool,
    pub cubes: u8,
    pub neighbors: Neighbors,
}

/// The authoritative state of the board, per game: how many cubes each city holds.
///
/// The links between cities are static, and shared by every board.
#[derive(Clone, Debug, PartialEq)]
pub struct Board {
    /// Cubes per city, indexed by [`City::index`].
    cubes: [u8; NUM_CITIES],
    /// No city ever holds more cubes than this.
    max_cubes_per_city: u8,
}

impl Board {
    fn get_range_of_links_starting_at_city(city: City) -> RangeInclusive<CityToCity> {
        // This assumes that the smallest city, as ordered in `City`, is Atlanta,
        // and the largest city is San Diego.
        (city, City::Atlanta)..=(city, City::SanDiego)
    }

    fn build_links() -> BTreeSet<CityToCity> {
        [
            (City::Atlanta, City::Chicago),
            (City::Atlanta, City::Madrid),
            (City::Chicago, City::Paris),
            (City::Paris, City::Madrid),
            (City::SanDiego, City::Chicago),
            (City::SanDiego, City::Atlanta),
        ]
        .into_iter()
        .flat_map(|(start, end)| [(start, end), (end, start)])
        .collect()
    }

    /// Creates an empty board, where no city can hold more than `max_cubes_per_city`.
    ///
    /// # Example
    /// ```
    /// use contagion::board::Board;
    /// use contagion::city::City;
    ///
    /// let board = Board::new(3);
    /// assert_eq!(board.cubes(City::Paris), 0);
    /// assert!(board.is_clean());
    /// ```
    pub fn new(max_cubes_per_city: u8) -> Self {
        Self {
            cubes: array_init(|_| 0),
            max_cubes_per_city,
        }
    }

    /// Returns all cities adjacent to `city`, in ascending order.
    ///
    /// # Example
    /// ```
    /// use contagion::board::Board;
    /// use contagion::city::City;
    ///
    /// assert_eq!(
    ///     Board::neighbors(City::Paris).as_slice(),
    ///     &[City::Chicago, City::Madrid]
    /// );
    /// ```
    pub fn neighbors(city: City) -> Neighbors {
        LINKS
            .range(Self::get_range_of_links_starting_at_city(city))
            .map(|(_, end)| *end)
            .collect()
    }

    /// Whether a pawn can travel from `start` to `end` in a single move.
    #[inline]
    pub fn are_adjacent(start: City, end: City) -> bool {
        LINKS.contains(&(start, end))
    }

    #[inline]
    pub fn cubes(&self, city: City) -> u8 {
        self.cubes[city.index()]
    }

    #[inline]
    pub fn max_cubes_per_city(&self) -> u8 {
        self.max_cubes_per_city
    }

    pub fn total_cubes(&self) -> u32 {
        self.cubes.iter().map(|cubes| *cubes as u32).sum()
    }

    /// Whether no city holds any cube.
    #[inline]
    pub fn is_clean(&self) -> bool {
        self.total_cubes() == 0
    }

    #[inline]
    fn is_full(&self, city: City) -> bool {
        self.cubes(city) >= self.max_cubes_per_city
    }

    /// Adds a cube to `city` if it is below its limit.
    ///
    /// Returns whether a cube was added.
    fn maybe_add_cube(&mut self, city: City) -> bool {
        if self.is_full(city) {
            return false;
        }

        self.cubes[city.index()] += 1;
        true
    }

    /// Removes a single cube from `city`.
    ///
    /// Returns an `Err` if the city holds no cube.
    pub fn remove_cube(&mut self, city: City) -> Result<(), String> {
        let cubes = &mut self.cubes[city.index()];
        if *cubes == 0 {
            return Err(String::from("Nothing to treat here."));
        }

        *cubes -= 1;
        Ok(())
    }

    /// Applies an infection card for `city`.
    ///
    /// If the city is below its limit, it receives a cube.
    /// Otherwise, an outbreak happens: each neighbor below its limit receives a cube.
    ///
    /// # Example
    /// ```
    /// use contagion::board::{Board, Infection};
    /// use contagion::city::City;
    ///
    /// let mut board = Board::new(1);
    ///
    /// assert_eq!(board.infect(City::Paris), Infection::CubeAdded(City::Paris));
    /// assert!(matches!(board.infect(City::Paris), Infection::Outbreak { .. }));
    /// assert_eq!(board.cubes(City::Madrid), 1);
    /// ```
    pub fn infect(&mut self, city: City) -> Infection {
        if self.maybe_add_cube(city) {
            debug!("Added a cube in {}.", city);
            return Infection::CubeAdded(city);
        }

        let spread_to = Self::neighbors(city)
            .into_iter()
            .filter(|neighbor| self.maybe_add_cube(*neighbor))
            .collect();

        Infection::Outbreak { city, spread_to }
    }

    fn city_state(&self, city: City) -> CityState {
        CityState {
            city,
            name: city.to_string(),
            position: city.position(),
            research_station: city.has_research_station(),
            cubes: self.cubes(city),
            neighbors: Self::neighbors(city),
        }
    }

    /// Returns the public information of every city, ordered like [`ALL_CITIES`].
    pub fn get_state(&self) -> [CityState; NUM_CITIES] {
        array_init(|index| self.city_state(ALL_CITIES[index]))
    }

    #[cfg(test)]
    pub(crate) fn set_cubes(&mut self, city: City, cubes: u8) {
        self.cubes[city.index()] = cubes;
    }
}
