//! The tunable constants of a game.

use crate::city::NUM_CITIES;

use serde::{Deserialize, Serialize};

/// All the numbers driving a game.
///
/// Every field has a default, so a partial configuration (e.g. only overriding
/// `outbreak_limit`) is valid.
///
/// # JSON
/// Fields are serialized in snake_case, as they are named here.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(default)]
pub struct Rules {
    /// A city holding this many cubes outbreaks instead of receiving another one.
    pub max_cubes_per_city: u8,
    /// The game is lost once this many outbreaks happened.
    pub outbreak_limit: u8,
    /// How many infection cards are drawn at the end of every turn.
    pub infections_per_turn: u8,
    /// How many infection cards are drawn when setting up the game.
    pub initial_infections: u8,
    /// How many player cards must be discarded to cure the disease.
    pub cards_to_cure: u8,
    /// How many actions the player can take every turn.
    pub actions_per_turn: u8,
    /// How many player cards are drawn at the end of every turn.
    pub player_cards_per_turn: u8,
    /// How many player cards are dealt when setting up the game.
    pub initial_hand_size: u8,
    /// Copies of each city in the infection deck.
    pub infection_cards_per_city: u8,
    /// Copies of each city in the player deck.
    pub player_cards_per_city: u8,
}

impl Default for Rules {
    fn default() -> Self {
        Self {
            max_cubes_per_city: 3,
            outbreak_limit: 7,
            infections_per_turn: 2,
            initial_infections: 3,
            cards_to_cure: 3,
            actions_per_turn: 4,
            player_cards_per_turn: 2,
            initial_hand_size: 2,
            infection_cards_per_city: 5,
            player_cards_per_city: 4,
        }
    }
}

impl Rules {
    /// Total number of cards in a freshly built player deck.
    #[inline]
    pub fn player_deck_size(&self) -> usize {
        self.player_cards_per_city as usize * NUM_CITIES
    }

    /// Total number of cards in a freshly built infection deck.
    #[inline]
    pub fn infection_deck_size(&self) -> usize {
        self.infection_cards_per_city as usize * NUM_CITIES
    }

    /// Verifies that a game can be played with these rules.
    ///
    /// Returns an `Err` if either:
    ///   * A city cannot hold any cube.
    ///   * The game would be lost before any outbreak.
    ///   * A turn has no actions.
    ///   * Curing requires no cards.
    ///   * The infection deck is empty.
    ///   * The player deck cannot cover the initial hand.
    ///
    /// # Example
    /// ```
    /// use contagion::rules::Rules;
    ///
    /// assert!(Rules::default().validate().is_ok());
    ///
    /// let rules = Rules {
    ///     actions_per_turn: 0,
    ///     ..Rules::default()
    /// };
    /// assert!(rules.validate().is_err());
    /// ```
    pub fn validate(&self) -> Result<(), String> {
        if self.max_cubes_per_city == 0 {
            return Err(String::from("Cities must be able to hold at least one cube."));
        }

        if self.outbreak_limit == 0 {
            return Err(String::from("The outbreak limit must be at least one."));
        }

        if self.actions_per_turn == 0 {
            return Err(String::from("Turns must have at least one action."));
        }

        if self.cards_to_cure == 0 {
            return Err(String::from("Curing must require at least one card."));
        }

        if self.infection_cards_per_city == 0 {
            return Err(String::from(
                "The infection deck must hold at least one card per city.",
            ));
        }

        if self.player_deck_size() < self.initial_hand_size as usize {
            return Err(format!(
                "The player deck ({} cards) cannot deal an initial hand of {} cards.",
                self.player_deck_size(),
                self.initial_hand_size
            ));
        }

        Ok(())
    }
}
