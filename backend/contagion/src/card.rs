use crate::city::City;
use crate::rules::Rules;

use log::debug;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::Serialize;
use std::iter::repeat;
use strum::IntoEnumIterator;

/// Public information about the decks, returned by [`CardDealer::get_state`].
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct CardDealerState {
    pub infection_deck_size: usize,
    pub player_deck_size: usize,
}

/// Entity in charge of dealing as well as shuffling infection and player cards.
///
/// Both decks are drawn from the back. Shuffling is driven by a seeded RNG,
/// so two dealers built from the same seed deal the same cards.
#[derive(Clone, Debug, PartialEq)]
pub struct CardDealer {
    infection_deck: Vec<City>,
    player_deck: Vec<City>,
    /// Needed to rebuild the infection deck once it runs out.
    infection_cards_per_city: usize,
    rng: ChaCha8Rng,
}

impl CardDealer {
    /// Creates a new `CardDealer`, which starts with both decks shuffled.
    ///
    /// # Example
    /// ```
    /// use contagion::card::CardDealer;
    /// use contagion::rules::Rules;
    ///
    /// let card_dealer = CardDealer::new(&Rules::default(), 42);
    /// assert_eq!(card_dealer.get_state().player_deck_size, 20);
    /// ```
    pub fn new(rules: &Rules, seed: u64) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let infection_cards_per_city = rules.infection_cards_per_city as usize;

        let infection_deck = Self::build_deck(infection_cards_per_city, &mut rng);
        let player_deck = Self::build_deck(rules.player_cards_per_city as usize, &mut rng);

        Self {
            infection_deck,
            player_deck,
            infection_cards_per_city,
            rng,
        }
    }

    /// Builds a shuffled deck holding `cards_per_city` copies of each city.
    fn build_deck(cards_per_city: usize, rng: &mut ChaCha8Rng) -> Vec<City> {
        let mut deck: Vec<City> = City::iter()
            .flat_map(|city| repeat(city).take(cards_per_city))
            .collect();

        deck.shuffle(rng);
        deck
    }

    /// Rebuilds and shuffles the infection deck from scratch if it is empty.
    ///
    /// Returns whether the deck was rebuilt.
    fn maybe_reshuffle_infection_deck(&mut self) -> bool {
        if !self.infection_deck.is_empty() {
            return false;
        }

        self.infection_deck = Self::build_deck(self.infection_cards_per_city, &mut self.rng);
        debug!(
            "Reshuffled the infection deck ({} cards).",
            self.infection_deck.len()
        );
        true
    }

    /// Draws from the top of the infection deck, and returns the card alongside whether the
    /// deck had to be rebuilt and re-shuffled before drawing.
    ///
    /// The infection deck never runs out: it only returns an `Err` if it cannot hold any card.
    ///
    /// # Example
    /// ```
    /// use contagion::card::CardDealer;
    /// use contagion::rules::Rules;
    ///
    /// let mut card_dealer = CardDealer::new(&Rules::default(), 7);
    ///
    /// for _ in 0..100 {
    ///     assert!(card_dealer.draw_infection_card().is_ok());
    /// }
    /// ```
    pub fn draw_infection_card(&mut self) -> Result<(City, bool), String> {
        let reshuffled = self.maybe_reshuffle_infection_deck();

        match self.infection_deck.pop() {
            Some(card_drawn) => Ok((card_drawn, reshuffled)),
            None => Err(String::from("The infection deck holds no cards.")),
        }
    }

    /// Draws from the top of the player deck, and returns the card.
    ///
    /// If there are no more cards left in that deck, returns an `Err`.
    pub fn draw_player_card(&mut self) -> Result<City, String> {
        self.player_deck
            .pop()
            .ok_or_else(|| String::from("The player deck is empty."))
    }

    pub fn get_state(&self) -> CardDealerState {
        CardDealerState {
            infection_deck_size: self.infection_deck.len(),
            player_deck_size: self.player_deck.len(),
        }
    }

    #[cfg(test)]
    pub(crate) fn get_mut_infection_deck(&mut self) -> &mut Vec<City> {
        &mut self.infection_deck
    }

    #[cfg(test)]
    pub(crate) fn get_mut_player_deck(&mut self) -> &mut Vec<City> {
        &mut self.player_deck
    }
}
