use crate::board::Board;
use crate::city::City;

use smallvec::SmallVec;

// A hand rarely grows past a few turns of draws before being spent on a cure.
const HAND_INLINE_CAPACITY: usize = 8;

/// The cards held by the player.
pub type Hand = SmallVec<[City; HAND_INLINE_CAPACITY]>;

/// The single pawn on the board, and the cards in hand.
#[derive(Clone, Debug, PartialEq)]
pub struct Player {
    location: City,
    hand: Hand,
}

impl Player {
    /// Creates a player standing in `location`, with an empty hand.
    pub fn new(location: City) -> Self {
        Self {
            location,
            hand: SmallVec::new(),
        }
    }

    #[inline]
    pub fn location(&self) -> City {
        self.location
    }

    #[inline]
    pub fn hand(&self) -> &[City] {
        &self.hand
    }

    /// Verifies that the pawn can move to `destination`.
    pub fn can_move_to(&self, destination: City) -> Result<(), String> {
        if !Board::are_adjacent(self.location, destination) {
            return Err(format!(
                "{} is not connected to {}.",
                self.location, destination
            ));
        }

        Ok(())
    }

    /// Moves the pawn to an adjacent city.
    ///
    /// Returns an `Err` if `destination` is not adjacent to the current location.
    pub fn move_to(&mut self, destination: City) -> Result<(), String> {
        self.can_move_to(destination)?;

        self.location = destination;
        Ok(())
    }

    pub fn add_card(&mut self, card: City) {
        self.hand.push(card);
    }

    /// Discards the `num_cards` oldest cards of the hand, and returns them.
    ///
    /// Returns an `Err` if the hand does not hold enough cards, in which case
    /// nothing is discarded.
    pub fn discard_cards(&mut self, num_cards: usize) -> Result<Hand, String> {
        if self.hand.len() < num_cards {
            return Err(format!("Need {} cards to cure.", num_cards));
        }

        Ok(self.hand.drain(..num_cards).collect())
    }
}
