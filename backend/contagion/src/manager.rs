use crate::{
    board::CityState,
    card::CardDealerState,
    city::{City, NUM_CITIES},
    event::Event,
    game::{Game, TransitionResult},
    game_phase::{GameOutcome, GamePhase},
    rules::Rules,
};

use log::info;
use rand::random;
use serde::Serialize;

/// Which actions the player can take right now.
///
/// Derived from the same checks the actions themselves run, so an action marked as
/// available is guaranteed to succeed.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct AvailableActions {
    /// Moving to the selected city. Always `false` when no city is selected.
    pub can_move: bool,
    pub can_treat: bool,
    pub can_cure: bool,
    pub can_end_turn: bool,
}

#[derive(Serialize)]
/// All the information about a game's current state, returned by [`Manager::get_state`].
pub struct GameState<'a> {
    /// The phase of the game.
    pub phase: GamePhase,
    /// How the game ended. Until the game is [`GamePhase::Done`], this is `None`.
    pub outcome: Option<GameOutcome>,
    /// Starts at 0, and increments every time a new turn starts.
    pub turn: usize,
    pub actions_left: u8,
    pub outbreaks: u8,
    /// The game is lost once [`GameState::outbreaks`] reaches this number.
    pub outbreak_limit: u8,
    /// How many infection cards are drawn at the end of every turn.
    pub infection_rate: u8,
    pub cured: bool,
    /// Where the pawn stands.
    pub pawn: City,
    /// The city last selected by the player, if any.
    pub selected: Option<City>,
    pub hand: &'a [City],
    pub cities: [CityState; NUM_CITIES],
    pub card_dealer_state: CardDealerState,
    pub available_actions: AvailableActions,
    /// Human-readable outcome of the last action, successful or not.
    pub status: &'a str,
    /// What happened during the last successful action.
    pub events: &'a [Event],
}

/// All actions taken by a manager have the same `Result`:
///
/// * Either it succeeded, which we mark with an empty tuple.
/// * Or it failed, which includes a human-readable error message.
pub type ManagerActionResult = Result<(), String>;

/// In charge of holding the current [`Game`], alongside what the player interface needs on
/// top of it: the selected city, the status line, and the events of the last action.
///
/// Every action replaces the current game with the one returned by the corresponding
/// transition, if it succeeded.
pub struct Manager {
    game: Game,
    /// Set by clicking a city. Moving the pawn targets this city.
    selected: Option<City>,
    /// Message describing the outcome of the last action.
    status: String,
    /// Events produced by the last successful action.
    /// Emptied whenever an action fails.
    events: Vec<Event>,
    /// Whether a player has taken the only seat of this game.
    claimed: bool,
}

impl Manager {
    /// Creates a new [`Manager`], with a game shuffled from a random seed.
    ///
    /// Returns an `Err` if the rules are invalid.
    pub fn new(rules: Rules) -> Result<Self, String> {
        Self::with_seed(rules, random())
    }

    /// Creates a new [`Manager`], with a game shuffled from `seed`.
    ///
    /// Two managers created from the same rules and seed play out the same way.
    ///
    /// # Example
    /// ```
    /// use contagion::manager::Manager;
    /// use contagion::rules::Rules;
    ///
    /// let manager = Manager::with_seed(Rules::default(), 42).unwrap();
    /// assert_eq!(manager.get_state().actions_left, 4);
    /// ```
    pub fn with_seed(rules: Rules, seed: u64) -> Result<Self, String> {
        let transition = Game::setup(rules, seed)?;

        Ok(Self {
            game: transition.game,
            selected: None,
            status: transition.message,
            events: transition.events,
            claimed: false,
        })
    }

    #[inline]
    pub fn game(&self) -> &Game {
        &self.game
    }

    /// Returns the game's state, as shown to the player.
    pub fn get_state(&self) -> GameState {
        GameState {
            phase: self.game.phase(),
            outcome: self.game.outcome(),
            turn: self.game.turn(),
            actions_left: self.game.actions_left(),
            outbreaks: self.game.outbreaks(),
            outbreak_limit: self.game.rules().outbreak_limit,
            infection_rate: self.game.rules().infections_per_turn,
            cured: self.game.cured(),
            pawn: self.game.player().location(),
            selected: self.selected,
            hand: self.game.player().hand(),
            cities: self.game.board().get_state(),
            card_dealer_state: self.game.card_dealer_state(),
            available_actions: self.get_available_actions(),
            status: &self.status,
            events: &self.events,
        }
    }

    fn get_available_actions(&self) -> AvailableActions {
        AvailableActions {
            can_move: self
                .selected
                .map_or(false, |city| self.game.check_move(city).is_ok()),
            can_treat: self.game.check_treat().is_ok(),
            can_cure: self.game.check_cure().is_ok(),
            can_end_turn: self.game.check_end_turn().is_ok(),
        }
    }

    /// Takes the only seat of this game.
    ///
    /// Returns `false` if the seat was already taken.
    pub fn claim(&mut self) -> bool {
        if self.claimed {
            return false;
        }

        self.claimed = true;
        true
    }

    /// Selects a city, which the next [`Manager::move_to_selected`] targets.
    ///
    /// Selecting is not an action: it can be done at any time, even once the game is over.
    pub fn select_city(&mut self, city: City) {
        self.selected = Some(city);
    }

    /// Moves the pawn to the selected city.
    ///
    /// Returns an `Err` if no city is selected, or if [`Game::move_pawn`] failed.
    pub fn move_to_selected(&mut self) -> ManagerActionResult {
        match self.selected {
            Some(city) => {
                let transition = self.game.move_pawn(city);
                self.apply(transition)
            }
            None => self.apply(Err(String::from("Select a city first."))),
        }
    }

    /// Treats a cube where the pawn stands. See [`Game::treat`].
    pub fn treat(&mut self) -> ManagerActionResult {
        let transition = self.game.treat();
        self.apply(transition)
    }

    /// Cures the disease. See [`Game::cure`].
    pub fn cure(&mut self) -> ManagerActionResult {
        let transition = self.game.cure();
        self.apply(transition)
    }

    /// Ends the turn. See [`Game::end_turn`].
    pub fn end_turn(&mut self) -> ManagerActionResult {
        let transition = self.game.end_turn();
        self.apply(transition)
    }

    /// Replaces the current game if the transition succeeded, and updates the status line
    /// either way.
    fn apply(&mut self, transition: TransitionResult) -> ManagerActionResult {
        match transition {
            Ok(transition) => {
                self.game = transition.game;
                self.events = transition.events;
                self.status = transition.message;

                if self.game.is_over() {
                    info!("{}", self.status);
                }

                Ok(())
            }
            Err(error_message) => {
                self.events.clear();
                self.status = error_message.clone();

                Err(error_message)
            }
        }
    }
}
