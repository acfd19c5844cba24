//! The rules of the game, as pure transitions.
//!
//! A [`Game`] is never mutated from the outside: every action takes the current
//! game by reference, and returns a brand new one alongside the [`Event`]s it
//! produced. A failed action returns an `Err` holding a human-readable message,
//! and leaves the current game untouched.

use crate::board::{Board, Infection};
use crate::card::{CardDealer, CardDealerState};
use crate::city::City;
use crate::event::Event;
use crate::game_phase::{GameOutcome, GamePhase, LossReason};
use crate::player::Player;
use crate::rules::Rules;

use log::{info, warn};

/// Where the pawn starts, which is also the only research station.
pub const STARTING_CITY: City = City::Atlanta;

/// The outcome of a successful transition.
#[derive(Clone, Debug, PartialEq)]
pub struct Transition {
    /// The game after the transition.
    pub game: Game,
    /// Everything that happened during the transition, in order.
    pub events: Vec<Event>,
    /// Human-readable summary of the transition.
    pub message: String,
}

/// All transitions have the same `Result`:
///
/// * Either it succeeded, which holds the new game.
/// * Or it failed, which includes a human-readable error message.
pub type TransitionResult = Result<Transition, String>;

/// A snapshot of a single game.
///
/// This overall acts as a finite-state machine, cycling through
/// [`GamePhase::Action`], [`GamePhase::Draw`] and [`GamePhase::Infect`],
/// until it reaches [`GamePhase::Done`].
#[derive(Clone, Debug, PartialEq)]
pub struct Game {
    rules: Rules,
    board: Board,
    card_dealer: CardDealer,
    player: Player,
    phase: GamePhase,
    /// Starts at 0, and increments every time a new turn starts.
    turn: usize,
    actions_left: u8,
    /// Never decreases.
    outbreaks: u8,
    /// Once cured, the disease stays cured.
    cured: bool,
    /// Only populated once the game is [`GamePhase::Done`].
    outcome: Option<GameOutcome>,
}

impl Game {
    /// Sets up a new game: shuffles the decks, infects the initial cities, and deals the
    /// initial hand.
    ///
    /// Returns an `Err` if the rules are invalid.
    ///
    /// # Example
    /// ```
    /// use contagion::game::Game;
    /// use contagion::game_phase::GamePhase;
    /// use contagion::rules::Rules;
    ///
    /// let transition = Game::setup(Rules::default(), 42).unwrap();
    /// assert_eq!(transition.game.phase(), GamePhase::Action);
    /// assert_eq!(transition.game.actions_left(), 4);
    /// assert_eq!(transition.game.board().total_cubes(), 3);
    /// ```
    pub fn setup(rules: Rules, seed: u64) -> TransitionResult {
        rules.validate()?;

        let mut game = Self {
            board: Board::new(rules.max_cubes_per_city),
            card_dealer: CardDealer::new(&rules, seed),
            player: Player::new(STARTING_CITY),
            phase: GamePhase::Action,
            turn: 0,
            actions_left: rules.actions_per_turn,
            outbreaks: 0,
            cured: false,
            outcome: None,
            rules,
        };
        let mut events = Vec::new();

        for _ in 0..game.rules.initial_infections {
            game.infect(&mut events)?;
        }

        for _ in 0..game.rules.initial_hand_size {
            game.draw_player_card(&mut events)?;
        }

        let message = if game.maybe_lose_to_outbreaks(&mut events) {
            game.outcome_message()
        } else {
            String::from("Your turn. Select a city to interact.")
        };

        Ok(Transition {
            game,
            events,
            message,
        })
    }

    #[inline]
    pub fn rules(&self) -> &Rules {
        &self.rules
    }

    #[inline]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[inline]
    pub fn player(&self) -> &Player {
        &self.player
    }

    #[inline]
    pub fn card_dealer_state(&self) -> CardDealerState {
        self.card_dealer.get_state()
    }

    #[inline]
    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    #[inline]
    pub fn turn(&self) -> usize {
        self.turn
    }

    #[inline]
    pub fn actions_left(&self) -> u8 {
        self.actions_left
    }

    #[inline]
    pub fn outbreaks(&self) -> u8 {
        self.outbreaks
    }

    #[inline]
    pub fn cured(&self) -> bool {
        self.cured
    }

    #[inline]
    pub fn outcome(&self) -> Option<GameOutcome> {
        self.outcome
    }

    #[inline]
    pub fn is_over(&self) -> bool {
        self.phase == GamePhase::Done
    }

    /// Verifies that an action can be spent right now.
    fn can_act(&self) -> Result<(), String> {
        if self.is_over() {
            return Err(String::from("The game is over."));
        }

        if self.phase != GamePhase::Action {
            return Err(format!(
                "Cannot act during the {} phase.",
                self.phase
            ));
        }

        if self.actions_left == 0 {
            return Err(String::from("No actions left."));
        }

        Ok(())
    }

    /// Verifies that the pawn can move to `destination`, without moving it.
    pub fn check_move(&self, destination: City) -> Result<(), String> {
        self.can_act()?;
        self.player.can_move_to(destination)
    }

    /// Verifies that a cube can be treated where the pawn stands, without treating it.
    pub fn check_treat(&self) -> Result<(), String> {
        self.can_act()?;

        if self.board.cubes(self.player.location()) == 0 {
            return Err(String::from("Nothing to treat here."));
        }

        Ok(())
    }

    /// Verifies that the disease can be cured, without curing it.
    ///
    /// Returns an `Err` if either:
    ///   * No action can be taken.
    ///   * The pawn is not on a research station.
    ///   * The disease is already cured.
    ///   * The hand holds less than [`Rules::cards_to_cure`] cards.
    pub fn check_cure(&self) -> Result<(), String> {
        self.can_act()?;

        if !self.player.location().has_research_station() {
            return Err(String::from("You must be at a research station to cure."));
        }

        if self.cured {
            return Err(String::from("Disease is already cured."));
        }

        if self.player.hand().len() < self.rules.cards_to_cure as usize {
            return Err(format!(
                "Need {} cards to cure.",
                self.rules.cards_to_cure
            ));
        }

        Ok(())
    }

    /// Verifies that the turn can be ended. Unlike other actions, this does not
    /// require any action left.
    pub fn check_end_turn(&self) -> Result<(), String> {
        if self.is_over() {
            return Err(String::from("The game is over."));
        }

        if self.phase != GamePhase::Action {
            return Err(format!(
                "Cannot end the turn during the {} phase.",
                self.phase
            ));
        }

        Ok(())
    }

    /// Moves the pawn to a city adjacent to its location, which costs an action.
    ///
    /// # Example
    /// ```
    /// use contagion::city::City;
    /// use contagion::game::Game;
    /// use contagion::rules::Rules;
    ///
    /// let game = Game::setup(Rules::default(), 42).unwrap().game;
    ///
    /// let transition = game.move_pawn(City::Chicago).unwrap();
    /// assert_eq!(transition.game.player().location(), City::Chicago);
    /// assert_eq!(transition.game.actions_left(), 3);
    ///
    /// // Paris is not adjacent to Atlanta.
    /// assert!(game.move_pawn(City::Paris).is_err());
    /// ```
    pub fn move_pawn(&self, destination: City) -> TransitionResult {
        self.check_move(destination)?;

        self.spend_action(|game, events| {
            let from = game.player.location();
            game.player.move_to(destination)?;
            events.push(Event::PawnMoved {
                from,
                to: destination,
            });

            Ok(format!("Moved to {}.", destination))
        })
    }

    /// Removes a single cube where the pawn stands, which costs an action.
    pub fn treat(&self) -> TransitionResult {
        self.check_treat()?;

        self.spend_action(|game, events| {
            let city = game.player.location();
            game.board.remove_cube(city)?;
            events.push(Event::CubeTreated { city });

            Ok(format!("Treated 1 cube in {}.", city))
        })
    }

    /// Discards [`Rules::cards_to_cure`] cards to cure the disease, which costs an action.
    pub fn cure(&self) -> TransitionResult {
        self.check_cure()?;

        self.spend_action(|game, events| {
            game.player
                .discard_cards(game.rules.cards_to_cure as usize)?;
            game.cured = true;
            events.push(Event::DiseaseCured);
            info!("Disease cured on turn {}.", game.turn);

            Ok(String::from(
                "Disease cured! Now just mop up the board to win.",
            ))
        })
    }

    /// Ends the current turn: draws player cards, infects cities, then either ends the game
    /// or starts a new turn.
    ///
    /// The turn can be ended even if actions are left; they are lost.
    pub fn end_turn(&self) -> TransitionResult {
        self.check_end_turn()?;

        if self.actions_left > 0 {
            warn!(
                "Ending turn {} with {} actions left.",
                self.turn, self.actions_left
            );
        }

        self.transition(|game, events| {
            game.set_phase(GamePhase::Draw, events);
            for _ in 0..game.rules.player_cards_per_turn {
                if game.draw_player_card(events).is_err() {
                    game.lose(LossReason::PlayerDeckExhausted, events);
                    return Ok(game.outcome_message());
                }
            }

            game.set_phase(GamePhase::Infect, events);
            for _ in 0..game.rules.infections_per_turn {
                game.infect(events)?;
            }

            if game.maybe_lose_to_outbreaks(events) || game.maybe_win(events) {
                return Ok(game.outcome_message());
            }

            game.start_next_turn(events);
            Ok(String::from("New turn."))
        })
    }

    /// Runs `transition` against a copy of the current game.
    fn transition<F>(&self, transition: F) -> TransitionResult
    where
        F: FnOnce(&mut Game, &mut Vec<Event>) -> Result<String, String>,
    {
        let mut game = self.clone();
        let mut events = Vec::new();
        let message = transition(&mut game, &mut events)?;

        Ok(Transition {
            game,
            events,
            message,
        })
    }

    /// Runs `action` against a copy of the current game, then spends an action.
    /// The phase is left untouched: the game only ends with the turn.
    ///
    /// Callers must have verified that an action can be spent.
    fn spend_action<F>(&self, action: F) -> TransitionResult
    where
        F: FnOnce(&mut Game, &mut Vec<Event>) -> Result<String, String>,
    {
        self.transition(|game, events| {
            let message = action(game, events)?;
            game.actions_left -= 1;

            Ok(message)
        })
    }

    fn set_phase(&mut self, phase: GamePhase, events: &mut Vec<Event>) {
        self.phase = phase;
        events.push(Event::PhaseChanged { phase });
    }

    fn start_next_turn(&mut self, events: &mut Vec<Event>) {
        self.turn += 1;
        self.actions_left = self.rules.actions_per_turn;
        self.set_phase(GamePhase::Action, events);
        events.push(Event::TurnStarted { turn: self.turn });
    }

    fn draw_player_card(&mut self, events: &mut Vec<Event>) -> Result<(), String> {
        let card = self.card_dealer.draw_player_card()?;
        self.player.add_card(card);
        events.push(Event::PlayerCardDrawn { city: card });

        Ok(())
    }

    /// Draws an infection card, and applies it to the board.
    fn infect(&mut self, events: &mut Vec<Event>) -> Result<(), String> {
        let (city, reshuffled) = self.card_dealer.draw_infection_card()?;
        if reshuffled {
            events.push(Event::InfectionDeckReshuffled);
        }
        events.push(Event::InfectionCardDrawn { city });

        match self.board.infect(city) {
            Infection::CubeAdded(city) => events.push(Event::CubeAdded { city }),
            Infection::Outbreak { city, spread_to } => {
                self.outbreaks = self.outbreaks.saturating_add(1);
                info!("Outbreak in {} (#{}).", city, self.outbreaks);

                events.push(Event::Outbreak { city });
                events.extend(spread_to.into_iter().map(|city| Event::CubeAdded { city }));
            }
        }

        Ok(())
    }

    fn lose(&mut self, reason: LossReason, events: &mut Vec<Event>) {
        info!("Game lost on turn {}: {}.", self.turn, reason);

        self.outcome = Some(GameOutcome::Lost(reason));
        self.set_phase(GamePhase::Done, events);
        events.push(Event::GameLost { reason });
    }

    /// Loses the game if the outbreak limit is reached. Returns whether the game was lost.
    fn maybe_lose_to_outbreaks(&mut self, events: &mut Vec<Event>) -> bool {
        if self.outbreaks < self.rules.outbreak_limit {
            return false;
        }

        self.lose(LossReason::TooManyOutbreaks, events);
        true
    }

    /// Wins the game if the disease is cured and the board is clean. Returns whether the game
    /// was won.
    fn maybe_win(&mut self, events: &mut Vec<Event>) -> bool {
        if !self.cured || !self.board.is_clean() {
            return false;
        }

        info!("Game won on turn {}.", self.turn);

        self.outcome = Some(GameOutcome::Won);
        self.set_phase(GamePhase::Done, events);
        events.push(Event::GameWon);
        true
    }

    fn outcome_message(&self) -> String {
        match self.outcome {
            Some(GameOutcome::Won) => {
                String::from("You win: the disease is cured and the board is clean.")
            }
            Some(GameOutcome::Lost(reason)) => format!("You lose: {}.", reason),
            None => String::new(),
        }
    }

    #[cfg(test)]
    pub(crate) fn get_mut_board(&mut self) -> &mut Board {
        &mut self.board
    }

    #[cfg(test)]
    pub(crate) fn get_mut_card_dealer(&mut self) -> &mut CardDealer {
        &mut self.card_dealer
    }

    #[cfg(test)]
    pub(crate) fn get_mut_player(&mut self) -> &mut Player {
        &mut self.player
    }

    #[cfg(test)]
    pub(crate) fn set_cured(&mut self, cured: bool) {
        self.cured = cured;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    fn new_game() -> Game {
        Game::setup(Rules::default(), 42).unwrap().game
    }

    /// A game with no cubes on the board, and an empty hand.
    fn clean_game() -> Game {
        let mut game = new_game();
        *game.get_mut_board() = Board::new(3);
        *game.get_mut_player() = Player::new(STARTING_CITY);
        game
    }

    fn with_hand(mut game: Game, cards: &[City]) -> Game {
        for card in cards {
            game.get_mut_player().add_card(*card);
        }
        game
    }

    // Tests for `Game::setup`.

    #[test]
    fn game_setup() {
        let transition = Game::setup(Rules::default(), 42).unwrap();
        let game = &transition.game;

        assert_eq!(game.phase(), GamePhase::Action);
        assert_eq!(game.turn(), 0);
        assert_eq!(game.actions_left(), 4);
        assert_eq!(game.outbreaks(), 0);
        assert!(!game.cured());
        assert!(game.outcome().is_none());
        assert_eq!(game.player().location(), City::Atlanta);
        assert_eq!(game.player().hand().len(), 2);
        // Three infection cards cannot outbreak when cities hold up to three cubes.
        assert_eq!(game.board().total_cubes(), 3);
        assert_eq!(
            game.card_dealer_state(),
            CardDealerState {
                infection_deck_size: 22,
                player_deck_size: 18,
            }
        );

        let num_infections = transition
            .events
            .iter()
            .filter(|event| matches!(event, Event::InfectionCardDrawn { .. }))
            .count();
        let num_player_cards = transition
            .events
            .iter()
            .filter(|event| matches!(event, Event::PlayerCardDrawn { .. }))
            .count();
        assert_eq!(num_infections, 3);
        assert_eq!(num_player_cards, 2);
        assert_eq!(transition.message, "Your turn. Select a city to interact.");
    }

    #[test]
    fn game_setup_is_deterministic() {
        assert_eq!(
            Game::setup(Rules::default(), 7),
            Game::setup(Rules::default(), 7)
        );
    }

    #[test]
    fn game_setup_invalid_rules() {
        let rules = Rules {
            actions_per_turn: 0,
            ..Rules::default()
        };

        assert!(Game::setup(rules, 42).is_err());
    }

    #[test]
    fn game_setup_lost_to_outbreaks() {
        let rules = Rules {
            max_cubes_per_city: 1,
            outbreak_limit: 1,
            initial_infections: 10,
            ..Rules::default()
        };

        let game = Game::setup(rules, 42).unwrap().game;
        assert!(game.is_over());
        assert_eq!(
            game.outcome(),
            Some(GameOutcome::Lost(LossReason::TooManyOutbreaks))
        );
    }

    // Tests for `Game::move_pawn`.

    #[test]
    fn game_move_pawn() {
        let game = new_game();

        let transition = game.move_pawn(City::Chicago).unwrap();
        assert_eq!(transition.game.player().location(), City::Chicago);
        assert_eq!(transition.game.actions_left(), 3);
        assert_eq!(transition.game.phase(), GamePhase::Action);
        assert_eq!(
            transition.events,
            vec![Event::PawnMoved {
                from: City::Atlanta,
                to: City::Chicago
            }]
        );
        assert_eq!(transition.message, "Moved to Chicago.");

        // The original game is left untouched.
        assert_eq!(game.player().location(), City::Atlanta);
        assert_eq!(game.actions_left(), 4);
    }

    #[test]
    fn game_move_pawn_not_connected() {
        let game = new_game();
        let snapshot = game.clone();

        assert_eq!(
            game.move_pawn(City::Paris),
            Err(String::from("Atlanta is not connected to Paris."))
        );
        assert_eq!(game, snapshot);
    }

    #[test]
    fn game_move_pawn_once_with_one_action_left() {
        let mut game = new_game();
        game.actions_left = 1;

        let game = game.move_pawn(City::Chicago).unwrap().game;
        assert_eq!(game.actions_left(), 0);

        assert_eq!(
            game.move_pawn(City::Atlanta),
            Err(String::from("No actions left."))
        );
        assert_eq!(game.player().location(), City::Chicago);
    }

    #[test]
    fn game_actions_never_go_negative() {
        let mut game = new_game();
        let destinations = [City::Chicago, City::Paris, City::Madrid, City::Atlanta];

        for (spent, destination) in destinations.into_iter().enumerate() {
            game = game.move_pawn(destination).unwrap().game;
            assert_eq!(game.actions_left() as usize, 3 - spent);
        }

        for city in City::iter() {
            assert!(game.move_pawn(city).is_err());
        }
        assert!(game.treat().is_err());
        assert!(game.cure().is_err());
        assert_eq!(game.actions_left(), 0);

        // Ending the turn does not need any action left.
        assert!(game.end_turn().is_ok());
    }

    // Tests for `Game::treat`.

    #[test]
    fn game_treat() {
        let mut game = clean_game();
        game.get_mut_board().set_cubes(City::Atlanta, 2);
        game.get_mut_board().set_cubes(City::Paris, 1);

        let transition = game.treat().unwrap();
        assert_eq!(transition.game.board().cubes(City::Atlanta), 1);
        assert_eq!(transition.game.actions_left(), 3);
        assert_eq!(
            transition.events,
            vec![Event::CubeTreated {
                city: City::Atlanta
            }]
        );
        assert_eq!(transition.message, "Treated 1 cube in Atlanta.");
    }

    #[test]
    fn game_treat_nothing() {
        let game = clean_game();

        assert_eq!(game.treat(), Err(String::from("Nothing to treat here.")));
        assert_eq!(game.actions_left(), 4);
    }

    #[test]
    fn game_treat_last_cube_when_cured_wins_at_end_of_turn() {
        let rules = Rules {
            infections_per_turn: 0,
            ..Rules::default()
        };
        let mut game = Game::setup(rules, 42).unwrap().game;
        *game.get_mut_board() = Board::new(3);
        game.set_cured(true);
        game.get_mut_board().set_cubes(City::Atlanta, 1);

        let transition = game.treat().unwrap();
        assert_eq!(transition.game.phase(), GamePhase::Action);
        assert_eq!(transition.game.actions_left(), 3);
        assert!(transition.game.board().is_clean());
        assert!(!transition.game.is_over());
        assert_eq!(
            transition.events,
            vec![Event::CubeTreated {
                city: City::Atlanta
            }]
        );
        assert_eq!(transition.message, "Treated 1 cube in Atlanta.");

        let transition = transition.game.end_turn().unwrap();
        assert_eq!(transition.game.phase(), GamePhase::Done);
        assert_eq!(transition.game.outcome(), Some(GameOutcome::Won));
        assert_eq!(transition.events.last(), Some(&Event::GameWon));
        assert_eq!(
            transition.message,
            "You win: the disease is cured and the board is clean."
        );
    }

    #[test]
    fn game_treat_last_cube_when_not_cured_does_not_win() {
        let mut game = clean_game();
        game.get_mut_board().set_cubes(City::Atlanta, 1);

        let game = game.treat().unwrap().game;
        assert!(game.board().is_clean());
        assert!(!game.is_over());
    }

    // Tests for `Game::cure`.

    #[test]
    fn game_cure() {
        let mut game = with_hand(
            clean_game(),
            &[City::Paris, City::Madrid, City::Chicago, City::SanDiego],
        );
        game.get_mut_board().set_cubes(City::Paris, 1);

        let transition = game.cure().unwrap();
        assert!(transition.game.cured());
        assert_eq!(transition.game.player().hand(), &[City::SanDiego]);
        assert_eq!(transition.game.actions_left(), 3);
        assert!(!transition.game.is_over());
        assert_eq!(transition.events, vec![Event::DiseaseCured]);
        assert_eq!(
            transition.message,
            "Disease cured! Now just mop up the board to win."
        );
    }

    #[test]
    fn game_cure_on_clean_board_wins_at_end_of_turn() {
        let rules = Rules {
            infections_per_turn: 0,
            ..Rules::default()
        };
        let mut game = Game::setup(rules, 42).unwrap().game;
        *game.get_mut_board() = Board::new(3);
        *game.get_mut_player() = Player::new(STARTING_CITY);
        let game = with_hand(game, &[City::Paris, City::Madrid, City::Chicago]);

        let transition = game.cure().unwrap();
        assert!(transition.game.cured());
        assert!(transition.game.player().hand().is_empty());
        assert_eq!(transition.game.phase(), GamePhase::Action);
        assert_eq!(transition.game.outcome(), None);
        assert!(!transition.events.contains(&Event::GameWon));

        let transition = transition.game.end_turn().unwrap();
        assert_eq!(transition.game.outcome(), Some(GameOutcome::Won));
        assert!(transition.events.contains(&Event::GameWon));
    }

    #[test]
    fn game_cure_away_from_research_station() {
        let game = with_hand(clean_game(), &[City::Paris, City::Madrid, City::Chicago]);
        let game = game.move_pawn(City::Chicago).unwrap().game;

        assert_eq!(
            game.cure(),
            Err(String::from("You must be at a research station to cure."))
        );
    }

    #[test]
    fn game_cure_not_enough_cards() {
        let game = with_hand(clean_game(), &[City::Paris, City::Madrid]);

        assert_eq!(game.cure(), Err(String::from("Need 3 cards to cure.")));
        assert_eq!(game.player().hand().len(), 2);
        assert_eq!(game.actions_left(), 4);
    }

    #[test]
    fn game_cure_already_cured() {
        let mut game = with_hand(
            clean_game(),
            &[City::Paris, City::Madrid, City::Chicago, City::Atlanta],
        );
        game.get_mut_board().set_cubes(City::Madrid, 1);

        let game = game.cure().unwrap().game;
        let game = with_hand(game, &[City::Paris, City::Paris]);

        assert_eq!(game.cure(), Err(String::from("Disease is already cured.")));
        assert_eq!(game.player().hand().len(), 3);
    }

    // Tests for `Game::end_turn`.

    #[test]
    fn game_end_turn() {
        let mut game = clean_game();
        *game.get_mut_card_dealer().get_mut_player_deck() =
            vec![City::Madrid, City::Paris, City::Chicago];
        *game.get_mut_card_dealer().get_mut_infection_deck() = vec![City::Atlanta, City::SanDiego];

        let transition = game.end_turn().unwrap();
        let next_game = &transition.game;

        assert_eq!(next_game.phase(), GamePhase::Action);
        assert_eq!(next_game.turn(), 1);
        assert_eq!(next_game.actions_left(), 4);
        assert_eq!(next_game.player().hand(), &[City::Chicago, City::Paris]);
        assert_eq!(next_game.board().cubes(City::SanDiego), 1);
        assert_eq!(next_game.board().cubes(City::Atlanta), 1);
        assert_eq!(
            next_game.card_dealer_state(),
            CardDealerState {
                infection_deck_size: 0,
                player_deck_size: 1,
            }
        );
        assert_eq!(
            transition.events,
            vec![
                Event::PhaseChanged {
                    phase: GamePhase::Draw
                },
                Event::PlayerCardDrawn {
                    city: City::Chicago
                },
                Event::PlayerCardDrawn { city: City::Paris },
                Event::PhaseChanged {
                    phase: GamePhase::Infect
                },
                Event::InfectionCardDrawn {
                    city: City::SanDiego
                },
                Event::CubeAdded {
                    city: City::SanDiego
                },
                Event::InfectionCardDrawn {
                    city: City::Atlanta
                },
                Event::CubeAdded {
                    city: City::Atlanta
                },
                Event::PhaseChanged {
                    phase: GamePhase::Action
                },
                Event::TurnStarted { turn: 1 },
            ]
        );
        assert_eq!(transition.message, "New turn.");
    }

    #[test]
    fn game_end_turn_resets_actions() {
        let game = new_game().move_pawn(City::Chicago).unwrap().game;
        assert_eq!(game.actions_left(), 3);

        let game = game.end_turn().unwrap().game;
        assert_eq!(game.actions_left(), 4);
    }

    #[test]
    fn game_end_turn_outbreak() {
        let mut game = clean_game();
        game.get_mut_board().set_cubes(City::Paris, 3);
        game.get_mut_board().set_cubes(City::Madrid, 3);
        *game.get_mut_card_dealer().get_mut_infection_deck() = vec![City::Atlanta, City::Paris];

        let transition = game.end_turn().unwrap();
        let next_game = &transition.game;

        assert_eq!(next_game.outbreaks(), 1);
        assert_eq!(next_game.board().cubes(City::Paris), 3);
        assert_eq!(next_game.board().cubes(City::Madrid), 3);
        assert_eq!(next_game.board().cubes(City::Chicago), 1);
        assert_eq!(next_game.board().cubes(City::Atlanta), 1);

        let infection_events: Vec<_> = transition
            .events
            .iter()
            .skip_while(|event| {
                **event
                    != Event::PhaseChanged {
                        phase: GamePhase::Infect,
                    }
            })
            .skip(1)
            .take(4)
            .copied()
            .collect();
        assert_eq!(
            infection_events,
            vec![
                Event::InfectionCardDrawn { city: City::Paris },
                Event::Outbreak { city: City::Paris },
                Event::CubeAdded {
                    city: City::Chicago
                },
                Event::InfectionCardDrawn {
                    city: City::Atlanta
                },
            ]
        );
    }

    #[test]
    fn game_end_turn_reshuffles_infection_deck() {
        let mut game = clean_game();
        *game.get_mut_card_dealer().get_mut_infection_deck() = vec![City::Madrid];

        let transition = game.end_turn().unwrap();

        assert!(transition
            .events
            .contains(&Event::InfectionDeckReshuffled));
        assert_eq!(transition.game.board().total_cubes(), 2);
        assert_eq!(
            transition.game.card_dealer_state().infection_deck_size,
            24
        );
    }

    #[test]
    fn game_end_turn_too_many_outbreaks() {
        let mut game = clean_game();
        game.outbreaks = 6;
        game.get_mut_board().set_cubes(City::Paris, 3);
        *game.get_mut_card_dealer().get_mut_infection_deck() = vec![City::Madrid, City::Paris];

        let transition = game.end_turn().unwrap();
        let next_game = &transition.game;

        assert_eq!(next_game.outbreaks(), 7);
        assert!(next_game.is_over());
        assert_eq!(
            next_game.outcome(),
            Some(GameOutcome::Lost(LossReason::TooManyOutbreaks))
        );
        assert_eq!(
            transition.events.last(),
            Some(&Event::GameLost {
                reason: LossReason::TooManyOutbreaks
            })
        );
        assert_eq!(transition.message, "You lose: too many outbreaks.");
    }

    #[test]
    fn game_end_turn_player_deck_exhausted() {
        let mut game = clean_game();
        *game.get_mut_card_dealer().get_mut_player_deck() = vec![City::Paris];

        let transition = game.end_turn().unwrap();
        let next_game = &transition.game;

        assert_eq!(
            next_game.outcome(),
            Some(GameOutcome::Lost(LossReason::PlayerDeckExhausted))
        );
        // The first card was drawn, but no city was infected.
        assert_eq!(next_game.player().hand(), &[City::Paris]);
        assert!(next_game.board().is_clean());
        assert!(!transition
            .events
            .iter()
            .any(|event| matches!(event, Event::InfectionCardDrawn { .. })));
        assert_eq!(transition.message, "You lose: the player deck is empty.");
    }

    #[test]
    fn game_player_deck_runs_out_after_nine_turns() {
        let mut game = new_game();

        for _ in 0..9 {
            let transition = game.end_turn().unwrap();
            game = transition.game;
            if game.is_over() {
                // Too many outbreaks may happen first.
                assert_eq!(
                    game.outcome(),
                    Some(GameOutcome::Lost(LossReason::TooManyOutbreaks))
                );
                return;
            }
        }

        assert_eq!(game.card_dealer_state().player_deck_size, 0);
        let game = game.end_turn().unwrap().game;
        assert_eq!(
            game.outcome(),
            Some(GameOutcome::Lost(LossReason::PlayerDeckExhausted))
        );
    }

    #[test]
    fn game_end_turn_win_without_infections() {
        let rules = Rules {
            infections_per_turn: 0,
            ..Rules::default()
        };
        let mut game = Game::setup(rules, 42).unwrap().game;
        *game.get_mut_board() = Board::new(3);
        game.set_cured(true);

        let transition = game.end_turn().unwrap();
        assert_eq!(transition.game.outcome(), Some(GameOutcome::Won));
        assert_eq!(transition.events.last(), Some(&Event::GameWon));
    }

    #[test]
    fn game_cured_with_cubes_left_does_not_win() {
        let mut game = clean_game();
        game.set_cured(true);
        game.get_mut_board().set_cubes(City::Madrid, 1);

        let game = game.move_pawn(City::Chicago).unwrap().game;
        assert!(!game.is_over());

        let game = game.end_turn().unwrap().game;
        assert!(game.outcome() != Some(GameOutcome::Won));
    }

    // Tests for terminal states.

    #[test]
    fn game_over_rejects_every_action() {
        let mut game = with_hand(clean_game(), &[City::Paris, City::Madrid, City::Chicago]);
        game.get_mut_board().set_cubes(City::Atlanta, 1);
        game.phase = GamePhase::Done;
        game.outcome = Some(GameOutcome::Lost(LossReason::TooManyOutbreaks));

        let game_over = Err(String::from("The game is over."));
        assert_eq!(game.move_pawn(City::Chicago), game_over);
        assert_eq!(game.treat(), game_over);
        assert_eq!(game.cure(), game_over);
        assert_eq!(game.end_turn(), game_over);
    }

    #[test]
    fn game_rejects_actions_outside_of_action_phase() {
        let mut game = new_game();
        game.phase = GamePhase::Infect;

        assert_eq!(
            game.move_pawn(City::Chicago),
            Err(String::from("Cannot act during the infect phase."))
        );
        assert_eq!(
            game.end_turn(),
            Err(String::from("Cannot end the turn during the infect phase."))
        );
    }

    #[test]
    fn game_check_actions() {
        let game = with_hand(clean_game(), &[City::Paris, City::Madrid]);

        assert!(game.check_move(City::Chicago).is_ok());
        assert!(game.check_move(City::Paris).is_err());
        assert!(game.check_treat().is_err());
        assert!(game.check_cure().is_err());
        assert!(game.check_end_turn().is_ok());

        let game = with_hand(game, &[City::Chicago]);
        assert!(game.check_cure().is_ok());
    }

    #[test]
    fn game_cubes_never_exceed_limit_over_many_turns() {
        for seed in 0..20 {
            let mut game = Game::setup(Rules::default(), seed).unwrap().game;

            while !game.is_over() {
                let previous_outbreaks = game.outbreaks();
                game = game.end_turn().unwrap().game;

                assert!(game.outbreaks() >= previous_outbreaks);
                for city in City::iter() {
                    assert!(game.board().cubes(city) <= game.rules().max_cubes_per_city);
                }
            }
        }
    }
}
