use serde::Serialize;
use strum_macros::Display;

/// Phases of a turn, which act as states in the game's finite-state machine.
///
/// # JSON
/// Phases are serialized in snake_case.
#[derive(Clone, Copy, Debug, Display, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum GamePhase {
    /// The player spends their actions: moving, treating, curing.
    Action,
    /// Player cards are drawn into the hand.
    Draw,
    /// Infection cards are drawn and applied to the board.
    Infect,
    /// The game is won or lost. No actions can be taken at this point.
    Done,
}

/// Why a game was lost.
///
/// # JSON
/// Reasons are serialized in snake_case.
#[derive(Clone, Copy, Debug, Display, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LossReason {
    #[strum(serialize = "too many outbreaks")]
    TooManyOutbreaks,
    #[strum(serialize = "the player deck is empty")]
    PlayerDeckExhausted,
}

/// How a game ended.
///
/// # JSON
/// Serialized as `{"result": "won"}`, or `{"result": "lost", "reason": ...}`.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case", tag = "result", content = "reason")]
pub enum GameOutcome {
    Won,
    Lost(LossReason),
}
